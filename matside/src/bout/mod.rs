//! Match timer and scoring engine.
//!
//! This module provides:
//! - `TimerState`: countdown value with pure start/pause/tick/reset transitions
//! - `Score`: per-competitor ledger that never goes below zero
//! - `Bout`: clock plus both ledgers and the finalization protocol
//! - `BoutSession`: actor task that owns a live bout and drives its clock
//! - `ClockSource`: tick supply, real (`IntervalClock`) or manual (`ManualClock`)
//!
//! ## Example
//!
//! ```no_run
//! use matside::bout::{Bout, BoutSession, IntervalClock, ReasonCode, ScoreField, Side};
//! # use matside::pipeline::Registration;
//!
//! # async fn example(red: Registration, blue: Registration) -> Result<(), Box<dyn std::error::Error>> {
//! let bout = Bout::pair(&red, &blue, 300)?;
//! let (handle, _task) = BoutSession::spawn(bout, IntervalClock::per_second(), 32);
//!
//! handle.start().await?;
//! handle.adjust_score(Side::A, ScoreField::Points, 2).await?;
//! let result = handle
//!     .finalize(Some(Side::A), Some(ReasonCode::Points), None)
//!     .await?;
//! println!("{} wins by {}", result.winner, result.reason);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod engine;
pub mod errors;
pub mod result;
pub mod score;
pub mod session;
pub mod timer;

pub use clock::{ClockSource, IntervalClock, ManualClock, ManualTicker};
pub use engine::{Bout, BoutId};
pub use errors::BoutError;
pub use result::{BoutResult, ReasonCode};
pub use score::{Score, ScoreField, Side};
pub use session::{BoutCommand, BoutHandle, BoutSession, SessionTask};
pub use timer::{DEFAULT_DURATION_SECS, TimerState, format_clock};
