//! Scoreboard operator console.
//!
//! Runs a single bout between the two athletes of a roster file: both are
//! enrolled in an in-memory event, walked to the mat, and the operator drives
//! the clock and the scores from stdin.

mod commands;
mod roster;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Error;
use ctrlc::set_handler;
use log::info;
use matside::{
    bout::{Bout, BoutError, BoutHandle, BoutResult, Side, TimerState},
    config::MatConfig,
    coordinator::{LiveBout, MatCoordinator},
    pipeline::{PipelineStage, RegistrationManager},
    store::{LogAuditSink, MemoryBoutStore, MemoryProfileStore, MemoryRegistrationStore, ProfileStore},
};
use pico_args::Arguments;
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use commands::{Command, parse_command};
use roster::Roster;

const HELP: &str = "\
Run a scoreboard console for one bout

USAGE:
  matside_console [OPTIONS]

OPTIONS:
  --roster     PATH        Roster JSON with two athletes  [default: roster.json]
  --duration   SECONDS     Bout length                    [default: env MATSIDE_BOUT_DURATION_SECS or 300]
  --event      UUID        Event id                       [default: random]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  MATSIDE_BOUT_DURATION_SECS   Default bout length in seconds
  MATSIDE_TICK_INTERVAL_MS     Clock tick period
  MATSIDE_FINAL_STRETCH_SECS   Seconds left when the warning shows
  MATSIDE_SESSION_INBOX        Command buffer per bout
  RUST_LOG                     Log filter (e.g., info)
";

const COMMANDS: &str = "\
Commands:
  start | pause                  Run or stop the clock
  reset                          Stop the clock and restore the bout length
  reset-scores                   Zero both score ledgers
  duration N|MM:SS               Set the bout length (clock stopped)
  time N|MM:SS                   Correct the remaining time (clock stopped)
  a|b points|adv|pen +N|-N       Adjust a score column
  finish a|b REASON [text...]    Record the result (submission, points, decision, dq, other)
  status                         Show the scoreboard
  help                           Show this list
  quit                           Leave without a result
";

struct Args {
    roster: PathBuf,
    duration: Option<u32>,
    event: Uuid,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        roster: pargs
            .opt_value_from_str("--roster")?
            .unwrap_or_else(|| PathBuf::from("roster.json")),
        duration: pargs.opt_value_from_str("--duration")?,
        event: pargs
            .opt_value_from_str("--event")?
            .unwrap_or_else(Uuid::new_v4),
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let mut config = MatConfig::from_env();
    if let Some(duration) = args.duration {
        config.default_bout_duration_secs = duration;
    }
    config.validate()?;

    let profiles = Roster::load(&args.roster)?.into_profiles()?;
    let names: Vec<String> = profiles.iter().map(|p| p.full_name.clone()).collect();

    let profile_store = Arc::new(MemoryProfileStore::new());
    let audit = Arc::new(LogAuditSink);
    let registrations = RegistrationManager::new(
        Arc::new(MemoryRegistrationStore::new()),
        profile_store.clone(),
        audit.clone(),
    );
    let coordinator = MatCoordinator::new(
        registrations,
        Arc::new(MemoryBoutStore::new()),
        audit,
        config.clone(),
    );

    info!("Event {}: enrolling {} athletes", args.event, profiles.len());
    let as_of = chrono::Utc::now().date_naive();
    let mut registration_ids = Vec::with_capacity(profiles.len());
    for profile in profiles {
        profile_store.put(profile.clone()).await?;
        let registration = coordinator
            .registrations()
            .enroll(profile.id, args.event, as_of)
            .await?;
        println!("{}: {}", profile.full_name, registration.category);

        for stage in [
            PipelineStage::WeighedIn,
            PipelineStage::WarmingUp,
            PipelineStage::CalledToMat,
        ] {
            coordinator
                .registrations()
                .advance(registration.id, stage)
                .await?;
        }
        registration_ids.push(registration.id);
    }

    let live = coordinator
        .open_bout(registration_ids[0], registration_ids[1])
        .await?;
    tokio::spawn(watch_clock(live.handle.clone(), config.final_stretch_secs));

    print_scoreboard(&live.handle.snapshot().await?, &names);
    print!("{COMMANDS}");

    let result = run_console(&coordinator, &live, &names).await?;

    let bout = live.close().await;
    match (result, bout) {
        (Some(result), _) => print_result(&result, &names),
        (None, Some(Bout {
            result: Some(result),
            ..
        })) => print_result(&result, &names),
        (None, Some(bout)) => {
            println!("Left without a result at {}", bout.timer.display());
        }
        (None, None) => println!("Session ended"),
    }

    Ok(())
}

/// Read commands until the bout is finished or the operator quits
async fn run_console(
    coordinator: &MatCoordinator,
    live: &LiveBout,
    names: &[String],
) -> Result<Option<BoutResult>, Error> {
    let handle = &live.handle;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Start => report_timer(handle.start().await),
            Command::Pause => report_timer(handle.pause().await),
            Command::Reset => report_timer(handle.reset().await),
            Command::Duration(seconds) => report_timer(handle.configure(seconds).await),
            Command::Time(seconds) => report_timer(handle.override_remaining(seconds).await),
            Command::ResetScores => match handle.reset_scores().await {
                Ok(()) => println!("Scores cleared"),
                Err(e) => println!("{}", e.client_message()),
            },
            Command::Adjust { side, field, delta } => {
                match handle.adjust_score(side, field, delta).await {
                    Ok(score) => println!("{side}: {score}"),
                    Err(e) => println!("{}", e.client_message()),
                }
            }
            Command::Finish {
                winner,
                reason,
                description,
            } => match coordinator
                .close_bout(live, winner, reason, description)
                .await
            {
                Ok(result) => return Ok(Some(result)),
                Err(e) => println!("{}", e.client_message()),
            },
            Command::Status => print_scoreboard(&handle.snapshot().await?, names),
            Command::Help => print!("{COMMANDS}"),
            Command::Quit => return Ok(None),
        }
    }

    Ok(None)
}

fn report_timer(result: Result<TimerState, BoutError>) {
    match result {
        Ok(timer) => {
            let state = if timer.running { "running" } else { "stopped" };
            println!("Clock {} ({state})", timer.display());
        }
        Err(e) => println!("{}", e.client_message()),
    }
}

fn print_scoreboard(bout: &Bout, names: &[String]) {
    println!("[A] {:<24} {}", names[0], bout.score_a);
    println!("[B] {:<24} {}", names[1], bout.score_b);
    let state = if bout.timer.running { "running" } else { "stopped" };
    println!("Clock {} ({state})", bout.timer.display());
}

fn print_result(result: &BoutResult, names: &[String]) {
    let winner = match result.winner {
        Side::A => &names[0],
        Side::B => &names[1],
    };
    match &result.other_description {
        Some(description) => println!("{winner} wins ({}: {description})", result.reason),
        None => println!("{winner} wins by {}", result.reason),
    }
    println!("Final: A {} | B {}", result.final_score_a, result.final_score_b);
}

/// Announce the closing seconds and the end of regulation time
async fn watch_clock(handle: BoutHandle, final_stretch_secs: u32) {
    let mut updates = handle.subscribe();
    let mut last = updates.borrow().timer;

    while updates.changed().await.is_ok() {
        let timer = updates.borrow_and_update().timer;
        if timer.remaining_seconds == last.remaining_seconds {
            last = timer;
            continue;
        }
        if timer.expired() && !last.expired() {
            println!("*** Time! ***");
        } else if timer.in_final_stretch(final_stretch_secs)
            && !last.in_final_stretch(final_stretch_secs)
        {
            println!("*** {} remaining ***", timer.display());
        }
        last = timer;
    }
}
