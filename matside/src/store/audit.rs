//! Audit sinks for pipeline transitions and bout results.
//!
//! Sinks are fire-and-forget: [`emit`] logs a failed delivery and returns,
//! and core state is never rolled back because an audit write failed.

use super::{StoreError, StoreResult};
use crate::{
    bout::{BoutId, BoutResult},
    pipeline::TransitionEvent,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Something worth an audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// A registration moved between pipeline stages
    StageChanged(TransitionEvent),
    /// A bout was closed
    BoutFinalized { bout_id: BoutId, result: BoutResult },
}

/// Receives audit events
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: AuditEvent) -> StoreResult<()>;
}

/// Deliver an event, logging (never propagating) a failure
pub async fn emit(sink: &dyn AuditSink, event: AuditEvent) {
    if let Err(e) = sink.record(event).await {
        log::warn!("Audit event dropped: {}", e);
    }
}

/// Writes each event as a JSON line at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAuditSink;

#[async_trait]
impl AuditSink for LogAuditSink {
    async fn record(&self, event: AuditEvent) -> StoreResult<()> {
        let line =
            serde_json::to_string(&event).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        log::info!(target: "matside::audit", "{line}");
        Ok(())
    }
}

/// Forwards events to an in-process receiver
#[derive(Debug, Clone)]
pub struct ChannelAuditSink {
    sender: mpsc::UnboundedSender<AuditEvent>,
}

impl ChannelAuditSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AuditEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl AuditSink for ChannelAuditSink {
    async fn record(&self, event: AuditEvent) -> StoreResult<()> {
        self.sender
            .send(event)
            .map_err(|_| StoreError::Unavailable("audit receiver closed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineStage;
    use chrono::Utc;
    use uuid::Uuid;

    fn stage_changed() -> AuditEvent {
        AuditEvent::StageChanged(TransitionEvent {
            registration_id: Uuid::new_v4(),
            from: PipelineStage::Registered,
            to: PipelineStage::WeighedIn,
            timestamp: Utc::now(),
        })
    }

    #[test]
    fn test_event_json_is_tagged() {
        let json = serde_json::to_value(stage_changed()).unwrap();
        assert_eq!(json["type"], "stage_changed");
        assert_eq!(json["from"], "registered");
        assert_eq!(json["to"], "weighed_in");
    }

    #[tokio::test]
    async fn test_channel_sink_forwards() {
        let (sink, mut receiver) = ChannelAuditSink::new();
        let event = stage_changed();
        emit(&sink, event.clone()).await;
        assert_eq!(receiver.recv().await, Some(event));
    }

    #[tokio::test]
    async fn test_emit_swallows_failures() {
        let (sink, receiver) = ChannelAuditSink::new();
        drop(receiver);
        assert!(sink.record(stage_changed()).await.is_err());
        // must not panic or propagate
        emit(&sink, stage_changed()).await;
    }
}
