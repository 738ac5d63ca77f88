use jiff::Timestamp;
use tracing::{Level, event};
use uuid::Uuid;

use crate::errors::Error;

/// Correlates the log events of one refresh attempt. Each attempt gets its
/// own id so overlapping proactive and recovery refreshes stay tellable
/// apart in the logs.
#[derive(Clone, Debug)]
pub struct RefreshTelemetry {
    attempt_id: Uuid,
    context: String,
}

impl RefreshTelemetry {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            context: context.into(),
        }
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn emit_start(&self, at: Timestamp) {
        event!(
            Level::INFO,
            attempt_id = %self.attempt_id,
            context = %self.context,
            timestamp = %at,
            "refresh.start"
        );
    }

    pub fn emit_success(&self, expires_at: Timestamp, at: Timestamp) {
        event!(
            Level::INFO,
            attempt_id = %self.attempt_id,
            context = %self.context,
            timestamp = %at,
            expires_at = %expires_at,
            "refresh.success"
        );
    }

    /// A concurrent attempt already rotated the token; this one reuses it.
    pub fn emit_reused(&self) {
        event!(
            Level::INFO,
            attempt_id = %self.attempt_id,
            context = %self.context,
            "refresh.reused"
        );
    }

    pub fn emit_failure(&self, error: &Error, at: Timestamp) {
        event!(
            Level::ERROR,
            attempt_id = %self.attempt_id,
            context = %self.context,
            timestamp = %at,
            error = %error,
            "refresh.failure"
        );
    }

    /// The rotated token is live in memory but could not be written back.
    pub fn emit_persist_failed(&self, error: &Error) {
        event!(
            Level::WARN,
            attempt_id = %self.attempt_id,
            context = %self.context,
            error = %error,
            "refresh.persist_failed"
        );
    }
}
