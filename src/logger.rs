//! Per-request logger handed to the service graph.
//!
//! Wraps `tracing` with two additions: a threshold taken from `LOG_LEVEL`, and
//! a prefix (the short user id) attached to every event as the `user` field so
//! all lines from one invocation can be correlated.

use std::fmt::Display;

use tracing::{debug, error, info, warn};

use crate::config::LogLevel;

#[derive(Debug, Clone, Default)]
pub struct RequestLogger {
    level: LogLevel,
    prefix: Option<String>,
}

impl RequestLogger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn user(&self) -> &str {
        self.prefix.as_deref().unwrap_or("-")
    }

    pub fn debug(&self, message: impl Display) {
        if self.level.allows(LogLevel::Debug) {
            debug!(user = %self.user(), "{}", message);
        }
    }

    pub fn info(&self, message: impl Display) {
        if self.level.allows(LogLevel::Info) {
            info!(user = %self.user(), "{}", message);
        }
    }

    pub fn warn(&self, message: impl Display) {
        if self.level.allows(LogLevel::Warn) {
            warn!(user = %self.user(), "{}", message);
        }
    }

    pub fn error(&self, message: impl Display) {
        error!(user = %self.user(), "{}", message);
    }
}
