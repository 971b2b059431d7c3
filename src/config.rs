//! Skill configuration.
//!
//! The environment carries three selectors: log verbosity, repository backend
//! and hold-strategy backend. They are gathered into an explicit
//! [`SkillConfig`] that is passed to the strategy selector, never read ad hoc
//! deeper in the call chain.

use std::str::FromStr;

use tracing::warn;

use crate::strategy::{HoldStrategyBackend, RepositoryBackend};

/// Verbosity of the per-request logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    #[default]
    Debug,
}

impl LogLevel {
    pub const ENV_VAR: &'static str = "LOG_LEVEL";

    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Whether a message at `level` passes this threshold.
    pub fn allows(&self, level: LogLevel) -> bool {
        level <= *self
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "" | "debug" | "trace" => Ok(LogLevel::Debug),
            other => Err(format!(
                "Unknown LOG_LEVEL '{}'. Valid values: error, warn, info, debug",
                other
            )),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration for one request's service graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkillConfig {
    /// Which thermostat repository to construct.
    pub repository: RepositoryBackend,

    /// Which hold strategy to construct.
    pub hold_strategy: HoldStrategyBackend,

    /// Threshold for the per-request logger.
    pub log_level: LogLevel,
}

impl SkillConfig {
    /// Read the configuration from the process environment.
    ///
    /// Unrecognised values fall back to the defaults with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            repository: parse_or_default(&lookup, RepositoryBackend::ENV_VAR),
            hold_strategy: parse_or_default(&lookup, HoldStrategyBackend::ENV_VAR),
            log_level: parse_or_default(&lookup, LogLevel::ENV_VAR),
        }
    }

    pub fn with_repository(mut self, repository: RepositoryBackend) -> Self {
        self.repository = repository;
        self
    }

    pub fn with_hold_strategy(mut self, hold_strategy: HoldStrategyBackend) -> Self {
        self.hold_strategy = hold_strategy;
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }
}

fn parse_or_default<T, F>(lookup: &F, key: &str) -> T
where
    T: FromStr + Default,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value.parse().unwrap_or_else(|e| {
            warn!("{}; using default", e);
            T::default()
        }),
        None => T::default(),
    }
}

/// Where the skill obtains its [`SkillConfig`] for each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigSource {
    /// Re-read the process environment for every request.
    #[default]
    Environment,

    /// Use a fixed configuration.
    Fixed(SkillConfig),
}

impl ConfigSource {
    pub fn resolve(&self) -> SkillConfig {
        match self {
            ConfigSource::Environment => SkillConfig::from_env(),
            ConfigSource::Fixed(config) => *config,
        }
    }
}
