//! Backend Selection
//!
//! Closed enums choosing between the default and the alternate implementation
//! of the thermostat repository and the hold strategy, plus the selector that
//! turns a choice into a constructed backend.

use std::str::FromStr;
use std::sync::Arc;

use crate::context::RequestContext;
use crate::error::SkillError;
use crate::logger::RequestLogger;
use crate::services::{ControlBackends, HoldStrategy, ThermostatRepository};

/// Thermostat repository selection (`THERMOSTAT_REPOSITORY`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositoryBackend {
    /// Repository shipped with the control library (default)
    #[default]
    Default,
    /// Persistent DynamoDB-backed repository
    DynamoDb,
}

impl RepositoryBackend {
    pub const ENV_VAR: &'static str = "THERMOSTAT_REPOSITORY";

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            RepositoryBackend::Default => "default",
            RepositoryBackend::DynamoDb => "dynamodb",
        }
    }
}

/// Hold strategy selection (`HOLD_STRATEGY`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldStrategyBackend {
    /// In-process hold strategy (default)
    #[default]
    Default,
    /// Hold strategy backed by AWS scheduled callbacks
    Aws,
}

impl HoldStrategyBackend {
    pub const ENV_VAR: &'static str = "HOLD_STRATEGY";

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            HoldStrategyBackend::Default => "default",
            HoldStrategyBackend::Aws => "aws",
        }
    }
}

/// Error type for parsing backend selectors
#[derive(Debug, thiserror::Error)]
#[error("Unknown {selector} '{value}'. Valid values: {valid}")]
pub struct ParseBackendError {
    selector: &'static str,
    value: String,
    valid: &'static str,
}

impl FromStr for RepositoryBackend {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" => Ok(RepositoryBackend::Default),
            "dynamodb" => Ok(RepositoryBackend::DynamoDb),
            other => Err(ParseBackendError {
                selector: Self::ENV_VAR,
                value: other.to_string(),
                valid: "default, dynamodb",
            }),
        }
    }
}

impl FromStr for HoldStrategyBackend {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" => Ok(HoldStrategyBackend::Default),
            "aws" => Ok(HoldStrategyBackend::Aws),
            other => Err(ParseBackendError {
                selector: Self::ENV_VAR,
                value: other.to_string(),
                valid: "default, aws",
            }),
        }
    }
}

impl std::fmt::Display for RepositoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::fmt::Display for HoldStrategyBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Construct the repository chosen by `backend`.
pub fn select_repository(
    backend: RepositoryBackend,
    backends: &dyn ControlBackends,
    logger: &RequestLogger,
) -> Result<Arc<dyn ThermostatRepository>, SkillError> {
    logger.debug(format!("Using {} thermostat repository", backend));
    let repository = match backend {
        RepositoryBackend::Default => backends.default_repository(logger),
        RepositoryBackend::DynamoDb => backends.dynamodb_repository(logger),
    };
    repository.map_err(|e| SkillError::construction("repository", e))
}

/// Construct the hold strategy chosen by `backend`.
pub fn select_hold_strategy(
    backend: HoldStrategyBackend,
    backends: &dyn ControlBackends,
    logger: &RequestLogger,
    context: &RequestContext,
) -> Result<Arc<dyn HoldStrategy>, SkillError> {
    logger.debug(format!("Using {} hold strategy", backend));
    let strategy = match backend {
        HoldStrategyBackend::Default => backends.default_hold_strategy(logger, context),
        HoldStrategyBackend::Aws => backends.aws_hold_strategy(logger, context),
    };
    strategy.map_err(|e| SkillError::construction("hold strategy", e))
}
