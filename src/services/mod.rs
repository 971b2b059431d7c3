//! Control service contract
//!
//! The thermostat, hot water and defaults services, together with the
//! repositories and strategies they are composed from, live outside this
//! crate. This module defines the seams the router talks to:
//!
//! - [`ThermostatService`], [`WaterService`], [`DefaultsService`]: one
//!   operation per user command, each returning an [`Output`] or a
//!   [`ServiceFailure`].
//! - [`ControlBackends`]: the constructors for every alternative
//!   implementation, used by the strategy selector and service factory.

pub mod factory;
mod output;

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::error::ServiceFailure;
use crate::logger::RequestLogger;

pub use factory::{ServiceFactory, ServiceKind, ServiceParts};
pub use output::{Card, CardImage, Messages, Output};

/// Result of a single control operation
pub type ServiceResult = Result<Output, ServiceFailure>;

/// Storage for thermostat state.
pub trait ThermostatRepository: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Policy deciding how long a manual temperature is held.
pub trait HoldStrategy: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Policy for applying a target temperature to the device.
pub trait SetTemperatureStrategy: Send + Sync {}

/// Generic object factory used by the services to create device clients.
pub trait ObjectFactory: Send + Sync {}

/// Value for a stored default.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Temperature(f64),
    Duration(String),
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::Temperature(t) => write!(f, "{}", t),
            DefaultValue::Duration(d) => write!(f, "{}", d),
        }
    }
}

/// Heating control.
#[async_trait]
pub trait ThermostatService: Send + Sync {
    async fn launch(&self) -> ServiceResult;
    async fn status(&self) -> ServiceResult;
    async fn turn_up(&self) -> ServiceResult;
    async fn turn_down(&self) -> ServiceResult;

    /// Hold `target` degrees, optionally for a spoken duration (e.g. "PT1H").
    async fn set_temperature(&self, target: f64, duration: Option<&str>) -> ServiceResult;
    async fn turn_on(&self, duration: Option<&str>) -> ServiceResult;
    async fn turn_off(&self) -> ServiceResult;
}

/// Hot water control.
#[async_trait]
pub trait WaterService: Send + Sync {
    async fn turn_on(&self, duration: Option<&str>) -> ServiceResult;
    async fn turn_off(&self) -> ServiceResult;
}

/// Per-user defaults (on/off temperatures, boost duration).
#[async_trait]
pub trait DefaultsService: Send + Sync {
    async fn set_default(&self, key: &str, value: DefaultValue) -> ServiceResult;
    async fn defaults(&self) -> ServiceResult;
}

/// Constructors for every backend implementation the router can select.
///
/// Each method builds a fresh instance; nothing is reused across requests.
/// Errors are reported as [`ServiceFailure`] and surface to the user as
/// construction failures.
pub trait ControlBackends: Send + Sync {
    fn default_repository(
        &self,
        logger: &RequestLogger,
    ) -> Result<Arc<dyn ThermostatRepository>, ServiceFailure>;

    fn dynamodb_repository(
        &self,
        logger: &RequestLogger,
    ) -> Result<Arc<dyn ThermostatRepository>, ServiceFailure>;

    fn default_hold_strategy(
        &self,
        logger: &RequestLogger,
        context: &RequestContext,
    ) -> Result<Arc<dyn HoldStrategy>, ServiceFailure>;

    fn aws_hold_strategy(
        &self,
        logger: &RequestLogger,
        context: &RequestContext,
    ) -> Result<Arc<dyn HoldStrategy>, ServiceFailure>;

    fn set_temperature_strategy(&self, logger: &RequestLogger) -> Arc<dyn SetTemperatureStrategy>;

    fn object_factory(&self, logger: &RequestLogger) -> Arc<dyn ObjectFactory>;

    fn thermostat_service(
        &self,
        parts: ServiceParts,
    ) -> Result<Box<dyn ThermostatService>, ServiceFailure>;

    fn water_service(&self, parts: ServiceParts) -> Result<Box<dyn WaterService>, ServiceFailure>;

    fn defaults_service(
        &self,
        parts: ServiceParts,
    ) -> Result<Box<dyn DefaultsService>, ServiceFailure>;
}
