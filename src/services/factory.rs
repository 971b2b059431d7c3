//! Service Factory
//!
//! Assembles the object graph for one invocation: logger, context, object
//! factory, the configured repository and hold strategy, and the fixed
//! set-temperature strategy. A new graph is built for every request.

use std::sync::Arc;

use crate::config::SkillConfig;
use crate::context::RequestContext;
use crate::error::SkillError;
use crate::logger::RequestLogger;
use crate::strategy::{select_hold_strategy, select_repository};

use super::{
    ControlBackends, DefaultsService, HoldStrategy, ObjectFactory, SetTemperatureStrategy,
    ThermostatRepository, ThermostatService, WaterService,
};

/// Which control service a handler needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Thermostat,
    Water,
    Defaults,
}

impl ServiceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Thermostat => "thermostat",
            ServiceKind::Water => "water",
            ServiceKind::Defaults => "defaults",
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Collaborators every control service is constructed from.
#[derive(Clone)]
pub struct ServiceParts {
    pub logger: RequestLogger,
    pub context: RequestContext,
    pub factory: Arc<dyn ObjectFactory>,
    pub repository: Arc<dyn ThermostatRepository>,
    pub hold_strategy: Arc<dyn HoldStrategy>,
    pub set_temperature_strategy: Arc<dyn SetTemperatureStrategy>,
}

impl std::fmt::Debug for ServiceParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceParts")
            .field("context", &self.context)
            .field("repository", &self.repository.name())
            .field("hold_strategy", &self.hold_strategy.name())
            .finish_non_exhaustive()
    }
}

/// Builds control services from configuration-selected backends.
pub struct ServiceFactory<'a> {
    backends: &'a dyn ControlBackends,
    config: SkillConfig,
}

impl<'a> ServiceFactory<'a> {
    pub fn new(backends: &'a dyn ControlBackends, config: SkillConfig) -> Self {
        Self { backends, config }
    }

    pub fn config(&self) -> &SkillConfig {
        &self.config
    }

    /// Select and construct the shared collaborators for one invocation.
    pub fn parts(
        &self,
        logger: RequestLogger,
        context: RequestContext,
    ) -> Result<ServiceParts, SkillError> {
        let repository = select_repository(self.config.repository, self.backends, &logger)?;
        let hold_strategy =
            select_hold_strategy(self.config.hold_strategy, self.backends, &logger, &context)?;
        let set_temperature_strategy = self.backends.set_temperature_strategy(&logger);
        let factory = self.backends.object_factory(&logger);

        Ok(ServiceParts {
            logger,
            context,
            factory,
            repository,
            hold_strategy,
            set_temperature_strategy,
        })
    }

    pub fn thermostat(
        &self,
        logger: RequestLogger,
        context: RequestContext,
    ) -> Result<Box<dyn ThermostatService>, SkillError> {
        let parts = self.parts(logger, context)?;
        log_creation(ServiceKind::Thermostat, &parts);
        self.backends
            .thermostat_service(parts)
            .map_err(|e| SkillError::construction("thermostat service", e))
    }

    pub fn water(
        &self,
        logger: RequestLogger,
        context: RequestContext,
    ) -> Result<Box<dyn WaterService>, SkillError> {
        let parts = self.parts(logger, context)?;
        log_creation(ServiceKind::Water, &parts);
        self.backends
            .water_service(parts)
            .map_err(|e| SkillError::construction("water service", e))
    }

    pub fn defaults(
        &self,
        logger: RequestLogger,
        context: RequestContext,
    ) -> Result<Box<dyn DefaultsService>, SkillError> {
        let parts = self.parts(logger, context)?;
        log_creation(ServiceKind::Defaults, &parts);
        self.backends
            .defaults_service(parts)
            .map_err(|e| SkillError::construction("defaults service", e))
    }
}

fn log_creation(kind: ServiceKind, parts: &ServiceParts) {
    parts.logger.debug(format!(
        "Creating {} service ({} repository, {} hold strategy)",
        kind,
        parts.repository.name(),
        parts.hold_strategy.name()
    ));
}
