//! The single service operation a handler resolves to.
//!
//! Each variant names the service it needs and carries already-parsed
//! arguments, so the service is only constructed once the request is known
//! to be well formed.

use crate::context::RequestContext;
use crate::error::SkillError;
use crate::logger::RequestLogger;
use crate::services::{DefaultValue, Output, ServiceFactory, ServiceKind};

#[derive(Debug, Clone, PartialEq)]
pub enum ThermostatCall {
    Launch,
    Status,
    TurnUp,
    TurnDown,
    SetTemperature {
        target: f64,
        duration: Option<String>,
    },
    TurnOn {
        duration: Option<String>,
    },
    TurnOff,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WaterCall {
    TurnOn { duration: Option<String> },
    TurnOff,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultsCall {
    Set { key: String, value: DefaultValue },
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    Thermostat(ThermostatCall),
    Water(WaterCall),
    Defaults(DefaultsCall),
}

impl ServiceCall {
    pub fn kind(&self) -> ServiceKind {
        match self {
            ServiceCall::Thermostat(_) => ServiceKind::Thermostat,
            ServiceCall::Water(_) => ServiceKind::Water,
            ServiceCall::Defaults(_) => ServiceKind::Defaults,
        }
    }

    /// Construct the required service and run exactly one operation on it.
    pub async fn invoke(
        self,
        factory: &ServiceFactory<'_>,
        logger: RequestLogger,
        context: RequestContext,
    ) -> Result<Output, SkillError> {
        let output = match self {
            ServiceCall::Thermostat(call) => {
                let service = factory.thermostat(logger, context)?;
                match call {
                    ThermostatCall::Launch => service.launch().await,
                    ThermostatCall::Status => service.status().await,
                    ThermostatCall::TurnUp => service.turn_up().await,
                    ThermostatCall::TurnDown => service.turn_down().await,
                    ThermostatCall::SetTemperature { target, duration } => {
                        service.set_temperature(target, duration.as_deref()).await
                    }
                    ThermostatCall::TurnOn { duration } => {
                        service.turn_on(duration.as_deref()).await
                    }
                    ThermostatCall::TurnOff => service.turn_off().await,
                }
            }
            ServiceCall::Water(call) => {
                let service = factory.water(logger, context)?;
                match call {
                    WaterCall::TurnOn { duration } => service.turn_on(duration.as_deref()).await,
                    WaterCall::TurnOff => service.turn_off().await,
                }
            }
            ServiceCall::Defaults(call) => {
                let service = factory.defaults(logger, context)?;
                match call {
                    DefaultsCall::Set { key, value } => service.set_default(&key, value).await,
                    DefaultsCall::List => service.defaults().await,
                }
            }
        };
        Ok(output?)
    }
}
