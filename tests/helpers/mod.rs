//! Recording fakes for the external control services.
//!
//! Every constructor and operation appends a line to a shared call log so
//! tests can assert which backend was built and which operation ran.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use smartheat_skill::context::RequestContext;
use smartheat_skill::logger::RequestLogger;
use smartheat_skill::services::{
    Card, ControlBackends, DefaultValue, DefaultsService, HoldStrategy, ObjectFactory, Output,
    ServiceParts, ServiceResult, SetTemperatureStrategy, ThermostatRepository, ThermostatService,
    WaterService,
};
use smartheat_skill::{RequestEnvelope, ServiceFailure};

pub type CallLog = Arc<Mutex<Vec<String>>>;

#[derive(Clone)]
pub struct FakeBackends {
    calls: CallLog,
    output: Output,
    operation_failure: Option<ServiceFailure>,
    dynamodb_failure: Option<ServiceFailure>,
    panic_on_operation: bool,
}

impl Default for FakeBackends {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            output: Output::new("The heating is now on", status_card()),
            operation_failure: None,
            dynamodb_failure: None,
            panic_on_operation: false,
        }
    }
}

pub fn status_card() -> Card {
    Card::new("Status", "https://img.example/s.png", "https://img.example/l.png")
}

impl FakeBackends {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn failing_with(mut self, failure: ServiceFailure) -> Self {
        self.operation_failure = Some(failure);
        self
    }

    pub fn failing_dynamodb(mut self, failure: ServiceFailure) -> Self {
        self.dynamodb_failure = Some(failure);
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panic_on_operation = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn has_call(&self, call: &str) -> bool {
        self.calls().iter().any(|c| c == call)
    }

    /// Operations recorded on services (entries containing a '.').
    pub fn operations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.contains('.'))
            .collect()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn service(&self, kind: &str, parts: ServiceParts) -> FakeService {
        self.record(format!(
            "service:{} user={} source={} repository={} hold={}",
            kind,
            parts.context.user_id,
            parts.context.source,
            parts.repository.name(),
            parts.hold_strategy.name()
        ));
        FakeService {
            kind: kind.to_string(),
            calls: self.calls.clone(),
            output: self.output.clone(),
            failure: self.operation_failure.clone(),
            panic: self.panic_on_operation,
        }
    }
}

struct NamedBackend(&'static str);

impl ThermostatRepository for NamedBackend {
    fn name(&self) -> &str {
        self.0
    }
}

impl HoldStrategy for NamedBackend {
    fn name(&self) -> &str {
        self.0
    }
}

struct Opaque;

impl SetTemperatureStrategy for Opaque {}
impl ObjectFactory for Opaque {}

impl ControlBackends for FakeBackends {
    fn default_repository(
        &self,
        _logger: &RequestLogger,
    ) -> Result<Arc<dyn ThermostatRepository>, ServiceFailure> {
        self.record("repository:default");
        Ok(Arc::new(NamedBackend("default")))
    }

    fn dynamodb_repository(
        &self,
        _logger: &RequestLogger,
    ) -> Result<Arc<dyn ThermostatRepository>, ServiceFailure> {
        self.record("repository:dynamodb");
        if let Some(failure) = &self.dynamodb_failure {
            return Err(failure.clone());
        }
        Ok(Arc::new(NamedBackend("dynamodb")))
    }

    fn default_hold_strategy(
        &self,
        _logger: &RequestLogger,
        _context: &RequestContext,
    ) -> Result<Arc<dyn HoldStrategy>, ServiceFailure> {
        self.record("hold:default");
        Ok(Arc::new(NamedBackend("default")))
    }

    fn aws_hold_strategy(
        &self,
        _logger: &RequestLogger,
        _context: &RequestContext,
    ) -> Result<Arc<dyn HoldStrategy>, ServiceFailure> {
        self.record("hold:aws");
        Ok(Arc::new(NamedBackend("aws")))
    }

    fn set_temperature_strategy(&self, _logger: &RequestLogger) -> Arc<dyn SetTemperatureStrategy> {
        self.record("set_temperature_strategy");
        Arc::new(Opaque)
    }

    fn object_factory(&self, _logger: &RequestLogger) -> Arc<dyn ObjectFactory> {
        self.record("factory");
        Arc::new(Opaque)
    }

    fn thermostat_service(
        &self,
        parts: ServiceParts,
    ) -> Result<Box<dyn ThermostatService>, ServiceFailure> {
        Ok(Box::new(self.service("thermostat", parts)))
    }

    fn water_service(&self, parts: ServiceParts) -> Result<Box<dyn WaterService>, ServiceFailure> {
        Ok(Box::new(self.service("water", parts)))
    }

    fn defaults_service(
        &self,
        parts: ServiceParts,
    ) -> Result<Box<dyn DefaultsService>, ServiceFailure> {
        Ok(Box::new(self.service("defaults", parts)))
    }
}

struct FakeService {
    kind: String,
    calls: CallLog,
    output: Output,
    failure: Option<ServiceFailure>,
    panic: bool,
}

impl FakeService {
    fn respond(&self, operation: String) -> ServiceResult {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}.{}", self.kind, operation));
        if self.panic {
            panic!("device client crashed");
        }
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(self.output.clone()),
        }
    }
}

#[async_trait]
impl ThermostatService for FakeService {
    async fn launch(&self) -> ServiceResult {
        self.respond("launch()".to_string())
    }

    async fn status(&self) -> ServiceResult {
        self.respond("status()".to_string())
    }

    async fn turn_up(&self) -> ServiceResult {
        self.respond("turn_up()".to_string())
    }

    async fn turn_down(&self) -> ServiceResult {
        self.respond("turn_down()".to_string())
    }

    async fn set_temperature(&self, target: f64, duration: Option<&str>) -> ServiceResult {
        self.respond(format!("set_temperature({:?}, {:?})", target, duration))
    }

    async fn turn_on(&self, duration: Option<&str>) -> ServiceResult {
        self.respond(format!("turn_on({:?})", duration))
    }

    async fn turn_off(&self) -> ServiceResult {
        self.respond("turn_off()".to_string())
    }
}

#[async_trait]
impl WaterService for FakeService {
    async fn turn_on(&self, duration: Option<&str>) -> ServiceResult {
        self.respond(format!("turn_on({:?})", duration))
    }

    async fn turn_off(&self) -> ServiceResult {
        self.respond("turn_off()".to_string())
    }
}

#[async_trait]
impl DefaultsService for FakeService {
    async fn set_default(&self, key: &str, value: DefaultValue) -> ServiceResult {
        self.respond(format!("set_default({:?}, {})", key, value))
    }

    async fn defaults(&self) -> ServiceResult {
        self.respond("defaults()".to_string())
    }
}

/// An intent request from a live user session.
pub fn user_intent(name: &str) -> RequestEnvelope {
    RequestEnvelope::intent(name)
        .with_session_user("amzn1.ask.account.USER")
        .with_context(json!({ "System": {} }))
}

/// A launch request from a live user session.
pub fn user_launch() -> RequestEnvelope {
    RequestEnvelope::launch()
        .with_session_user("amzn1.ask.account.USER")
        .with_context(json!({ "System": {} }))
}
