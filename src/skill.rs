//! Skill entry point
//!
//! [`Skill`] ties the dispatch table, service factory and response formatter
//! together. Each call to [`Skill::handle`] is an isolated invocation:
//!
//! ```text
//! envelope ──► select handler ──► context ──► service graph ──► one call ──► say / report
//!                   │
//!                   └── no match / panic ──► fallback
//! ```
//!
//! Errors from identity, construction and the service operation are spoken
//! back by [`render::report`]. Anything that escapes that boundary is caught
//! here and answered by [`render::fallback`].

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::debug;

use crate::config::ConfigSource;
use crate::context::RequestContext;
use crate::envelope::RequestEnvelope;
use crate::error::SkillError;
use crate::handlers::{self, HandlerAction, HandlerEntry};
use crate::logger::RequestLogger;
use crate::render;
use crate::response::ResponseEnvelope;
use crate::services::{ControlBackends, ServiceFactory};
use crate::VERSION;

/// A voice skill routing requests onto control services built from `B`.
pub struct Skill<B> {
    backends: B,
    config: ConfigSource,
}

impl<B: ControlBackends> Skill<B> {
    /// Create a skill reading its configuration from the environment.
    pub fn new(backends: B) -> Self {
        Self {
            backends,
            config: ConfigSource::Environment,
        }
    }

    pub fn with_config(mut self, config: ConfigSource) -> Self {
        self.config = config;
        self
    }

    pub fn backends(&self) -> &B {
        &self.backends
    }

    /// Handle a raw JSON body; malformed envelopes get the fallback reply.
    pub async fn handle_json(&self, body: serde_json::Value) -> ResponseEnvelope {
        match serde_json::from_value::<RequestEnvelope>(body) {
            Ok(envelope) => self.handle(&envelope).await,
            Err(e) => render::fallback(SkillError::Framework(format!(
                "malformed request envelope: {}",
                e
            ))),
        }
    }

    /// Handle one request. Always produces a response.
    pub async fn handle(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        match AssertUnwindSafe(self.dispatch(envelope)).catch_unwind().await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => render::fallback(e),
            Err(panic) => render::fallback(SkillError::Framework(panic_message(panic))),
        }
    }

    async fn dispatch(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope, SkillError> {
        let entry = handlers::select(envelope)?;
        debug!(
            handler = entry.name,
            request_type = envelope.request_type(),
            "Dispatching request"
        );
        Ok(self.report_on(entry, envelope).await)
    }

    /// Per-handler boundary: every error below is spoken back to the user.
    async fn report_on(
        &self,
        entry: &HandlerEntry,
        envelope: &RequestEnvelope,
    ) -> ResponseEnvelope {
        let config = self.config.resolve();
        let mut logger = RequestLogger::new(config.log_level);
        logger.debug(format!("SmartHeat Version: {}", VERSION));

        let context = RequestContext::from_envelope(envelope);
        if let Ok(context) = &context {
            logger = logger.with_prefix(context.short_user_id.as_str());
            logger.debug(format!("Creating context for source: {}...", context.source));
        }

        let factory = ServiceFactory::new(&self.backends, config);
        match self.run_handler(entry, envelope, &logger, context, factory).await {
            Ok(response) => response,
            Err(e) => render::report(e, &logger),
        }
    }

    async fn run_handler(
        &self,
        entry: &HandlerEntry,
        envelope: &RequestEnvelope,
        logger: &RequestLogger,
        context: Result<RequestContext, SkillError>,
        factory: ServiceFactory<'_>,
    ) -> Result<ResponseEnvelope, SkillError> {
        let call = match (entry.action)(envelope)? {
            HandlerAction::Respond(response) => return Ok(response),
            HandlerAction::Invoke(call) => call,
        };
        let context = context?;

        logger.debug(format!("Invoking {} service", call.kind()));
        let output = call.invoke(&factory, logger.clone(), context).await?;
        Ok(render::say(output, logger))
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panic during dispatch: {}", s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panic during dispatch: {}", s)
    } else {
        "panic during dispatch".to_string()
    }
}
