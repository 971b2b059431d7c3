//! SmartHeat Skill - voice request router for heating and hot water
//!
//! Receives voice platform events (launch, intents), routes each through a
//! static dispatch table to one operation on an external thermostat, water or
//! defaults service, and renders the outcome as speech plus a display card.
//!
//! ## Architecture
//! Request envelope -> Dispatch table -> Context + service graph ->
//! single service call -> Response formatter
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use smartheat_skill::{RequestEnvelope, Skill};
//!
//! let skill = Skill::new(my_backends);
//! let envelope = RequestEnvelope::intent("TempIntent").with_session_user("amzn1.ask.account.X");
//! let response = skill.handle(&envelope).await;
//! println!("{}", response.speech().unwrap_or_default());
//! ```

// Core error handling
pub mod error;

// Configuration and backend selection
pub mod config;
pub mod strategy;

// Platform request/response shapes
pub mod envelope;
pub mod response;

// Per-request context and logging
pub mod context;
pub mod logger;
pub mod telemetry;

// External control service contract and factory
pub mod services;

// Dispatch, rendering and the skill entry point
pub mod handlers;
pub mod render;
pub mod skill;

// HTTP endpoint (optional)
#[cfg(feature = "server")]
pub mod server;

pub use config::{ConfigSource, LogLevel, SkillConfig};
pub use context::{RequestContext, Source};
pub use envelope::RequestEnvelope;
pub use error::{FailureKind, ServiceFailure, SkillError};
pub use logger::RequestLogger;
pub use response::ResponseEnvelope;
pub use services::{ControlBackends, Output};
pub use skill::Skill;
pub use strategy::{HoldStrategyBackend, RepositoryBackend};

/// Crate version, logged at the start of every handled request.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
