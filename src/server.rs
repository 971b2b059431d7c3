//! HTTP endpoint for the voice platform
//!
//! ## Usage
//!
//! ```bash
//! curl -X POST http://localhost:3000/skill \
//!   -H "Content-Type: application/json" \
//!   -d '{
//!     "version": "1.0",
//!     "session": { "user": { "userId": "amzn1.ask.account.TEST" } },
//!     "context": {},
//!     "request": { "type": "IntentRequest", "intent": { "name": "TempIntent" } }
//!   }'
//!
//! curl http://localhost:3000/health
//! ```

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::SkillConfig;
use crate::error::SkillError;
use crate::render;
use crate::response::ResponseEnvelope;
use crate::services::ControlBackends;
use crate::skill::Skill;
use crate::telemetry::init_tracing;
use crate::VERSION;

pub const BIND_ADDR_ENV: &str = "SKILL_BIND_ADDR";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Build the router serving `skill`.
pub fn create_skill_router<B>(skill: Arc<Skill<B>>) -> Router
where
    B: ControlBackends + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/skill", post(handle_skill::<B>))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(skill)
}

/// Load `.env`, install tracing and serve until the process is stopped.
pub async fn serve<B>(skill: Skill<B>) -> anyhow::Result<()>
where
    B: ControlBackends + 'static,
{
    dotenvy::dotenv().ok();
    init_tracing(SkillConfig::from_env().log_level);

    let addr = std::env::var(BIND_ADDR_ENV).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("SmartHeat skill {} listening on {}", VERSION, addr);

    axum::serve(listener, create_skill_router(Arc::new(skill))).await?;
    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

/// Always answers 200 with a speakable response, even for unreadable bodies.
async fn handle_skill<B>(State(skill): State<Arc<Skill<B>>>, body: Bytes) -> Json<ResponseEnvelope>
where
    B: ControlBackends + 'static,
{
    let response = match serde_json::from_slice::<Value>(&body) {
        Ok(value) => skill.handle_json(value).await,
        Err(e) => render::fallback(SkillError::Framework(format!(
            "unreadable request body: {}",
            e
        ))),
    };
    Json(response)
}
