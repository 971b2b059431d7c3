//! HTTP surface tests (requires `--features server`).

#![cfg(feature = "server")]

mod helpers;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use helpers::FakeBackends;
use serde_json::{json, Value};
use smartheat_skill::render::FALLBACK_SPEECH;
use smartheat_skill::server::create_skill_router;
use smartheat_skill::{ConfigSource, Skill, SkillConfig};
use tower::ServiceExt;

fn router(backends: FakeBackends) -> axum::Router {
    let skill = Skill::new(backends).with_config(ConfigSource::Fixed(SkillConfig::default()));
    create_skill_router(Arc::new(skill))
}

async fn post_skill(app: axum::Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/skill")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let response = router(FakeBackends::new())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], smartheat_skill::VERSION);
}

#[tokio::test]
async fn test_intent_request_round_trip() {
    let backends = FakeBackends::new();
    let request = json!({
        "version": "1.0",
        "session": { "user": { "userId": "amzn1.ask.account.HTTP" } },
        "context": { "System": {} },
        "request": {
            "type": "IntentRequest",
            "requestId": "req-1",
            "intent": {
                "name": "SetTempIntent",
                "slots": { "temp": { "name": "temp", "value": "21" } }
            }
        }
    });

    let (status, body) = post_skill(router(backends.clone()), request.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "1.0");
    assert_eq!(body["response"]["outputSpeech"]["type"], "PlainText");
    assert_eq!(body["response"]["outputSpeech"]["text"], "The heating is now on");
    assert_eq!(body["response"]["card"]["type"], "Standard");
    assert_eq!(
        backends.operations(),
        vec!["thermostat.set_temperature(21.0, None)".to_string()]
    );
}

#[tokio::test]
async fn test_unreadable_body_gets_fallback() {
    let (status, body) = post_skill(router(FakeBackends::new()), "not json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["outputSpeech"]["text"], FALLBACK_SPEECH);
    assert_eq!(
        body["response"]["reprompt"]["outputSpeech"]["text"],
        FALLBACK_SPEECH
    );
}
