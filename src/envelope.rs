//! Inbound request envelope.
//!
//! Mirrors the JSON the voice platform posts for each utterance. Only the
//! fields the router reads are modelled; everything else is ignored.
//! Callback invocations (deferred continuations of an earlier request) use the
//! same shape but carry a top-level `userId` and no `context`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level request envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,

    /// Set directly by callback invocations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,

    /// Interaction context; absent for callback invocations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,

    pub request: Request,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub session_id: Option<String>,

    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub request_type: String,

    #[serde(default)]
    pub request_id: Option<String>,

    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,

    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub value: Option<String>,
}

/// Coarse classification of the request type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Launch,
    Intent,
    Other,
}

impl RequestEnvelope {
    pub const LAUNCH_REQUEST: &'static str = "LaunchRequest";
    pub const INTENT_REQUEST: &'static str = "IntentRequest";

    pub fn request_type(&self) -> &str {
        &self.request.request_type
    }

    pub fn kind(&self) -> RequestKind {
        match self.request_type() {
            Self::LAUNCH_REQUEST => RequestKind::Launch,
            Self::INTENT_REQUEST => RequestKind::Intent,
            _ => RequestKind::Other,
        }
    }

    /// Intent name, only for intent requests.
    pub fn intent_name(&self) -> Option<&str> {
        if self.kind() != RequestKind::Intent {
            return None;
        }
        self.request.intent.as_ref().map(|intent| intent.name.as_str())
    }

    /// Value of the named slot, if the utterance filled it.
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.request
            .intent
            .as_ref()
            .and_then(|intent| intent.slots.get(name))
            .and_then(|slot| slot.value.as_deref())
    }

    pub fn session_user_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|session| session.user.as_ref())
            .and_then(|user| user.user_id.as_deref())
    }

    /// Build an intent request envelope, mainly for callbacks and tests.
    pub fn intent(name: impl Into<String>) -> Self {
        Self {
            version: Some("1.0".to_string()),
            request: Request {
                request_type: Self::INTENT_REQUEST.to_string(),
                intent: Some(Intent {
                    name: name.into(),
                    slots: HashMap::new(),
                }),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Build a launch request envelope.
    pub fn launch() -> Self {
        Self {
            version: Some("1.0".to_string()),
            request: Request {
                request_type: Self::LAUNCH_REQUEST.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_slot(mut self, name: &str, value: impl Into<String>) -> Self {
        if let Some(intent) = self.request.intent.as_mut() {
            intent.slots.insert(
                name.to_string(),
                Slot {
                    name: Some(name.to_string()),
                    value: Some(value.into()),
                },
            );
        }
        self
    }

    pub fn with_session_user(mut self, user_id: impl Into<String>) -> Self {
        self.session = Some(Session {
            session_id: None,
            user: Some(User {
                user_id: Some(user_id.into()),
            }),
        });
        self
    }

    pub fn with_direct_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }
}
