//! Per-request identity context.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::envelope::RequestEnvelope;
use crate::error::SkillError;

/// Number of hex characters kept from the user id digest.
const SHORT_USER_ID_LEN: usize = 8;

/// Who initiated the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// A live user interaction.
    User,
    /// A deferred continuation with no interaction context.
    Callback,
}

impl Source {
    pub fn name(&self) -> &'static str {
        match self {
            Source::User => "user",
            Source::Callback => "callback",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Identity of the account behind one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub user_id: String,
    pub short_user_id: String,
    pub source: Source,
}

impl RequestContext {
    /// Derive the context from an inbound envelope.
    ///
    /// The direct `userId` wins over `session.user.userId`; a missing
    /// `context` marks the invocation as a callback.
    pub fn from_envelope(envelope: &RequestEnvelope) -> Result<Self, SkillError> {
        let user_id = envelope
            .user_id
            .as_deref()
            .or_else(|| envelope.session_user_id())
            .filter(|id| !id.is_empty())
            .ok_or(SkillError::MissingUserIdentity)?;

        let source = if envelope.context.is_some() {
            Source::User
        } else {
            Source::Callback
        };

        Ok(Self {
            user_id: user_id.to_string(),
            short_user_id: short_user_id(user_id),
            source,
        })
    }
}

/// Log-correlation form of a user id: a truncated SHA-256 hex digest.
///
/// Deterministic and not reversible; distinct users may collide.
pub fn short_user_id(user_id: &str) -> String {
    let digest = Sha256::digest(user_id.as_bytes());
    let mut short = hex::encode(digest);
    short.truncate(SHORT_USER_ID_LEN);
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_user_id() {
        let envelope = RequestEnvelope::launch()
            .with_direct_user("U1")
            .with_context(json!({}));
        let context = RequestContext::from_envelope(&envelope).unwrap();

        assert_eq!(context.user_id, "U1");
        assert_eq!(context.short_user_id, short_user_id("U1"));
        assert_eq!(context.short_user_id.len(), SHORT_USER_ID_LEN);
        assert_eq!(context.source, Source::User);

        let again = RequestContext::from_envelope(&envelope).unwrap();
        assert_eq!(again.short_user_id, context.short_user_id);
    }

    #[test]
    fn test_direct_user_id_preferred_over_session() {
        let envelope = RequestEnvelope::launch()
            .with_session_user("SESSION")
            .with_direct_user("DIRECT");
        let context = RequestContext::from_envelope(&envelope).unwrap();
        assert_eq!(context.user_id, "DIRECT");
    }

    #[test]
    fn test_session_user_without_context_is_callback() {
        let envelope = RequestEnvelope::intent("TurnIntent").with_session_user("U2");
        let context = RequestContext::from_envelope(&envelope).unwrap();

        assert_eq!(context.user_id, "U2");
        assert_eq!(context.source, Source::Callback);
    }

    #[test]
    fn test_missing_user_identity() {
        let envelope = RequestEnvelope::launch().with_context(json!({}));
        let err = RequestContext::from_envelope(&envelope).unwrap_err();
        assert!(matches!(err, SkillError::MissingUserIdentity));
    }

    #[test]
    fn test_short_user_id_hides_account_prefix() {
        let a = short_user_id("amzn1.ask.account.AAAA");
        let b = short_user_id("amzn1.ask.account.BBBB");
        assert_ne!(a, b);
        assert!(!a.contains("amzn1"));
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
