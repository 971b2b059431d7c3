//! Error handling for the skill router
//!
//! Two layers of errors exist. [`ServiceFailure`] is what the external control
//! services (and their constructors) hand back; it always carries a message
//! that is safe to speak to the user. [`SkillError`] is the router's own
//! taxonomy and decides which boundary catches a failure: the per-handler
//! boundary speaks the error text, the fallback handler never does.

use thiserror::Error;

/// Classification of a failed control operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service refused the request on business rules
    /// (e.g. target temperature outside the allowed range).
    Rejected,
    /// The backing device or store could not be reached.
    Unavailable,
    /// A slot value from the utterance could not be interpreted.
    InvalidSlot,
}

/// Failure reported by an external control service or backend constructor.
///
/// `message` is human readable and is spoken verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ServiceFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Rejected, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unavailable, message)
    }

    pub fn invalid_slot(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidSlot, message)
    }
}

/// Main error type for request handling
#[derive(Error, Debug)]
pub enum SkillError {
    /// Neither a direct nor a session user id was present on the envelope.
    #[error("Sorry, I couldn't tell which account this request is for.")]
    MissingUserIdentity,

    /// The selected repository, hold strategy or service failed to initialise.
    #[error("{source}")]
    ServiceConstruction {
        component: &'static str,
        #[source]
        source: ServiceFailure,
    },

    /// The invoked control operation failed.
    #[error("{0}")]
    ServiceOperation(#[from] ServiceFailure),

    /// No dispatch entry matched the request.
    #[error("No handler for request type '{request_type}'{}", intent_suffix(.intent_name))]
    UnmatchedRequest {
        request_type: String,
        intent_name: Option<String>,
    },

    /// Failure outside the per-handler boundary (malformed envelope, panic).
    #[error("Framework failure: {0}")]
    Framework(String),
}

fn intent_suffix(intent_name: &Option<String>) -> String {
    match intent_name {
        Some(name) => format!(" (intent '{}')", name),
        None => String::new(),
    }
}

impl SkillError {
    pub fn construction(component: &'static str, source: ServiceFailure) -> Self {
        SkillError::ServiceConstruction { component, source }
    }

    /// Whether this error may be spoken back to the user as-is.
    ///
    /// Unmatched and framework failures are only ever handled by the fallback.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            SkillError::MissingUserIdentity
                | SkillError::ServiceConstruction { .. }
                | SkillError::ServiceOperation(_)
        )
    }
}
