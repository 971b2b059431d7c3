//! Dispatch Table
//!
//! A static, ordered list of handler entries. Each entry pairs a
//! [`RequestMatcher`] (request kind plus, for intents, the intent names it
//! accepts) with an action that resolves the request into either a single
//! service call or a fixed reply.
//!
//! Intent names are unique across the table, so at most one entry matches a
//! request. A request no entry matches goes to the fallback handler.
//!
//! | Entry                         | Matches                                   |
//! |-------------------------------|-------------------------------------------|
//! | LaunchRequestHandler          | `LaunchRequest`                           |
//! | TempIntentHandler             | `TempIntent`                              |
//! | TurnUpIntentHandler           | `TurnUpIntent`                            |
//! | TurnDownIntentHandler         | `TurnDownIntent`                          |
//! | SetTempIntentHandler          | `SetTempIntent`                           |
//! | TurnIntentHandler             | `TurnIntent`                              |
//! | TurnWaterIntentHandler        | `TurnWaterIntent`                         |
//! | SetDefaultIntentHandler       | `SetDefaultTempIntent`                    |
//! | SetDefaultDurationIntentHandler | `SetDefaultDurationIntent`              |
//! | DefaultsIntentHandler         | `DefaultsIntent`                          |
//! | HelpIntentHandler             | `AMAZON.HelpIntent`                       |
//! | CancelAndStopIntentHandler    | `AMAZON.CancelIntent`, `AMAZON.StopIntent`|

pub mod actions;
pub mod calls;

use crate::envelope::{RequestEnvelope, RequestKind};
use crate::error::SkillError;
use crate::response::ResponseEnvelope;

pub use calls::{DefaultsCall, ServiceCall, ThermostatCall, WaterCall};

/// What a matched handler wants done.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerAction {
    /// Build the service graph and perform one operation.
    Invoke(ServiceCall),
    /// Reply without touching any service.
    Respond(ResponseEnvelope),
}

/// Request classification used by a handler entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMatcher {
    Launch,
    Intent(&'static [&'static str]),
}

impl RequestMatcher {
    pub fn matches(&self, envelope: &RequestEnvelope) -> bool {
        match self {
            RequestMatcher::Launch => envelope.kind() == RequestKind::Launch,
            RequestMatcher::Intent(names) => envelope
                .intent_name()
                .is_some_and(|name| names.iter().any(|candidate| *candidate == name)),
        }
    }
}

pub type Action = fn(&RequestEnvelope) -> Result<HandlerAction, SkillError>;

pub struct HandlerEntry {
    pub name: &'static str,
    pub matcher: RequestMatcher,
    pub action: Action,
}

impl std::fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("name", &self.name)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

const fn intent(
    name: &'static str,
    intents: &'static [&'static str],
    action: Action,
) -> HandlerEntry {
    HandlerEntry {
        name,
        matcher: RequestMatcher::Intent(intents),
        action,
    }
}

/// The dispatch table, in evaluation order.
pub static HANDLERS: &[HandlerEntry] = &[
    HandlerEntry {
        name: "LaunchRequestHandler",
        matcher: RequestMatcher::Launch,
        action: actions::launch,
    },
    intent("TempIntentHandler", &["TempIntent"], actions::status),
    intent("TurnUpIntentHandler", &["TurnUpIntent"], actions::turn_up),
    intent("TurnDownIntentHandler", &["TurnDownIntent"], actions::turn_down),
    intent("SetTempIntentHandler", &["SetTempIntent"], actions::set_temperature),
    intent("TurnIntentHandler", &["TurnIntent"], actions::turn),
    intent("TurnWaterIntentHandler", &["TurnWaterIntent"], actions::turn_water),
    intent(
        "SetDefaultIntentHandler",
        &["SetDefaultTempIntent"],
        actions::set_default_temperature,
    ),
    intent(
        "SetDefaultDurationIntentHandler",
        &["SetDefaultDurationIntent"],
        actions::set_default_duration,
    ),
    intent("DefaultsIntentHandler", &["DefaultsIntent"], actions::list_defaults),
    intent("HelpIntentHandler", &["AMAZON.HelpIntent"], actions::help),
    intent(
        "CancelAndStopIntentHandler",
        &["AMAZON.CancelIntent", "AMAZON.StopIntent"],
        actions::cancel_or_stop,
    ),
];

/// Find the first entry matching `envelope`.
pub fn select(envelope: &RequestEnvelope) -> Result<&'static HandlerEntry, SkillError> {
    HANDLERS
        .iter()
        .find(|entry| entry.matcher.matches(envelope))
        .ok_or_else(|| SkillError::UnmatchedRequest {
            request_type: envelope.request_type().to_string(),
            intent_name: envelope.intent_name().map(str::to_string),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ROUTES: &[(&str, &str)] = &[
        ("TempIntent", "TempIntentHandler"),
        ("TurnUpIntent", "TurnUpIntentHandler"),
        ("TurnDownIntent", "TurnDownIntentHandler"),
        ("SetTempIntent", "SetTempIntentHandler"),
        ("TurnIntent", "TurnIntentHandler"),
        ("TurnWaterIntent", "TurnWaterIntentHandler"),
        ("SetDefaultTempIntent", "SetDefaultIntentHandler"),
        ("SetDefaultDurationIntent", "SetDefaultDurationIntentHandler"),
        ("DefaultsIntent", "DefaultsIntentHandler"),
        ("AMAZON.HelpIntent", "HelpIntentHandler"),
        ("AMAZON.CancelIntent", "CancelAndStopIntentHandler"),
        ("AMAZON.StopIntent", "CancelAndStopIntentHandler"),
    ];

    #[test]
    fn test_each_intent_selects_exactly_one_handler() {
        for (intent_name, handler) in ROUTES {
            let envelope = RequestEnvelope::intent(*intent_name);
            let matching: Vec<_> = HANDLERS
                .iter()
                .filter(|entry| entry.matcher.matches(&envelope))
                .map(|entry| entry.name)
                .collect();
            assert_eq!(matching, vec![*handler], "intent {}", intent_name);
            assert_eq!(select(&envelope).unwrap().name, *handler);
        }
    }

    #[test]
    fn test_launch_selects_launch_handler() {
        let envelope = RequestEnvelope::launch();
        assert_eq!(select(&envelope).unwrap().name, "LaunchRequestHandler");
    }

    #[test]
    fn test_intent_names_are_unique() {
        let mut seen = HashSet::new();
        for entry in HANDLERS {
            if let RequestMatcher::Intent(names) = entry.matcher {
                for name in names {
                    assert!(seen.insert(*name), "duplicate intent {}", name);
                }
            }
        }
    }

    #[test]
    fn test_unknown_intent_is_unmatched() {
        let envelope = RequestEnvelope::intent("OrderPizzaIntent");
        match select(&envelope) {
            Err(SkillError::UnmatchedRequest {
                request_type,
                intent_name,
            }) => {
                assert_eq!(request_type, "IntentRequest");
                assert_eq!(intent_name.as_deref(), Some("OrderPizzaIntent"));
            }
            other => panic!("expected unmatched, got {:?}", other),
        }
    }

    #[test]
    fn test_session_ended_is_unmatched() {
        let mut envelope = RequestEnvelope::launch();
        envelope.request.request_type = "SessionEndedRequest".to_string();
        assert!(select(&envelope).is_err());
    }
}
