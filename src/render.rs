//! Response Formatter
//!
//! Three renderings cover every outcome of a request:
//!
//! - [`say`]: a successful [`Output`] becomes speech plus a Standard card.
//! - [`report`]: an error caught at the handler boundary is spoken verbatim.
//! - [`fallback`]: anything else gets the generic "didn't understand" reply.

use std::fmt::Display;

use crate::logger::RequestLogger;
use crate::response::{ResponseBuilder, ResponseEnvelope};
use crate::services::{Messages, Output};

pub const FALLBACK_SPEECH: &str = "Sorry, I don't understand your command. Please say it again.";

/// Render a successful service output.
///
/// Multiple messages are spoken joined by a space and shown on the card one
/// per line; each is logged individually at debug level.
pub fn say(output: Output, logger: &RequestLogger) -> ResponseEnvelope {
    let Output { messages, card } = output;

    let (speech, text) = match messages {
        Messages::Many(messages) => {
            for message in &messages {
                logger.debug(message);
            }
            (messages.join(" "), messages.join("\n"))
        }
        Messages::Single(message) => {
            logger.debug(&message);
            (message.clone(), message)
        }
    };

    ResponseBuilder::new()
        .speak(speech)
        .with_standard_card(
            card.title,
            text,
            card.image.small_image_url,
            card.image.large_image_url,
        )
        .get_response()
}

/// Speak an error message as-is, without a card.
pub fn report(message: impl Display, logger: &RequestLogger) -> ResponseEnvelope {
    let message = message.to_string();
    logger.error(&message);
    ResponseBuilder::new().speak(message).get_response()
}

/// Generic reply for unmatched requests and failures outside any handler.
///
/// The underlying error is logged but never spoken.
pub fn fallback(error: impl Display) -> ResponseEnvelope {
    tracing::error!("Error handled: {}", error);
    ResponseBuilder::new()
        .speak(FALLBACK_SPEECH)
        .reprompt(FALLBACK_SPEECH)
        .get_response()
}
