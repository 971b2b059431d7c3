//! Result payload returned by every successful control operation.

use serde::{Deserialize, Serialize};

/// Spoken message(s) plus the card to show on screen devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub messages: Messages,
    pub card: Card,
}

/// One message, or several to be spoken in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Messages {
    Single(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub image: CardImage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    pub small_image_url: String,
    pub large_image_url: String,
}

impl Output {
    pub fn new(messages: impl Into<Messages>, card: Card) -> Self {
        Self {
            messages: messages.into(),
            card,
        }
    }
}

impl Card {
    pub fn new(
        title: impl Into<String>,
        small_image_url: impl Into<String>,
        large_image_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            image: CardImage {
                small_image_url: small_image_url.into(),
                large_image_url: large_image_url.into(),
            },
        }
    }
}

impl From<String> for Messages {
    fn from(message: String) -> Self {
        Messages::Single(message)
    }
}

impl From<&str> for Messages {
    fn from(message: &str) -> Self {
        Messages::Single(message.to_string())
    }
}

impl From<Vec<String>> for Messages {
    fn from(messages: Vec<String>) -> Self {
        Messages::Many(messages)
    }
}

impl From<Vec<&str>> for Messages {
    fn from(messages: Vec<&str>) -> Self {
        Messages::Many(messages.into_iter().map(str::to_string).collect())
    }
}
