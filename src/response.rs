//! Outbound response envelope and builder.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: Response,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<ResponseCard>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
}

impl OutputSpeech {
    pub fn text(&self) -> &str {
        match self {
            OutputSpeech::PlainText { text } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResponseCard {
    Simple {
        title: String,
        content: String,
    },
    Standard {
        title: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<ResponseCardImage>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseCardImage {
    pub small_image_url: String,
    pub large_image_url: String,
}

impl ResponseEnvelope {
    /// Spoken text, if any.
    pub fn speech(&self) -> Option<&str> {
        self.response.output_speech.as_ref().map(OutputSpeech::text)
    }

    pub fn reprompt_speech(&self) -> Option<&str> {
        self.response
            .reprompt
            .as_ref()
            .map(|reprompt| reprompt.output_speech.text())
    }

    pub fn card(&self) -> Option<&ResponseCard> {
        self.response.card.as_ref()
    }
}

/// Incrementally assembles a [`ResponseEnvelope`].
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    response: Response,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speak(mut self, text: impl Into<String>) -> Self {
        self.response.output_speech = Some(OutputSpeech::PlainText { text: text.into() });
        self
    }

    /// Set a reprompt; this keeps the session open.
    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.response.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::PlainText { text: text.into() },
        });
        self.response.should_end_session = Some(false);
        self
    }

    pub fn with_simple_card(
        mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.response.card = Some(ResponseCard::Simple {
            title: title.into(),
            content: content.into(),
        });
        self
    }

    pub fn with_standard_card(
        mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        small_image_url: impl Into<String>,
        large_image_url: impl Into<String>,
    ) -> Self {
        self.response.card = Some(ResponseCard::Standard {
            title: title.into(),
            text: text.into(),
            image: Some(ResponseCardImage {
                small_image_url: small_image_url.into(),
                large_image_url: large_image_url.into(),
            }),
        });
        self
    }

    pub fn get_response(self) -> ResponseEnvelope {
        ResponseEnvelope {
            version: "1.0".to_string(),
            response: self.response,
        }
    }
}
