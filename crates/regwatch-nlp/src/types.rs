use std::fmt;

use serde::{Deserialize, Serialize};

/// Overall sentiment reported by the analytics service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
            Self::Mixed => "MIXED",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named entity found in a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Entity {
    pub text: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub begin_offset: Option<usize>,
    #[serde(default)]
    pub end_offset: Option<usize>,
}

/// The sentiment shown to the user: either the detected value or the
/// `Error` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Detected(Sentiment),
    Error,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detected(s) => s.fmt(f),
            Self::Error => f.write_str("Error"),
        }
    }
}

/// Sentiment plus the texts of the detected entities, in service order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentResult {
    pub sentiment: SentimentLabel,
    pub entities: Vec<String>,
}

impl SentimentResult {
    /// The sentinel returned when analysis fails: `("Error", [])`.
    #[must_use]
    pub fn error() -> Self {
        Self {
            sentiment: SentimentLabel::Error,
            entities: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.sentiment == SentimentLabel::Error
    }
}

/// One message from the conversational bot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}
