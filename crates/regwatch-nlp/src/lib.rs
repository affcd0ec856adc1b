//! Bridges to the managed language services used by regwatch.
//!
//! [`SentimentBridge`] turns a document text into a sentiment label and a list
//! of entity names over any [`TextAnalytics`] implementation, degrading to a
//! fixed sentinel when the service fails. [`ask_bot`] does the same for the
//! conversational bot.

pub mod analytics;
pub mod bot;
pub mod bridge;
pub mod comprehend;
pub mod error;
pub mod lex;
pub mod types;

pub use analytics::TextAnalytics;
pub use bot::{ask_bot, ConversationalBot};
pub use bridge::{inspect, DocumentInsight, SentimentBridge};
pub use comprehend::ComprehendClient;
pub use error::{AnalysisServiceError, BotError};
pub use lex::{LexClient, LexSession};
pub use types::{BotMessage, Entity, Sentiment, SentimentLabel, SentimentResult};
