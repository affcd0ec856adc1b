//! Sentiment and entity analysis of a single document text.

use regwatch_analysis::{classify, LanguageStructure};
use serde::Serialize;

use crate::analytics::TextAnalytics;
use crate::error::AnalysisServiceError;
use crate::types::{SentimentLabel, SentimentResult};

/// Wraps a [`TextAnalytics`] service with a fixed language code.
pub struct SentimentBridge<A> {
    analytics: A,
    language_code: String,
}

impl<A: TextAnalytics> SentimentBridge<A> {
    #[must_use]
    pub fn new(analytics: A, language_code: impl Into<String>) -> Self {
        Self {
            analytics,
            language_code: language_code.into(),
        }
    }

    #[must_use]
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Detect sentiment, then entities, for `text`.
    ///
    /// Only entity texts are kept, in the order the service returned them.
    ///
    /// # Errors
    ///
    /// Returns the first [`AnalysisServiceError`] from either call, or
    /// [`AnalysisServiceError::Malformed`] if the entity batch is empty.
    pub async fn try_analyze(&self, text: &str) -> Result<SentimentResult, AnalysisServiceError> {
        let sentiment = self
            .analytics
            .detect_sentiment(text, &self.language_code)
            .await?;

        let entities = self
            .analytics
            .detect_entities(&[text], &self.language_code)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AnalysisServiceError::Malformed("entity batch returned no results".to_string())
            })?;

        Ok(SentimentResult {
            sentiment: SentimentLabel::Detected(sentiment),
            entities: entities.into_iter().map(|e| e.text).collect(),
        })
    }

    /// Like [`try_analyze`](Self::try_analyze), but any failure degrades to
    /// [`SentimentResult::error`] after a warning is logged.
    pub async fn analyze(&self, text: &str) -> SentimentResult {
        match self.try_analyze(text).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, chars = text.chars().count(), "text analysis failed");
                SentimentResult::error()
            }
        }
    }
}

/// Everything shown for one analysed document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInsight {
    pub sentiment: SentimentResult,
    pub structure: LanguageStructure,
}

/// Sentiment, entities and language structure for `text`.
pub async fn inspect<A: TextAnalytics>(bridge: &SentimentBridge<A>, text: &str) -> DocumentInsight {
    DocumentInsight {
        sentiment: bridge.analyze(text).await,
        structure: classify(text),
    }
}
