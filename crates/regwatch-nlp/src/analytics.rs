use std::future::Future;

use crate::error::AnalysisServiceError;
use crate::types::{Entity, Sentiment};

/// Managed text-analytics service.
pub trait TextAnalytics {
    /// Overall sentiment of `text`.
    fn detect_sentiment(
        &self,
        text: &str,
        language_code: &str,
    ) -> impl Future<Output = Result<Sentiment, AnalysisServiceError>> + Send;

    /// Entities for each of `texts`, one list per input in input order.
    fn detect_entities(
        &self,
        texts: &[&str],
        language_code: &str,
    ) -> impl Future<Output = Result<Vec<Vec<Entity>>, AnalysisServiceError>> + Send;
}
