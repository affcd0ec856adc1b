//! HTTP client for an Amazon Comprehend-compatible analytics endpoint.
//!
//! Speaks the AWS JSON 1.1 protocol: every operation is a `POST /` with the
//! operation named in the `X-Amz-Target` header. Requests are unsigned.

use std::time::Duration;

use reqwest::{header, Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::analytics::TextAnalytics;
use crate::error::{service_error_parts, AnalysisServiceError};
use crate::types::{Entity, Sentiment};

const TARGET_PREFIX: &str = "Comprehend_20171127";
const AMZ_JSON: &str = "application/x-amz-json-1.1";
const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DetectSentimentRequest<'a> {
    text: &'a str,
    language_code: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetectSentimentResponse {
    sentiment: Sentiment,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct BatchDetectEntitiesRequest<'a> {
    text_list: &'a [&'a str],
    language_code: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BatchDetectEntitiesResponse {
    #[serde(default)]
    result_list: Vec<BatchEntitiesItem>,
    #[serde(default)]
    error_list: Vec<BatchItemError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BatchEntitiesItem {
    index: usize,
    #[serde(default)]
    entities: Vec<Entity>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BatchItemError {
    index: usize,
    error_code: String,
    #[serde(default)]
    error_message: String,
}

/// Client for the sentiment and entity operations of the analytics service.
pub struct ComprehendClient {
    client: Client,
    endpoint: Url,
}

impl ComprehendClient {
    /// Creates a client for the service at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisServiceError::InvalidEndpoint`] if `endpoint` is not
    /// an absolute http(s) URL, or [`AnalysisServiceError::Http`] if the
    /// underlying `reqwest::Client` cannot be constructed.
    pub fn new(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AnalysisServiceError> {
        let normalised = format!("{}/", endpoint.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| AnalysisServiceError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AnalysisServiceError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: parsed,
        })
    }

    /// Invoke one JSON 1.1 operation and decode its response.
    async fn call<Req, Resp>(&self, operation: &str, request: &Req) -> Result<Resp, AnalysisServiceError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let body = serde_json::to_vec(request)
            .map_err(|e| AnalysisServiceError::Malformed(format!("{operation} request: {e}")))?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{operation}"))
            .header(header::CONTENT_TYPE, AMZ_JSON)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let error_type = response
            .headers()
            .get(ERROR_TYPE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(operation, status = status.as_u16(), "analytics call failed");
            return Err(match service_error_parts(error_type.as_deref(), &text) {
                Some((code, message)) => AnalysisServiceError::Service { code, message },
                None => AnalysisServiceError::UnexpectedStatus {
                    status: status.as_u16(),
                    body: text,
                },
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| AnalysisServiceError::Malformed(format!("{operation} response: {e}")))
    }
}

impl TextAnalytics for ComprehendClient {
    async fn detect_sentiment(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<Sentiment, AnalysisServiceError> {
        let response: DetectSentimentResponse = self
            .call(
                "DetectSentiment",
                &DetectSentimentRequest {
                    text,
                    language_code,
                },
            )
            .await?;
        Ok(response.sentiment)
    }

    async fn detect_entities(
        &self,
        texts: &[&str],
        language_code: &str,
    ) -> Result<Vec<Vec<Entity>>, AnalysisServiceError> {
        let response: BatchDetectEntitiesResponse = self
            .call(
                "BatchDetectEntities",
                &BatchDetectEntitiesRequest {
                    text_list: texts,
                    language_code,
                },
            )
            .await?;
        order_batch(texts.len(), response)
    }
}

/// Place each batch result at its input index.
fn order_batch(
    expected: usize,
    response: BatchDetectEntitiesResponse,
) -> Result<Vec<Vec<Entity>>, AnalysisServiceError> {
    if let Some(err) = response.error_list.into_iter().next() {
        return Err(AnalysisServiceError::Service {
            code: err.error_code,
            message: format!("item {}: {}", err.index, err.error_message),
        });
    }

    let mut slots: Vec<Option<Vec<Entity>>> = vec![None; expected];
    for item in response.result_list {
        let slot = slots.get_mut(item.index).ok_or_else(|| {
            AnalysisServiceError::Malformed(format!(
                "result index {} out of range for {expected} inputs",
                item.index
            ))
        })?;
        *slot = Some(item.entities);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.ok_or_else(|| AnalysisServiceError::Malformed(format!("no result for input {i}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> BatchDetectEntitiesResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = ComprehendClient::new("ftp://comprehend.local", 30, "test").err();
        assert!(matches!(
            err,
            Some(AnalysisServiceError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn batch_results_follow_input_index() {
        let ordered = order_batch(
            2,
            response(
                r#"{"ResultList":[
                    {"Index":1,"Entities":[{"Text":"FCA","Type":"ORGANIZATION"}]},
                    {"Index":0,"Entities":[]}
                ],"ErrorList":[]}"#,
            ),
        )
        .unwrap();
        assert!(ordered[0].is_empty());
        assert_eq!(ordered[1][0].text, "FCA");
    }

    #[test]
    fn batch_item_error_is_service_error() {
        let err = order_batch(
            1,
            response(
                r#"{"ResultList":[],"ErrorList":[{"Index":0,"ErrorCode":"INTERNAL_SERVER_ERROR","ErrorMessage":"boom"}]}"#,
            ),
        )
        .unwrap_err();
        assert!(
            matches!(err, AnalysisServiceError::Service { ref code, .. } if code == "INTERNAL_SERVER_ERROR")
        );
    }

    #[test]
    fn missing_batch_result_is_malformed() {
        let err = order_batch(1, response(r#"{"ResultList":[]}"#)).unwrap_err();
        assert!(matches!(err, AnalysisServiceError::Malformed(_)));
    }
}
