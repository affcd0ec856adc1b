use serde::Deserialize;
use thiserror::Error;

/// Failure of a call to the text-analytics service.
#[derive(Debug, Error)]
pub enum AnalysisServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("analytics service returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("analytics service error {code}: {message}")]
    Service { code: String, message: String },

    #[error("malformed analytics response: {0}")]
    Malformed(String),

    #[error("invalid analytics endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Failure to get an answer from the conversational bot.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bot runtime returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("bot runtime error {code}: {message}")]
    Service { code: String, message: String },

    #[error("malformed bot response: {0}")]
    Malformed(String),

    #[error("bot returned no messages")]
    NoMessages,

    #[error("invalid bot endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

#[derive(Deserialize)]
struct ServiceErrorBody {
    #[serde(rename = "__type")]
    kind: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

/// Extract `(code, message)` from an AWS JSON error response.
///
/// The code comes from the body's `__type`, falling back to the
/// `x-amzn-ErrorType` header. Namespaces (`ns#Code`) and trailing
/// documentation URLs (`Code:http://...`) are stripped.
pub(crate) fn service_error_parts(
    error_type_header: Option<&str>,
    body: &str,
) -> Option<(String, String)> {
    let parsed: Option<ServiceErrorBody> = serde_json::from_str(body).ok();
    let (kind, message) = parsed.map_or((None, None), |b| (b.kind, b.message));

    let code = kind.as_deref().or(error_type_header).map(short_code)?;
    Some((code, message.unwrap_or_default()))
}

fn short_code(raw: &str) -> String {
    let without_ns = raw.rsplit('#').next().unwrap_or(raw);
    without_ns
        .split(':')
        .next()
        .unwrap_or(without_ns)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_from_body_type() {
        let parts = service_error_parts(
            None,
            r#"{"__type":"com.amazonaws.comprehend#TextSizeLimitExceededException","message":"too long"}"#,
        );
        assert_eq!(
            parts,
            Some((
                "TextSizeLimitExceededException".to_string(),
                "too long".to_string()
            ))
        );
    }

    #[test]
    fn code_from_header_when_body_has_none() {
        let parts = service_error_parts(
            Some("ResourceNotFoundException:http://internal.amazon.com/coral/"),
            r#"{"message":"bot not found"}"#,
        );
        assert_eq!(
            parts,
            Some((
                "ResourceNotFoundException".to_string(),
                "bot not found".to_string()
            ))
        );
    }

    #[test]
    fn no_code_yields_none() {
        assert_eq!(service_error_parts(None, "<html>bad gateway</html>"), None);
    }
}
