//! HTTP client for an Amazon Lex V2-compatible bot runtime.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::bot::ConversationalBot;
use crate::error::{service_error_parts, BotError};
use crate::types::BotMessage;

/// RFC 3986 unreserved characters stay literal in path segments.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

/// Identifies one conversation with one deployed bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexSession {
    pub bot_id: String,
    pub bot_alias_id: String,
    pub locale_id: String,
    pub session_id: String,
}

#[derive(Serialize)]
struct RecognizeTextRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct RecognizeTextResponse {
    #[serde(default)]
    messages: Vec<BotMessage>,
}

pub struct LexClient {
    client: Client,
    endpoint: String,
    session: LexSession,
}

impl LexClient {
    /// Creates a client bound to `session` on the runtime at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::InvalidEndpoint`] if `endpoint` is not an absolute
    /// http(s) URL, or [`BotError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        endpoint: &str,
        session: LexSession,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, BotError> {
        let trimmed = endpoint.trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| BotError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BotError::InvalidEndpoint {
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
            endpoint: trimmed.to_string(),
            session,
        })
    }

    /// `RecognizeText` URL for the bound session.
    fn text_url(&self) -> String {
        let s = &self.session;
        format!(
            "{}/bots/{}/botAliases/{}/botLocales/{}/sessions/{}/text",
            self.endpoint,
            encode(&s.bot_id),
            encode(&s.bot_alias_id),
            encode(&s.locale_id),
            encode(&s.session_id),
        )
    }
}

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

impl ConversationalBot for LexClient {
    async fn recognize_text(&self, text: &str) -> Result<Vec<BotMessage>, BotError> {
        let response = self
            .client
            .post(self.text_url())
            .json(&RecognizeTextRequest { text })
            .send()
            .await?;

        let status = response.status();
        let error_type = response
            .headers()
            .get(ERROR_TYPE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match service_error_parts(error_type.as_deref(), &body) {
                Some((code, message)) => BotError::Service { code, message },
                None => BotError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let parsed: RecognizeTextResponse =
            serde_json::from_str(&body).map_err(|e| BotError::Malformed(e.to_string()))?;
        tracing::debug!(messages = parsed.messages.len(), "bot replied");
        Ok(parsed.messages)
    }
}
