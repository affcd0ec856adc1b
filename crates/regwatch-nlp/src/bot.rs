use std::future::Future;

use crate::error::BotError;
use crate::types::BotMessage;

/// Conversational bot that answers free-form questions.
pub trait ConversationalBot {
    fn recognize_text(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<BotMessage>, BotError>> + Send;
}

/// Ask `bot` a question and return the first reply.
///
/// Any failure, including an empty reply, becomes `"Error: {reason}"`.
pub async fn ask_bot<B: ConversationalBot>(bot: &B, text: &str) -> String {
    match bot.recognize_text(text).await.and_then(first_reply) {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "bot request failed");
            format!("Error: {e}")
        }
    }
}

fn first_reply(messages: Vec<BotMessage>) -> Result<String, BotError> {
    let first = messages.into_iter().next().ok_or(BotError::NoMessages)?;
    first
        .content
        .ok_or_else(|| BotError::Malformed("first message has no content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(Result<Vec<BotMessage>, &'static str>);

    impl ConversationalBot for Canned {
        async fn recognize_text(&self, _text: &str) -> Result<Vec<BotMessage>, BotError> {
            self.0
                .clone()
                .map_err(|m| BotError::Malformed(m.to_string()))
        }
    }

    fn message(content: &str) -> BotMessage {
        BotMessage {
            content: Some(content.to_string()),
            content_type: Some("PlainText".to_string()),
        }
    }

    #[tokio::test]
    async fn returns_first_message_content() {
        let bot = Canned(Ok(vec![message("Basel III applies."), message("Anything else?")]));
        assert_eq!(ask_bot(&bot, "What applies?").await, "Basel III applies.");
    }

    #[tokio::test]
    async fn empty_reply_is_an_error_string() {
        let bot = Canned(Ok(Vec::new()));
        assert_eq!(
            ask_bot(&bot, "hello").await,
            "Error: bot returned no messages"
        );
    }

    #[tokio::test]
    async fn failure_is_prefixed_with_error() {
        let bot = Canned(Err("session expired"));
        assert_eq!(
            ask_bot(&bot, "hello").await,
            "Error: malformed bot response: session expired"
        );
    }

    #[tokio::test]
    async fn message_without_content_is_an_error_string() {
        let bot = Canned(Ok(vec![BotMessage {
            content: None,
            content_type: Some("ImageResponseCard".to_string()),
        }]));
        assert!(ask_bot(&bot, "hello").await.starts_with("Error: "));
    }
}
