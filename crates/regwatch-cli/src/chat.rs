//! `chat`: one question to the conversational bot.

use regwatch_core::AppConfig;
use regwatch_nlp::{ask_bot, LexClient, LexSession};

/// Build the bot session from config, or `None` when the bot is not configured.
pub(crate) fn bot_session(config: &AppConfig) -> Option<LexSession> {
    Some(LexSession {
        bot_id: config.bot_id.clone()?,
        bot_alias_id: config.bot_alias_id.clone()?,
        locale_id: config.bot_locale.clone(),
        session_id: config.bot_session_id.clone(),
    })
}

/// Ask the bot `question` and print its reply.
///
/// A blank question or unconfigured bot prints a warning and succeeds; bot
/// failures print as `Error: ...` replies.
///
/// # Errors
///
/// Returns an error if the bot client cannot be built.
pub(crate) async fn run_chat(config: &AppConfig, question: &str) -> anyhow::Result<()> {
    if question.trim().is_empty() {
        println!("warning: please enter a question");
        return Ok(());
    }
    let Some(session) = bot_session(config) else {
        println!("warning: chat is unavailable; set REGWATCH_BOT_ID and REGWATCH_BOT_ALIAS_ID");
        return Ok(());
    };

    let bot = LexClient::new(
        &config.bot_endpoint,
        session,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build bot client: {e}"))?;

    let reply = ask_bot(&bot, question).await;
    println!("Bot: {reply}");
    Ok(())
}
