use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Does not load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parse and validate configuration from an env-var lookup function.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let require_http = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(raw.trim_end_matches('/').to_string())
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("'{raw}' is not an http(s) URL"),
            })
        }
    };

    let log_level = or_default("REGWATCH_LOG_LEVEL", "info");
    let sources_path = optional("REGWATCH_SOURCES_PATH").map(PathBuf::from);

    let store_endpoint = require_http(
        "REGWATCH_STORE_ENDPOINT",
        "https://s3.us-east-1.amazonaws.com",
    )?;
    let analytics_endpoint = require_http(
        "REGWATCH_ANALYTICS_ENDPOINT",
        "https://comprehend.us-east-1.amazonaws.com",
    )?;
    let bot_endpoint = require_http(
        "REGWATCH_BOT_ENDPOINT",
        "https://runtime-v2-lex.us-east-1.amazonaws.com",
    )?;

    let language_code = or_default("REGWATCH_LANGUAGE_CODE", "en");
    let bot_id = optional("REGWATCH_BOT_ID");
    let bot_alias_id = optional("REGWATCH_BOT_ALIAS_ID");
    let bot_locale = or_default("REGWATCH_BOT_LOCALE", "en_US");
    let bot_session_id =
        optional("REGWATCH_BOT_SESSION_ID").unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let request_timeout_secs = parse_u64("REGWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "REGWATCH_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("REGWATCH_USER_AGENT", "regwatch/0.1 (regulatory-monitoring)");
    let preview_limit = parse_usize("REGWATCH_PREVIEW_LIMIT", "5")?;

    Ok(AppConfig {
        log_level,
        sources_path,
        store_endpoint,
        analytics_endpoint,
        language_code,
        bot_endpoint,
        bot_id,
        bot_alias_id,
        bot_locale,
        bot_session_id,
        request_timeout_secs,
        user_agent,
        preview_limit,
    })
}
