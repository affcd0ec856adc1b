use std::path::PathBuf;

use crate::{load_sources, ConfigError, SourceCatalog};

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub sources_path: Option<PathBuf>,
    pub store_endpoint: String,
    pub analytics_endpoint: String,
    pub language_code: String,
    pub bot_endpoint: String,
    pub bot_id: Option<String>,
    pub bot_alias_id: Option<String>,
    pub bot_locale: String,
    pub bot_session_id: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub preview_limit: usize,
}

impl AppConfig {
    /// Resolve the source catalog: the YAML file when configured, otherwise
    /// the built-in jurisdictions.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configured sources file cannot be loaded.
    pub fn source_catalog(&self) -> Result<SourceCatalog, ConfigError> {
        match &self.sources_path {
            Some(path) => load_sources(path),
            None => Ok(SourceCatalog::builtin()),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("sources_path", &self.sources_path)
            .field("store_endpoint", &self.store_endpoint)
            .field("analytics_endpoint", &self.analytics_endpoint)
            .field("language_code", &self.language_code)
            .field("bot_endpoint", &self.bot_endpoint)
            .field("bot_id", &self.bot_id.as_ref().map(|_| "[redacted]"))
            .field("bot_alias_id", &self.bot_alias_id.as_ref().map(|_| "[redacted]"))
            .field("bot_locale", &self.bot_locale)
            .field("bot_session_id", &self.bot_session_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("preview_limit", &self.preview_limit)
            .finish()
    }
}
