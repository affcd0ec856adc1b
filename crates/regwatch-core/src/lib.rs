//! Shared configuration and domain labels for regwatch.
//!
//! Holds the [`Category`] label, the source catalog that maps each category
//! to an object-store prefix, and the environment-driven [`AppConfig`].

pub mod app_config;
pub mod category;
pub mod config;
pub mod error;
pub mod sources;

pub use app_config::AppConfig;
pub use category::Category;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use sources::{load_sources, parse_sources, SourceCatalog, SourceEntry, SourcesFile};
