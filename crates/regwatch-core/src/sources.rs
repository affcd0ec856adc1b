use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Category, ConfigError};

const BUILTIN_BUCKET: &str = "cibcscraperresults";

const BUILTIN_SOURCES: &[(&str, &str)] = &[
    ("CFTC", "regulatory-scraped-data/cibc_CFTC_data_class/"),
    ("CSA", "regulatory-scraped-data/cibc_CSA_data_class/"),
    ("FCA", "regulatory-scraped-data/cibc_FCA_data_class/"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    pub category: Category,
    pub prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesFile {
    pub bucket: String,
    pub sources: Vec<SourceEntry>,
}

/// Validated mapping from [`Category`] to object-store prefix.
///
/// Iteration order is the order the sources were declared in.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    bucket: String,
    sources: Vec<SourceEntry>,
}

impl SourceCatalog {
    /// The three jurisdictions the scraper publishes: CFTC, CSA and FCA.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            bucket: BUILTIN_BUCKET.to_string(),
            sources: BUILTIN_SOURCES
                .iter()
                .map(|(category, prefix)| SourceEntry {
                    category: Category::new(*category),
                    prefix: (*prefix).to_string(),
                })
                .collect(),
        }
    }

    /// Build a catalog from a parsed sources file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the bucket is blank, no sources
    /// are declared, or a category or prefix is blank or duplicated.
    pub fn from_file(file: SourcesFile) -> Result<Self, ConfigError> {
        validate_sources(&file)?;
        Ok(Self {
            bucket: file.bucket,
            sources: file.sources,
        })
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.sources.iter().map(|s| &s.category)
    }

    #[must_use]
    pub fn entries(&self) -> &[SourceEntry] {
        &self.sources
    }

    #[must_use]
    pub fn prefix_for(&self, category: &Category) -> Option<&str> {
        self.sources
            .iter()
            .find(|s| &s.category == category)
            .map(|s| s.prefix.as_str())
    }

    /// Look up a category by name: exact match first, then ASCII
    /// case-insensitive.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Category> {
        self.categories()
            .find(|c| c.as_str() == name)
            .or_else(|| self.categories().find(|c| c.as_str().eq_ignore_ascii_case(name)))
    }
}

/// Load and validate the source catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourceCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_sources(&content)
}

/// Parse and validate a source catalog from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_sources(yaml: &str) -> Result<SourceCatalog, ConfigError> {
    let file: SourcesFile = serde_yaml::from_str(yaml)?;
    SourceCatalog::from_file(file)
}

fn validate_sources(file: &SourcesFile) -> Result<(), ConfigError> {
    if file.bucket.trim().is_empty() {
        return Err(ConfigError::Validation(
            "bucket must be non-empty".to_string(),
        ));
    }
    if file.sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one source must be declared".to_string(),
        ));
    }

    let mut seen_categories = HashSet::new();
    let mut seen_prefixes = HashSet::new();

    for source in &file.sources {
        if source.category.as_str().trim().is_empty() {
            return Err(ConfigError::Validation(
                "source category must be non-empty".to_string(),
            ));
        }
        if source.prefix.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{}' has an empty prefix",
                source.category
            )));
        }
        if !seen_categories.insert(source.category.as_str().to_ascii_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source category: '{}'",
                source.category
            )));
        }
        if !seen_prefixes.insert(source.prefix.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source prefix: '{}' (from category '{}')",
                source.prefix, source.category
            )));
        }
    }

    Ok(())
}
