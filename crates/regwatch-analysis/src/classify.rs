//! Keyword-based language-structure classification.

use std::fmt;

use serde::Serialize;

/// Terms whose presence marks text as a compliance requirement.
pub const COMPLIANCE_KEYWORDS: &[&str] = &[
    "compliance",
    "requirement",
    "mandatory",
    "obligation",
    "rule",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageStructure {
    ComplianceRequirement,
    MarketUpdate,
}

impl LanguageStructure {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ComplianceRequirement => "Compliance Requirement",
            Self::MarketUpdate => "Market Update",
        }
    }
}

impl fmt::Display for LanguageStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify `text` by case-insensitive substring match against
/// [`COMPLIANCE_KEYWORDS`]. Missing or empty text is a market update.
///
/// Substring matching is intentional: "rules" and "ruled" both count.
#[must_use]
pub fn classify<'a>(text: impl Into<Option<&'a str>>) -> LanguageStructure {
    let Some(text) = text.into().filter(|t| !t.is_empty()) else {
        return LanguageStructure::MarketUpdate;
    };
    let lowered = text.to_lowercase();
    if COMPLIANCE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        LanguageStructure::ComplianceRequirement
    } else {
        LanguageStructure::MarketUpdate
    }
}
