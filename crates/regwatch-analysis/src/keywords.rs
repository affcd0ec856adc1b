//! Word-cloud style keyword frequencies over record titles.

use std::collections::HashMap;

use serde::Serialize;

use crate::dataset::Dataset;

/// Maximum number of keywords kept, matching the usual word-cloud cap.
pub const MAX_KEYWORDS: usize = 200;

/// English function words that carry no topic signal. Compared lowercase.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "else",
    "ever", "few", "for", "from", "further", "get", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in",
    "into", "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no",
    "nor", "not", "of", "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our",
    "ours", "ourselves", "out", "over", "own", "same", "shall", "she", "should", "since", "so",
    "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
    "why", "with", "would", "you", "your", "yours", "yourself", "yourselves",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Keyword counts ordered by frequency (descending), ties by first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordFrequency {
    keywords: Vec<KeywordCount>,
    token_count: usize,
}

impl KeywordFrequency {
    #[must_use]
    pub fn keywords(&self) -> &[KeywordCount] {
        &self.keywords
    }

    /// Number of tokens that survived filtering, before the top-N cut.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    #[must_use]
    pub fn top(&self, n: usize) -> &[KeywordCount] {
        &self.keywords[..n.min(self.keywords.len())]
    }

    /// Relative weights in `(0, 1]`, scaled so the most frequent keyword is `1.0`.
    #[must_use]
    pub fn weights(&self) -> Vec<(&str, f64)> {
        let Some(max) = self.keywords.first().map(|k| k.count) else {
            return Vec::new();
        };
        #[allow(clippy::cast_precision_loss)]
        let max = max as f64;
        self.keywords
            .iter()
            .map(|k| {
                #[allow(clippy::cast_precision_loss)]
                let weight = k.count as f64 / max;
                (k.keyword.as_str(), weight)
            })
            .collect()
    }
}

/// All present titles joined with single spaces. Missing titles add nothing.
#[must_use]
pub fn title_text(dataset: &Dataset) -> String {
    dataset
        .iter()
        .filter_map(crate::record::Record::title)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keyword frequencies over every title in `dataset`.
#[must_use]
pub fn keyword_frequency(dataset: &Dataset) -> KeywordFrequency {
    count_keywords(&title_text(dataset))
}

/// Tokenize `text` on whitespace and count keywords.
///
/// Tokens keep their case. Leading and trailing punctuation and a trailing
/// possessive `'s` are stripped; single characters, pure numbers and
/// stopwords are dropped.
#[must_use]
pub fn count_keywords(text: &str) -> KeywordFrequency {
    let mut order: Vec<KeywordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut token_count = 0;

    for token in text.split_whitespace().filter_map(clean_token) {
        token_count += 1;
        if let Some(&i) = index.get(token) {
            order[i].count += 1;
        } else {
            index.insert(token.to_string(), order.len());
            order.push(KeywordCount {
                keyword: token.to_string(),
                count: 1,
            });
        }
    }

    // Stable sort keeps first-appearance order among equal counts.
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(MAX_KEYWORDS);

    KeywordFrequency {
        keywords: order,
        token_count,
    }
}

fn clean_token(raw: &str) -> Option<&str> {
    let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric());
    let token = trimmed
        .strip_suffix("'s")
        .or_else(|| trimmed.strip_suffix("\u{2019}s"))
        .unwrap_or(trimmed);

    if token.chars().count() < 2 || token.chars().all(|c| c.is_numeric()) {
        return None;
    }
    if STOPWORDS.contains(&token.to_lowercase().as_str()) {
        return None;
    }
    Some(token)
}
