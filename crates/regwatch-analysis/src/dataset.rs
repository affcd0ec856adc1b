use regwatch_core::Category;
use regwatch_store::RawDocument;

use crate::normalize::{column_union, normalize_document};
use crate::record::Record;

/// Ordered records from every category for one analysis run.
///
/// Built fresh per request; nothing is cached between runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `document` and append its records. Returns how many were added.
    pub fn extend_from_document(&mut self, category: &Category, document: &RawDocument) -> usize {
        let records = normalize_document(category, document);
        let added = records.len();
        self.records.extend(records);
        added
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records tagged with `category`.
    #[must_use]
    pub fn count_for(&self, category: &Category) -> usize {
        self.records
            .iter()
            .filter(|r| r.category() == category)
            .count()
    }

    /// Union of field names across all records, in first-seen order.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        column_union(&self.records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
