//! Conversion of raw per-category documents into [`Record`]s.

use regwatch_core::Category;
use regwatch_store::RawDocument;
use serde_json::Value;

use crate::record::Record;

/// Normalize one document for aggregation.
///
/// Only array-shaped documents contribute: each object element becomes a
/// [`Record`] tagged with `category`. Non-object elements are skipped with a
/// warning, and a document that is not an array yields no records.
#[must_use]
pub fn normalize_document(category: &Category, document: &RawDocument) -> Vec<Record> {
    let Value::Array(items) = document else {
        tracing::debug!(
            category = %category,
            kind = json_kind(document),
            "document is not a list of records; skipping for aggregation"
        );
        return Vec::new();
    };
    normalize_items(category, items.iter())
}

fn normalize_items<'a>(
    category: &Category,
    items: impl Iterator<Item = &'a Value>,
) -> Vec<Record> {
    items
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(fields) => Some(Record::new(category.clone(), fields.clone())),
            other => {
                tracing::warn!(
                    category = %category,
                    index,
                    kind = json_kind(other),
                    "skipping non-object element in document"
                );
                None
            }
        })
        .collect()
}

/// Union of field names across `records`, in first-seen order.
pub(crate) fn column_union<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for name in record.fields().keys() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.clone());
            }
        }
    }
    columns
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A single document prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayDocument {
    /// The leading records of an array-shaped document.
    Table(Vec<Record>),
    /// Any other document, passed through untouched.
    Opaque(RawDocument),
}

impl DisplayDocument {
    /// Prepare `document` for display, keeping at most `limit` leading
    /// elements when it is an array.
    #[must_use]
    pub fn from_raw(category: &Category, document: RawDocument, limit: usize) -> Self {
        match document {
            Value::Array(items) => Self::Table(normalize_items(category, items.iter().take(limit))),
            other => Self::Opaque(other),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        match self {
            Self::Table(records) => records,
            Self::Opaque(_) => &[],
        }
    }

    /// Column names of a table, minus `hidden`, in first-seen order.
    #[must_use]
    pub fn columns_without(&self, hidden: &[&str]) -> Vec<String> {
        let mut columns = column_union(self.records());
        columns.retain(|c| !hidden.contains(&c.as_str()));
        columns
    }

    /// `true` when some record in the table carries the field.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.records().iter().any(|r| r.fields().contains_key(name))
    }

    /// The present `content` texts of the table, in record order.
    #[must_use]
    pub fn content_texts(&self) -> Vec<String> {
        self.records()
            .iter()
            .filter_map(|r| r.content().map(std::borrow::Cow::into_owned))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn cftc() -> Category {
        Category::new("CFTC")
    }

    #[test]
    fn array_of_objects_becomes_tagged_records() {
        let doc = json!([
            {"title": "New Rule", "date": "2024-01-01"},
            {"title": "Market Brief", "date": "bad-date"}
        ]);
        let records = normalize_document(&cftc(), &doc);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.category() == &cftc()));
        assert_eq!(records[0].title().as_deref(), Some("New Rule"));
        assert_eq!(records[1].field("date"), Some(&json!("bad-date")));
    }

    #[test]
    fn single_object_is_skipped_for_aggregation() {
        let doc = json!({"title": "Summary page"});
        assert!(normalize_document(&cftc(), &doc).is_empty());
    }

    #[test]
    fn scalar_document_is_skipped() {
        assert!(normalize_document(&cftc(), &json!("just text")).is_empty());
        assert!(normalize_document(&cftc(), &Value::Null).is_empty());
    }

    #[test]
    fn non_object_elements_are_dropped() {
        let doc = json!([{"title": "kept"}, "stray", 7, null, {"title": "also kept"}]);
        let records = normalize_document(&cftc(), &doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].title().as_deref(), Some("also kept"));
    }

    #[test]
    fn empty_array_yields_no_records() {
        assert!(normalize_document(&cftc(), &json!([])).is_empty());
    }

    #[test]
    fn display_takes_leading_elements() {
        let doc = json!([
            {"title": "1", "content": "a"},
            {"title": "2"},
            {"title": "3", "content": "c"},
        ]);
        let display = DisplayDocument::from_raw(&cftc(), doc, 2);
        assert_eq!(display.records().len(), 2);
        assert_eq!(display.content_texts(), vec!["a".to_string()]);
    }

    #[test]
    fn display_passes_object_through_unmodified() {
        let doc = json!({"status": "maintenance", "items": 0});
        let display = DisplayDocument::from_raw(&cftc(), doc.clone(), 5);
        assert_eq!(display, DisplayDocument::Opaque(doc));
        assert!(display.records().is_empty());
    }

    #[test]
    fn columns_are_unioned_and_filtered() {
        let doc = json!([
            {"title": "1", "content": "a", "date": "2024-01-01"},
            {"title": "2", "url": "https://example.org"},
        ]);
        let display = DisplayDocument::from_raw(&cftc(), doc, 5);
        assert_eq!(
            display.columns_without(&["content"]),
            vec!["title", "date", "category", "url"]
        );
        assert!(display.has_column("content"));
        assert!(!display.has_column("summary"));
    }
}
