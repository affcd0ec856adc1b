use std::borrow::Cow;

use chrono::NaiveDate;
use regwatch_core::Category;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::date::{parse_date, DateParseError};

/// Name of the provenance field injected into every record.
pub const CATEGORY_FIELD: &str = "category";

/// One normalized regulatory update.
///
/// Keeps every field of the source object in its original order, with
/// `category` injected (or overwritten) from the source the document was
/// fetched for. Absent and `null` fields both read as missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    category: Category,
    fields: Map<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new(category: Category, mut fields: Map<String, Value>) -> Self {
        fields.insert(
            CATEGORY_FIELD.to_string(),
            Value::String(category.to_string()),
        );
        Self { category, fields }
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Field value, or `None` when absent or `null`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// Field rendered as text. Strings are borrowed; other scalars and
    /// nested values are rendered as JSON.
    #[must_use]
    pub fn text_field(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.field(name)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<Cow<'_, str>> {
        self.text_field("title")
    }

    #[must_use]
    pub fn content(&self) -> Option<Cow<'_, str>> {
        self.text_field("content")
    }

    /// The unparsed `date` field.
    #[must_use]
    pub fn raw_date(&self) -> Option<&Value> {
        self.field("date")
    }

    /// The `date` field parsed to day granularity.
    ///
    /// # Errors
    ///
    /// Returns [`DateParseError::Missing`] when there is no date, or the
    /// parse failure otherwise. The raw field stays on the record either way.
    pub fn date(&self) -> Result<NaiveDate, DateParseError> {
        self.raw_date()
            .map_or(Err(DateParseError::Missing), parse_date)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn injects_category_after_existing_fields() {
        let record = Record::new(
            Category::new("CSA"),
            object(json!({"title": "Notice", "date": "2024-01-01"})),
        );
        let keys: Vec<&str> = record.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "date", "category"]);
        assert_eq!(record.field("category"), Some(&json!("CSA")));
    }

    #[test]
    fn overwrites_existing_category_in_place() {
        let record = Record::new(
            Category::new("FCA"),
            object(json!({"category": "spoofed", "title": "x"})),
        );
        let keys: Vec<&str> = record.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["category", "title"]);
        assert_eq!(record.field("category"), Some(&json!("FCA")));
        assert_eq!(record.category().as_str(), "FCA");
    }

    #[test]
    fn null_fields_read_as_missing() {
        let record = Record::new(Category::new("CFTC"), object(json!({"title": null})));
        assert!(record.field("title").is_none());
        assert!(record.title().is_none());
        assert!(record.content().is_none());
    }

    #[test]
    fn non_string_title_is_rendered_as_text() {
        let record = Record::new(Category::new("CFTC"), object(json!({"title": 2024})));
        assert_eq!(record.title().as_deref(), Some("2024"));
    }

    #[test]
    fn date_reports_missing_and_bad_values() {
        let missing = Record::new(Category::new("CFTC"), Map::new());
        assert_eq!(missing.date(), Err(DateParseError::Missing));

        let bad = Record::new(Category::new("CFTC"), object(json!({"date": "bad-date"})));
        assert!(matches!(bad.date(), Err(DateParseError::Unrecognized(_))));
        assert_eq!(bad.raw_date(), Some(&json!("bad-date")));
    }

    #[test]
    fn serializes_as_flat_object() {
        let record = Record::new(Category::new("CFTC"), object(json!({"title": "New Rule"})));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"title": "New Rule", "category": "CFTC"}));
    }
}
