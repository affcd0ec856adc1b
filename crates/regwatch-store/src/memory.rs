//! In-memory [`ObjectStore`] that keeps keys in insertion order.

use crate::error::FetchError;
use crate::store::ObjectStore;

#[derive(Debug, Clone)]
struct StoredObject {
    bucket: String,
    key: String,
    body: Vec<u8>,
}

/// Insertion-ordered object store held entirely in memory.
///
/// Listing returns keys in the order they were first inserted, which makes
/// "latest document" behaviour deterministic in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Vec<StoredObject>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `body` at `bucket/key`, replacing any previous body in place.
    pub fn insert(&mut self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) {
        let body = body.into();
        if let Some(existing) = self
            .objects
            .iter_mut()
            .find(|o| o.bucket == bucket && o.key == key)
        {
            existing.body = body;
            return;
        }
        self.objects.push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body,
        });
    }

    /// Store a JSON value serialized as UTF-8.
    pub fn insert_json(&mut self, bucket: &str, key: &str, value: &serde_json::Value) {
        self.insert(bucket, key, value.to_string());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectStore for MemoryStore {
    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, FetchError> {
        Ok(self
            .objects
            .iter()
            .filter(|o| o.bucket == bucket && o.key.starts_with(prefix))
            .map(|o| o.key.clone())
            .collect())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
        self.objects
            .iter()
            .find(|o| o.bucket == bucket && o.key == key)
            .map(|o| o.body.clone())
            .ok_or_else(|| FetchError::NotFound {
                key: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_in_insertion_order_filtered_by_prefix() {
        let mut store = MemoryStore::new();
        store.insert("b", "a/2.json", "[]");
        store.insert("b", "other/1.json", "[]");
        store.insert("b", "a/1.json", "[]");
        store.insert("c", "a/3.json", "[]");

        let keys = store.list_keys("b", "a/").await.unwrap();
        assert_eq!(keys, vec!["a/2.json", "a/1.json"]);
    }

    #[tokio::test]
    async fn reinsert_replaces_body_without_reordering() {
        let mut store = MemoryStore::new();
        store.insert("b", "k1", "old");
        store.insert("b", "k2", "x");
        store.insert("b", "k1", "new");

        assert_eq!(store.len(), 2);
        assert_eq!(store.list_keys("b", "").await.unwrap(), vec!["k1", "k2"]);
        assert_eq!(store.get_object("b", "k1").await.unwrap(), b"new".to_vec());
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get_object("b", "nope.json").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { ref key } if key == "nope.json"));
    }
}
