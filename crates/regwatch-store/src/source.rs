//! Category-aware access to the scraped documents.

use regwatch_core::{Category, SourceCatalog};

use crate::error::FetchError;
use crate::store::ObjectStore;
use crate::RawDocument;

/// Only keys with this suffix are treated as documents.
const DOCUMENT_SUFFIX: &str = ".json";

/// Chooses which listed key counts as the "latest" document for a category.
pub trait LatestSelector {
    fn select<'a>(&self, keys: &'a [String]) -> Option<&'a str>;
}

/// The last key in the store's listing order.
///
/// This is a positional convention: it is only chronological when the store
/// lists keys chronologically (for S3, when keys sort by date).
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingOrder;

impl LatestSelector for ListingOrder {
    fn select<'a>(&self, keys: &'a [String]) -> Option<&'a str> {
        keys.last().map(String::as_str)
    }
}

/// The lexicographically greatest key, for stores whose keys embed an
/// ISO-8601 timestamp but whose listing order is arbitrary.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestKey;

impl LatestSelector for HighestKey {
    fn select<'a>(&self, keys: &'a [String]) -> Option<&'a str> {
        keys.iter().max().map(String::as_str)
    }
}

/// The document chosen as most recent for a category.
#[derive(Debug, Clone)]
pub struct LatestDocument {
    pub category: Category,
    pub key: String,
    pub document: RawDocument,
}

/// Lists and fetches documents per [`Category`] from an injected store.
pub struct DocumentSource<S, L = ListingOrder> {
    store: S,
    catalog: SourceCatalog,
    selector: L,
}

impl<S: ObjectStore> DocumentSource<S> {
    #[must_use]
    pub fn new(store: S, catalog: SourceCatalog) -> Self {
        Self {
            store,
            catalog,
            selector: ListingOrder,
        }
    }
}

impl<S: ObjectStore, L: LatestSelector> DocumentSource<S, L> {
    /// Replace the latest-document policy.
    #[must_use]
    pub fn with_selector<M: LatestSelector>(self, selector: M) -> DocumentSource<S, M> {
        DocumentSource {
            store: self.store,
            catalog: self.catalog,
            selector,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    /// List the JSON document keys under `category`'s prefix, in store order.
    ///
    /// An empty listing is `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::UnknownCategory`] if the category is not in the
    /// catalog, or the store's error if listing fails.
    pub async fn list_documents(&self, category: &Category) -> Result<Vec<String>, FetchError> {
        let prefix = self
            .catalog
            .prefix_for(category)
            .ok_or_else(|| FetchError::UnknownCategory(category.to_string()))?;

        let keys: Vec<String> = self
            .store
            .list_keys(self.catalog.bucket(), prefix)
            .await?
            .into_iter()
            .filter(|k| k.ends_with(DOCUMENT_SUFFIX))
            .collect();

        tracing::debug!(category = %category, count = keys.len(), "listed documents");
        Ok(keys)
    }

    /// Fetch one document and decode it as UTF-8 JSON.
    ///
    /// # Errors
    ///
    /// - [`FetchError::NotFound`] if the key does not exist.
    /// - [`FetchError::Utf8`] / [`FetchError::Decode`] if the body is not
    ///   UTF-8 JSON.
    /// - Any transport error from the store.
    pub async fn fetch_document(&self, key: &str) -> Result<RawDocument, FetchError> {
        let bytes = self.store.get_object(self.catalog.bucket(), key).await?;
        decode_document(key, bytes)
    }

    /// Fetch the document the selector picks as latest for `category`.
    ///
    /// Returns `Ok(None)` when the category has no documents.
    ///
    /// # Errors
    ///
    /// Propagates listing and fetch failures.
    pub async fn latest_document(
        &self,
        category: &Category,
    ) -> Result<Option<LatestDocument>, FetchError> {
        let keys = self.list_documents(category).await?;
        let Some(key) = self.selector.select(&keys) else {
            return Ok(None);
        };
        let document = self.fetch_document(key).await?;
        Ok(Some(LatestDocument {
            category: category.clone(),
            key: key.to_string(),
            document,
        }))
    }
}

fn decode_document(key: &str, bytes: Vec<u8>) -> Result<RawDocument, FetchError> {
    let text = String::from_utf8(bytes).map_err(|e| FetchError::Utf8 {
        key: key.to_string(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| FetchError::Decode {
        key: key.to_string(),
        source: e,
    })
}
