use std::future::Future;

use crate::error::FetchError;

/// Key/value object store holding the scraped documents.
///
/// `list_keys` returns keys in whatever order the store yields them; callers
/// must not assume any sorting.
pub trait ObjectStore {
    /// List every key under `prefix` in `bucket`.
    fn list_keys(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<String>, FetchError>> + Send;

    /// Retrieve the raw bytes stored at `key`.
    ///
    /// Implementations return [`FetchError::NotFound`] for a missing key.
    fn get_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}
