//! Document source adapter for regwatch.
//!
//! Lists and fetches the raw JSON documents each regulatory source publishes
//! under its object-store prefix. The store itself sits behind the
//! [`ObjectStore`] trait so callers inject either the HTTP [`S3Client`] or the
//! in-memory [`MemoryStore`].

pub mod error;
pub mod memory;
pub mod s3;
pub mod source;
pub mod store;

pub use error::FetchError;
pub use memory::MemoryStore;
pub use s3::S3Client;
pub use source::{DocumentSource, HighestKey, LatestDocument, LatestSelector, ListingOrder};
pub use store::ObjectStore;

/// A JSON document exactly as the scraper stored it. No schema is assumed.
pub type RawDocument = serde_json::Value;
