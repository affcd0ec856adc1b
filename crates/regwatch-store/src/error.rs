use thiserror::Error;

/// Failure to list or retrieve a document from the object store.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("document not found: {key}")]
    NotFound { key: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("document {key} is not valid UTF-8: {source}")]
    Utf8 {
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("document {key} is not valid JSON: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("listing {bucket}/{prefix} exceeded {max_pages} pages")]
    PaginationLimit {
        bucket: String,
        prefix: String,
        max_pages: usize,
    },

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("invalid store endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
