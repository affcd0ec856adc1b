//! HTTP client for an S3-compatible object store.
//!
//! Uses path-style addressing (`{endpoint}/{bucket}/{key}`) and the
//! `ListObjectsV2` XML API. Requests are sent unsigned: the endpoint must
//! either allow anonymous reads or sit behind a signing proxy.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::{Client, StatusCode, Url};

use crate::error::FetchError;
use crate::store::ObjectStore;

/// Characters left unescaped in a path segment: the RFC 3986 unreserved set.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Upper bound on `ListObjectsV2` pages followed for a single prefix.
const MAX_LIST_PAGES: usize = 1_000;

/// One page of a `ListObjectsV2` response.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ListPage {
    pub keys: Vec<String>,
    pub is_truncated: bool,
    pub next_token: Option<String>,
}

/// Client for an S3-compatible object store.
pub struct S3Client {
    client: Client,
    endpoint: String,
}

impl S3Client {
    /// Creates a client for the store at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidEndpoint`] if `endpoint` is not an
    /// absolute http(s) URL, or [`FetchError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(endpoint: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let trimmed = endpoint.trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| FetchError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: trimmed.to_string(),
        })
    }

    /// Builds the `ListObjectsV2` URL for one page.
    fn list_url(&self, bucket: &str, prefix: &str, token: Option<&str>) -> Result<Url, FetchError> {
        let mut url = self.parse_url(&format!("{}/{}", self.endpoint, encode_segment(bucket)))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("list-type", "2");
            pairs.append_pair("prefix", prefix);
            if let Some(token) = token {
                pairs.append_pair("continuation-token", token);
            }
        }
        Ok(url)
    }

    /// Builds the object URL, percent-encoding each `/`-separated key segment.
    fn object_url(&self, bucket: &str, key: &str) -> Result<Url, FetchError> {
        let path = key
            .split('/')
            .map(encode_segment)
            .collect::<Vec<_>>()
            .join("/");
        self.parse_url(&format!(
            "{}/{}/{path}",
            self.endpoint,
            encode_segment(bucket)
        ))
    }

    fn parse_url(&self, raw: &str) -> Result<Url, FetchError> {
        Url::parse(raw).map_err(|e| FetchError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })
    }
}

impl ObjectStore for S3Client {
    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, FetchError> {
        let mut keys = Vec::new();
        let mut token: Option<String> = None;

        for page_number in 1..=MAX_LIST_PAGES {
            let url = self.list_url(bucket, prefix, token.as_deref())?;
            let response = self.client.get(url.clone()).send().await?;
            if !response.status().is_success() {
                return Err(FetchError::UnexpectedStatus {
                    status: response.status().as_u16(),
                    url: url.to_string(),
                });
            }
            let body = response.text().await?;
            let page = parse_list_page(&body)?;

            tracing::debug!(
                bucket,
                prefix,
                page = page_number,
                count = page.keys.len(),
                "listed object page"
            );
            keys.extend(page.keys);

            match page.next_token {
                Some(next) if page.is_truncated => token = Some(next),
                _ => return Ok(keys),
            }
        }

        Err(FetchError::PaginationLimit {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
            max_pages: MAX_LIST_PAGES,
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.object_url(bucket, key)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                key: key.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Parse a `ListObjectsV2` XML body.
///
/// Only `Contents/Key`, `IsTruncated` and `NextContinuationToken` are read;
/// everything else is ignored. Key text is taken verbatim since object keys
/// may begin or end with whitespace.
///
/// # Errors
///
/// Returns [`FetchError::Xml`] if the XML is malformed.
pub(crate) fn parse_list_page(xml: &str) -> Result<ListPage, FetchError> {
    let mut reader = Reader::from_str(xml);

    let mut page = ListPage::default();
    let mut in_contents = false;
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                if name == "Contents" {
                    in_contents = true;
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"Contents" {
                    in_contents = false;
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(quick_xml::Error::from)?.into_owned();
                match current_tag.as_str() {
                    "Key" if in_contents => page.keys.push(text),
                    "IsTruncated" if !in_contents => page.is_truncated = text.trim() == "true",
                    "NextContinuationToken" if !in_contents => {
                        page.next_token = Some(text.trim().to_string());
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FetchError::Xml(e)),
            _ => {}
        }
    }

    Ok(page)
}
