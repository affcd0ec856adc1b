//! Integration tests for `S3Client` and `DocumentSource` using wiremock HTTP mocks.

use regwatch_core::{Category, SourceCatalog};
use regwatch_store::{DocumentSource, FetchError, ObjectStore, S3Client};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUCKET: &str = "cibcscraperresults";
const CFTC_PREFIX: &str = "regulatory-scraped-data/cibc_CFTC_data_class/";

fn test_client(base_url: &str) -> S3Client {
    S3Client::new(base_url, 30, "regwatch-test").expect("client construction should not fail")
}

fn listing(keys: &[String], next_token: Option<&str>) -> String {
    let contents: String = keys
        .iter()
        .map(|k| format!("<Contents><Key>{k}</Key><Size>42</Size></Contents>"))
        .collect();
    let truncation = match next_token {
        Some(token) => format!(
            "<IsTruncated>true</IsTruncated><NextContinuationToken>{token}</NextContinuationToken>"
        ),
        None => "<IsTruncated>false</IsTruncated>".to_string(),
    };
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <ListBucketResult xmlns=\"http://s3.amazonaws.com/doc/2006-03-01/\">\
         <Name>{BUCKET}</Name>{truncation}{contents}</ListBucketResult>"
    )
}

#[tokio::test]
async fn list_keys_follows_continuation_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/{BUCKET}")))
        .and(query_param("list-type", "2"))
        .and(query_param("prefix", CFTC_PREFIX))
        .and(query_param("continuation-token", "page-2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing(&[format!("{CFTC_PREFIX}c.json")], None)),
        )
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/{BUCKET}")))
        .and(query_param("list-type", "2"))
        .and(query_param("prefix", CFTC_PREFIX))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(
            &[
                format!("{CFTC_PREFIX}a.json"),
                format!("{CFTC_PREFIX}b.json"),
            ],
            Some("page-2"),
        )))
        .with_priority(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let keys = client
        .list_keys(BUCKET, CFTC_PREFIX)
        .await
        .expect("listing should succeed");

    assert_eq!(
        keys,
        vec![
            format!("{CFTC_PREFIX}a.json"),
            format!("{CFTC_PREFIX}b.json"),
            format!("{CFTC_PREFIX}c.json"),
        ]
    );
}

#[tokio::test]
async fn list_keys_surfaces_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/{BUCKET}")))
        .respond_with(ResponseTemplate::new(403).set_body_string("<Error><Code>AccessDenied</Code></Error>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_keys(BUCKET, CFTC_PREFIX).await.unwrap_err();
    assert!(matches!(err, FetchError::UnexpectedStatus { status: 403, .. }));
}

#[tokio::test]
async fn get_object_returns_body_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/{BUCKET}/{CFTC_PREFIX}latest.json")))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"title":"New Rule"}]"#))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let body = client
        .get_object(BUCKET, &format!("{CFTC_PREFIX}latest.json"))
        .await
        .expect("object should be returned");
    assert_eq!(body, br#"[{"title":"New Rule"}]"#.to_vec());
}

#[tokio::test]
async fn get_object_maps_404_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<Error><Code>NoSuchKey</Code></Error>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_object(BUCKET, "missing.json").await.unwrap_err();
    assert!(matches!(err, FetchError::NotFound { ref key } if key == "missing.json"));
}

#[tokio::test]
async fn document_source_reads_latest_document_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/{BUCKET}")))
        .and(query_param("prefix", CFTC_PREFIX))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(
            &[
                format!("{CFTC_PREFIX}2024-01-01.json"),
                format!("{CFTC_PREFIX}index.html"),
                format!("{CFTC_PREFIX}2024-01-02.json"),
            ],
            None,
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/{BUCKET}/{CFTC_PREFIX}2024-01-02.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"title": "Swap Reporting Rule", "date": "2024-01-02"}
        ])))
        .mount(&server)
        .await;

    let source = DocumentSource::new(test_client(&server.uri()), SourceCatalog::builtin());
    let category = Category::new("CFTC");

    let keys = source.list_documents(&category).await.unwrap();
    assert_eq!(keys.len(), 2, "non-JSON keys are filtered out");

    let latest = source
        .latest_document(&category)
        .await
        .unwrap()
        .expect("latest document should exist");
    assert_eq!(latest.key, format!("{CFTC_PREFIX}2024-01-02.json"));
    assert_eq!(latest.document[0]["title"], "Swap Reporting Rule");
}

#[tokio::test]
async fn document_source_reports_decode_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/{BUCKET}/broken.json")))
        .respond_with(ResponseTemplate::new(200).set_body_string("[{\"title\": "))
        .mount(&server)
        .await;

    let source = DocumentSource::new(test_client(&server.uri()), SourceCatalog::builtin());
    let err = source.fetch_document("broken.json").await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
}
