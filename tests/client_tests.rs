// Integration tests for loading the statistics document over HTTP and from disk

use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wrdash::{FetchError, RetryPolicy, StatsClient, StatsSource};

const SAMPLE: &str = include_str!("fixtures/stats.json");

fn url(server: &MockServer) -> StatsSource {
    StatsSource::parse(&format!("{}/shared/stats.json", server.uri()))
}

#[tokio::test]
async fn test_load_from_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shared/stats.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE))
        .expect(1)
        .mount(&server)
        .await;

    let document = StatsClient::new().load(&url(&server)).await.unwrap();
    assert_eq!(document.num_wrs, 38);
    assert_eq!(document.cc_histogram.len(), 12);
}

#[tokio::test]
async fn test_http_error_is_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = StatsClient::new().load(&url(&server)).await.unwrap_err();
    assert!(matches!(err, FetchError::NetworkFailure(ref msg) if msg.contains("404")));
}

#[tokio::test]
async fn test_bad_json_is_parse_failure_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = StatsClient::new().with_retry(RetryPolicy::new(3, Duration::from_millis(1)));
    let err = client.load(&url(&server)).await.unwrap_err();
    assert!(matches!(err, FetchError::ParseFailure(_)));
}

#[tokio::test]
async fn test_missing_field_is_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"ratio_replied_wrs": 0.5}"#),
        )
        .mount(&server)
        .await;

    let err = StatsClient::new().load(&url(&server)).await.unwrap_err();
    assert!(matches!(err, FetchError::ParseFailure(_)));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SAMPLE)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let timeout = Duration::from_millis(100);
    let client = StatsClient::new().with_timeout(timeout);
    let err = client.load(&url(&server)).await.unwrap_err();
    assert_eq!(err, FetchError::Timeout(timeout));
}

#[tokio::test]
async fn test_network_failure_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE))
        .expect(1)
        .mount(&server)
        .await;

    let client = StatsClient::new().with_retry(RetryPolicy::new(2, Duration::from_millis(10)));
    let document = client.load(&url(&server)).await.unwrap();
    assert_eq!(document.num_skipped_wrs, 4);
}

#[tokio::test]
async fn test_default_client_does_not_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    assert!(StatsClient::new().load(&url(&server)).await.is_err());
}

#[tokio::test]
async fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("stats.json");
    fs::write(&file, SAMPLE).unwrap();

    let source = StatsSource::parse(file.to_str().unwrap());
    assert!(matches!(source, StatsSource::File(_)));

    let document = StatsClient::new().load(&source).await.unwrap();
    assert_eq!(document.weekday_wr_histogram.get(&4), Some(&21));
}

#[tokio::test]
async fn test_empty_file_is_parse_failure() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("stats.json");
    fs::write(&file, "").unwrap();

    let err = StatsClient::new()
        .load(&StatsSource::File(file))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::ParseFailure(_)));
}
