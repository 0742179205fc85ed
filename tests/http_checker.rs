use std::time::Duration;

use tfh::http::{HttpCheck, HttpError, get_with_retry};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_endpoint_becomes_healthy_within_budget() {
    let mock_server = MockServer::start().await;

    // freshly provisioned instance: two 503s before the app is up
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("status: ok"))
        .mount(&mock_server)
        .await;

    let check = HttpCheck::new(format!("{}/health", mock_server.uri()))
        .with_body_substring("ok")
        .with_retries(5, Duration::from_millis(10));

    let body = get_with_retry(&check).await.unwrap();
    assert!(body.contains("status: ok"));
}

#[tokio::test]
async fn test_status_mismatch_without_retries() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let check = HttpCheck::new(mock_server.uri());
    let err = get_with_retry(&check).await.unwrap_err();
    match err {
        HttpError::UnexpectedStatus { status, .. } => assert_eq!(status, 404),
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_body_mismatch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("maintenance page"))
        .mount(&mock_server)
        .await;

    let check = HttpCheck::new(mock_server.uri()).with_body_substring("status: ok");
    let err = get_with_retry(&check).await.unwrap_err();
    assert!(matches!(err, HttpError::BodyMismatch { .. }));
}

#[tokio::test]
async fn test_retries_exhaust() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let check = HttpCheck::new(mock_server.uri()).with_retries(2, Duration::from_millis(10));
    let err = get_with_retry(&check).await.unwrap_err();
    match err {
        HttpError::RetriesExhausted { attempts, last, .. } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*last, HttpError::UnexpectedStatus { .. }));
        }
        other => panic!("expected RetriesExhausted, got {:?}", other),
    }
}
