//! HTTP repository and submission pipeline tests

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gatecheck_client::ClientError;
use gatecheck_types::{Answer, CheckId, CheckSequence, Responses, Submission};

use crate::common::{CHECKS_PATH, api, mount_checks, posted_bodies, sample_checks_json};

#[tokio::test]
async fn fetch_decodes_unordered_checks() {
    let server = MockServer::start().await;
    mount_checks(&server, sample_checks_json()).await;

    let checks = api(&server, 0).fetch_checks().await.unwrap();

    assert_eq!(checks.len(), 4);
    assert_eq!(checks[0].id, CheckId::new("aaa"));
    let sequence = CheckSequence::from_unordered(checks);
    let ids: Vec<&str> = sequence.ids().map(CheckId::as_str).collect();
    assert_eq!(ids, ["ddd", "bbb", "ccc", "aaa"]);
}

#[tokio::test]
async fn fetch_retries_transient_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHECKS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount_checks(&server, sample_checks_json()).await;

    let checks = api(&server, 2).fetch_checks().await.unwrap();

    assert_eq!(checks.len(), 4);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn fetch_gives_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHECKS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = api(&server, 1).fetch_checks().await.unwrap_err();

    match err {
        ClientError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn fetch_does_not_retry_client_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHECKS_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = api(&server, 2).fetch_checks().await.unwrap_err();

    assert!(matches!(err, ClientError::Status { .. }));
    assert!(err.to_string().contains("(empty body)"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn fetch_rejects_malformed_body() {
    let server = MockServer::start().await;
    mount_checks(&server, json!({"checks": []})).await;

    let err = api(&server, 0).fetch_checks().await.unwrap_err();

    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn submit_posts_results_in_sequence_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHECKS_PATH))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let sequence = CheckSequence::from_unordered(
        serde_json::from_value(sample_checks_json()).unwrap(),
    );
    let mut responses = Responses::new();
    responses
        .record(&sequence, &CheckId::new("ddd"), Answer::Yes)
        .unwrap();
    responses
        .record(&sequence, &CheckId::new("bbb"), Answer::Yes)
        .unwrap();
    responses
        .record(&sequence, &CheckId::new("ccc"), Answer::No)
        .unwrap();

    api(&server, 0)
        .submit(&Submission::from_responses(&sequence, &responses))
        .await
        .unwrap();

    assert_eq!(
        posted_bodies(&server).await,
        vec![json!({
            "results": [
                {"checkId": "ddd", "result": "yes"},
                {"checkId": "bbb", "result": "yes"},
                {"checkId": "ccc", "result": "no"}
            ]
        })]
    );
}

#[tokio::test]
async fn submit_is_sent_once_even_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHECKS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let err = api(&server, 3)
        .submit(&Submission::default())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("500"));
    assert!(err.to_string().contains("database unavailable"));
    assert_eq!(posted_bodies(&server).await.len(), 1);
}
