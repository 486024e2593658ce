//! Unit tests for the engine crate.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gatecheck_client::{ChecksApi, HttpOptions, RetryConfig};
use gatecheck_types::{Answer, Check, CheckId, Direction, FocusTarget};

use super::*;

fn sample_source() -> (SampleRepository, CheckSource) {
    let repo = SampleRepository::builtin();
    (repo.clone(), CheckSource::Sample(repo))
}

fn http_source(server: &MockServer) -> CheckSource {
    let options = HttpOptions {
        timeout: Duration::from_secs(5),
        retry: RetryConfig::default().with_max_retries(0),
    };
    CheckSource::Http(ChecksApi::new(&format!("{}/api", server.uri()), options).unwrap())
}

async fn loaded_app(source: CheckSource) -> App {
    let mut app = App::new(source, UiOptions::default());
    app.wait_for_network().await;
    app
}

fn focus(app: &App) -> Option<FocusTarget> {
    app.form().and_then(|form| form.session().focus())
}

fn focused_id(app: &App) -> Option<CheckId> {
    match focus(app)? {
        FocusTarget::Check(index) => app
            .form()?
            .session()
            .sequence()
            .get(index)
            .map(|check| check.id.clone()),
        FocusTarget::Submit => None,
    }
}

#[tokio::test]
async fn starts_loading_then_shows_form() {
    let (_, source) = sample_source();
    let mut app = App::new(source, UiOptions::default());
    assert!(matches!(app.phase(), Phase::Loading));

    app.wait_for_network().await;

    let form = app.form().expect("form after load");
    assert_eq!(form.session().sequence().len(), 4);
    assert_eq!(focused_id(&app), Some(CheckId::new("ddd")));
}

#[tokio::test]
async fn load_failure_shows_error_and_reload_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/checks"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/checks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "x", "priority": 1, "description": "Only check"}
        ])))
        .mount(&server)
        .await;

    let mut app = loaded_app(http_source(&server)).await;
    match app.phase() {
        Phase::LoadFailed { message } => assert!(message.contains("404"), "{message}"),
        other => panic!("expected LoadFailed, got {}", other.name()),
    }

    app.reload();
    assert!(matches!(app.phase(), Phase::Loading));
    app.wait_for_network().await;
    assert_eq!(app.form().unwrap().session().sequence().len(), 1);
}

#[tokio::test]
async fn answering_walks_the_gate_in_priority_order() {
    let (_, source) = sample_source();
    let mut app = loaded_app(source).await;

    for expected in ["ddd", "bbb", "ccc", "aaa"] {
        assert_eq!(focused_id(&app), Some(CheckId::new(expected)));
        app.answer_focused(Answer::Yes).unwrap();
    }

    assert_eq!(focus(&app), Some(FocusTarget::Submit));
    assert!(app.form().unwrap().session().can_submit());
}

#[tokio::test]
async fn answering_no_opens_submit_early() {
    let (_, source) = sample_source();
    let mut app = loaded_app(source).await;

    app.answer_focused(Answer::No).unwrap();

    // Eligible after D=no: D, B, submit. Focus advanced to B.
    assert_eq!(focused_id(&app), Some(CheckId::new("bbb")));
    app.navigate(Direction::Forward).unwrap();
    assert_eq!(focus(&app), Some(FocusTarget::Submit));
}

#[tokio::test]
async fn navigation_wraps_and_click_moves_forward() {
    let (_, source) = sample_source();
    let mut app = loaded_app(source).await;
    app.answer_focused(Answer::Yes).unwrap();
    assert_eq!(focus(&app), Some(FocusTarget::Check(1)));

    app.click().unwrap();
    assert_eq!(focus(&app), Some(FocusTarget::Check(0)));

    app.navigate(Direction::Backward).unwrap();
    assert_eq!(focus(&app), Some(FocusTarget::Check(1)));
}

#[tokio::test]
async fn submit_sends_responses_in_sequence_order() {
    let (repo, source) = sample_source();
    let mut app = loaded_app(source).await;

    app.answer_focused(Answer::Yes).unwrap();
    app.answer_focused(Answer::Yes).unwrap();
    app.answer_focused(Answer::No).unwrap();
    app.navigate(Direction::Forward).unwrap();
    assert_eq!(focus(&app), Some(FocusTarget::Submit));

    app.activate();
    assert!(app.form().unwrap().is_submitting());
    app.wait_for_network().await;

    let Phase::Submitted(submission) = app.phase() else {
        panic!("expected Submitted, got {}", app.phase().name());
    };
    let ids: Vec<&str> = submission
        .results
        .iter()
        .map(|result| result.check_id.as_str())
        .collect();
    assert_eq!(ids, ["ddd", "bbb", "ccc"]);
    assert_eq!(repo.submitted(), vec![submission.clone()]);

    app.activate();
    assert!(app.should_quit());
}

#[tokio::test]
async fn enter_on_a_check_does_not_submit() {
    let (repo, source) = sample_source();
    let mut app = loaded_app(source).await;
    app.answer_focused(Answer::No).unwrap();

    app.activate();

    assert!(!app.form().unwrap().is_submitting());
    assert!(repo.submitted().is_empty());
}

#[tokio::test]
async fn submit_is_refused_while_gate_is_closed() {
    let (_, source) = sample_source();
    let mut app = loaded_app(source).await;
    app.answer_focused(Answer::Yes).unwrap();

    assert!(!app.submit());
    assert!(matches!(app.phase(), Phase::Form(_)));
}

#[tokio::test]
async fn failed_submission_keeps_form_and_allows_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/checks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "priority": 2, "description": "Second"},
            {"id": "b", "priority": 1, "description": "First"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/checks"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/checks"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut app = loaded_app(http_source(&server)).await;
    app.answer_focused(Answer::No).unwrap();

    assert!(app.submit());
    // Input is ignored while the request is in flight.
    app.answer_focused(Answer::Yes).unwrap();
    app.wait_for_network().await;

    let form = app.form().expect("form stays open");
    let banner = form.submit_error().expect("error banner");
    assert!(banner.contains("500"), "{banner}");
    assert!(banner.contains("boom"), "{banner}");
    assert_eq!(
        form.session().responses().get(&CheckId::new("b")),
        Some(Answer::No)
    );

    assert!(app.submit());
    app.wait_for_network().await;
    assert!(matches!(app.phase(), Phase::Submitted(_)));
}

#[tokio::test]
async fn empty_check_list_is_immediately_submittable() {
    let source = CheckSource::Sample(SampleRepository::with_checks(Vec::new()));
    let mut app = loaded_app(source).await;

    assert_eq!(focus(&app), Some(FocusTarget::Submit));
    app.activate();
    app.wait_for_network().await;

    let Phase::Submitted(submission) = app.phase() else {
        panic!("expected Submitted");
    };
    assert!(submission.is_empty());
}

#[tokio::test]
async fn input_before_load_is_ignored() {
    let (_, source) = sample_source();
    let mut app = App::new(source, UiOptions::default());

    app.navigate(Direction::Forward).unwrap();
    app.answer_focused(Answer::Yes).unwrap();
    assert!(!app.submit());
    assert!(matches!(app.phase(), Phase::Loading));
}

#[tokio::test]
async fn tick_drains_finished_work() {
    let (_, source) = sample_source();
    let mut app = App::new(source, UiOptions::default());

    for _ in 0..100 {
        app.tick();
        if app.form().is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert!(app.form().is_some());
    assert!(app.tick_count() > 0);
}

#[tokio::test]
async fn ties_keep_repository_order() {
    let source = CheckSource::Sample(SampleRepository::with_checks(vec![
        Check::new("first", 1, "One"),
        Check::new("second", 1, "Two"),
    ]));
    let app = loaded_app(source).await;

    let ids: Vec<&str> = app
        .form()
        .unwrap()
        .session()
        .sequence()
        .ids()
        .map(CheckId::as_str)
        .collect();
    assert_eq!(ids, ["first", "second"]);
}

#[tokio::test]
async fn status_message_clears_after_answer_and_navigation() {
    let (_, source) = sample_source();
    let mut app = loaded_app(source).await;

    app.set_status("Rejected answer");
    app.answer_focused(Answer::Yes).unwrap();
    assert_eq!(app.status_message(), None);

    app.set_status("Rejected answer");
    app.navigate(Direction::Backward).unwrap();
    assert_eq!(app.status_message(), None);
    assert_eq!(focus(&app), Some(FocusTarget::Check(0)));
}
