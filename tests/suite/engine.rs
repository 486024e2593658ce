//! End-to-end form flows against a mock checks API

use serde_json::json;
use wiremock::MockServer;

use gatecheck_engine::{App, CheckSource, Phase, UiOptions};
use gatecheck_types::{Answer, Direction, FocusTarget, GateStatus};

use crate::common::{api, mount_checks, mount_submit, posted_bodies, sample_checks_json};

async fn loaded_app(server: &MockServer) -> App {
    let mut app = App::new(CheckSource::Http(api(server, 0)), UiOptions::default());
    app.wait_for_network().await;
    assert!(
        matches!(app.phase(), Phase::Form(_)),
        "expected form, got {}",
        app.phase().name()
    );
    app
}

fn statuses(app: &App) -> Vec<GateStatus> {
    app.form().unwrap().session().statuses()
}

#[tokio::test]
async fn four_check_scenario_submits_prefix_only() {
    let server = MockServer::start().await;
    mount_checks(&server, sample_checks_json()).await;
    mount_submit(&server, 200).await;
    let mut app = loaded_app(&server).await;

    assert_eq!(
        statuses(&app),
        [
            GateStatus::Active,
            GateStatus::Disabled,
            GateStatus::Disabled,
            GateStatus::Disabled
        ]
    );

    app.answer_focused(Answer::Yes).unwrap();
    app.answer_focused(Answer::Yes).unwrap();
    app.answer_focused(Answer::No).unwrap();

    // A "no" opens the submit gate; focus moved on to the last check.
    assert_eq!(statuses(&app)[3], GateStatus::Active);
    assert!(app.form().unwrap().session().can_submit());
    assert_eq!(
        app.form().unwrap().session().focus(),
        Some(FocusTarget::Check(3))
    );

    app.navigate(Direction::Forward).unwrap();
    assert_eq!(
        app.form().unwrap().session().focus(),
        Some(FocusTarget::Submit)
    );
    app.activate();
    app.wait_for_network().await;

    assert!(matches!(app.phase(), Phase::Submitted(_)));
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
async fn revising_an_answer_drops_later_ones() {
    let server = MockServer::start().await;
    mount_checks(&server, sample_checks_json()).await;
    let mut app = loaded_app(&server).await;

    for _ in 0..4 {
        app.answer_focused(Answer::Yes).unwrap();
    }
    assert_eq!(app.form().unwrap().session().answered_count(), 4);

    // Back from submit to the last check, then up to the second.
    app.navigate(Direction::Backward).unwrap();
    app.navigate(Direction::Backward).unwrap();
    app.navigate(Direction::Backward).unwrap();
    assert_eq!(
        app.form().unwrap().session().focus(),
        Some(FocusTarget::Check(1))
    );
    app.answer_focused(Answer::Yes).unwrap();

    let session = app.form().unwrap().session();
    assert_eq!(session.answered_count(), 2);
    assert_eq!(
        statuses(&app),
        [
            GateStatus::Completed,
            GateStatus::Completed,
            GateStatus::Active,
            GateStatus::Disabled
        ]
    );
    assert!(!app.form().unwrap().session().can_submit());
}

#[tokio::test]
async fn rejected_submission_keeps_answers() {
    let server = MockServer::start().await;
    mount_checks(&server, sample_checks_json()).await;
    mount_submit(&server, 422).await;
    let mut app = loaded_app(&server).await;

    app.answer_focused(Answer::No).unwrap();
    assert!(app.submit());
    app.wait_for_network().await;

    let form = app.form().expect("still on the form");
    assert!(form.submit_error().unwrap().contains("422"));
    assert_eq!(form.session().answered_count(), 1);
    assert_eq!(posted_bodies(&server).await.len(), 1);
}

#[tokio::test]
async fn empty_repository_goes_straight_to_submit() {
    let server = MockServer::start().await;
    mount_checks(&server, json!([])).await;
    mount_submit(&server, 200).await;
    let mut app = loaded_app(&server).await;

    assert_eq!(
        app.form().unwrap().session().focus(),
        Some(FocusTarget::Submit)
    );
    app.activate();
    app.wait_for_network().await;

    assert_eq!(
        posted_bodies(&server).await,
        vec![json!({"results": []})]
    );
}
