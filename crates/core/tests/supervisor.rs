mod common;

use std::time::Duration;

use common::{homework, RecordingNotifier, ScriptedSource};
use review_watch_core::{poll_cycle, CycleError, Supervisor, SupervisorSettings, Tick};
use serde_json::json;

fn settings(start: i64) -> SupervisorSettings {
    SupervisorSettings {
        interval: Duration::from_secs(600),
        start_timestamp: Some(start),
    }
}

fn supervisor(
    source: &ScriptedSource,
    notifier: &RecordingNotifier,
) -> Supervisor<ScriptedSource, RecordingNotifier> {
    Supervisor::new(source.clone(), notifier.clone(), settings(500))
}

#[tokio::test]
async fn reviewing_status_is_notified_and_timestamp_advances() {
    let source = ScriptedSource::new(vec![
        Ok(homework("hw1", "reviewing", 1000)),
        Ok(homework("hw1", "reviewing", 1600)),
    ]);
    let notifier = RecordingNotifier::default();
    let mut sup = supervisor(&source, &notifier);

    assert_eq!(sup.tick().await, Tick::StatusNotified);
    assert_eq!(
        notifier.sent(),
        vec!["Changed review status for \"hw1\". Work has been taken up for review by the reviewer.".to_string()]
    );
    assert_eq!(sup.state().next_poll_timestamp, 1000);

    sup.tick().await;
    assert_eq!(source.calls(), vec![500, 1000]);
}

#[tokio::test]
async fn unchanged_status_is_notified_once() {
    let source = ScriptedSource::new(vec![
        Ok(homework("hw1", "approved", 1000)),
        Ok(homework("hw1", "approved", 1600)),
    ]);
    let notifier = RecordingNotifier::default();
    let mut sup = supervisor(&source, &notifier);

    assert_eq!(sup.tick().await, Tick::StatusNotified);
    assert_eq!(sup.tick().await, Tick::StatusUnchanged);
    assert_eq!(notifier.sent().len(), 1);
    assert_eq!(sup.state().next_poll_timestamp, 1600);
}

#[tokio::test]
async fn empty_homeworks_error_is_notified_once() {
    let empty = json!({"homeworks": [], "current_date": 1000});
    let source = ScriptedSource::new(vec![Ok(empty.clone()), Ok(empty)]);
    let notifier = RecordingNotifier::default();
    let mut sup = supervisor(&source, &notifier);

    assert_eq!(sup.tick().await, Tick::ErrorNotified);
    assert_eq!(sup.tick().await, Tick::ErrorSuppressed);
    assert_eq!(notifier.sent(), vec![CycleError::NoItemsAvailable.to_string()]);
}

#[tokio::test]
async fn repeated_text_is_resent_after_a_different_one() {
    let source = ScriptedSource::new(vec![
        Ok(homework("hw1", "reviewing", 1)),
        Ok(homework("hw1", "rejected", 2)),
        Ok(homework("hw1", "reviewing", 3)),
        Err(CycleError::FetchError("HTTP 500".into())),
        Err(CycleError::FetchError("HTTP 502".into())),
        Err(CycleError::FetchError("HTTP 500".into())),
    ]);
    let notifier = RecordingNotifier::default();
    let mut sup = supervisor(&source, &notifier);

    for _ in 0..6 {
        sup.tick().await;
    }
    assert_eq!(notifier.sent().len(), 6);
}

#[tokio::test]
async fn categories_are_deduplicated_separately() {
    let source = ScriptedSource::new(vec![
        Ok(homework("hw1", "reviewing", 1)),
        Err(CycleError::FetchError("timeout".into())),
        Ok(homework("hw1", "reviewing", 2)),
        Err(CycleError::FetchError("timeout".into())),
    ]);
    let notifier = RecordingNotifier::default();
    let mut sup = supervisor(&source, &notifier);

    assert_eq!(sup.tick().await, Tick::StatusNotified);
    assert_eq!(sup.tick().await, Tick::ErrorNotified);
    assert_eq!(sup.tick().await, Tick::StatusUnchanged);
    assert_eq!(sup.tick().await, Tick::ErrorSuppressed);
    assert_eq!(notifier.sent().len(), 2);
}

#[tokio::test]
async fn failed_cycles_do_not_move_the_timestamp() {
    let source = ScriptedSource::new(vec![
        Ok(json!({"homeworks": [], "current_date": 9000})),
        Ok(json!({"homeworks": [{"homework_name": "hw1", "status": "graded"}], "current_date": 9100})),
        Ok(json!({"homeworks": [{"homework_name": "hw1", "status": "approved"}]})),
    ]);
    let notifier = RecordingNotifier::default();
    let mut sup = supervisor(&source, &notifier);

    sup.tick().await;
    sup.tick().await;
    assert_eq!(sup.state().next_poll_timestamp, 500);

    // Success without `current_date` keeps the previous lower bound.
    assert_eq!(sup.tick().await, Tick::StatusNotified);
    assert_eq!(sup.state().next_poll_timestamp, 500);
    assert_eq!(source.calls(), vec![500, 500, 500]);
    assert_eq!(
        sup.state().last_error_message,
        CycleError::UnknownStatus("graded".into()).to_string()
    );
}

#[tokio::test]
async fn delivery_failure_is_not_retried() {
    let source = ScriptedSource::new(vec![
        Ok(homework("hw1", "approved", 1)),
        Ok(homework("hw1", "approved", 2)),
    ]);
    let notifier = RecordingNotifier::failing();
    let mut sup = supervisor(&source, &notifier);

    assert_eq!(sup.tick().await, Tick::StatusNotified);
    assert_eq!(sup.tick().await, Tick::StatusUnchanged);
    assert_eq!(notifier.attempts(), 1);
    assert!(notifier.sent().is_empty());
}

#[tokio::test(start_paused = true)]
async fn loop_keeps_polling_after_errors() {
    let source = ScriptedSource::always(Err(CycleError::FetchError("connection refused".into())));
    let notifier = RecordingNotifier::default();
    let mut sup = supervisor(&source, &notifier);

    let res = tokio::time::timeout(Duration::from_secs(1250), sup.run()).await;
    assert!(res.is_err(), "run never returns");

    assert_eq!(source.calls().len(), 3);
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn poll_cycle_passes_current_date_through() {
    let source = ScriptedSource::new(vec![Ok(homework("hw1", "rejected", 1234))]);
    let outcome = poll_cycle(&source, Some(77)).await.unwrap();
    assert_eq!(outcome.new_timestamp, 1234);
    assert_eq!(
        outcome.status_message,
        "Changed review status for \"hw1\". Work reviewed: the reviewer has comments."
    );
    assert_eq!(source.calls(), vec![77]);
}

#[tokio::test]
async fn poll_cycle_defaults_to_now() {
    let source = ScriptedSource::new(vec![Err(CycleError::FetchError("down".into()))]);
    let before = review_watch_core::now_secs();
    let err = poll_cycle(&source, None).await.unwrap_err();
    assert_eq!(err.kind(), "fetch_error");
    assert!(source.calls()[0] >= before);
}
