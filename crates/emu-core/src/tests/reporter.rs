use crate::{LifecycleState, Severity, StatusCategory, StatusReporter, StatusView};

use std::time::Duration;

use crate::tests::{DISPLAY, ENDPOINT, advance, drain};

#[test]
fn given_each_state_when_mapped_then_category_and_label_match() {
    let cases = [
        (LifecycleState::Offline, StatusCategory::Stopped, "Emulator not running"),
        (LifecycleState::Starting, StatusCategory::Starting, "Starting emulator..."),
        (
            LifecycleState::Booting { elapsed_secs: 12 },
            StatusCategory::Booting,
            "Waiting for emulator to boot... (12s)",
        ),
        (
            LifecycleState::Running {
                endpoint: ENDPOINT.into(),
            },
            StatusCategory::Running,
            "Emulator running",
        ),
        (LifecycleState::Stopping, StatusCategory::Stopping, "Stopping emulator..."),
        (
            LifecycleState::Error {
                message: "no capacity".into(),
            },
            StatusCategory::Error,
            "no capacity",
        ),
    ];

    for (state, category, label) in cases {
        let view = StatusView::from(&state);
        assert_eq!(view.category, category, "{state}");
        assert_eq!(view.label, label, "{state}");
    }
}

#[test]
fn given_running_state_when_mapped_then_only_running_carries_endpoint() {
    let running = StatusView::from(&LifecycleState::Running {
        endpoint: ENDPOINT.into(),
    });
    assert_eq!(running.endpoint.as_deref(), Some(ENDPOINT));

    let stopping = StatusView::from(&LifecycleState::Stopping);
    assert_eq!(stopping.endpoint, None);
    assert_eq!(stopping.elapsed_secs, None);
}

#[test]
fn given_boot_budget_when_mapped_then_progress_is_capped_below_complete() {
    let early = StatusView::with_budget(&LifecycleState::Booting { elapsed_secs: 30 }, 120);
    assert_eq!(early.progress_percent, Some(25));
    assert_eq!(early.elapsed_secs, Some(30));

    let last = StatusView::with_budget(&LifecycleState::Booting { elapsed_secs: 120 }, 120);
    assert_eq!(last.progress_percent, Some(99));

    let running = StatusView::with_budget(
        &LifecycleState::Running {
            endpoint: ENDPOINT.into(),
        },
        120,
    );
    assert_eq!(running.progress_percent, None);
}

#[test]
fn given_view_when_serialized_then_uses_snake_case_category() {
    let view = StatusView::from(&LifecycleState::Booting { elapsed_secs: 3 });

    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["category"], "booting");
    assert_eq!(json["elapsed_secs"], 3);
}

#[tokio::test(start_paused = true)]
async fn given_notifications_when_subscribed_then_delivered_in_order() {
    let mut reporter = StatusReporter::new(DISPLAY);
    let mut rx = reporter.subscribe();

    reporter.notify("first", Severity::Info);
    reporter.notify("second", Severity::Success);
    reporter.notify("third", Severity::Error);

    let messages: Vec<_> = drain(&mut rx).into_iter().map(|n| n.message).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
}

#[tokio::test(start_paused = true)]
async fn given_staggered_notifications_when_time_passes_then_oldest_dismissed_first() {
    let mut reporter = StatusReporter::new(DISPLAY);

    reporter.notify("first", Severity::Info);
    advance(Duration::from_millis(1000)).await;
    reporter.notify("second", Severity::Warning);

    advance(Duration::from_millis(2500)).await;
    let visible: Vec<_> = reporter.visible().into_iter().map(|n| n.message).collect();
    assert_eq!(visible, vec!["second"]);

    advance(Duration::from_millis(1000)).await;
    assert!(reporter.visible().is_empty());
}

#[tokio::test(start_paused = true)]
async fn given_expired_notifications_when_dismissed_then_returned_oldest_first() {
    let mut reporter = StatusReporter::new(Duration::from_millis(100));
    reporter.notify("a", Severity::Info);
    reporter.notify("b", Severity::Info);

    advance(Duration::from_millis(150)).await;
    let dismissed: Vec<_> = reporter
        .dismiss_expired()
        .into_iter()
        .map(|n| n.message)
        .collect();

    assert_eq!(dismissed, vec!["a", "b"]);
    assert!(reporter.dismiss_expired().is_empty());
}

#[test]
fn given_severity_when_displayed_then_lowercase() {
    assert_eq!(Severity::Info.to_string(), "info");
    assert_eq!(Severity::Success.to_string(), "success");
    assert_eq!(Severity::Warning.to_string(), "warning");
    assert_eq!(Severity::Error.to_string(), "error");
}
