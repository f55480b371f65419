//! Shell lifecycle tests: state transitions, the clock ticker and the
//! session registry.

use super::*;
use crate::cosmic::tests::helpers::{display_json, Canned, StaticSource};
use crate::cosmic::DesignFetcher;
use crate::design::{DesignData, Viewport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

const FAST_TICK: Duration = Duration::from_millis(20);

async fn seeded_data() -> DesignData {
    DesignFetcher::new(Arc::new(StaticSource::seeded()))
        .get_all_design_data()
        .await
        .unwrap()
}

async fn ready_shell() -> PresentationShell {
    let mut shell = PresentationShell::new(Viewport::default());
    shell.mount().unwrap();
    shell.receive_data(Ok(seeded_data().await)).unwrap();
    shell
        .select_design(&mut StdRng::seed_from_u64(7), "1700000000000")
        .unwrap();
    shell
}

/// Waits until the subscription reports its sender is gone.
async fn closes(mut rx: ClockSubscription) -> bool {
    timeout(Duration::from_secs(2), async {
        while rx.changed().await.is_ok() {}
    })
    .await
    .is_ok()
}

// ── Transitions ─────────────────────────────────────────────

#[tokio::test]
async fn test_no_time_text_before_ready() {
    let mut shell = PresentationShell::new(Viewport::default());
    assert!(matches!(shell.view(), View::Placeholder));

    shell.mount().unwrap();
    assert!(matches!(shell.view(), View::Placeholder));

    shell.receive_data(Ok(seeded_data().await)).unwrap();
    assert!(matches!(shell.state(), ShellState::AwaitingConfig(_)));
    assert!(matches!(shell.view(), View::Placeholder));

    let html = render_page(&shell.view(), &PageOptions::default());
    assert!(!html.contains("time-text"));
    assert!(html.contains("⏰"));

    shell
        .select_design(&mut StdRng::seed_from_u64(1), "s")
        .unwrap();
    match shell.view() {
        View::Clock(clock) => assert!(!clock.time.is_empty()),
        other => panic!("expected clock view, got {:?}", other),
    }
}

#[test]
fn test_out_of_order_transitions_are_rejected() {
    let mut shell = PresentationShell::new(Viewport::default());
    assert_err!(shell.receive_data(Ok(DesignData::default())));
    assert_err!(shell.select_design(&mut StdRng::seed_from_u64(0), ""));
    assert_err!(shell.start_clock(FAST_TICK));

    assert_ok!(shell.mount());
    let err = shell.mount().unwrap_err();
    assert_eq!(
        err,
        ShellError::InvalidTransition {
            action: "mount",
            state: "awaiting data"
        }
    );
    assert_eq!(err.to_string(), "cannot mount while awaiting data");
}

#[tokio::test]
async fn test_ready_never_returns_to_selection() {
    let mut shell = ready_shell().await;
    assert!(shell.is_ready());
    assert_err!(shell.select_design(&mut StdRng::seed_from_u64(3), "again"));
    assert_err!(shell.receive_data(Ok(DesignData::default())));
    assert!(shell.is_ready());
}

#[tokio::test]
async fn test_empty_catalog_shows_setup_view_with_counts() {
    let source = StaticSource::seeded().with("time-displays", Canned::NotFound);
    let fetcher = DesignFetcher::new(Arc::new(source));

    let mut shell = PresentationShell::new(Viewport::default());
    shell.load(&fetcher).await.unwrap();

    let View::SetupIncomplete(counts) = shell.view() else {
        panic!("expected setup view");
    };
    assert_eq!(
        (counts.themes, counts.displays, counts.layouts, counts.effects),
        (1, 0, 1, 1)
    );

    let html = render_page(&shell.view(), &PageOptions::default());
    assert!(html.contains("Setting up your award-winning time display..."));
    assert!(html.contains("Please ensure your Cosmic bucket has design content."));
    assert!(html.contains("<div>Displays: 0</div>"));
    assert!(html.contains("<div>Themes: 1</div>"));
    assert!(!html.contains("time-text"));
}

#[tokio::test]
async fn test_fetch_failure_shows_error_view() {
    let source = StaticSource::seeded().with("visual-effects", Canned::Status(503));
    let fetcher = DesignFetcher::new(Arc::new(source));

    let mut shell = PresentationShell::new(Viewport::default());
    assert_ok!(shell.load(&fetcher).await);

    assert!(matches!(shell.state(), ShellState::FetchFailed(msg) if msg.contains("visual effects")));
    let html = render_page(&shell.view(), &PageOptions::default());
    assert!(html.contains("Unable to load time display"));
    assert!(html.contains("Please check your Cosmic configuration."));
    assert!(!html.contains("Themes:"));
}

#[tokio::test]
async fn test_load_picks_up_the_display_format() {
    let source = StaticSource::seeded().with(
        "time-displays",
        Canned::Objects(vec![display_json("mono", "minimal")]),
    );
    let mut shell = PresentationShell::new(Viewport::with_width(1440));
    shell
        .load(&DesignFetcher::new(Arc::new(source)))
        .await
        .unwrap();

    let ready = shell.ready().unwrap();
    assert_eq!(ready.time_format, "minimal");
    let View::Clock(clock) = shell.view() else {
        panic!("expected clock view");
    };
    // HH:MM
    assert_eq!(clock.time.len(), 5);
    assert_eq!(clock.time.as_bytes()[2], b':');
}

// ── Rendering a ready shell ─────────────────────────────────

#[tokio::test]
async fn test_clock_page_structure() {
    let shell = ready_shell().await;
    let options = PageOptions {
        dev_mode: false,
        clock_url: Some("/clock/abc".to_string()),
    };
    let html = render_page(&shell.view(), &options);

    assert!(html.contains("<title>⏰ What Time Is It?</title>"));
    assert!(html.contains("class=\"dynamic-background\""));
    assert!(html.contains("class=\"time-position\""));
    assert!(html.contains("id=\"time-text\""));
    assert!(html.contains("--primary-color: #112233"));
    assert!(html.contains("@keyframes effect-fade-1700000000000"));
    assert!(html.contains("href=\"https://www.cosmicjs.com\""));
    assert!(html.contains("new EventSource(\"/clock/abc\")"));
    assert!(!html.contains("debug-panel\">"));
}

#[tokio::test]
async fn test_dev_mode_lists_fragment_titles() {
    let shell = ready_shell().await;
    let options = PageOptions {
        dev_mode: true,
        clock_url: None,
    };
    let html = render_page(&shell.view(), &options);

    assert!(html.contains("<div>Theme: Theme aurora</div>"));
    assert!(html.contains("<div>Display: Display mono</div>"));
    assert!(html.contains("<div>Layout: Layout offset</div>"));
    assert!(html.contains("<div>Effect: Effect fade</div>"));
    assert!(!html.contains("EventSource"));
}

#[tokio::test]
async fn test_viewport_is_applied_once_at_selection() {
    let mut narrow = PresentationShell::new(Viewport::with_width(375));
    narrow.mount().unwrap();
    narrow.receive_data(Ok(seeded_data().await)).unwrap();
    narrow
        .select_design(&mut StdRng::seed_from_u64(0), "")
        .unwrap();

    let wide = ready_shell().await;
    assert_eq!(narrow.ready().unwrap().layout.get("top"), Some("2%"));
    assert_eq!(wide.ready().unwrap().layout.get("top"), Some("10%"));
}

// ── Clock lifecycle ─────────────────────────────────────────

#[tokio::test]
async fn test_clock_ticks_then_teardown_stops_it() {
    let mut shell = ready_shell().await;
    let mut rx = shell.start_clock(FAST_TICK).unwrap();
    assert!(shell.is_ticking());

    let ticked = timeout(Duration::from_secs(2), rx.changed()).await;
    assert!(matches!(ticked, Ok(Ok(()))), "clock never ticked");

    shell.teardown();
    assert!(!shell.is_ticking());
    assert!(matches!(shell.state(), ShellState::Unmounted));
    assert!(matches!(shell.view(), View::Placeholder));
    assert!(closes(rx).await, "ticker outlived its shell");
}

#[tokio::test]
async fn test_second_subscriber_joins_the_same_ticker() {
    let mut shell = ready_shell().await;
    let mut first = shell.start_clock(FAST_TICK).unwrap();
    let _second = shell.start_clock(FAST_TICK).unwrap();

    // A replaced ticker would have closed the first feed
    let ticked = timeout(Duration::from_secs(2), first.changed()).await;
    assert!(matches!(ticked, Ok(Ok(()))));
}

#[tokio::test]
async fn test_dropping_the_shell_stops_its_ticker() {
    let mut shell = ready_shell().await;
    let rx = shell.start_clock(FAST_TICK).unwrap();
    drop(shell);
    assert!(closes(rx).await);
}

#[tokio::test]
async fn test_ticker_publishes_an_initial_value() {
    let ticker = ClockTicker::spawn("24hour".to_string(), Duration::from_secs(60));
    let now = ticker.current();
    assert_eq!(now.len(), 8, "got {:?}", now);
    assert!(ticker.is_running());
}

// ── Registry ────────────────────────────────────────────────

#[tokio::test]
async fn test_registry_connects_known_sessions_only() {
    let registry = Arc::new(ShellRegistry::new(Duration::from_secs(300)));
    let id = Uuid::new_v4();
    registry.insert(id, ready_shell().await).await;

    assert!(registry.connect(id, FAST_TICK).await.is_some());
    assert!(registry.connect(Uuid::new_v4(), FAST_TICK).await.is_none());
}

#[tokio::test]
async fn test_registry_refuses_a_second_stream_for_one_session() {
    let registry = Arc::new(ShellRegistry::new(Duration::from_secs(300)));
    let id = Uuid::new_v4();
    registry.insert(id, ready_shell().await).await;

    let mut first = registry.connect(id, FAST_TICK).await.unwrap();
    assert!(registry.connect(id, FAST_TICK).await.is_none());

    // The refused attempt leaves the open stream ticking
    assert!(registry.contains(id).await);
    assert_ok!(timeout(Duration::from_secs(2), first.changed()).await.unwrap());
}

#[tokio::test]
async fn test_registry_refuses_clock_for_unready_session() {
    let registry = ShellRegistry::new(Duration::from_secs(300));
    let id = Uuid::new_v4();
    registry
        .insert(id, PresentationShell::new(Viewport::default()))
        .await;
    assert!(registry.connect(id, FAST_TICK).await.is_none());
}

#[tokio::test]
async fn test_sweep_drops_only_stale_unconnected_sessions() {
    let registry = ShellRegistry::new(Duration::ZERO);
    let connected = Uuid::new_v4();
    let stale = Uuid::new_v4();
    registry.insert(connected, ready_shell().await).await;
    registry.insert(stale, ready_shell().await).await;
    let _rx = registry.connect(connected, FAST_TICK).await.unwrap();

    assert_eq!(registry.sweep().await, 1);
    assert!(registry.contains(connected).await);
    assert!(!registry.contains(stale).await);
}

#[tokio::test]
async fn test_guard_drop_tears_the_session_down() {
    let registry = Arc::new(ShellRegistry::new(Duration::from_secs(300)));
    let id = Uuid::new_v4();
    registry.insert(id, ready_shell().await).await;
    let rx = registry.connect(id, FAST_TICK).await.unwrap();

    let guard = registry.guard(id);
    assert_eq!(guard.id(), id);
    drop(guard);

    assert!(closes(rx).await);
    assert_eq!(registry.len().await, 0);
}

#[tokio::test]
async fn test_teardown_of_unknown_session_is_a_no_op() {
    let registry = ShellRegistry::new(Duration::from_secs(300));
    assert!(!registry.teardown(Uuid::new_v4()).await);
}
