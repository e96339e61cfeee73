//! Integration tests for the banner controller lifecycle

use std::sync::Arc;
use std::time::Duration;

use noticeboard::config::BusConfig;
use noticeboard::services::{BannerController, LocationProvider, MessageBus, Options, DEFAULT_DWELL};
use noticeboard::types::{Message, Severity, DEFAULT_CHANNEL};

const CHANNEL: &str = DEFAULT_CHANNEL;

fn setup() -> (Arc<MessageBus>, BannerController) {
    let bus = MessageBus::new(&BusConfig::default());
    let controller = BannerController::with_defaults(bus.clone());
    (bus, controller)
}

/// Let spawned tasks run on the current-thread test runtime.
async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

fn texts(controller: &BannerController) -> Vec<String> {
    controller.banners().into_iter().map(|b| b.text).collect()
}

fn saved() -> Message {
    Message::new(CHANNEL, Severity::Success, "Done", "Saved").with_auto_close(true)
}

#[tokio::test]
async fn test_arrival_order_is_display_order() {
    let (bus, controller) = setup();
    controller.mount();

    for text in ["a", "b", "c"] {
        bus.info(CHANNEL, "Note", text, Options::default());
    }
    settle().await;

    assert_eq!(texts(&controller), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_ignores_other_channels() {
    let (bus, controller) = setup();
    controller.mount();

    bus.info("elsewhere", "Note", "not mine", Options::default());
    settle().await;

    assert!(controller.banners().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_auto_close_after_dwell() {
    let (bus, controller) = setup();
    controller.mount();

    bus.publish(saved());
    settle().await;

    let banners = controller.banners();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].lead, "Done");
    assert_eq!(banners[0].severity, Severity::Success);
    assert_eq!(controller.pending_timers(), 1);

    tokio::time::sleep(DEFAULT_DWELL - Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(controller.banners().len(), 1);

    tokio::time::sleep(Duration::from_millis(2)).await;
    settle().await;
    assert!(controller.banners().is_empty());
    assert_eq!(controller.pending_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_non_auto_close_stays() {
    let (bus, controller) = setup();
    controller.mount();

    bus.info(CHANNEL, "Note", "sticky", Options::default());
    settle().await;

    tokio::time::sleep(DEFAULT_DWELL * 3).await;
    settle().await;
    assert_eq!(texts(&controller), vec!["sticky"]);
}

#[tokio::test(start_paused = true)]
async fn test_timer_after_unmount_is_noop() {
    let (bus, controller) = setup();
    controller.mount();

    bus.publish(saved());
    settle().await;
    assert_eq!(controller.banners().len(), 1);

    controller.unmount();
    assert!(controller.banners().is_empty());
    assert_eq!(controller.pending_timers(), 0);

    tokio::time::sleep(DEFAULT_DWELL * 2).await;
    settle().await;

    assert!(controller.banners().is_empty());
    assert!(!controller.is_mounted());
}

#[tokio::test]
async fn test_unmount_releases_and_clears_bus() {
    let (bus, controller) = setup();
    controller.mount();
    assert_eq!(bus.subscriber_count(CHANNEL), 1);

    controller.unmount();
    assert_eq!(bus.subscriber_count(CHANNEL), 0);

    // Published while unmounted: buffered, but never shown by the inert controller
    bus.info(CHANNEL, "Note", "late", Options::default());
    settle().await;
    assert!(controller.banners().is_empty());
    assert_eq!(bus.pending_count(CHANNEL), 1);
}

#[tokio::test]
async fn test_remount_replays_buffered_messages() {
    let (bus, controller) = setup();
    bus.error(
        CHANNEL,
        "Error",
        "Before navigation",
        Options {
            keep_after_route_change: true,
            ..Options::default()
        },
    );

    controller.mount();
    settle().await;

    assert_eq!(texts(&controller), vec!["Before navigation"]);
    assert_eq!(bus.pending_count(CHANNEL), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_cancels_timer() {
    let (bus, controller) = setup();
    controller.mount();

    bus.publish(saved());
    bus.info(CHANNEL, "Note", "other", Options::default());
    settle().await;

    let id = controller.banners()[0].instance_id;
    assert!(controller.dismiss(id));
    assert_eq!(controller.pending_timers(), 0);
    assert_eq!(texts(&controller), vec!["other"]);

    assert!(!controller.dismiss(id));

    tokio::time::sleep(DEFAULT_DWELL * 2).await;
    settle().await;
    assert_eq!(texts(&controller), vec!["other"]);
}

#[tokio::test]
async fn test_two_clear_signals_scenario() {
    let (bus, controller) = setup();
    controller.mount();

    bus.publish(Message::new(CHANNEL, Severity::Info, "A", "A").with_keep_after_route_change(true));
    bus.publish(Message::new(CHANNEL, Severity::Info, "B", "B"));
    settle().await;
    assert_eq!(texts(&controller), vec!["A", "B"]);

    bus.clear_signal(CHANNEL);
    settle().await;
    let banners = controller.banners();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].text, "A");
    assert!(!banners[0].keep_after_route_change);

    bus.clear_signal(CHANNEL);
    settle().await;
    assert!(controller.banners().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_sweep_cancels_timers_of_removed_banners() {
    let (bus, controller) = setup();
    controller.mount();

    bus.publish(saved());
    settle().await;
    assert_eq!(controller.pending_timers(), 1);

    bus.clear_signal(CHANNEL);
    settle().await;
    assert!(controller.banners().is_empty());
    assert_eq!(controller.pending_timers(), 0);
}

#[tokio::test]
async fn test_location_change_resubscribes_from_empty() {
    let (bus, controller) = setup();
    let location = LocationProvider::new("/projects");
    controller.mount();
    let _follow = controller.follow(&location);

    bus.publish(
        Message::new(CHANNEL, Severity::Info, "Note", "kept once").with_keep_after_route_change(true),
    );
    settle().await;
    assert_eq!(controller.banners().len(), 1);

    // Same location: nothing happens
    assert!(!location.navigate("/projects"));
    settle().await;
    assert_eq!(controller.banners().len(), 1);

    assert!(location.navigate("/components"));
    settle().await;

    assert!(controller.banners().is_empty());
    assert!(controller.is_mounted());
    assert_eq!(bus.subscriber_count(CHANNEL), 1);
    assert_eq!(controller.location().as_deref(), Some("/components"));

    bus.info(CHANNEL, "Note", "fresh", Options::default());
    settle().await;
    assert_eq!(texts(&controller), vec!["fresh"]);
}

#[tokio::test]
async fn test_ids_stay_unique_across_remounts() {
    let (bus, controller) = setup();
    controller.mount();
    bus.info(CHANNEL, "Note", "first", Options::default());
    settle().await;
    let first = controller.banners()[0].instance_id;

    controller.relocate("/a");
    controller.relocate("/b");
    bus.info(CHANNEL, "Note", "second", Options::default());
    settle().await;

    let second = controller.banners()[0].instance_id;
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_watch_reports_changes() {
    let (bus, controller) = setup();
    controller.mount();
    let mut rx = controller.watch();
    rx.borrow_and_update();

    bus.info(CHANNEL, "Note", "hello", Options::default());
    rx.changed().await.unwrap();

    let banners = rx.borrow_and_update().clone();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].text, "hello");
}

#[tokio::test]
async fn test_views_follow_queue_order() {
    let (bus, controller) = setup();
    controller.mount();

    bus.success(CHANNEL, "Done", "Saved", Options::default());
    bus.error(CHANNEL, "Error", "Failed", Options::default());
    settle().await;

    let views = controller.views();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].lead, "Done");
    assert_eq!(views[1].lead, "Error");
    assert_eq!(views[1].variant, Severity::Danger);
}
