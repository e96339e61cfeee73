//! Unit tests for the notification queue

use noticeboard::services::{NotificationQueue, QueueEvent};
use noticeboard::types::{InstanceId, Message, Severity};

fn msg(text: &str) -> Message {
    Message::new("default-message", Severity::Info, "Note", text)
}

fn keep(text: &str) -> Message {
    msg(text).with_keep_after_route_change(true)
}

fn texts(queue: &NotificationQueue) -> Vec<&str> {
    queue.banners().iter().map(|b| b.text.as_str()).collect()
}

fn queued(event: QueueEvent) -> InstanceId {
    match event {
        QueueEvent::Queued(id) => id,
        other => panic!("Expected Queued, got {:?}", other),
    }
}

#[test]
fn test_display_order_is_arrival_order() {
    let mut queue = NotificationQueue::new();
    for text in ["one", "two", "three", "four"] {
        queue.apply(msg(text));
    }

    assert_eq!(texts(&queue), vec!["one", "two", "three", "four"]);
}

#[test]
fn test_instance_ids_are_distinct() {
    let mut queue = NotificationQueue::new();
    for i in 0..50 {
        queue.apply(msg(&format!("m{}", i)));
    }

    let mut ids: Vec<InstanceId> = queue.banners().iter().map(|b| b.instance_id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[test]
fn test_dismiss_removes_exactly_one() {
    let mut queue = NotificationQueue::new();
    queue.apply(msg("a"));
    let b = queued(queue.apply(msg("b")));
    queue.apply(msg("c"));

    let removed = queue.dismiss(b).unwrap();
    assert_eq!(removed.text, "b");
    assert_eq!(texts(&queue), vec!["a", "c"]);

    assert!(queue.dismiss(b).is_none());
    assert_eq!(texts(&queue), vec!["a", "c"]);
}

#[test]
fn test_clear_signal_sweeps_non_persistent() {
    let mut queue = NotificationQueue::new();
    let a = queued(queue.apply(keep("A")));
    let b = queued(queue.apply(msg("B")));

    let event = queue.apply(Message::clear_signal("default-message"));
    assert_eq!(event, QueueEvent::Swept { removed: vec![b] });

    assert_eq!(texts(&queue), vec!["A"]);
    let survivor = queue.get(a).unwrap();
    assert!(!survivor.keep_after_route_change);

    queue.apply(Message::clear_signal("default-message"));
    assert!(queue.is_empty());
}

#[test]
fn test_empty_text_counts_as_clear_signal() {
    let mut queue = NotificationQueue::new();
    queue.apply(msg("a"));
    queue.apply(msg(""));

    assert!(queue.is_empty());
}

#[test]
fn test_sweep_keeps_relative_order_of_survivors() {
    let mut queue = NotificationQueue::new();
    queue.apply(keep("k1"));
    queue.apply(msg("x"));
    queue.apply(keep("k2"));
    queue.apply(msg("y"));
    queue.apply(keep("k3"));

    queue.sweep();
    assert_eq!(texts(&queue), vec!["k1", "k2", "k3"]);
}

#[test]
fn test_new_entries_after_sweep_need_their_own_flag() {
    let mut queue = NotificationQueue::new();
    queue.apply(keep("old"));
    queue.sweep();
    queue.apply(keep("new"));

    queue.sweep();
    assert_eq!(texts(&queue), vec!["new"]);

    queue.sweep();
    assert!(queue.is_empty());
}
