//! Tests for the grid event queue and host wakeup subscription.

use datagrid::context::GridContext;
use datagrid::events::{GridEvent, GridEventKind};

#[test]
fn test_events_queue_and_drain() {
    let cx = GridContext::new();
    cx.push_event(GridEvent::new(GridEventKind::Sorted, "__grid_1"));
    cx.push_event(GridEvent::new(GridEventKind::Filtered, "__grid_1"));

    assert!(cx.has_event(GridEventKind::Sorted));
    assert!(!cx.has_event(GridEventKind::ActiveChanged));

    let events = cx.drain_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, GridEventKind::Sorted);
    assert_eq!(events[0].source, "__grid_1");

    // Draining empties the queue.
    assert!(cx.drain_events().is_empty());
}

#[tokio::test]
async fn test_push_event_wakes_subscriber() {
    let cx = GridContext::new();
    let mut wakeup = cx.subscribe_wakeup();

    cx.push_event(GridEvent::new(GridEventKind::Sorted, "__grid_1"));
    assert!(wakeup.wait().await);
}

#[test]
fn test_wakeups_collapse() {
    let cx = GridContext::new();
    let mut wakeup = cx.subscribe_wakeup();

    cx.push_event(GridEvent::new(GridEventKind::Sorted, "__grid_1"));
    cx.push_event(GridEvent::new(GridEventKind::Filtered, "__grid_1"));
    cx.push_event(GridEvent::new(GridEventKind::Sorted, "__grid_1"));

    assert!(wakeup.pending());
    wakeup.drain();
    assert!(!wakeup.pending());
}

#[tokio::test]
async fn test_wakeup_ends_when_context_dropped() {
    let cx = GridContext::new();
    let mut wakeup = cx.subscribe_wakeup();
    drop(cx);
    assert!(!wakeup.wait().await);
}

#[test]
fn test_resubscribing_replaces_previous_subscriber() {
    let cx = GridContext::new();
    let mut first = cx.subscribe_wakeup();
    let mut second = cx.subscribe_wakeup();

    cx.push_event(GridEvent::new(GridEventKind::Sorted, "__grid_1"));
    assert!(!first.pending());
    assert!(second.pending());
}

#[test]
fn test_push_event_without_subscriber() {
    // No subscriber: events still queue, nothing panics.
    let cx = GridContext::new();
    cx.push_event(GridEvent::new(GridEventKind::ColumnsChanged, "__grid_9"));
    assert_eq!(cx.drain_events().len(), 1);
}

#[test]
fn test_dropped_subscriber_does_not_block_events() {
    let cx = GridContext::new();
    drop(cx.subscribe_wakeup());
    cx.push_event(GridEvent::new(GridEventKind::Sorted, "__grid_1"));
    assert!(cx.has_event(GridEventKind::Sorted));
}
