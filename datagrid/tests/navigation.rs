//! Tests for active-cell navigation and viewport coordination.

use std::ops::Range;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;

use datagrid::prelude::*;

fn records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new()
                .set("id", i as i64)
                .set("name", format!("row {i}"))
        })
        .collect()
}

fn columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new("id").sortable(),
        ColumnConfig::new("name"),
        ColumnConfig::new("secret").hidden(),
        ColumnConfig::new("notes"),
    ]
}

/// Grid over the built-in window: 1px rows, 5 rows visible.
fn grid(rows: usize) -> (Grid, Window) {
    let window = Window::new(1);
    window.set_viewport_height(5);
    window.set_row_count(rows);
    let grid = Grid::new(columns(), Arc::new(window.clone())).unwrap();
    grid.set_records(records(rows));
    (grid, window)
}

#[tokio::test]
async fn test_arrow_keys_move_active_cell() {
    let (grid, _window) = grid(20);
    let cx = GridContext::new();
    grid.activate(0, "id", &cx);

    assert!(grid.handle_key(KeyCombo::key(Key::Down), &cx).await.is_handled());
    assert_eq!(grid.active(), Some(ActiveNode::new(1, "id")));

    grid.handle_key(KeyCombo::key(Key::Right), &cx).await;
    assert_eq!(grid.active(), Some(ActiveNode::new(1, "name")));

    grid.handle_key(KeyCombo::key(Key::Up), &cx).await;
    assert_eq!(grid.active(), Some(ActiveNode::new(0, "name")));

    grid.handle_key(KeyCombo::key(Key::Left), &cx).await;
    assert_eq!(grid.active(), Some(ActiveNode::new(0, "id")));
}

#[tokio::test]
async fn test_boundaries_clamp_without_wrapping() {
    let (grid, _window) = grid(3);
    let cx = GridContext::new();
    grid.activate(0, "id", &cx);

    assert_eq!(
        grid.handle_key(KeyCombo::key(Key::Up), &cx).await,
        EventResult::Ignored
    );
    assert_eq!(
        grid.handle_key(KeyCombo::key(Key::Left), &cx).await,
        EventResult::Ignored
    );
    assert_eq!(grid.active(), Some(ActiveNode::new(0, "id")));

    grid.navigate_to(2, Some("notes"), true, &cx).await;
    assert_eq!(
        grid.handle_key(KeyCombo::key(Key::Down), &cx).await,
        EventResult::Ignored
    );
    assert_eq!(
        grid.handle_key(KeyCombo::key(Key::Right), &cx).await,
        EventResult::Ignored
    );
    assert_eq!(grid.active(), Some(ActiveNode::new(2, "notes")));
}

#[tokio::test]
async fn test_hidden_columns_are_skipped() {
    let (grid, _window) = grid(3);
    let cx = GridContext::new();
    grid.activate(0, "name", &cx);

    // "secret" is hidden, so Right lands on "notes" directly.
    grid.handle_key(KeyCombo::key(Key::Right), &cx).await;
    assert_eq!(grid.active(), Some(ActiveNode::new(0, "notes")));

    grid.handle_key(KeyCombo::key(Key::Left), &cx).await;
    assert_eq!(grid.active(), Some(ActiveNode::new(0, "name")));
}

#[tokio::test]
async fn test_home_and_end_jump_rows() {
    let (grid, window) = grid(50);
    let cx = GridContext::new();
    grid.activate(3, "name", &cx);

    grid.handle_key(KeyCombo::key(Key::End), &cx).await;
    assert_eq!(grid.active(), Some(ActiveNode::new(49, "name")));
    // The window scrolled so the last row is rendered.
    assert!(window.visible_range().contains(&49));

    grid.handle_key(KeyCombo::key(Key::Home), &cx).await;
    assert_eq!(grid.active(), Some(ActiveNode::new(0, "name")));
    assert!(window.visible_range().contains(&0));
}

#[tokio::test]
async fn test_modifiers_and_missing_active_ignored() {
    let (grid, _window) = grid(5);
    let cx = GridContext::new();

    // No active node yet.
    assert_eq!(
        grid.handle_key(KeyCombo::key(Key::Down), &cx).await,
        EventResult::Ignored
    );

    grid.activate(0, "id", &cx);
    assert_eq!(
        grid.handle_key(KeyCombo::key(Key::Down).ctrl(), &cx).await,
        EventResult::Ignored
    );
    assert_eq!(grid.active(), Some(ActiveNode::new(0, "id")));
}

#[tokio::test]
async fn test_activate_validates_target() {
    let (grid, _window) = grid(3);
    let cx = GridContext::new();

    assert_eq!(grid.activate(99, "id", &cx), EventResult::Ignored);
    assert_eq!(grid.activate(0, "secret", &cx), EventResult::Ignored);
    assert_eq!(grid.activate(0, "missing", &cx), EventResult::Ignored);
    assert_eq!(grid.active(), None);

    assert!(grid.activate(1, "name", &cx).is_handled());
    assert!(cx.has_event(GridEventKind::ActiveChanged));
    assert_eq!(cx.active(), Some(ActiveNode::new(1, "name")));
}

#[tokio::test]
async fn test_clear_active() {
    let (grid, _window) = grid(3);
    let cx = GridContext::new();
    grid.activate(1, "name", &cx);

    grid.clear_active(&cx);
    assert_eq!(grid.active(), None);
    assert_eq!(cx.active(), None);
}

#[tokio::test]
async fn test_navigate_to_scrolls_and_activates() {
    let (grid, window) = grid(100);
    let cx = GridContext::new();

    grid.navigate_to(80, Some("name"), true, &cx).await;
    assert_eq!(grid.active(), Some(ActiveNode::new(80, "name")));
    assert!(window.visible_range().contains(&80));
}

#[tokio::test]
async fn test_navigate_to_without_activate_keeps_active_node() {
    let (grid, window) = grid(100);
    let cx = GridContext::new();
    grid.activate(0, "id", &cx);

    grid.navigate_to(90, None, false, &cx).await;
    assert!(window.visible_range().contains(&90));
    // Scroll only: the active node did not move.
    assert_eq!(grid.active(), Some(ActiveNode::new(0, "id")));
}

#[tokio::test]
async fn test_navigate_to_clamps_row() {
    let (grid, _window) = grid(10);
    let cx = GridContext::new();

    grid.navigate_to(999, Some("id"), true, &cx).await;
    assert_eq!(grid.active(), Some(ActiveNode::new(9, "id")));
}

#[tokio::test]
async fn test_navigate_to_ignores_hidden_column() {
    let (grid, _window) = grid(10);
    let cx = GridContext::new();
    grid.activate(0, "name", &cx);

    // Hidden target column: vertical move only, column preserved.
    grid.navigate_to(5, Some("secret"), true, &cx).await;
    assert_eq!(grid.active(), Some(ActiveNode::new(5, "name")));
}

#[tokio::test]
async fn test_navigate_to_empty_view_is_noop() {
    let grid = Grid::new(columns(), Arc::new(Window::new(1))).unwrap();
    let cx = GridContext::new();
    grid.navigate_to(0, Some("id"), true, &cx).await;
    assert_eq!(grid.active(), None);
}

/// A windowing primitive whose layout settles only when the test says so.
#[derive(Default)]
struct ManualWindow {
    subscribers: Mutex<Vec<oneshot::Sender<()>>>,
}

impl ManualWindow {
    fn settle(&self) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            for subscriber in subscribers.drain(..) {
                let _ = subscriber.send(());
            }
        }
    }
}

impl WindowedList for ManualWindow {
    fn scroll_to_index(&self, _index: usize) {}

    fn visible_range(&self) -> Range<usize> {
        0..1
    }

    fn settled(&self) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }
}

#[tokio::test(start_paused = true)]
async fn test_navigation_waits_for_settle() {
    let grid = Grid::new(columns(), Arc::new(ManualWindow::default())).unwrap();
    let cx = GridContext::new();
    grid.set_records(records(10));
    grid.activate(0, "id", &cx);

    // The target row is off-window and the primitive never settles, so
    // the move must not commit.
    let result = tokio::time::timeout(
        Duration::from_secs(1),
        grid.handle_key(KeyCombo::key(Key::Down), &cx),
    )
    .await;
    assert!(result.is_err());
    assert_eq!(grid.active(), Some(ActiveNode::new(0, "id")));
}

#[tokio::test]
async fn test_dropped_primitive_subscription_resolves() {
    // A torn-down primitive drops its pending senders; awaiting the
    // settle must resolve instead of hanging.
    let window = Arc::new(ManualWindow::default());
    let grid = Grid::new(columns(), window.clone()).unwrap();
    let cx = GridContext::new();
    grid.set_records(records(10));
    grid.activate(0, "id", &cx);

    let pending = tokio::spawn({
        let grid = grid.clone();
        let cx = cx.clone();
        async move { grid.handle_key(KeyCombo::key(Key::Down), &cx).await }
    });
    tokio::task::yield_now().await;

    if let Ok(mut subscribers) = window.subscribers.lock() {
        subscribers.clear();
    }
    let result = tokio::time::timeout(Duration::from_secs(1), pending)
        .await
        .expect("navigation resolved after teardown")
        .expect("task completed");
    assert_eq!(result, EventResult::Consumed);
    assert_eq!(grid.active(), Some(ActiveNode::new(1, "id")));
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_key_commands_both_advance() {
    let window = Arc::new(ManualWindow::default());
    let grid = Grid::new(columns(), window.clone()).unwrap();
    let cx = GridContext::new();
    grid.set_records(records(10));
    grid.activate(0, "id", &cx);

    let first = tokio::spawn({
        let grid = grid.clone();
        let cx = cx.clone();
        async move { grid.handle_key(KeyCombo::key(Key::Down), &cx).await }
    });
    let second = tokio::spawn({
        let grid = grid.clone();
        let cx = cx.clone();
        async move { grid.handle_key(KeyCombo::key(Key::Down), &cx).await }
    });

    // First command awaits its scroll; second is parked on the gate.
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
    window.settle();
    // First commits row 1; second derives its target from the committed
    // node, not the one both commands started from.
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
    window.settle();

    let timeout = Duration::from_secs(1);
    let first = tokio::time::timeout(timeout, first)
        .await
        .expect("first command finished")
        .expect("first command task");
    let second = tokio::time::timeout(timeout, second)
        .await
        .expect("second command finished")
        .expect("second command task");
    assert_eq!(first, EventResult::Consumed);
    assert_eq!(second, EventResult::Consumed);
    assert_eq!(grid.active(), Some(ActiveNode::new(2, "id")));
}

#[tokio::test]
async fn test_degenerate_horizontal_span_aligns_start() {
    let window = Window::new(1);
    window.set_viewport_height(5);
    window.set_row_count(5);
    let viewport = Viewport::new(Arc::new(window));
    viewport.set_viewport_width(100);

    viewport
        .ensure_visible(0, Some(HorizontalSpan { start: 500, end: 600 }))
        .await;
    assert_eq!(viewport.scroll_offset_x(), 500);

    // An inverted span must not underflow; it aligns its start edge.
    viewport
        .ensure_visible(0, Some(HorizontalSpan { start: 40, end: 10 }))
        .await;
    assert_eq!(viewport.scroll_offset_x(), 40);
}

#[tokio::test(start_paused = true)]
async fn test_navigations_are_serialized() {
    let (grid, _window) = grid(100);
    let cx = GridContext::new();
    grid.activate(0, "id", &cx);

    // Two concurrent navigations: the gate serializes them, both land.
    let a = grid.clone();
    let cx_a = cx.clone();
    let first = tokio::spawn(async move { a.navigate_to(50, None, true, &cx_a).await });
    let b = grid.clone();
    let cx_b = cx.clone();
    let second = tokio::spawn(async move { b.navigate_to(60, None, true, &cx_b).await });

    first.await.expect("first navigation");
    second.await.expect("second navigation");
    let active = grid.active().expect("active node");
    assert!(active.row == 50 || active.row == 60);
}
