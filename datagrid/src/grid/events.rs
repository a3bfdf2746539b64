//! Grid interaction surface: header clicks, keyboard navigation and
//! programmatic navigation.

use crate::context::GridContext;
use crate::data::sort::{SortDirection, SortMode};
use crate::events::{GridEvent, GridEventKind, SortingEventDetail};
use crate::input::{EventResult, KeyCombo};
use crate::navigation::{self, ActiveNode};
use crate::viewport::HorizontalSpan;

use super::Grid;

impl Grid {
    // ----- Sorting -----

    /// Handle a click on a column header.
    ///
    /// Advances the column through the tri-state sort cycle. Before
    /// anything commits, the registered "sorting" hook (if any) sees the
    /// candidate expression and may veto; a veto leaves the sort state,
    /// the view and the sorted marker exactly as they were. On commit the
    /// view is recomputed and a `Sorted` event is pushed.
    pub fn sort_from_header_click(&self, key: &str, cx: &GridContext) -> EventResult {
        // Prepare phase under a read lock; the hook runs unlocked so it
        // may call back into the grid.
        let (detail, hook) = {
            let Ok(guard) = self.inner.read() else {
                return EventResult::Ignored;
            };
            let Some(column) = guard.columns.get(key) else {
                return EventResult::Ignored;
            };
            if !column.sortable {
                return EventResult::Ignored;
            }
            let expression = guard.sort.prepare_expression(column);
            let detail = SortingEventDetail {
                expression: expression.clone(),
                expressions: guard.sort.prospective(&expression),
            };
            (detail, guard.sorting_hook.clone())
        };

        if let Some(hook) = hook {
            if !hook(&detail) {
                log::debug!("sort on {key} vetoed by sorting hook");
                return EventResult::Ignored;
            }
        }

        let expression = detail.expression;
        let direction = expression.direction;
        if let Ok(mut inner) = self.inner.write() {
            if inner.sort_mode == SortMode::Single {
                inner.sort.reset(None);
            }
            inner.sort.sort([expression]);
            inner.recompute();
        }
        self.mark_dirty();

        match direction {
            SortDirection::None => cx.clear_sorted(),
            direction => cx.set_sorted(key, direction == SortDirection::Ascending),
        }
        cx.push_event(GridEvent::new(GridEventKind::Sorted, self.id().to_string()));
        EventResult::Consumed
    }

    // ----- Activation -----

    /// Activate a rendered cell directly (e.g. from a click).
    pub fn activate(&self, view_row: usize, key: &str, cx: &GridContext) -> EventResult {
        let valid = self
            .inner
            .read()
            .map(|g| view_row < g.view.len() && g.columns.get(key).is_some_and(|c| !c.hidden))
            .unwrap_or(false);
        if !valid {
            return EventResult::Ignored;
        }
        self.commit_active(ActiveNode::new(view_row, key), cx);
        EventResult::Consumed
    }

    /// Clear the active cell.
    pub fn clear_active(&self, cx: &GridContext) {
        if let Ok(mut inner) = self.inner.write() {
            if inner.active.is_none() {
                return;
            }
            inner.active = None;
        }
        self.mark_dirty();
        cx.set_active(None);
        cx.push_event(GridEvent::new(
            GridEventKind::ActiveChanged,
            self.id().to_string(),
        ));
    }

    /// Handle a navigation key.
    ///
    /// Arrow keys move one cell; Home/End jump to the first/last row.
    /// Boundary moves clamp and are reported as ignored. A move commits
    /// only after the target row is rendered: the viewport scroll settles
    /// first, then the active node changes.
    pub async fn handle_key(&self, combo: KeyCombo, cx: &GridContext) -> EventResult {
        if combo.modifiers.any() {
            return EventResult::Ignored;
        }

        // Compute the target under the gate, so an overlapping command
        // derives from the committed active node, not a stale one.
        let _gate = self.nav_gate.lock().await;
        let Some(active) = self.active() else {
            return EventResult::Ignored;
        };
        let visible = self.visible_keys();
        let Some(target) = navigation::next_target(&active, combo.key, &visible, self.len()) else {
            return EventResult::Ignored;
        };

        let span = self.column_span(&target.column);
        self.viewport.ensure_visible(target.row, span).await;
        self.commit_active(target, cx);
        EventResult::Consumed
    }

    /// Navigate to an arbitrary cell, scrolling as needed.
    ///
    /// `row` clamps into the current view; an unknown or hidden column is
    /// ignored and only vertical positioning occurs. The returned future
    /// resolves after the viewport has settled on the target. With
    /// `activate` set the destination becomes the new active node;
    /// otherwise the active node is left untouched.
    pub async fn navigate_to(
        &self,
        row: usize,
        column: Option<&str>,
        activate: bool,
        cx: &GridContext,
    ) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let row = row.min(len - 1);

        let visible = self.visible_keys();
        let column = column
            .filter(|key| visible.iter().any(|k| k == key))
            .map(ToString::to_string);
        let span = column.as_deref().and_then(|key| self.column_span(key));

        let _gate = self.nav_gate.lock().await;
        self.viewport.ensure_visible(row, span).await;

        if activate {
            let column = column
                .or_else(|| self.active().map(|a| a.column))
                .or_else(|| visible.first().cloned());
            if let Some(column) = column {
                self.commit_active(ActiveNode::new(row, column), cx);
            }
        }
    }

    /// Commit a new active node and notify the host.
    fn commit_active(&self, target: ActiveNode, cx: &GridContext) {
        if let Ok(mut inner) = self.inner.write() {
            if inner.active.as_ref() == Some(&target) {
                return;
            }
            inner.active = Some(target.clone());
        }
        self.mark_dirty();
        cx.set_active(Some(target));
        cx.push_event(GridEvent::new(
            GridEventKind::ActiveChanged,
            self.id().to_string(),
        ));
    }

    /// Horizontal extent of a visible column, from the computed widths.
    fn column_span(&self, key: &str) -> Option<HorizontalSpan> {
        let widths = self.column_widths();
        let mut start: u32 = 0;
        for width in widths {
            let end = start + u32::from(width.px);
            if width.key == key {
                return Some(HorizontalSpan { start, end });
            }
            start = end;
        }
        None
    }
}
