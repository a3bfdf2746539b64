//! Grid event types.
//!
//! Non-cancelable notifications are pushed to the [`GridContext`] queue and
//! drained by the host. The cancelable "sorting" pre-event is a hook
//! registered on the grid instead (see `Grid::on_sorting`).
//!
//! [`GridContext`]: crate::context::GridContext

use crate::data::sort::SortingExpression;

/// Kind of grid event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEventKind {
    /// Sort state changed and the view was recomputed.
    Sorted,
    /// Filter state changed and the view was recomputed.
    Filtered,
    /// The active cell changed (including cleared).
    ActiveChanged,
    /// Columns were added, removed, resized or toggled.
    ColumnsChanged,
}

/// An event emitted by a grid component.
#[derive(Debug, Clone)]
pub struct GridEvent {
    /// What happened.
    pub kind: GridEventKind,
    /// ID string of the grid that emitted the event.
    pub source: String,
}

impl GridEvent {
    /// Create a new event.
    pub fn new(kind: GridEventKind, source: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }
}

/// Payload passed to the cancelable "sorting" hook.
///
/// Carries the candidate expression and the full prospective expression
/// list as it would look after the mutation commits.
#[derive(Debug, Clone)]
pub struct SortingEventDetail {
    /// The expression about to be merged into the sort state.
    pub expression: SortingExpression,
    /// All expressions, including the candidate, in priority order.
    pub expressions: Vec<SortingExpression>,
}
