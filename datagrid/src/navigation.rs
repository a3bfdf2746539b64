//! Active-cell navigation targets.
//!
//! The active node is a logical coordinate: it stays valid even when the
//! cell is outside the rendered window. Target computation is pure; the
//! grid commits a target only after the virtualization coordinator has
//! scrolled it into view.

use crate::input::Key;

/// The single logical cell considered focused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNode {
    /// Row position within the current view.
    pub row: usize,
    /// Column key.
    pub column: String,
}

impl ActiveNode {
    /// Create an active node.
    pub fn new(row: usize, column: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
        }
    }
}

/// Compute the target of a directional or edge-jump command.
///
/// `visible` is the visible column key order (hidden columns already
/// skipped) and `row_count` the current view length. Returns `None` when
/// the command is a no-op: clamped at a boundary (direction keys never
/// wrap) or the active column is no longer visible.
pub fn next_target(active: &ActiveNode, key: Key, visible: &[String], row_count: usize) -> Option<ActiveNode> {
    if row_count == 0 || visible.is_empty() {
        return None;
    }

    let position = visible.iter().position(|k| *k == active.column)?;
    let last_row = row_count - 1;
    let row = active.row.min(last_row);

    let target = match key {
        Key::Up => ActiveNode::new(row.checked_sub(1)?, &active.column),
        Key::Down => {
            if row >= last_row {
                return None;
            }
            ActiveNode::new(row + 1, &active.column)
        }
        Key::Left => ActiveNode::new(row, &visible[position.checked_sub(1)?]),
        Key::Right => ActiveNode::new(row, visible.get(position + 1)?),
        Key::Home => ActiveNode::new(0, &active.column),
        Key::End => ActiveNode::new(last_row, &active.column),
        _ => return None,
    };

    (target != *active).then_some(target)
}
