//! Column width computation.

use super::config::ColumnConfig;

/// Minimum width floor for distributed columns, in px.
pub const MIN_COLUMN_WIDTH: u16 = 80;

/// Computed width of a single visible column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnWidth {
    /// Column key.
    pub key: String,
    /// Width in px.
    pub px: u16,
}

impl ColumnWidth {
    /// CSS-like size string for the rendering layer.
    pub fn size(&self) -> String {
        format!("{}px", self.px)
    }
}

/// Compute widths for the visible column set.
///
/// Pure function of (visible columns, container width): columns with an
/// explicit width keep it; the remaining space is split evenly across the
/// rest, never below [`MIN_COLUMN_WIDTH`]. Recomputed whenever the visible
/// set or container size changes.
pub fn compute_column_widths(visible: &[&ColumnConfig], container_px: u16) -> Vec<ColumnWidth> {
    let explicit: u32 = visible
        .iter()
        .filter_map(|c| c.width.map(u32::from))
        .sum();
    let auto_count = visible.iter().filter(|c| c.width.is_none()).count() as u32;

    let share = if auto_count == 0 {
        0
    } else {
        let remaining = u32::from(container_px).saturating_sub(explicit);
        (remaining / auto_count).max(u32::from(MIN_COLUMN_WIDTH))
    };

    visible
        .iter()
        .map(|column| ColumnWidth {
            key: column.key.clone(),
            px: column.width.unwrap_or(share as u16),
        })
        .collect()
}
