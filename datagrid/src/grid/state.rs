//! Grid state and accessors.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use crate::columns::{ColumnConfig, ColumnRegistry, ColumnWidth, compute_column_widths};
use crate::context::GridContext;
use crate::data::filter::{FilterExpression, FilterState};
use crate::data::pipeline;
use crate::data::sort::{SortDirection, SortMode, SortState, SortingExpression};
use crate::error::GridError;
use crate::events::{GridEvent, GridEventKind, SortingEventDetail};
use crate::navigation::ActiveNode;
use crate::record::Record;
use crate::viewport::{Viewport, WindowedList};

static NEXT_GRID_ID: AtomicUsize = AtomicUsize::new(1);

/// Unique grid instance ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(usize);

impl GridId {
    fn next() -> Self {
        Self(NEXT_GRID_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__grid_{}", self.0)
    }
}

pub(super) type SortingHook = Arc<dyn Fn(&SortingEventDetail) -> bool + Send + Sync>;

pub(super) struct GridInner {
    pub(super) records: Vec<Record>,
    pub(super) columns: ColumnRegistry,
    pub(super) sort: SortState,
    pub(super) sort_mode: SortMode,
    pub(super) filter: FilterState,
    /// Derived view: indices into `records`, filter and sort applied.
    pub(super) view: Vec<usize>,
    pub(super) active: Option<ActiveNode>,
    pub(super) container_width: u16,
    pub(super) sorting_hook: Option<SortingHook>,
}

impl GridInner {
    /// Recompute the derived view and keep the active node valid.
    pub(super) fn recompute(&mut self) {
        self.view = pipeline::compute(&self.records, &self.filter, &self.sort);
        if self.view.is_empty() {
            self.active = None;
        } else if let Some(active) = &mut self.active {
            active.row = active.row.min(self.view.len() - 1);
        }
    }
}

/// A data grid engine.
///
/// Cheap to clone; all clones share the same state. Interaction methods
/// live in the companion `events` module.
#[derive(Clone)]
pub struct Grid {
    id: GridId,
    pub(super) inner: Arc<RwLock<GridInner>>,
    dirty: Arc<AtomicBool>,
    pub(super) viewport: Viewport,
    /// Serializes in-flight navigations so a second request waits for the
    /// first scroll to settle instead of racing it.
    pub(super) nav_gate: Arc<Mutex<()>>,
}

impl Grid {
    /// Create a grid over a windowing primitive.
    ///
    /// Fails on duplicate column keys.
    pub fn new(
        columns: Vec<ColumnConfig>,
        window: Arc<dyn WindowedList>,
    ) -> Result<Self, GridError> {
        let columns = ColumnRegistry::from_columns(columns)?;
        Ok(Self {
            id: GridId::next(),
            inner: Arc::new(RwLock::new(GridInner {
                records: Vec::new(),
                columns,
                sort: SortState::new(),
                sort_mode: SortMode::default(),
                filter: FilterState::new(),
                view: Vec::new(),
                active: None,
                container_width: 0,
                sorting_hook: None,
            })),
            dirty: Arc::new(AtomicBool::new(true)),
            viewport: Viewport::new(window),
            nav_gate: Arc::new(Mutex::new(())),
        })
    }

    /// The grid instance ID.
    pub fn id(&self) -> GridId {
        self.id
    }

    /// The virtualization coordinator.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    // ----- Dirty tracking -----

    pub(super) fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Relaxed);
    }

    /// Check whether state changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Relaxed)
    }

    /// Consume the dirty flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::Relaxed)
    }

    // ----- Records and view -----

    /// Replace the dataset. The view is recomputed through the pipeline.
    pub fn set_records(&self, records: Vec<Record>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.records = records;
            inner.recompute();
        }
        self.mark_dirty();
    }

    /// Number of source records, before filtering.
    pub fn source_len(&self) -> usize {
        self.inner.read().map(|g| g.records.len()).unwrap_or(0)
    }

    /// Number of rows in the current view.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.view.len()).unwrap_or(0)
    }

    /// Check if the view is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The current view as record indices, in display order.
    pub fn view_indices(&self) -> Vec<usize> {
        self.inner.read().map(|g| g.view.clone()).unwrap_or_default()
    }

    /// Map a view row to its source record index.
    pub fn record_index(&self, view_row: usize) -> Option<usize> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.view.get(view_row).copied())
    }

    /// The record at a view row.
    pub fn row(&self, view_row: usize) -> Option<Record> {
        self.inner.read().ok().and_then(|g| {
            let index = *g.view.get(view_row)?;
            g.records.get(index).cloned()
        })
    }

    // ----- Columns -----

    /// All columns in registry order, hidden included.
    pub fn columns(&self) -> Vec<ColumnConfig> {
        self.inner
            .read()
            .map(|g| g.columns.columns().to_vec())
            .unwrap_or_default()
    }

    /// Get a column by key.
    pub fn column(&self, key: &str) -> Option<ColumnConfig> {
        self.inner.read().ok().and_then(|g| g.columns.get(key).cloned())
    }

    /// Visible column keys, in display order.
    pub fn visible_keys(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| {
                g.columns
                    .visible_columns()
                    .iter()
                    .map(|c| c.key.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Append a column.
    pub fn add_column(&self, column: ColumnConfig, cx: &GridContext) -> Result<(), GridError> {
        if let Ok(mut inner) = self.inner.write() {
            inner.columns.add(column)?;
        }
        self.columns_changed(cx);
        Ok(())
    }

    /// Remove a column. Sort and filter expressions keyed on it are
    /// dropped and the view recomputed.
    pub fn remove_column(&self, key: &str, cx: &GridContext) -> Result<(), GridError> {
        if let Ok(mut inner) = self.inner.write() {
            if inner.columns.remove(key).is_none() {
                return Err(GridError::UnknownColumn(key.to_string()));
            }
            inner.sort.reset(Some(key));
            inner.filter.apply(key, None);
            if inner
                .active
                .as_ref()
                .is_some_and(|active| active.column == key)
            {
                inner.active = None;
            }
            inner.recompute();
        }
        self.columns_changed(cx);
        Ok(())
    }

    /// Toggle a column's hidden flag. Unaffected columns keep their
    /// visible order.
    pub fn set_column_hidden(
        &self,
        key: &str,
        hidden: bool,
        cx: &GridContext,
    ) -> Result<(), GridError> {
        if let Ok(mut inner) = self.inner.write() {
            inner.columns.set_hidden(key, hidden)?;
        }
        self.columns_changed(cx);
        Ok(())
    }

    /// Set an explicit width for a resizable column.
    pub fn resize_column(&self, key: &str, px: u16, cx: &GridContext) -> Result<(), GridError> {
        if let Ok(mut inner) = self.inner.write() {
            inner.columns.set_width(key, px)?;
        }
        self.columns_changed(cx);
        Ok(())
    }

    fn columns_changed(&self, cx: &GridContext) {
        self.mark_dirty();
        cx.push_event(GridEvent::new(
            GridEventKind::ColumnsChanged,
            self.id.to_string(),
        ));
    }

    // ----- Widths -----

    /// Set the container width in px used for width distribution.
    pub fn set_container_width(&self, px: u16) {
        if let Ok(mut inner) = self.inner.write() {
            if inner.container_width != px {
                inner.container_width = px;
                self.mark_dirty();
            }
        }
        self.viewport.set_viewport_width(u32::from(px));
    }

    /// Computed widths for the visible column set.
    pub fn column_widths(&self) -> Vec<ColumnWidth> {
        self.inner
            .read()
            .map(|g| compute_column_widths(&g.columns.visible_columns(), g.container_width))
            .unwrap_or_default()
    }

    // ----- Rendering -----

    /// Cell text for a view row and column key.
    ///
    /// Uses the column's cell template when installed, otherwise the
    /// value's default formatting (null renders empty).
    pub fn render_cell(&self, view_row: usize, key: &str) -> Option<String> {
        let guard = self.inner.read().ok()?;
        let record = guard.records.get(*guard.view.get(view_row)?)?;
        let column = guard.columns.get(key)?;
        let value = column.resolve(record);
        match &column.cell_template {
            Some(template) => Some(template(&crate::columns::CellContext {
                record,
                column,
                value,
            })),
            None => Some(value.map(ToString::to_string).unwrap_or_default()),
        }
    }

    /// Header text for a column key.
    pub fn render_header(&self, key: &str) -> Option<String> {
        let guard = self.inner.read().ok()?;
        let column = guard.columns.get(key)?;
        match &column.header_template {
            Some(template) => Some(template(column)),
            None => Some(column.label().to_string()),
        }
    }

    // ----- Active node -----

    /// The current active cell, if any.
    pub fn active(&self) -> Option<ActiveNode> {
        self.inner.read().ok().and_then(|g| g.active.clone())
    }

    /// Check whether the given cell is the active one.
    pub fn is_active(&self, view_row: usize, key: &str) -> bool {
        self.active()
            .is_some_and(|a| a.row == view_row && a.column == key)
    }

    // ----- Sorting -----

    /// The grid-wide sort mode.
    pub fn sort_mode(&self) -> SortMode {
        self.inner
            .read()
            .map(|g| g.sort_mode)
            .unwrap_or_default()
    }

    /// Set the grid-wide sort mode.
    pub fn set_sort_mode(&self, mode: SortMode) {
        if let Ok(mut inner) = self.inner.write() {
            inner.sort_mode = mode;
        }
    }

    /// Active sorting expressions in priority order.
    pub fn sort_expressions(&self) -> Vec<SortingExpression> {
        self.inner
            .read()
            .map(|g| g.sort.expressions().to_vec())
            .unwrap_or_default()
    }

    /// The active direction for a column key, if it participates in the
    /// sort.
    pub fn sorted_direction(&self, key: &str) -> Option<SortDirection> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.sort.get(key).map(|e| e.direction))
    }

    /// Merge expressions into the sort state programmatically and
    /// recompute the view. Emits no events; header interactions go
    /// through `sort_from_header_click`.
    pub fn sort(&self, expressions: impl IntoIterator<Item = SortingExpression>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.sort.sort(expressions);
            inner.recompute();
        }
        self.mark_dirty();
    }

    /// Clear one column's expression, or the entire sort state.
    pub fn reset_sort(&self, key: Option<&str>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.sort.reset(key);
            inner.recompute();
        }
        self.mark_dirty();
    }

    /// Register the cancelable "sorting" hook.
    ///
    /// The hook runs before a header-click sort commits, receiving the
    /// candidate expression and the prospective expression list. Returning
    /// `false` vetoes the mutation; state and view stay untouched.
    pub fn on_sorting(&self, hook: impl Fn(&SortingEventDetail) -> bool + Send + Sync + 'static) {
        if let Ok(mut inner) = self.inner.write() {
            inner.sorting_hook = Some(Arc::new(hook));
        }
    }

    // ----- Filtering -----

    /// Store or clear a per-column filter predicate and recompute the
    /// view.
    pub fn apply_filter(
        &self,
        key: &str,
        expression: Option<FilterExpression>,
        cx: &GridContext,
    ) -> Result<(), GridError> {
        if let Ok(mut inner) = self.inner.write() {
            let Some(column) = inner.columns.get(key) else {
                return Err(GridError::UnknownColumn(key.to_string()));
            };
            if !column.filterable {
                return Err(GridError::NotFilterable(key.to_string()));
            }
            inner.filter.apply(key, expression);
            inner.recompute();
        }
        self.mark_dirty();
        cx.push_event(GridEvent::new(GridEventKind::Filtered, self.id.to_string()));
        Ok(())
    }

    /// Clear all filter predicates and close any open editor.
    pub fn clear_filters(&self, cx: &GridContext) {
        if let Ok(mut inner) = self.inner.write() {
            if inner.filter.is_empty() && inner.filter.active_column().is_none() {
                return;
            }
            inner.filter.clear();
            inner.recompute();
        }
        self.mark_dirty();
        cx.push_event(GridEvent::new(GridEventKind::Filtered, self.id.to_string()));
    }

    /// Open the filter editor for a column (or close it with `None`).
    ///
    /// At most one editor is open; selecting a new column implicitly
    /// closes the previous one.
    pub fn set_filter_active_column(&self, key: Option<&str>) -> Result<(), GridError> {
        if let Ok(mut inner) = self.inner.write() {
            if let Some(key) = key {
                let Some(column) = inner.columns.get(key) else {
                    return Err(GridError::UnknownColumn(key.to_string()));
                };
                if !column.filterable {
                    return Err(GridError::NotFilterable(key.to_string()));
                }
            }
            inner.filter.set_active_column(key);
        }
        self.mark_dirty();
        Ok(())
    }

    /// The column whose filter editor is open, if any.
    pub fn filter_active_column(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.filter.active_column().map(ToString::to_string))
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("rows", &self.len())
            .field("active", &self.active())
            .finish()
    }
}
