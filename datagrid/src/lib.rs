//! A virtualized data grid engine.
//!
//! `datagrid` is the logical core of a data grid: dynamic records with
//! nested field resolution, a column registry, tri-state multi-column
//! sorting with a cancelable pre-sort hook, per-column filtering, a pure
//! filter-then-sort view pipeline, active-cell keyboard navigation and a
//! virtualization coordinator that scrolls off-window targets into view
//! before navigation commits. Rendering is left entirely to the host.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use datagrid::prelude::*;
//!
//! let window = Arc::new(Window::new(36));
//! let grid = Grid::new(
//!     vec![
//!         ColumnConfig::new("name").header("Name").sortable(),
//!         ColumnConfig::new("address.city").header("City").filterable(),
//!     ],
//!     window,
//! )
//! .unwrap();
//!
//! grid.set_records(vec![
//!     Record::new()
//!         .set("name", "Alice")
//!         .set("address", Record::new().set("city", "Paris")),
//! ]);
//!
//! assert_eq!(grid.render_cell(0, "address.city").as_deref(), Some("Paris"));
//! ```

pub mod columns;
pub mod context;
pub mod data;
pub mod error;
pub mod events;
pub mod grid;
pub mod input;
pub mod navigation;
pub mod record;
pub mod viewport;
pub mod window;

pub use grid::Grid;

pub mod prelude {
    pub use crate::columns::{
        CellContext, ColumnConfig, ColumnRegistry, ColumnWidth, DataType, SortOptions,
    };
    pub use crate::context::{GridContext, HostWakeup};
    pub use crate::data::{
        FilterExpression, FilterState, SortDirection, SortMode, SortState, SortingExpression,
    };
    pub use crate::error::GridError;
    pub use crate::events::{GridEvent, GridEventKind, SortingEventDetail};
    pub use crate::grid::{Grid, GridId};
    pub use crate::input::{EventResult, Key, KeyCombo, Modifiers};
    pub use crate::navigation::ActiveNode;
    pub use crate::record::{Record, Value};
    pub use crate::viewport::{HorizontalSpan, Viewport, WindowedList};
    pub use crate::window::Window;
}
