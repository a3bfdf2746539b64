//! Column configuration, registry and width computation.

mod config;
mod registry;
mod widths;

pub use config::{CellContext, CellTemplate, ColumnConfig, DataType, HeaderTemplate, SortOptions};
pub use registry::ColumnRegistry;
pub use widths::{ColumnWidth, MIN_COLUMN_WIDTH, compute_column_widths};
