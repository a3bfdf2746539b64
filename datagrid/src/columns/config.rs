//! Column configuration types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::sort::Comparer;
use crate::record::{Record, Value};

/// Data type of a column, used for default comparison and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    Number,
    Boolean,
    Date,
}

/// Per-column sort configuration, frozen into sorting expressions when
/// they are created.
#[derive(Clone, Default)]
pub struct SortOptions {
    /// Compare string values case sensitively.
    pub case_sensitive: bool,
    /// Custom ordering function overriding the default comparer.
    pub comparer: Option<Comparer>,
}

impl fmt::Debug for SortOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortOptions")
            .field("case_sensitive", &self.case_sensitive)
            .field("comparer", &self.comparer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Context passed to per-cell render hooks.
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    /// The record backing the row.
    pub record: &'a Record,
    /// The column being rendered.
    pub column: &'a ColumnConfig,
    /// The resolved field value, if any.
    pub value: Option<&'a Value>,
}

/// Custom cell rendering strategy.
pub type CellTemplate = Arc<dyn Fn(&CellContext<'_>) -> String + Send + Sync>;

/// Custom header rendering strategy.
pub type HeaderTemplate = Arc<dyn Fn(&ColumnConfig) -> String + Send + Sync>;

/// Column configuration.
///
/// Columns define the structure of the grid: a stable key, the field path
/// the column displays, capability flags, and optional render hooks.
///
/// # Examples
///
/// ```
/// use datagrid::columns::{ColumnConfig, DataType};
///
/// let columns = vec![
///     ColumnConfig::new("id").data_type(DataType::Number),
///     ColumnConfig::new("name").header("Name").sortable(),
///     ColumnConfig::new("address.city").header("City").filterable(),
/// ];
/// ```
#[derive(Clone)]
pub struct ColumnConfig {
    /// Stable identity, unique within the registry.
    pub key: String,
    /// Dotted path into the record, or `None` for computed/header-only
    /// columns.
    pub field: Option<String>,
    /// Display label override. Falls back to the key.
    pub header: Option<String>,
    /// Column participates in sorting.
    pub sortable: bool,
    /// Column participates in filtering.
    pub filterable: bool,
    /// Column width can be changed at runtime.
    pub resizable: bool,
    /// Column is excluded from the visible set.
    pub hidden: bool,
    /// Data type for default comparison/formatting.
    pub data_type: DataType,
    /// Explicit width in px. `None` participates in even distribution.
    pub width: Option<u16>,
    /// Per-column sort configuration.
    pub sort: Option<SortOptions>,
    /// Custom cell rendering strategy.
    pub cell_template: Option<CellTemplate>,
    /// Custom header rendering strategy.
    pub header_template: Option<HeaderTemplate>,
}

impl ColumnConfig {
    /// Create a column bound to a field path. The key defaults to the
    /// field path itself.
    pub fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            key: field.clone(),
            field: Some(field),
            header: None,
            sortable: false,
            filterable: false,
            resizable: false,
            hidden: false,
            data_type: DataType::default(),
            width: None,
            sort: None,
            cell_template: None,
            header_template: None,
        }
    }

    /// Create a computed/header-only column with an explicit key and no
    /// field path.
    pub fn computed(key: impl Into<String>) -> Self {
        Self {
            field: None,
            ..Self::new(key)
        }
    }

    /// Override the column key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the display label.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column filterable.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Make the column resizable.
    pub fn resizable(mut self) -> Self {
        self.resizable = true;
        self
    }

    /// Hide the column.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Set the data type.
    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Set an explicit width in px.
    pub fn width(mut self, px: u16) -> Self {
        self.width = Some(px);
        self
    }

    /// Set per-column sort options.
    pub fn sort_options(mut self, options: SortOptions) -> Self {
        self.sort = Some(options);
        self
    }

    /// Install a custom cell rendering strategy.
    pub fn cell_template(
        mut self,
        template: impl Fn(&CellContext<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.cell_template = Some(Arc::new(template));
        self
    }

    /// Install a custom header rendering strategy.
    pub fn header_template(
        mut self,
        template: impl Fn(&ColumnConfig) -> String + Send + Sync + 'static,
    ) -> Self {
        self.header_template = Some(Arc::new(template));
        self
    }

    /// Display label: the header override or the key.
    pub fn label(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.key)
    }

    /// Resolve this column's value from a record.
    ///
    /// Computed columns (no field path) resolve to `None`.
    pub fn resolve<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        self.field.as_deref().and_then(|path| record.resolve(path))
    }
}

impl fmt::Debug for ColumnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnConfig")
            .field("key", &self.key)
            .field("field", &self.field)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("resizable", &self.resizable)
            .field("hidden", &self.hidden)
            .field("data_type", &self.data_type)
            .field("width", &self.width)
            .field("sort", &self.sort)
            .field("cell_template", &self.cell_template.as_ref().map(|_| "<fn>"))
            .field(
                "header_template",
                &self.header_template.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}
