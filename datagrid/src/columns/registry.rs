//! Ordered column registry.

use crate::error::GridError;

use super::config::ColumnConfig;

/// Ordered mutable collection of column configurations.
///
/// Registry order is the authoritative column order; hidden columns keep
/// their position but are excluded from the visible set. Columns may be
/// added and removed at any time, and the visible order of unaffected
/// columns stays stable.
#[derive(Debug, Clone, Default)]
pub struct ColumnRegistry {
    columns: Vec<ColumnConfig>,
}

impl ColumnRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from declarative configuration.
    ///
    /// Fails on duplicate column keys.
    pub fn from_columns(columns: Vec<ColumnConfig>) -> Result<Self, GridError> {
        let mut registry = Self::new();
        for column in columns {
            registry.add(column)?;
        }
        Ok(registry)
    }

    /// Number of registered columns, hidden included.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Append a column.
    pub fn add(&mut self, column: ColumnConfig) -> Result<(), GridError> {
        if self.columns.iter().any(|c| c.key == column.key) {
            return Err(GridError::DuplicateColumn(column.key));
        }
        log::debug!("registering column {}", column.key);
        self.columns.push(column);
        Ok(())
    }

    /// Remove a column by key, returning its configuration.
    pub fn remove(&mut self, key: &str) -> Option<ColumnConfig> {
        let index = self.columns.iter().position(|c| c.key == key)?;
        Some(self.columns.remove(index))
    }

    /// Get a column by key.
    pub fn get(&self, key: &str) -> Option<&ColumnConfig> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Get a mutable column by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut ColumnConfig> {
        self.columns.iter_mut().find(|c| c.key == key)
    }

    /// All columns in registry order, hidden included.
    pub fn columns(&self) -> &[ColumnConfig] {
        &self.columns
    }

    /// Visible columns in registry order.
    pub fn visible_columns(&self) -> Vec<&ColumnConfig> {
        self.columns.iter().filter(|c| !c.hidden).collect()
    }

    /// Position of a key within the visible set.
    pub fn visible_position(&self, key: &str) -> Option<usize> {
        self.visible_columns().iter().position(|c| c.key == key)
    }

    /// Toggle a column's hidden flag. Returns the new flag value.
    pub fn set_hidden(&mut self, key: &str, hidden: bool) -> Result<(), GridError> {
        match self.get_mut(key) {
            Some(column) => {
                column.hidden = hidden;
                Ok(())
            }
            None => Err(GridError::UnknownColumn(key.to_string())),
        }
    }

    /// Set an explicit width for a resizable column.
    pub fn set_width(&mut self, key: &str, px: u16) -> Result<(), GridError> {
        let Some(column) = self.get_mut(key) else {
            return Err(GridError::UnknownColumn(key.to_string()));
        };
        if !column.resizable {
            return Err(GridError::NotResizable(key.to_string()));
        }
        column.width = Some(px);
        Ok(())
    }
}
