use serde::{Deserialize, Serialize};

use super::column::Column;

/// Free-form canvas coordinates; the model enforces no bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A table is always created with one seed column and keeps its columns in
/// insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub name: String,
    pub columns: Vec<Column>,
    pub position: Position,
}

impl Table {
    /// The implicit primary-key column created with the table. `None` only
    /// for configs hydrated from outside that bypassed validation.
    pub fn seed_column(&self) -> Option<&Column> {
        self.columns.first()
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub(crate) fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }
}
