use std::collections::HashMap;

use crate::data_type::DataType;
use crate::error::{DbError, Result};

/// Column definition: a name and its declared type tag.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Maps every column name of a table to its fixed position inside a row.
///
/// Built once when the table is created and never mutated afterward, so
/// `positions[columns[i].name] == i` holds for the lifetime of the table.
#[derive(Debug, Clone)]
pub struct ColumnRegistry {
    table: String,
    columns: Vec<ColumnDef>,
    positions: HashMap<String, usize>,
}

impl ColumnRegistry {
    /// Builds the registry for `table` from its declared columns, in order.
    ///
    /// # Errors
    /// Returns [DbError::DuplicateColumn] if two columns share a name.
    pub fn new(table: &str, columns: Vec<ColumnDef>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if positions.insert(column.name.clone(), i).is_some() {
                return Err(DbError::DuplicateColumn {
                    table: table.to_string(),
                    column: column.name.clone(),
                });
            }
        }
        Ok(Self {
            table: table.to_string(),
            columns,
            positions,
        })
    }

    /// Returns the zero-based row position of column `name`.
    ///
    /// # Errors
    /// Returns [DbError::UnknownColumn] if the table has no such column.
    pub fn resolve(&self, name: &str) -> Result<usize> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| DbError::UnknownColumn {
                table: self.table.clone(),
                column: name.to_string(),
            })
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Number of declared columns, which is also the length of every row.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}
