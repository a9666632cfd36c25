use std::collections::HashMap;

use tracing::debug;

use crate::column::ColumnDef;
use crate::config::DbConfig;
use crate::error::{DbError, Result};
use crate::table::Table;

/// Owns a set of named tables.
///
/// There is no global registry: each `Database` value is its own scope and
/// callers reach tables through it.
#[derive(Debug, Default)]
pub struct Database {
    /// A map of table names to their respective [Table] structures.
    tables: HashMap<String, Table>,
    config: DbConfig,
}

impl Database {
    /// Creates a new, empty database instance.
    pub fn new() -> Self {
        Self::with_config(DbConfig::default())
    }

    pub fn with_config(config: DbConfig) -> Self {
        Self {
            tables: HashMap::default(),
            config,
        }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Creates a new table and returns a handle to it.
    ///
    /// # Errors
    /// Returns an error if a table with the same name already exists, or if
    /// `columns` declares the same name twice.
    ///
    /// # Example
    /// ```
    /// use rowstore::{ColumnDef, DataType, Database, Projection, row};
    ///
    /// let mut db = Database::new();
    /// let users = db
    ///     .create_table(
    ///         "users",
    ///         vec![
    ///             ColumnDef::new("id", DataType::Int),
    ///             ColumnDef::new("name", DataType::Text),
    ///         ],
    ///     )
    ///     .unwrap();
    /// users.insert(row![1, "Juros"]).unwrap();
    ///
    /// let rows = db.table("users").unwrap().select(&Projection::All, &[]).unwrap();
    /// assert_eq!(rows, vec![row![1, "Juros"]]);
    /// ```
    pub fn create_table(
        &mut self,
        name: impl Into<String>,
        columns: Vec<ColumnDef>,
    ) -> Result<&mut Table> {
        let name = name.into();
        if self.tables.contains_key(&name) {
            return Err(DbError::TableAlreadyExists(name));
        }
        let table = Table::with_config(name.clone(), columns, &self.config)?;
        debug!(table = %name, "registered table");
        Ok(self.tables.entry(name).or_insert(table))
    }

    /// Retrieves a reference to a table by name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Retrieves a mutable reference to a table by name.
    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    /// Like [Database::get_table], but reports a missing table as an error.
    pub fn table(&self, name: &str) -> Result<&Table> {
        self.get_table(name)
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))
    }

    /// Like [Database::get_table_mut], but reports a missing table as an error.
    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.get_table_mut(name)
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))
    }

    /// Returns the names of all tables, in no particular order.
    pub fn list_tables(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
