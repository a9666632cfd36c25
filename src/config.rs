//! Database configuration.

/// Database configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DbConfig {
    /// Initial row capacity reserved for every new table
    pub initial_table_capacity: usize,
    /// Tombstoned fraction of a table's slots above which a delete compacts
    /// the table. `None` never compacts, so row positions stay stable.
    pub compact_threshold: Option<f64>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            initial_table_capacity: 64,
            compact_threshold: None,
        }
    }
}
