//! An embeddable in-memory row store: named tables with a fixed column
//! layout, row insertion, and select/update/delete filtered by conjunctions
//! of equality conditions.

pub mod column;
pub mod condition;
pub mod config;
pub mod data_type;
pub mod database;
pub mod error;
pub mod predicate;
pub mod row_store;
pub mod table;
pub mod value;

pub use column::{ColumnDef, ColumnRegistry};
pub use condition::{Assignment, Condition, Operator, Projection};
pub use config::DbConfig;
pub use data_type::DataType;
pub use database::Database;
pub use error::{DbError, Result};
pub use predicate::Predicate;
pub use row_store::RowStore;
pub use table::Table;
pub use value::Value;
