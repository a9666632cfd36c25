use crate::column::ColumnRegistry;
use crate::condition::{Condition, Operator};
use crate::error::Result;
use crate::value::Value;

/// A condition whose column has already been resolved to a row position.
#[derive(Debug, Clone)]
struct BoundCondition<'a> {
    position: usize,
    op: Operator,
    value: &'a Value,
}

/// Conjunction of conditions bound to a table's column layout.
///
/// Binding resolves every column name up front, so an unknown column is
/// reported before a single row is scanned and [Predicate::matches] itself
/// cannot fail.
#[derive(Debug, Clone)]
pub struct Predicate<'a> {
    conditions: Vec<BoundCondition<'a>>,
}

impl<'a> Predicate<'a> {
    /// # Errors
    /// Returns [crate::DbError::UnknownColumn] if any condition names a column
    /// missing from `registry`.
    pub fn bind(registry: &ColumnRegistry, conditions: &'a [Condition]) -> Result<Self> {
        let conditions = conditions
            .iter()
            .map(|c| {
                Ok(BoundCondition {
                    position: registry.resolve(&c.column)?,
                    op: c.op,
                    value: &c.value,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { conditions })
    }

    /// Tests a live row. An empty predicate matches every row.
    ///
    /// Conditions are evaluated in the given order and evaluation stops at
    /// the first one that fails.
    pub fn matches(&self, row: &[Value]) -> bool {
        self.conditions
            .iter()
            .all(|c| c.op.eval(&row[c.position], c.value))
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
