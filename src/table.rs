use tracing::{debug, warn};

use crate::column::{ColumnDef, ColumnRegistry};
use crate::condition::{Assignment, Condition, Projection};
use crate::config::DbConfig;
use crate::error::{DbError, Result};
use crate::predicate::Predicate;
use crate::row_store::RowStore;
use crate::value::Value;

/// A named table with a fixed column layout.
///
/// Every operation validates its whole input before touching any row, so a
/// call either applies completely or returns an error and leaves the table
/// unchanged.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    registry: ColumnRegistry,
    rows: RowStore,
    compact_threshold: Option<f64>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Result<Self> {
        Self::with_config(name, columns, &DbConfig::default())
    }

    /// # Errors
    /// Returns [DbError::DuplicateColumn] if two columns share a name.
    pub fn with_config(
        name: impl Into<String>,
        columns: Vec<ColumnDef>,
        config: &DbConfig,
    ) -> Result<Self> {
        let name = name.into();
        let registry = ColumnRegistry::new(&name, columns)?;
        debug!(table = %name, columns = registry.len(), "created table");
        Ok(Self {
            name,
            registry,
            rows: RowStore::with_capacity(config.initial_table_capacity),
            compact_threshold: config.compact_threshold,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnDef] {
        self.registry.columns()
    }

    /// Number of live rows.
    pub fn row_count(&self) -> usize {
        self.rows.live_count()
    }

    /// Number of storage slots, deleted rows included.
    pub fn slot_count(&self) -> usize {
        self.rows.slot_count()
    }

    /// Returns the live row stored at `position`.
    pub fn get_row(&self, position: usize) -> Option<&[Value]> {
        self.rows.get(position)
    }

    /// Appends a row and returns its storage position.
    ///
    /// Values are not checked against the declared column types.
    ///
    /// # Errors
    /// Returns [DbError::ArityMismatch] if `values` does not hold exactly one
    /// value per column.
    pub fn insert(&mut self, values: Vec<Value>) -> Result<usize> {
        if values.len() != self.registry.len() {
            let err = DbError::ArityMismatch {
                table: self.name.clone(),
                expected: self.registry.len(),
                got: values.len(),
            };
            warn!(%err, "rejected insert");
            return Err(err);
        }
        let position = self.rows.append(values);
        debug!(table = %self.name, position, "inserted row");
        Ok(position)
    }

    /// Returns the projection of every live row matching all `conditions`,
    /// in storage order. Returns an empty vector when nothing matches.
    ///
    /// # Errors
    /// Returns [DbError::UnknownColumn] if a projected or filtered column does
    /// not exist.
    pub fn select(
        &self,
        projection: &Projection,
        conditions: &[Condition],
    ) -> Result<Vec<Vec<Value>>> {
        let predicate = self.bind(conditions)?;
        let positions = match projection {
            Projection::All => None,
            Projection::Columns(names) => Some(
                names
                    .iter()
                    .map(|name| self.resolve(name))
                    .collect::<Result<Vec<usize>>>()?,
            ),
        };

        let result = self
            .rows
            .iter_live()
            .filter(|(_, row)| predicate.matches(row))
            .map(|(_, row)| match &positions {
                None => row.to_vec(),
                Some(positions) => positions.iter().map(|&p| row[p].clone()).collect(),
            })
            .collect();
        Ok(result)
    }

    /// Applies every assignment, in order, to each live row matching all
    /// `conditions`. Returns the number of rows updated.
    ///
    /// # Errors
    /// Returns [DbError::UnknownColumn] if an assigned or filtered column does
    /// not exist.
    pub fn update(&mut self, assignments: &[Assignment], conditions: &[Condition]) -> Result<usize> {
        let predicate = self.bind(conditions)?;
        let assignments = assignments
            .iter()
            .map(|a| Ok((self.resolve(&a.column)?, &a.value)))
            .collect::<Result<Vec<(usize, &Value)>>>()?;

        let mut updated = 0;
        for (_, row) in self.rows.iter_live_mut() {
            if !predicate.matches(row.as_slice()) {
                continue;
            }
            for (position, value) in &assignments {
                row[*position] = (*value).clone();
            }
            updated += 1;
        }
        debug!(table = %self.name, updated, "updated rows");
        Ok(updated)
    }

    /// Tombstones each live row matching all `conditions` and returns how
    /// many rows were deleted. Storage is not compacted unless the table was
    /// configured with a compaction threshold.
    ///
    /// # Errors
    /// Returns [DbError::UnknownColumn] if a filtered column does not exist.
    pub fn delete(&mut self, conditions: &[Condition]) -> Result<usize> {
        let predicate = self.bind(conditions)?;
        let matching: Vec<usize> = self
            .rows
            .iter_live()
            .filter(|(_, row)| predicate.matches(row))
            .map(|(position, _)| position)
            .collect();

        let deleted = matching
            .into_iter()
            .filter(|&position| self.rows.tombstone(position))
            .count();
        debug!(table = %self.name, deleted, "deleted rows");

        if let Some(threshold) = self.compact_threshold {
            let slots = self.rows.slot_count();
            if slots > 0 && self.rows.tombstone_count() as f64 / slots as f64 > threshold {
                self.compact();
            }
        }
        Ok(deleted)
    }

    /// Reclaims the slots of deleted rows and returns how many were freed.
    ///
    /// Positions previously returned by [Table::insert] are invalid afterward.
    pub fn compact(&mut self) -> usize {
        let reclaimed = self.rows.compact();
        debug!(table = %self.name, reclaimed, "compacted table");
        reclaimed
    }

    fn resolve(&self, column: &str) -> Result<usize> {
        self.registry.resolve(column).inspect_err(|err| {
            warn!(%err, "rejected column reference");
        })
    }

    fn bind<'a>(&self, conditions: &'a [Condition]) -> Result<Predicate<'a>> {
        Predicate::bind(&self.registry, conditions).inspect_err(|err| {
            warn!(%err, "rejected conditions");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::DataType;
    use crate::row;

    fn users() -> Table {
        let mut table = Table::new(
            "users",
            vec![
                ColumnDef::new("id", DataType::Int),
                ColumnDef::new("name", DataType::Text),
                ColumnDef::new("age", DataType::Int),
            ],
        )
        .unwrap();
        table.insert(row![1, "Juros", 32]).unwrap();
        table.insert(row![2, "Meladi", 45]).unwrap();
        table.insert(row![3, "Kolinsa", 26]).unwrap();
        table
    }

    fn all(table: &Table) -> Vec<Vec<Value>> {
        table.select(&Projection::All, &[]).unwrap()
    }

    #[test]
    fn test_table_creation() {
        let table = Table::new(
            "users",
            vec![
                ColumnDef::new("id", DataType::Int),
                ColumnDef::new("name", DataType::Text),
            ],
        )
        .unwrap();

        assert_eq!(table.name(), "users");
        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.row_count(), 0);
        assert!(all(&table).is_empty());
    }

    #[test]
    fn test_insert_and_get() {
        let mut table = users();

        assert_eq!(table.insert(row![4, "Ada", None::<i64>]).unwrap(), 3);
        assert_eq!(table.row_count(), 4);
        assert_eq!(
            table.get_row(3),
            Some(row![4, "Ada", Value::Null].as_slice())
        );
        assert_eq!(table.get_row(4), None);
    }

    #[test]
    fn test_insert_arity_mismatch() {
        let mut table = users();

        let err = table.insert(row![4, "Ada"]).unwrap_err();
        assert_eq!(
            err,
            DbError::ArityMismatch {
                table: "users".into(),
                expected: 3,
                got: 2,
            }
        );
        assert!(table.insert(row![4, "Ada", 20, 1]).is_err());
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_insert_does_not_check_types() {
        let mut table = users();

        table.insert(row!["four", 4, true]).unwrap();
        assert_eq!(table.row_count(), 4);
    }

    #[test]
    fn test_select_star_in_insertion_order() {
        let table = users();

        assert_eq!(
            all(&table),
            vec![
                row![1, "Juros", 32],
                row![2, "Meladi", 45],
                row![3, "Kolinsa", 26],
            ]
        );
    }

    #[test]
    fn test_select_projection_order() {
        let table = users();

        let result = table
            .select(&Projection::from_names(&["age", "id"]), &[])
            .unwrap();
        assert_eq!(result, vec![row![32, 1], row![45, 2], row![26, 3]]);

        let result = table
            .select(
                &Projection::from_names(&["age"]),
                &[Condition::equal("name", "Kolinsa")],
            )
            .unwrap();
        assert_eq!(result, vec![row![26]]);
    }

    #[test]
    fn test_select_with_conjunction() {
        let table = users();

        let result = table
            .select(
                &Projection::All,
                &[
                    Condition::not_equal("name", "Juros"),
                    Condition::equal("age", 26),
                ],
            )
            .unwrap();
        assert_eq!(result, vec![row![3, "Kolinsa", 26]]);
    }

    #[test]
    fn test_select_no_match_is_empty() {
        let table = users();

        let result = table
            .select(&Projection::All, &[Condition::equal("age", 100)])
            .unwrap();
        assert_eq!(result, Vec::<Vec<Value>>::new());
    }

    #[test]
    fn test_select_unknown_column() {
        let table = users();

        assert!(matches!(
            table.select(&Projection::from_names(&["email"]), &[]),
            Err(DbError::UnknownColumn { .. })
        ));
        assert!(matches!(
            table.select(&Projection::All, &[Condition::equal("email", "x")]),
            Err(DbError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_update() {
        let mut table = users();

        let updated = table
            .update(
                &[Assignment::new("age", 25)],
                &[Condition::equal("name", "Kolinsa")],
            )
            .unwrap();
        assert_eq!(updated, 1);

        assert_eq!(
            all(&table),
            vec![
                row![1, "Juros", 32],
                row![2, "Meladi", 45],
                row![3, "Kolinsa", 25],
            ]
        );
    }

    #[test]
    fn test_update_applies_assignments_in_order() {
        let mut table = users();

        table
            .update(
                &[
                    Assignment::new("age", 1),
                    Assignment::new("name", "Renamed"),
                    Assignment::new("age", 2),
                ],
                &[Condition::equal("id", 2)],
            )
            .unwrap();

        assert_eq!(table.get_row(1), Some(row![2, "Renamed", 2].as_slice()));
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_update_unknown_column_changes_nothing() {
        let mut table = users();

        let result = table.update(
            &[Assignment::new("age", 99), Assignment::new("email", "x")],
            &[],
        );
        assert!(result.is_err());
        assert_eq!(table.get_row(0), Some(row![1, "Juros", 32].as_slice()));
    }

    #[test]
    fn test_update_skips_deleted_rows() {
        let mut table = users();
        table.delete(&[Condition::equal("id", 1)]).unwrap();

        let updated = table.update(&[Assignment::new("age", 0)], &[]).unwrap();
        assert_eq!(updated, 2);
        assert_eq!(all(&table), vec![row![2, "Meladi", 0], row![3, "Kolinsa", 0]]);
    }

    #[test]
    fn test_delete() {
        let mut table = users();

        let deleted = table.delete(&[Condition::not_equal("age", 32)]).unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(all(&table), vec![row![1, "Juros", 32]]);

        // slots are retained
        assert_eq!(table.slot_count(), 3);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut table = users();

        assert_eq!(table.delete(&[Condition::equal("id", 2)]).unwrap(), 1);
        let after_first = all(&table);

        assert_eq!(table.delete(&[Condition::equal("id", 2)]).unwrap(), 0);
        assert_eq!(all(&table), after_first);
    }

    #[test]
    fn test_delete_all_with_empty_conditions() {
        let mut table = users();

        assert_eq!(table.delete(&[]).unwrap(), 3);
        assert!(all(&table).is_empty());
        assert_eq!(table.delete(&[]).unwrap(), 0);
    }

    #[test]
    fn test_positions_stable_across_deletes() {
        let mut table = users();
        table.delete(&[Condition::equal("id", 1)]).unwrap();

        assert_eq!(table.get_row(0), None);
        assert_eq!(table.get_row(2), Some(row![3, "Kolinsa", 26].as_slice()));
        assert_eq!(table.insert(row![4, "Ada", 19]).unwrap(), 3);
    }

    #[test]
    fn test_compact() {
        let mut table = users();
        table.delete(&[Condition::equal("id", 2)]).unwrap();

        assert_eq!(table.compact(), 1);
        assert_eq!(table.slot_count(), 2);
        assert_eq!(all(&table), vec![row![1, "Juros", 32], row![3, "Kolinsa", 26]]);
        assert_eq!(table.get_row(1), Some(row![3, "Kolinsa", 26].as_slice()));
    }

    #[test]
    fn test_auto_compact_threshold() {
        let config = DbConfig {
            initial_table_capacity: 4,
            compact_threshold: Some(0.5),
        };
        let mut table = Table::with_config(
            "t",
            vec![ColumnDef::new("id", DataType::Int)],
            &config,
        )
        .unwrap();
        for id in 0..4 {
            table.insert(row![id]).unwrap();
        }

        // 1 of 4 slots tombstoned: below the threshold
        table.delete(&[Condition::equal("id", 0)]).unwrap();
        assert_eq!(table.slot_count(), 4);

        // 3 of 4: compacted
        table.delete(&[Condition::not_equal("id", 3)]).unwrap();
        assert_eq!(table.slot_count(), 1);
        assert_eq!(all(&table), vec![row![3]]);
    }
}
