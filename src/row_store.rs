use bitvec::prelude::*;

use crate::value::Value;

/// Row-oriented storage for a table.
///
/// Rows are only ever appended. Deleting a row sets its bit in `tombstones`
/// and releases its values, but the slot itself stays in place so every other
/// row keeps its storage position until [RowStore::compact] is called.
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    /// Row values, positionally aligned with the table's columns.
    rows: Vec<Vec<Value>>,
    /// A `true` bit marks the row at that position as deleted.
    tombstones: BitVec,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            tombstones: BitVec::with_capacity(capacity),
        }
    }

    /// Appends a row and returns its storage position.
    pub fn append(&mut self, values: Vec<Value>) -> usize {
        self.rows.push(values);
        self.tombstones.push(false);
        self.rows.len() - 1
    }

    /// Marks the row at `position` as deleted.
    ///
    /// Returns `true` if the row was live before the call. Tombstoning an
    /// already deleted row, or a position past the end, does nothing.
    pub fn tombstone(&mut self, position: usize) -> bool {
        if !self.is_live(position) {
            return false;
        }
        self.tombstones.set(position, true);
        self.rows[position] = Vec::new();
        true
    }

    /// True iff a row exists at `position` and is not tombstoned.
    pub fn is_live(&self, position: usize) -> bool {
        position < self.rows.len() && !self.tombstones[position]
    }

    pub fn get(&self, position: usize) -> Option<&[Value]> {
        if !self.is_live(position) {
            return None;
        }
        Some(&self.rows[position])
    }

    /// Iterates over live rows in storage order, with their positions.
    pub fn iter_live(&self) -> impl Iterator<Item = (usize, &[Value])> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(position, _)| !self.tombstones[*position])
            .map(|(position, row)| (position, row.as_slice()))
    }

    /// Mutable counterpart of [RowStore::iter_live].
    pub fn iter_live_mut(&mut self) -> impl Iterator<Item = (usize, &mut Vec<Value>)> {
        let tombstones = &self.tombstones;
        self.rows
            .iter_mut()
            .enumerate()
            .filter(move |(position, _)| !tombstones[*position])
    }

    /// Number of storage slots, tombstones included.
    pub fn slot_count(&self) -> usize {
        self.rows.len()
    }

    pub fn live_count(&self) -> usize {
        self.rows.len() - self.tombstone_count()
    }

    pub fn tombstone_count(&self) -> usize {
        self.tombstones.count_ones()
    }

    /// Drops every tombstoned slot and returns how many were reclaimed.
    ///
    /// Live rows keep their relative order, but their storage positions shift.
    pub fn compact(&mut self) -> usize {
        let reclaimed = self.tombstone_count();
        if reclaimed == 0 {
            return 0;
        }
        let mut position = 0;
        let tombstones = &self.tombstones;
        self.rows.retain(|_| {
            let live = !tombstones[position];
            position += 1;
            live
        });
        self.tombstones = BitVec::repeat(false, self.rows.len());
        reclaimed
    }
}
