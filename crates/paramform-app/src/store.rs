// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;
use tracing::debug;

use crate::{EditorError, EditorResult, ParameterRow, RowKey, RowPatch};

/// Ordered collection of parameter rows. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStore {
    rows: Vec<ParameterRow>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single empty row a fresh form starts with.
    pub fn with_seed_row() -> Self {
        Self {
            rows: vec![ParameterRow::blank(RowKey::FIRST)],
        }
    }

    pub fn from_rows(rows: Vec<ParameterRow>) -> EditorResult<Self> {
        let mut seen = BTreeSet::new();
        for row in &rows {
            if !seen.insert(row.key) {
                return Err(EditorError::DuplicateKey(row.key));
            }
        }
        Ok(Self { rows })
    }

    pub fn next_key(&self) -> EditorResult<RowKey> {
        match self.rows.iter().map(|row| row.key).max() {
            None => Ok(RowKey::FIRST),
            Some(max) => max.next().ok_or(EditorError::KeySpaceExhausted(max)),
        }
    }

    /// Appends a blank row keyed one past the current maximum. Only fails
    /// when the maximum key is already `u64::MAX`.
    pub fn add(&mut self) -> EditorResult<RowKey> {
        let key = self.next_key()?;
        self.rows.push(ParameterRow::blank(key));
        debug!(%key, rows = self.rows.len(), "row added");
        Ok(key)
    }

    /// Removes the row with `key`. Absent keys are ignored.
    pub fn remove(&mut self, key: RowKey) -> Option<ParameterRow> {
        let index = self.position(key)?;
        let removed = self.rows.remove(index);
        debug!(%key, rows = self.rows.len(), "row removed");
        Some(removed)
    }

    /// Merges committed values into an existing row, keeping its key and
    /// position.
    pub fn replace(&mut self, key: RowKey, patch: RowPatch) -> EditorResult<()> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.key == key)
            .ok_or(EditorError::RowNotFound(key))?;
        row.apply(patch);
        debug!(%key, "row replaced");
        Ok(())
    }

    pub fn list(&self) -> &[ParameterRow] {
        &self.rows
    }

    pub fn get(&self, key: RowKey) -> Option<&ParameterRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    pub fn contains(&self, key: RowKey) -> bool {
        self.position(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn position(&self, key: RowKey) -> Option<usize> {
        self.rows.iter().position(|row| row.key == key)
    }
}
