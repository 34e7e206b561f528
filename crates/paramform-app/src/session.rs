// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::{
    DraftFields, EditableField, EditorError, EditorResult, FieldError, ParameterRow, RowKey,
    RowStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Editing(RowKey),
}

/// The table-wide edit slot. Holding a single optional key makes "at most
/// one row is editable" structural.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditSession {
    editing: Option<RowKey>,
    draft: DraftFields,
    query_term: String,
    field_errors: Vec<FieldError>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        match self.editing {
            Some(key) => SessionState::Editing(key),
            None => SessionState::Idle,
        }
    }

    pub fn editing_key(&self) -> Option<RowKey> {
        self.editing
    }

    pub fn is_editing(&self, key: RowKey) -> bool {
        self.editing == Some(key)
    }

    /// Draft bindings, only exposed while a row is being edited.
    pub fn draft(&self) -> Option<&DraftFields> {
        self.editing.map(|_| &self.draft)
    }

    /// The standard-name text most recently typed in this edit.
    pub fn query_term(&self) -> &str {
        &self.query_term
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn edit(&mut self, store: &RowStore, key: RowKey) -> EditorResult<&DraftFields> {
        if let Some(active) = self.editing {
            return Err(EditorError::EditLocked { active });
        }
        let row = store.get(key).ok_or(EditorError::RowNotFound(key))?;
        self.begin(row);
        Ok(&self.draft)
    }

    fn begin(&mut self, row: &ParameterRow) {
        self.draft = DraftFields::from_row(row);
        self.query_term.clear();
        self.field_errors.clear();
        self.editing = Some(row.key);
        debug!(key = %row.key, "edit started");
    }

    pub fn set_field(&mut self, field: EditableField, input: &str) -> EditorResult<()> {
        if self.editing.is_none() {
            return Err(EditorError::NotEditing);
        }
        self.draft.set(field, input)?;
        self.on_field_draft_change(field, input);
        Ok(())
    }

    pub fn on_field_draft_change(&mut self, field: EditableField, value: &str) {
        if field == EditableField::StandardName {
            self.query_term = value.to_owned();
        }
    }

    pub fn save(&mut self, store: &mut RowStore, key: RowKey) -> EditorResult<()> {
        match self.editing {
            None => return Err(EditorError::NotEditing),
            Some(active) if active != key => return Err(EditorError::NotEditingRow(key)),
            Some(_) => {}
        }
        let patch = match self.draft.validate() {
            Ok(patch) => patch,
            Err(errors) => {
                debug!(%key, errors = errors.len(), "save rejected");
                self.field_errors = errors.clone();
                return Err(EditorError::Validation(errors));
            }
        };
        store.replace(key, patch)?;
        self.finish();
        debug!(%key, "edit saved");
        Ok(())
    }

    pub fn cancel(&mut self) -> EditorResult<RowKey> {
        let key = self.editing.ok_or(EditorError::NotEditing)?;
        self.finish();
        debug!(%key, "edit cancelled");
        Ok(key)
    }

    /// Removes a row from any state. Returns whether the row existed; the
    /// session drops back to idle if it was the row being edited.
    pub fn delete(&mut self, store: &mut RowStore, key: RowKey) -> bool {
        let removed = store.remove(key).is_some();
        if self.is_editing(key) {
            self.finish();
        }
        removed
    }

    fn finish(&mut self) {
        self.editing = None;
        self.draft = DraftFields::default();
        self.query_term.clear();
        self.field_errors.clear();
    }
}
