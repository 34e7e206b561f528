// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, info};

use crate::{
    EditSession, EditableField, EditorError, EditorResult, FieldError, ParameterRow,
    PlatformMetadata, RecommendationBridge, RecommendationService, RowKey, RowStore, Submission,
};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Destructive actions that wait for a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPrompt {
    CancelEdit(RowKey),
    DeleteRow(RowKey),
}

impl ConfirmPrompt {
    pub const fn title(self) -> &'static str {
        match self {
            Self::CancelEdit(_) => "Sure to cancel?",
            Self::DeleteRow(_) => "Sure to delete?",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    Add,
    Edit(RowKey),
    SetField(EditableField, String),
    Save(RowKey),
    RequestCancel,
    RequestDelete(RowKey),
    Confirm,
    Dismiss,
    Recommend,
    ChangePage(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    RowAdded(RowKey),
    RowRemoved(RowKey),
    RowSaved(RowKey),
    EditStarted(RowKey),
    EditEnded(RowKey),
    DraftChanged(EditableField),
    ConfirmRequested(ConfirmPrompt),
    ConfirmDismissed(ConfirmPrompt),
    RecommendationsUpdated { query: String, count: usize },
    PageChanged(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorSettings {
    pub page_size: usize,
    pub locale: String,
    pub seed_row: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            locale: crate::DEFAULT_LOCALE.to_owned(),
            seed_row: true,
        }
    }
}

/// Parameter table editor: rows, the edit slot, recommendations, the pending
/// confirmation and the visible page.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterEditor {
    store: RowStore,
    session: EditSession,
    bridge: RecommendationBridge,
    pending: Option<ConfirmPrompt>,
    page: usize,
    page_size: usize,
}

impl Default for ParameterEditor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl ParameterEditor {
    pub fn new(settings: EditorSettings) -> Self {
        let store = if settings.seed_row {
            RowStore::with_seed_row()
        } else {
            RowStore::new()
        };
        Self::with_store(store, settings)
    }

    pub fn with_store(store: RowStore, settings: EditorSettings) -> Self {
        Self {
            store,
            session: EditSession::new(),
            bridge: RecommendationBridge::new(settings.locale),
            pending: None,
            page: 1,
            page_size: settings.page_size.max(1),
        }
    }

    pub fn rows(&self) -> &[ParameterRow] {
        self.store.list()
    }

    pub fn store(&self) -> &RowStore {
        &self.store
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn recommendations(&self) -> &RecommendationBridge {
        &self.bridge
    }

    pub fn pending_confirmation(&self) -> Option<ConfirmPrompt> {
        self.pending
    }

    pub fn field_errors(&self) -> &[FieldError] {
        self.session.field_errors()
    }

    /// Delete buttons are offered whenever the table has a row.
    pub fn can_delete(&self) -> bool {
        !self.store.is_empty()
    }

    /// Edit buttons are disabled for every row while one row is editing.
    pub fn can_edit(&self) -> bool {
        self.session.editing_key().is_none()
    }

    pub fn page(&self) -> usize {
        self.page.min(self.page_count())
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.store.len().div_ceil(self.page_size).max(1)
    }

    pub fn visible_rows(&self) -> &[ParameterRow] {
        let rows = self.store.list();
        let start = (self.page() - 1) * self.page_size;
        let end = (start + self.page_size).min(rows.len());
        rows.get(start..end).unwrap_or_default()
    }

    pub fn submission(&self, metadata: PlatformMetadata) -> Submission {
        info!(rows = self.store.len(), "assembling submission");
        Submission {
            metadata,
            platform_parameters: self.store.list().to_vec(),
        }
    }

    pub fn dispatch(
        &mut self,
        command: EditorCommand,
        service: &mut dyn RecommendationService,
    ) -> EditorResult<Vec<EditorEvent>> {
        debug!(?command, "dispatch");
        let answers_prompt = matches!(command, EditorCommand::Confirm | EditorCommand::Dismiss);
        let previous = if answers_prompt {
            None
        } else {
            self.pending.take()
        };
        match self.execute(command, service) {
            Ok(mut events) => {
                if let Some(prompt) = previous {
                    events.insert(0, EditorEvent::ConfirmDismissed(prompt));
                }
                Ok(events)
            }
            Err(error) => {
                // A rejected command leaves any open prompt in place.
                if self.pending.is_none() {
                    self.pending = previous;
                }
                Err(error)
            }
        }
    }

    fn execute(
        &mut self,
        command: EditorCommand,
        service: &mut dyn RecommendationService,
    ) -> EditorResult<Vec<EditorEvent>> {
        let mut events = Vec::new();
        match command {
            EditorCommand::Add => {
                events.push(EditorEvent::RowAdded(self.store.add()?));
            }
            EditorCommand::Edit(key) => {
                self.session.edit(&self.store, key)?;
                events.push(EditorEvent::EditStarted(key));
            }
            EditorCommand::SetField(field, input) => {
                self.session.set_field(field, &input)?;
                events.push(EditorEvent::DraftChanged(field));
            }
            EditorCommand::Save(key) => {
                self.session.save(&mut self.store, key)?;
                events.push(EditorEvent::RowSaved(key));
                events.push(EditorEvent::EditEnded(key));
            }
            EditorCommand::RequestCancel => {
                let key = self.session.editing_key().ok_or(EditorError::NotEditing)?;
                events.push(self.request(ConfirmPrompt::CancelEdit(key)));
            }
            EditorCommand::RequestDelete(key) => {
                if !self.store.contains(key) {
                    return Err(EditorError::RowNotFound(key));
                }
                events.push(self.request(ConfirmPrompt::DeleteRow(key)));
            }
            EditorCommand::Confirm => {
                let prompt = self.pending.take().ok_or(EditorError::NothingToConfirm)?;
                events.extend(self.apply(prompt)?);
            }
            EditorCommand::Dismiss => {
                let prompt = self.pending.take().ok_or(EditorError::NothingToConfirm)?;
                events.push(EditorEvent::ConfirmDismissed(prompt));
            }
            EditorCommand::Recommend => {
                if self.session.editing_key().is_none() {
                    return Err(EditorError::NotEditing);
                }
                let query = self.session.query_term().to_owned();
                let count = self.bridge.recommend(service, &query);
                events.push(EditorEvent::RecommendationsUpdated { query, count });
            }
            EditorCommand::ChangePage(page) => {
                let page_count = self.page_count();
                if page == 0 || page > page_count {
                    return Err(EditorError::PageOutOfRange { page, page_count });
                }
                if let Some(key) = self.session.editing_key() {
                    self.session.cancel()?;
                    events.push(EditorEvent::EditEnded(key));
                }
                self.page = page;
                events.push(EditorEvent::PageChanged(page));
            }
        }
        Ok(events)
    }

    fn request(&mut self, prompt: ConfirmPrompt) -> EditorEvent {
        self.pending = Some(prompt);
        EditorEvent::ConfirmRequested(prompt)
    }

    fn apply(&mut self, prompt: ConfirmPrompt) -> EditorResult<Vec<EditorEvent>> {
        match prompt {
            ConfirmPrompt::CancelEdit(key) => {
                if !self.session.is_editing(key) {
                    return Err(EditorError::NotEditingRow(key));
                }
                self.session.cancel()?;
                Ok(vec![EditorEvent::EditEnded(key)])
            }
            ConfirmPrompt::DeleteRow(key) => {
                let was_editing = self.session.is_editing(key);
                let mut events = Vec::new();
                if self.session.delete(&mut self.store, key) {
                    events.push(EditorEvent::RowRemoved(key));
                }
                self.page = self.page.min(self.page_count());
                if was_editing {
                    events.push(EditorEvent::EditEnded(key));
                }
                Ok(events)
            }
        }
    }
}
