// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;

use crate::{EditableField, RowKey};

/// A required field that failed validation on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: EditableField,
    pub message: String,
}

impl FieldError {
    pub fn required(field: EditableField) -> Self {
        Self {
            field,
            message: format!("Please Input {}!", field.title()),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    Validation(Vec<FieldError>),
    RowNotFound(RowKey),
    DuplicateKey(RowKey),
    KeySpaceExhausted(RowKey),
    InvalidKey(String),
    EditLocked { active: RowKey },
    NotEditing,
    NotEditingRow(RowKey),
    InvalidNumber { field: EditableField, input: String },
    NothingToConfirm,
    PageOutOfRange { page: usize, page_count: usize },
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(errors) => {
                f.write_str("validation failed")?;
                for (index, error) in errors.iter().enumerate() {
                    let sep = if index == 0 { ": " } else { "; " };
                    write!(f, "{sep}{error}")?;
                }
                Ok(())
            }
            Self::RowNotFound(key) => write!(f, "row {key} not found"),
            Self::DuplicateKey(key) => write!(f, "row key {key} appears more than once"),
            Self::KeySpaceExhausted(max) => {
                write!(f, "cannot add a row after key {max}; the key space is exhausted")
            }
            Self::InvalidKey(raw) => {
                write!(f, "invalid row key {raw:?} -- keys are positive integers")
            }
            Self::EditLocked { active } => write!(
                f,
                "row {active} is being edited -- save or cancel it before editing another row"
            ),
            Self::NotEditing => f.write_str("no row is being edited -- run `edit <key>` first"),
            Self::NotEditingRow(key) => write!(f, "row {key} is not the row being edited"),
            Self::InvalidNumber { field, input } => {
                write!(f, "{} must be a number, got {input:?}", field.title())
            }
            Self::NothingToConfirm => f.write_str("nothing is waiting for confirmation"),
            Self::PageOutOfRange { page, page_count } => {
                write!(f, "page {page} is out of range (1..={page_count})")
            }
        }
    }
}

impl std::error::Error for EditorError {}

pub type EditorResult<T> = std::result::Result<T, EditorError>;
