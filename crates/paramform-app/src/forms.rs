// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{EditableField, EditorError, EditorResult, FieldError, ParameterRow, RowPatch};

/// Uncommitted field bindings for the row being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftFields {
    pub parameter_name: String,
    pub standard_name: String,
    /// `None` when the numeric input is empty.
    pub parameter_depth: Option<f64>,
}

impl DraftFields {
    pub fn from_row(row: &ParameterRow) -> Self {
        Self {
            parameter_name: row.parameter_name.clone(),
            standard_name: row.standard_name.clone(),
            parameter_depth: Some(row.parameter_depth),
        }
    }

    /// Binds raw input text to a field. Depth text must parse as a number or
    /// be empty; rejected input leaves the draft untouched.
    pub fn set(&mut self, field: EditableField, input: &str) -> EditorResult<()> {
        if field.is_numeric() {
            self.parameter_depth = parse_optional_depth(field, input)?;
            return Ok(());
        }
        match field {
            EditableField::ParameterName => self.parameter_name = input.to_owned(),
            EditableField::StandardName => self.standard_name = input.to_owned(),
            EditableField::ParameterDepth => {}
        }
        Ok(())
    }

    pub fn display(&self, field: EditableField) -> String {
        match field {
            EditableField::ParameterName => self.parameter_name.clone(),
            EditableField::StandardName => self.standard_name.clone(),
            EditableField::ParameterDepth => {
                self.parameter_depth.map(format_depth).unwrap_or_default()
            }
        }
    }

    pub fn validate(&self) -> Result<RowPatch, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.parameter_name.trim().is_empty() {
            errors.push(FieldError::required(EditableField::ParameterName));
        }
        if self.standard_name.trim().is_empty() {
            errors.push(FieldError::required(EditableField::StandardName));
        }
        let Some(depth) = self.parameter_depth else {
            errors.push(FieldError::required(EditableField::ParameterDepth));
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RowPatch {
            parameter_name: self.parameter_name.clone(),
            standard_name: self.standard_name.clone(),
            parameter_depth: depth,
        })
    }
}

fn parse_optional_depth(field: EditableField, input: &str) -> EditorResult<Option<f64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(EditorError::InvalidNumber {
            field,
            input: input.to_owned(),
        }),
    }
}

pub fn format_depth(depth: f64) -> String {
    if depth.fract() == 0.0 {
        format!("{depth:.1}")
    } else {
        depth.to_string()
    }
}
