// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use paramform_app::{
    EditableField, EditorCommand, EditorSettings, ParameterEditor, RecommendationService, RowKey,
    StandardNameEntry,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

const SAMPLE_NAMES: [(&str, &str); 6] = [
    ("sea_water_temperature", "Temperature of lake water at depth."),
    ("air_temperature", "Temperature of the air."),
    ("wind_speed", "Magnitude of the wind."),
    ("wind_from_direction", "Direction the wind blows from."),
    ("relative_humidity", "Water vapor relative to saturation."),
    ("air_pressure", "Barometric pressure."),
];

pub fn sample_entries() -> Vec<StandardNameEntry> {
    SAMPLE_NAMES
        .iter()
        .map(|(name, description)| StandardNameEntry::new(*name, *description))
        .collect()
}

/// Answers every query from a fixed table and remembers what was asked.
#[derive(Debug, Clone, Default)]
pub struct FixedService {
    responses: BTreeMap<String, Vec<StandardNameEntry>>,
    pub queries: Vec<String>,
}

impl FixedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, query: &str, entries: Vec<StandardNameEntry>) -> Self {
        self.responses.insert(query.to_owned(), entries);
        self
    }

    /// Matches sample names containing the query as a substring.
    pub fn substring() -> Self {
        let entries = sample_entries();
        let mut service = Self::new();
        for (name, _) in SAMPLE_NAMES {
            for word in name.split('_') {
                let matches = entries
                    .iter()
                    .filter(|entry| entry.standard_name.contains(word))
                    .cloned()
                    .collect();
                service.responses.insert(word.to_owned(), matches);
            }
        }
        service
    }
}

impl RecommendationService for FixedService {
    fn search(&mut self, query: &str) -> Result<Vec<StandardNameEntry>> {
        self.queries.push(query.to_owned());
        Ok(self.responses.get(query).cloned().unwrap_or_default())
    }
}

/// Fails every lookup, as an unreachable backend would.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingService;

impl RecommendationService for FailingService {
    fn search(&mut self, query: &str) -> Result<Vec<StandardNameEntry>> {
        Err(anyhow!("recommendation backend unavailable for {query:?}"))
    }
}

/// Editor holding `count` blank rows keyed `1..=count`.
pub fn editor_with_rows(count: usize) -> Result<ParameterEditor> {
    let mut editor = ParameterEditor::new(EditorSettings {
        seed_row: false,
        ..EditorSettings::default()
    });
    let mut service = FixedService::new();
    for _ in 0..count {
        editor.dispatch(EditorCommand::Add, &mut service)?;
    }
    Ok(editor)
}

/// Edits and saves `key` with the given values.
pub fn commit_row(
    editor: &mut ParameterEditor,
    key: RowKey,
    name: &str,
    standard_name: &str,
    depth: &str,
) -> Result<()> {
    let mut service = FixedService::new();
    let commands = [
        EditorCommand::Edit(key),
        EditorCommand::SetField(EditableField::ParameterName, name.to_owned()),
        EditorCommand::SetField(EditableField::StandardName, standard_name.to_owned()),
        EditorCommand::SetField(EditableField::ParameterDepth, depth.to_owned()),
        EditorCommand::Save(key),
    ];
    for command in commands {
        editor
            .dispatch(command, &mut service)
            .with_context(|| format!("commit row {key}"))?;
    }
    Ok(())
}

/// Writes `entries` as a catalog file inside a fresh temp dir.
pub fn write_catalog(entries: &[StandardNameEntry]) -> Result<(tempfile::TempDir, PathBuf)> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("standard_names.json");
    let raw = serde_json::to_string_pretty(entries)?;
    std::fs::write(&path, raw).with_context(|| format!("write catalog {}", path.display()))?;
    Ok((temp, path))
}
