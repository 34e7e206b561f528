// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Standard-name catalog used to answer recommendation lookups.

use anyhow::{Context, Result, bail};
use paramform_app::{RecommendationService, StandardNameEntry};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_MAX_RESULTS: usize = 25;

const BUILTIN_CATALOG: &str = include_str!("../data/standard_names.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<StandardNameEntry>,
    max_results: usize,
}

impl Catalog {
    pub fn new(entries: Vec<StandardNameEntry>) -> Self {
        Self {
            entries,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG).context("parse built-in standard name catalog")
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let entries: Vec<StandardNameEntry> = serde_json::from_str(raw)?;
        if let Some(blank) = entries
            .iter()
            .position(|entry| entry.standard_name.trim().is_empty())
        {
            bail!("catalog entry {blank} has an empty standard_name");
        }
        Ok(Self::new(entries))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read standard name catalog {}", path.display()))?;
        let catalog = Self::from_json(&raw).with_context(|| {
            format!(
                "parse standard name catalog {}; expected a JSON array of {{\"standard_name\", \"display_description\"}} objects",
                path.display()
            )
        })?;
        debug!(path = %path.display(), entries = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ranks entries by how many query tokens appear in the standard name,
    /// then in the English description. Ties keep catalog order.
    pub fn lookup(&self, query: &str) -> Vec<StandardNameEntry> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &StandardNameEntry)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = score(entry, &tokens);
                (score > 0).then_some((score, entry))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(self.max_results)
            .map(|(_, entry)| entry.clone())
            .collect()
    }
}

impl RecommendationService for Catalog {
    fn search(&mut self, query: &str) -> Result<Vec<StandardNameEntry>> {
        let results = self.lookup(query);
        debug!(query, results = results.len(), "catalog search");
        Ok(results)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn score(entry: &StandardNameEntry, tokens: &[String]) -> usize {
    let name = entry.standard_name.to_lowercase();
    let description = entry
        .description
        .get("en")
        .map(|text| text.to_lowercase())
        .unwrap_or_default();
    tokens
        .iter()
        .map(|token| {
            if name.contains(token.as_str()) {
                2
            } else if description.contains(token.as_str()) {
                1
            } else {
                0
            }
        })
        .sum()
}
