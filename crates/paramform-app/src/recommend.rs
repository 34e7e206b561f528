// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use tracing::{debug, warn};

use crate::{RecommendationCandidate, StandardNameEntry};

pub const DEFAULT_LOCALE: &str = "en";

/// Looks up standard names for a free-text query.
///
/// An empty query is legal; implementations decide whether that means "no
/// results" or "everything".
pub trait RecommendationService {
    fn search(&mut self, query: &str) -> Result<Vec<StandardNameEntry>>;
}

impl<F> RecommendationService for F
where
    F: FnMut(&str) -> Result<Vec<StandardNameEntry>>,
{
    fn search(&mut self, query: &str) -> Result<Vec<StandardNameEntry>> {
        self(query)
    }
}

/// Identifies one issued query so late results can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationBridge {
    locale: String,
    candidates: Vec<RecommendationCandidate>,
    visible: bool,
    issued: u64,
    last_query: Option<String>,
}

impl Default for RecommendationBridge {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl RecommendationBridge {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            candidates: Vec::new(),
            visible: false,
            issued: 0,
            last_query: None,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn candidates(&self) -> &[RecommendationCandidate] {
        &self.candidates
    }

    /// False until the first query lands; never flips back.
    pub fn show_recommendations(&self) -> bool {
        self.visible
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn begin_query(&mut self, term: &str) -> QueryTicket {
        self.issued += 1;
        self.last_query = Some(term.to_owned());
        debug!(ticket = self.issued, term, "recommendation query issued");
        QueryTicket(self.issued)
    }

    /// Applies results for `ticket` unless a newer query has been issued
    /// since. Returns whether the results were applied.
    pub fn complete_query(
        &mut self,
        ticket: QueryTicket,
        outcome: Result<Vec<StandardNameEntry>>,
    ) -> bool {
        if ticket.0 != self.issued {
            debug!(
                ticket = ticket.0,
                latest = self.issued,
                "stale recommendation results discarded"
            );
            return false;
        }
        let entries = outcome.unwrap_or_else(|error| {
            warn!(error = %format!("{error:#}"), "recommendation lookup failed");
            Vec::new()
        });
        self.candidates = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| self.to_candidate(index, entry))
            .collect();
        self.visible = true;
        true
    }

    pub fn recommend(&mut self, service: &mut dyn RecommendationService, term: &str) -> usize {
        let ticket = self.begin_query(term);
        let outcome = service.search(term);
        self.complete_query(ticket, outcome);
        self.candidates.len()
    }

    fn to_candidate(&self, index: usize, mut entry: StandardNameEntry) -> RecommendationCandidate {
        RecommendationCandidate {
            key: index + 1,
            description: entry.description.remove(&self.locale).unwrap_or_default(),
            standard_name: entry.standard_name,
        }
    }
}
