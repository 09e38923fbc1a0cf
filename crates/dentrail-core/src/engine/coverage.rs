//! Session date -> covered requirement ids.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{Session, COVERAGE_DELIMITER};

/// What the session (or sessions) held on one date covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCoverage {
    pub title: String,
    /// Covered ids in encoding order, de-duplicated. May include ids that
    /// are not in the catalog.
    pub ids: Vec<String>,
}

/// Split a coverage encoding into requirement ids.
///
/// Empty tokens are dropped, so `""` and `"A,,B"` never produce an empty-string
/// id. Everything else passes through as written, including surrounding
/// whitespace; unknown ids are filtered later against the catalog.
pub fn parse_coverage(encoding: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for token in encoding.split(COVERAGE_DELIMITER) {
        if token.is_empty() || ids.iter().any(|id| id == token) {
            continue;
        }
        ids.push(token.to_string());
    }
    ids
}

/// Lookup from session date to coverage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageIndex {
    by_date: BTreeMap<NaiveDate, SessionCoverage>,
}

impl CoverageIndex {
    /// Index the session log.
    ///
    /// Sessions sharing a date are merged: their coverage is unioned and
    /// their titles joined with " / ".
    pub fn build(sessions: &[Session]) -> Self {
        let mut by_date: BTreeMap<NaiveDate, SessionCoverage> = BTreeMap::new();

        for session in sessions {
            let ids = parse_coverage(&session.covered_ids);
            match by_date.get_mut(&session.date) {
                Some(existing) => {
                    warn!(date = %session.date, title = %session.title, "Duplicate session date, merging coverage");
                    for id in ids {
                        if !existing.ids.contains(&id) {
                            existing.ids.push(id);
                        }
                    }
                    if !session.title.is_empty() && existing.title != session.title {
                        if existing.title.is_empty() {
                            existing.title = session.title.clone();
                        } else {
                            existing.title = format!("{} / {}", existing.title, session.title);
                        }
                    }
                }
                None => {
                    by_date.insert(
                        session.date,
                        SessionCoverage {
                            title: session.title.clone(),
                            ids,
                        },
                    );
                }
            }
        }

        Self { by_date }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&SessionCoverage> {
        self.by_date.get(&date)
    }

    /// Covered ids for the session on `date`, or `None` when no session was held
    pub fn covered(&self, date: NaiveDate) -> Option<&[String]> {
        self.by_date.get(&date).map(|c| c.ids.as_slice())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    /// Sessions in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &SessionCoverage)> {
        self.by_date.iter().map(|(date, coverage)| (*date, coverage))
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
