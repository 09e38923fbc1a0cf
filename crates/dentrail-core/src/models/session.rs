use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::MemberId;

/// Separator used in a session's covered-requirements encoding
pub const COVERAGE_DELIMITER: char = ',';

/// A scheduled den meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub date: NaiveDate,
    pub title: String,
    /// Comma-joined requirement ids, e.g. `"Bobcat.1,Bobcat.2"`. May be empty.
    #[serde(default)]
    pub covered_ids: String,
}

impl Session {
    pub fn new(date: NaiveDate, title: impl Into<String>, covered_ids: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
            covered_ids: covered_ids.into(),
        }
    }

    /// Build a session from individual ids, joining them with the delimiter
    pub fn covering<S: AsRef<str>>(date: NaiveDate, title: impl Into<String>, ids: &[S]) -> Self {
        let encoded = ids
            .iter()
            .map(|id| id.as_ref())
            .collect::<Vec<_>>()
            .join(&COVERAGE_DELIMITER.to_string());
        Self::new(date, title, encoded)
    }
}

/// A member being present at the session held on `date`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub member: MemberId,
}

impl AttendanceRecord {
    pub fn new(date: NaiveDate, member: impl Into<MemberId>) -> Self {
        Self {
            date,
            member: member.into(),
        }
    }
}
