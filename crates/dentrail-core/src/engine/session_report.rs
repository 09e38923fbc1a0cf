//! Per-session report: who came, what was covered, what each attendee earned.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::coverage::CoverageIndex;
use super::percent_of;
use super::report::{resolve_covered, CoveredRequirement};
use crate::models::{AttendanceRecord, Catalog, MemberId};
use crate::utils::{cmp_ignore_case, format_date_long};

/// Covered requirements of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoveredCategory {
    pub category: String,
    pub mandatory: bool,
    pub requirements: Vec<CoveredRequirement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub date: NaiveDate,
    pub title: String,
    /// Roster members present, case-insensitive name order
    pub present: Vec<MemberId>,
    /// Roster members absent, case-insensitive name order
    pub absent: Vec<MemberId>,
    pub attendance_percent: f64,
    /// Category name order
    pub covered: Vec<CoveredCategory>,
    /// Covered ids with no catalog entry
    pub unknown_ids: Vec<String>,
}

impl SessionReport {
    /// Report on the session held on `date`, or `None` when there was none.
    ///
    /// Only roster members count as present; attendance for anyone else is
    /// ignored here as it is in the completion matrix.
    pub fn build(
        date: NaiveDate,
        roster: &[MemberId],
        coverage: &CoverageIndex,
        attendance: &[AttendanceRecord],
        catalog: &Catalog,
    ) -> Option<Self> {
        let session = coverage.get(date)?;

        let mut members: Vec<&MemberId> = Vec::with_capacity(roster.len());
        for member in roster {
            if !members.contains(&member) {
                members.push(member);
            }
        }
        members.sort_by(|a, b| cmp_ignore_case(a.as_str(), b.as_str()));

        let (present, absent): (Vec<&MemberId>, Vec<&MemberId>) =
            members.into_iter().partition(|member| {
                attendance
                    .iter()
                    .any(|a| a.date == date && a.member == **member)
            });

        let mut by_category: BTreeMap<String, CoveredCategory> = BTreeMap::new();
        for requirement in resolve_covered(&session.ids, catalog) {
            let mandatory = catalog
                .category(&requirement.category)
                .map(|c| c.mandatory)
                .unwrap_or(false);
            by_category
                .entry(requirement.category.clone())
                .or_insert_with(|| CoveredCategory {
                    category: requirement.category.clone(),
                    mandatory,
                    requirements: Vec::new(),
                })
                .requirements
                .push(requirement);
        }

        let unknown_ids = session
            .ids
            .iter()
            .filter(|id| catalog.get(id).is_none())
            .cloned()
            .collect();

        let attendance_percent = percent_of(present.len(), present.len() + absent.len());

        Some(Self {
            date,
            title: session.title.clone(),
            present: present.into_iter().cloned().collect(),
            absent: absent.into_iter().cloned().collect(),
            attendance_percent,
            covered: by_category.into_values().collect(),
            unknown_ids,
        })
    }

    /// e.g. "January 05, 2025: Kickoff"
    pub fn heading(&self) -> String {
        format!("{}: {}", format_date_long(self.date), self.title)
    }

    pub fn covered_count(&self) -> usize {
        self.covered.iter().map(|c| c.requirements.len()).sum()
    }

    /// Requirements each present member earned here, the same list for all.
    /// Empty when nobody attended or nothing catalogued was covered.
    pub fn earned(&self) -> Vec<(&MemberId, Vec<&CoveredRequirement>)> {
        if self.covered_count() == 0 {
            return Vec::new();
        }
        self.present
            .iter()
            .map(|member| {
                let earned: Vec<&CoveredRequirement> = self
                    .covered
                    .iter()
                    .flat_map(|c| c.requirements.iter())
                    .collect();
                (member, earned)
            })
            .collect()
    }
}
