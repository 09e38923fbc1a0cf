//! Detailed, attributable progress report for a single member.

use chrono::NaiveDate;
use serde::Serialize;

use super::category::MemberCategories;
use super::coverage::CoverageIndex;
use super::matrix::CompletionMatrix;
use super::rank::{RankDefinition, RankStatus};
use crate::models::{AttendanceRecord, Catalog, MemberId};
use crate::utils::{format_date_list, format_date_long};

/// A covered requirement resolved against the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoveredRequirement {
    pub id: String,
    pub category: String,
    pub description: String,
}

/// Resolve covered ids against the catalog, dropping ones it doesn't know
pub(crate) fn resolve_covered(ids: &[String], catalog: &Catalog) -> Vec<CoveredRequirement> {
    ids.iter()
        .filter_map(|id| catalog.get(id))
        .map(|req| CoveredRequirement {
            id: req.id.clone(),
            category: req.category.clone(),
            description: req.description.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendedSession {
    pub date: NaiveDate,
    pub title: String,
    pub covered: Vec<CoveredRequirement>,
}

impl AttendedSession {
    /// e.g. "January 05, 2025: Kickoff"
    pub fn heading(&self) -> String {
        format!("{}: {}", format_date_long(self.date), self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementProgress {
    pub id: String,
    pub category: String,
    pub description: String,
    pub mandatory: bool,
    pub satisfied: bool,
    /// Every session date that satisfied it, ascending
    pub completed_at: Vec<NaiveDate>,
}

impl RequirementProgress {
    /// e.g. "Completed at: 01/05/2025, 01/12/2025", or `None` when unsatisfied
    pub fn completed_at_caption(&self) -> Option<String> {
        if self.completed_at.is_empty() {
            None
        } else {
            Some(format!("Completed at: {}", format_date_list(&self.completed_at)))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndividualReport {
    pub member: MemberId,
    /// Most recent first
    pub attended: Vec<AttendedSession>,
    /// Catalog order
    pub requirements: Vec<RequirementProgress>,
    pub categories: MemberCategories,
    pub mandatory_completed: usize,
    pub mandatory_total: usize,
    pub rank: RankStatus,
}

impl IndividualReport {
    pub fn build(
        member: &str,
        matrix: &CompletionMatrix,
        coverage: &CoverageIndex,
        attendance: &[AttendanceRecord],
        catalog: &Catalog,
        rank: &RankDefinition,
    ) -> Self {
        // Off-roster attendance never reaches the matrix, so it isn't listed either
        let on_roster = matrix.member_index(member).is_some();
        let mut dates: Vec<NaiveDate> = attendance
            .iter()
            .filter(|a| on_roster && a.member.as_str() == member && coverage.contains(a.date))
            .map(|a| a.date)
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();

        let attended = dates
            .into_iter()
            .filter_map(|date| {
                let session = coverage.get(date)?;
                Some(AttendedSession {
                    date,
                    title: session.title.clone(),
                    covered: resolve_covered(&session.ids, catalog),
                })
            })
            .collect();

        let requirements = catalog
            .requirements()
            .iter()
            .map(|req| {
                let completed_at = matrix.provenance_of(member, &req.id).to_vec();
                RequirementProgress {
                    id: req.id.clone(),
                    category: req.category.clone(),
                    description: req.description.clone(),
                    mandatory: req.mandatory,
                    satisfied: matrix.satisfied(member, &req.id),
                    completed_at,
                }
            })
            .collect();

        let categories = MemberCategories::aggregate(matrix, catalog, member);
        let (mandatory_completed, mandatory_total) = categories.mandatory_requirements();
        let rank = RankStatus::evaluate(&categories, rank);

        Self {
            member: MemberId::new(member),
            attended,
            requirements,
            categories,
            mandatory_completed,
            mandatory_total,
            rank,
        }
    }

    pub fn sessions_attended(&self) -> usize {
        self.attended.len()
    }

    pub fn requirement(&self, id: &str) -> Option<&RequirementProgress> {
        self.requirements.iter().find(|r| r.id == id)
    }

    /// Requirements of one category, catalog order
    pub fn category_requirements<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a RequirementProgress> + 'a {
        self.requirements.iter().filter(move |r| r.category == category)
    }
}
