//! "What to cover next": mandatory requirements ranked by how few members
//! have them.
//!
//! Electives are left out entirely; they have no completion deadline.

use serde::Serialize;

use super::matrix::CompletionMatrix;
use super::percent_of;
use crate::models::{Catalog, MemberId};
use crate::utils::round_percent;

/// Below this completion a requirement is flagged as most needed
pub const MOST_NEEDED_PERCENT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Urgency {
    /// Every member has it
    Complete,
    /// At least half the roster has it
    Partial,
    /// Fewer than half
    Low,
}

/// One mandatory requirement's standing across the roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningItem {
    pub requirement_id: String,
    pub category: String,
    pub description: String,
    pub completed_count: usize,
    pub total_members: usize,
    pub percent: f64,
    /// Roster order
    pub missing_members: Vec<MemberId>,
}

impl PlanningItem {
    pub fn percent_display(&self) -> u32 {
        round_percent(self.percent)
    }

    pub fn is_complete(&self) -> bool {
        self.total_members > 0 && self.completed_count == self.total_members
    }

    pub fn urgency(&self) -> Urgency {
        if self.is_complete() {
            Urgency::Complete
        } else if self.percent >= MOST_NEEDED_PERCENT {
            Urgency::Partial
        } else {
            Urgency::Low
        }
    }
}

/// Row filters offered by the planning view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanningFilter {
    #[default]
    All,
    /// Below 100%
    Incomplete,
    /// Below 50%
    MostNeeded,
}

impl PlanningFilter {
    pub fn matches(&self, item: &PlanningItem) -> bool {
        match self {
            PlanningFilter::All => true,
            PlanningFilter::Incomplete => item.percent < 100.0,
            PlanningFilter::MostNeeded => item.percent < MOST_NEEDED_PERCENT,
        }
    }
}

/// Planning rows for one category, with their mean completion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPlan<'a> {
    pub category: &'a str,
    pub items: Vec<&'a PlanningItem>,
    pub average_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningSummary {
    pub total_requirements: usize,
    pub fully_complete: usize,
    pub average_percent: f64,
    pub needs_attention: usize,
}

/// Mandatory requirements sorted lowest completion first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanningReport {
    items: Vec<PlanningItem>,
}

impl PlanningReport {
    pub fn build(matrix: &CompletionMatrix, catalog: &Catalog) -> Self {
        let total_members = matrix.member_count();
        let mut items: Vec<PlanningItem> = catalog
            .mandatory_requirements()
            .filter_map(|req| {
                let idx = matrix.requirement_index(&req.id)?;
                let completed_count = matrix.completed_count(idx);
                Some(PlanningItem {
                    requirement_id: req.id.clone(),
                    category: req.category.clone(),
                    description: req.description.clone(),
                    completed_count,
                    total_members,
                    percent: percent_of(completed_count, total_members),
                    missing_members: matrix.missing_members(idx),
                })
            })
            .collect();

        items.sort_by(|a, b| {
            a.percent
                .total_cmp(&b.percent)
                .then_with(|| a.requirement_id.cmp(&b.requirement_id))
        });

        Self { items }
    }

    pub fn items(&self) -> &[PlanningItem] {
        &self.items
    }

    pub fn filtered(&self, filter: PlanningFilter) -> Vec<&PlanningItem> {
        self.items.iter().filter(|item| filter.matches(item)).collect()
    }

    /// Filtered rows grouped by category, groups in order of first appearance
    pub fn by_category(&self, filter: PlanningFilter) -> Vec<CategoryPlan<'_>> {
        let mut groups: Vec<CategoryPlan<'_>> = Vec::new();
        for item in self.filtered(filter) {
            match groups.iter_mut().find(|g| g.category == item.category) {
                Some(group) => group.items.push(item),
                None => groups.push(CategoryPlan {
                    category: &item.category,
                    items: vec![item],
                    average_percent: 0.0,
                }),
            }
        }
        for group in &mut groups {
            group.average_percent = mean(group.items.iter().map(|i| i.percent));
        }
        groups
    }

    pub fn summary(&self) -> PlanningSummary {
        PlanningSummary {
            total_requirements: self.items.len(),
            fully_complete: self.items.iter().filter(|i| i.percent >= 100.0).count(),
            average_percent: mean(self.items.iter().map(|i| i.percent)),
            needs_attention: self
                .items
                .iter()
                .filter(|i| PlanningFilter::MostNeeded.matches(i))
                .count(),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::coverage::CoverageIndex;
    use crate::models::{AttendanceRecord, Requirement, Session};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn members(names: &[&str]) -> Vec<MemberId> {
        names.iter().map(|n| MemberId::from(*n)).collect()
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Requirement::new("R", "Bobcat", "Scout Law", true),
            Requirement::new("S", "Bobcat", "Motto", true),
            Requirement::new("T", "Lion's Roar", "Protect Yourself video", true),
            Requirement::new("E", "Go Fish", "Water safety", false),
        ])
        .unwrap()
    }

    fn report(roster: &[&str], attendance: &[AttendanceRecord]) -> PlanningReport {
        let sessions = vec![
            Session::new(day(1), "Law", "R,E"),
            Session::new(day(8), "Motto", "S"),
            Session::new(day(15), "Video", "T"),
        ];
        let matrix = CompletionMatrix::build(
            &members(roster),
            &catalog(),
            &CoverageIndex::build(&sessions),
            attendance,
        );
        PlanningReport::build(&matrix, &catalog())
    }

    fn fixture() -> PlanningReport {
        report(
            &["A", "B", "C"],
            &[
                AttendanceRecord::new(day(1), "A"),
                AttendanceRecord::new(day(8), "A"),
                AttendanceRecord::new(day(8), "B"),
                AttendanceRecord::new(day(15), "A"),
                AttendanceRecord::new(day(15), "B"),
                AttendanceRecord::new(day(15), "C"),
            ],
        )
    }

    #[test]
    fn test_lowest_completion_first() {
        let report = fixture();
        let order: Vec<&str> = report.items().iter().map(|i| i.requirement_id.as_str()).collect();
        assert_eq!(order, vec!["R", "S", "T"]);

        let r = &report.items()[0];
        assert_eq!(r.completed_count, 1);
        assert_eq!(r.total_members, 3);
        assert_eq!(r.percent_display(), 33);
        assert_eq!(r.missing_members, members(&["B", "C"]));
        assert_eq!(r.urgency(), Urgency::Low);
        assert_eq!(report.items()[1].urgency(), Urgency::Partial);
        assert_eq!(report.items()[2].urgency(), Urgency::Complete);
        assert!(report.items()[2].missing_members.is_empty());
    }

    #[test]
    fn test_electives_excluded() {
        assert!(fixture().items().iter().all(|i| i.requirement_id != "E"));
    }

    #[test]
    fn test_ties_break_by_requirement_id() {
        let report = report(&["A", "B"], &[]);
        let order: Vec<&str> = report.items().iter().map(|i| i.requirement_id.as_str()).collect();
        assert_eq!(order, vec!["R", "S", "T"]);
        assert!(report.items().iter().all(|i| i.percent == 0.0));
    }

    #[test]
    fn test_empty_roster_reports_zero() {
        let report = report(&[], &[]);
        assert_eq!(report.items().len(), 3);
        assert!(report.items().iter().all(|i| i.total_members == 0 && i.percent == 0.0));
        assert!(report.items().iter().all(|i| i.urgency() == Urgency::Low));
    }

    #[test]
    fn test_filters() {
        let report = fixture();
        assert_eq!(report.filtered(PlanningFilter::All).len(), 3);
        assert_eq!(report.filtered(PlanningFilter::Incomplete).len(), 2);
        let most_needed = report.filtered(PlanningFilter::MostNeeded);
        assert_eq!(most_needed.len(), 1);
        assert_eq!(most_needed[0].requirement_id, "R");
    }

    #[test]
    fn test_by_category() {
        let report = fixture();
        let groups = report.by_category(PlanningFilter::All);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Bobcat");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(round_percent(groups[0].average_percent), 50);
        assert_eq!(groups[1].category, "Lion's Roar");
        assert_eq!(groups[1].average_percent, 100.0);

        assert_eq!(report.by_category(PlanningFilter::MostNeeded).len(), 1);
    }

    #[test]
    fn test_summary() {
        let summary = fixture().summary();
        assert_eq!(summary.total_requirements, 3);
        assert_eq!(summary.fully_complete, 1);
        assert_eq!(round_percent(summary.average_percent), 67);
        assert_eq!(summary.needs_attention, 1);

        let empty = PlanningReport::default().summary();
        assert_eq!(empty.total_requirements, 0);
        assert_eq!(empty.average_percent, 0.0);
    }
}
