//! Per-member roll-up of the matrix into category completion.

use serde::Serialize;

use super::matrix::CompletionMatrix;
use super::percent_of;
use crate::models::{Catalog, MemberId};
use crate::utils::round_percent;

/// How far one member is through one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCompletion {
    pub category: String,
    pub mandatory: bool,
    pub completed: usize,
    pub total: usize,
    /// 0-100; a category with no requirements reports 0
    pub percent: f64,
}

impl CategoryCompletion {
    fn new(category: &str, mandatory: bool, completed: usize, total: usize) -> Self {
        Self {
            category: category.to_string(),
            mandatory,
            completed,
            total,
            percent: percent_of(completed, total),
        }
    }

    /// True only at exactly 100%, which an empty category never reaches
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }

    pub fn percent_display(&self) -> u32 {
        round_percent(self.percent)
    }
}

/// All category completions for one member, split by mandatory flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberCategories {
    pub member: MemberId,
    /// Catalog order
    pub mandatory: Vec<CategoryCompletion>,
    /// Catalog order
    pub optional: Vec<CategoryCompletion>,
}

impl MemberCategories {
    /// Aggregate one member's row of the matrix.
    ///
    /// A member not on the roster aggregates to all-zero rather than failing.
    pub fn aggregate(matrix: &CompletionMatrix, catalog: &Catalog, member: &str) -> Self {
        let row = matrix.member_index(member);
        let mut mandatory = Vec::new();
        let mut optional = Vec::new();

        for category in catalog.categories() {
            let completed = match row {
                Some(m) => category
                    .requirement_ids
                    .iter()
                    .filter_map(|id| matrix.requirement_index(id))
                    .filter(|&r| matrix.is_satisfied(m, r))
                    .count(),
                None => 0,
            };
            let completion = CategoryCompletion::new(
                &category.name,
                category.mandatory,
                completed,
                category.requirement_ids.len(),
            );
            if category.mandatory {
                mandatory.push(completion);
            } else {
                optional.push(completion);
            }
        }

        Self {
            member: MemberId::new(member),
            mandatory,
            optional,
        }
    }

    /// Look up a category in either group
    pub fn get(&self, category: &str) -> Option<&CategoryCompletion> {
        self.iter().find(|c| c.category == category)
    }

    /// Percentage for a category, 0 when the category is unknown
    pub fn percent(&self, category: &str) -> f64 {
        self.get(category).map(|c| c.percent).unwrap_or(0.0)
    }

    /// Mandatory categories first, then optional
    pub fn iter(&self) -> impl Iterator<Item = &CategoryCompletion> {
        self.mandatory.iter().chain(self.optional.iter())
    }

    pub fn all_mandatory_complete(&self) -> bool {
        self.mandatory.iter().all(CategoryCompletion::is_complete)
    }

    pub fn completed_optional_count(&self) -> usize {
        self.optional.iter().filter(|c| c.is_complete()).count()
    }

    /// Requirement-level (not category-level) mandatory progress
    pub fn mandatory_requirements(&self) -> (usize, usize) {
        self.mandatory
            .iter()
            .fold((0, 0), |(done, total), c| (done + c.completed, total + c.total))
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

    fn fixture(attendance: &[AttendanceRecord]) -> (CompletionMatrix, Catalog) {
        let mut catalog = Catalog::new(vec![
            Requirement::new("B.1", "Bobcat", "Know your den", true),
            Requirement::new("B.2", "Bobcat", "Scout Law", true),
            Requirement::new("B.3", "Bobcat", "Motto", true),
            Requirement::new("F.1", "Go Fish", "Water safety", false),
        ])
        .unwrap();
        catalog.declare_category("Pick My Path", false).unwrap();

        let sessions = vec![
            Session::new(day(1), "Kickoff", "B.1,F.1"),
            Session::new(day(8), "Law night", "B.2"),
        ];
        let roster = vec![MemberId::from("Alice"), MemberId::from("Bob")];
        let matrix = CompletionMatrix::build(
            &roster,
            &catalog,
            &CoverageIndex::build(&sessions),
            attendance,
        );
        (matrix, catalog)
    }

    #[test]
    fn test_partitions_by_mandatory_flag() {
        let (matrix, catalog) = fixture(&[]);
        let categories = MemberCategories::aggregate(&matrix, &catalog, "Alice");
        let mandatory: Vec<&str> = categories.mandatory.iter().map(|c| c.category.as_str()).collect();
        let optional: Vec<&str> = categories.optional.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(mandatory, vec!["Bobcat"]);
        assert_eq!(optional, vec!["Go Fish", "Pick My Path"]);
    }

    #[test]
    fn test_percentages() {
        let (matrix, catalog) = fixture(&[
            AttendanceRecord::new(day(1), "Alice"),
            AttendanceRecord::new(day(8), "Alice"),
        ]);
        let alice = MemberCategories::aggregate(&matrix, &catalog, "Alice");
        let bobcat = alice.get("Bobcat").unwrap();
        assert_eq!((bobcat.completed, bobcat.total), (2, 3));
        assert_eq!(bobcat.percent_display(), 67);
        assert!(!bobcat.is_complete());
        assert_eq!(alice.percent("Go Fish"), 100.0);
        assert_eq!(alice.completed_optional_count(), 1);
        assert_eq!(alice.mandatory_requirements(), (2, 3));

        let bob = MemberCategories::aggregate(&matrix, &catalog, "Bob");
        assert_eq!(bob.percent("Bobcat"), 0.0);
    }

    #[test]
    fn test_empty_category_reports_zero() {
        let (matrix, catalog) = fixture(&[AttendanceRecord::new(day(1), "Alice")]);
        for member in ["Alice", "Bob"] {
            let categories = MemberCategories::aggregate(&matrix, &catalog, member);
            let empty = categories.get("Pick My Path").unwrap();
            assert_eq!(empty.total, 0);
            assert_eq!(empty.percent, 0.0);
            assert!(!empty.is_complete());
        }
    }

    #[test]
    fn test_unknown_member_aggregates_to_zero() {
        let (matrix, catalog) = fixture(&[AttendanceRecord::new(day(1), "Alice")]);
        let ghost = MemberCategories::aggregate(&matrix, &catalog, "Zed");
        assert!(ghost.iter().all(|c| c.completed == 0 && c.percent == 0.0));
        assert_eq!(ghost.iter().count(), 3);
        assert_eq!(ghost.percent("No Such Category"), 0.0);
    }
}
