//! Rank eligibility: every mandatory category done plus enough electives.

use serde::{Deserialize, Serialize};

use super::category::MemberCategories;
use crate::models::MemberId;

/// Optional categories a Cub Scout rank asks for when nothing else is configured
pub const DEFAULT_ELECTIVE_THRESHOLD: usize = 2;

/// A rank and how many optional categories it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankDefinition {
    pub name: String,
    pub elective_threshold: usize,
}

impl RankDefinition {
    pub fn new(name: impl Into<String>, elective_threshold: usize) -> Self {
        Self {
            name: name.into(),
            elective_threshold,
        }
    }
}

impl Default for RankDefinition {
    fn default() -> Self {
        Self::new("Lion", DEFAULT_ELECTIVE_THRESHOLD)
    }
}

/// Outcome of the advancement rule for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankStatus {
    pub rank: String,
    pub all_mandatory_complete: bool,
    pub completed_optional: usize,
    pub elective_threshold: usize,
    pub rank_earned: bool,
}

impl RankStatus {
    /// Apply `rank` to a member's category roll-up. No partial credit.
    pub fn evaluate(categories: &MemberCategories, rank: &RankDefinition) -> Self {
        let all_mandatory_complete = categories.all_mandatory_complete();
        let completed_optional = categories.completed_optional_count();
        Self {
            rank: rank.name.clone(),
            all_mandatory_complete,
            completed_optional,
            elective_threshold: rank.elective_threshold,
            rank_earned: all_mandatory_complete && completed_optional >= rank.elective_threshold,
        }
    }

    /// Electives still to finish before the threshold is met
    pub fn electives_needed(&self) -> usize {
        self.elective_threshold.saturating_sub(self.completed_optional)
    }
}

/// Category roll-up and rank outcome for one member, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberProgress {
    pub categories: MemberCategories,
    pub rank: RankStatus,
}

impl MemberProgress {
    pub fn new(categories: MemberCategories, rank: &RankDefinition) -> Self {
        let status = RankStatus::evaluate(&categories, rank);
        Self {
            categories,
            rank: status,
        }
    }

    pub fn member(&self) -> &MemberId {
        &self.categories.member
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::category::CategoryCompletion;

    fn completion(name: &str, mandatory: bool, completed: usize, total: usize) -> CategoryCompletion {
        CategoryCompletion {
            category: name.to_string(),
            mandatory,
            completed,
            total,
            percent: if total == 0 { 0.0 } else { completed as f64 / total as f64 * 100.0 },
        }
    }

    fn categories(mandatory: Vec<CategoryCompletion>, optional: Vec<CategoryCompletion>) -> MemberCategories {
        MemberCategories {
            member: MemberId::from("Alice"),
            mandatory,
            optional,
        }
    }

    #[test]
    fn test_rank_needs_second_elective() {
        let rank = RankDefinition::default();
        let mandatory = vec![completion("Bobcat", true, 4, 4), completion("Fun on the Run", true, 3, 3)];

        let one_elective = categories(
            mandatory.clone(),
            vec![completion("Go Fish", false, 2, 2), completion("Count On Me", false, 1, 2)],
        );
        let status = RankStatus::evaluate(&one_elective, &rank);
        assert!(status.all_mandatory_complete);
        assert_eq!(status.completed_optional, 1);
        assert!(!status.rank_earned);
        assert_eq!(status.electives_needed(), 1);

        let two_electives = categories(
            mandatory,
            vec![completion("Go Fish", false, 2, 2), completion("Count On Me", false, 2, 2)],
        );
        let status = RankStatus::evaluate(&two_electives, &rank);
        assert!(status.rank_earned);
        assert_eq!(status.electives_needed(), 0);
    }

    #[test]
    fn test_incomplete_mandatory_blocks_rank() {
        let member = categories(
            vec![completion("Bobcat", true, 3, 4)],
            vec![
                completion("Go Fish", false, 1, 1),
                completion("Count On Me", false, 1, 1),
                completion("On a Roll", false, 1, 1),
            ],
        );
        let status = RankStatus::evaluate(&member, &RankDefinition::default());
        assert!(!status.all_mandatory_complete);
        assert_eq!(status.completed_optional, 3);
        assert!(!status.rank_earned);
    }

    #[test]
    fn test_empty_mandatory_category_is_never_complete() {
        let member = categories(
            vec![completion("Placeholder", true, 0, 0)],
            vec![completion("Go Fish", false, 1, 1), completion("Count On Me", false, 1, 1)],
        );
        assert!(!RankStatus::evaluate(&member, &RankDefinition::default()).rank_earned);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let member = categories(
            vec![completion("Bobcat", true, 1, 1)],
            vec![completion("Go Fish", false, 1, 1)],
        );
        assert!(!RankStatus::evaluate(&member, &RankDefinition::new("Wolf", 2)).rank_earned);
        assert!(RankStatus::evaluate(&member, &RankDefinition::new("Wolf", 1)).rank_earned);
        assert!(RankStatus::evaluate(&categories(vec![], vec![]), &RankDefinition::new("Any", 0)).rank_earned);
    }

    #[test]
    fn test_member_progress_carries_status() {
        let member = categories(vec![completion("Bobcat", true, 1, 1)], vec![]);
        let progress = MemberProgress::new(member, &RankDefinition::new("Tiger", 0));
        assert_eq!(progress.member().as_str(), "Alice");
        assert_eq!(progress.rank.rank, "Tiger");
        assert!(progress.rank.rank_earned);
    }
}
