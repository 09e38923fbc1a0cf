//! The advancement completion engine.
//!
//! Every function here is a pure projection of the four input collections
//! (roster, catalog, session log, attendance log):
//!
//! - `CoverageIndex`: session date -> covered requirement ids
//! - `CompletionMatrix`: member x requirement satisfaction plus provenance
//! - `MemberCategories`: per-category completion, mandatory vs optional
//! - `RankStatus`: rank eligibility against a `RankDefinition`
//! - `PlanningReport`: mandatory requirements, least completed first
//! - `IndividualReport`: attributable per-member report
//! - `SessionReport`: attendance and coverage for one session

pub mod category;
pub mod coverage;
pub mod matrix;
pub mod planning;
pub mod rank;
pub mod report;
pub mod session_report;

pub use category::{CategoryCompletion, MemberCategories};
pub use coverage::{parse_coverage, CoverageIndex, SessionCoverage};
pub use matrix::{CompletionMatrix, MemberIdx, RequirementIdx};
pub use planning::{
    CategoryPlan, PlanningFilter, PlanningItem, PlanningReport, PlanningSummary, Urgency,
};
pub use rank::{MemberProgress, RankDefinition, RankStatus, DEFAULT_ELECTIVE_THRESHOLD};
pub use report::{AttendedSession, CoveredRequirement, IndividualReport, RequirementProgress};
pub use session_report::{CoveredCategory, SessionReport};

/// `part / total * 100`, with an empty total counting as 0%
pub(crate) fn percent_of(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
