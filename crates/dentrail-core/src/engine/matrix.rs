//! The member x requirement completion matrix.
//!
//! Cells live in one dense row-major `Vec<bool>`, addressed through explicit
//! member and requirement index maps. Provenance (the dates a cell was
//! satisfied on) shares the same layout.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::coverage::CoverageIndex;
use crate::models::{AttendanceRecord, Catalog, MemberId};

/// Row position of a roster member in a [`CompletionMatrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberIdx(usize);

impl MemberIdx {
    pub fn value(&self) -> usize {
        self.0
    }
}

/// Column position of a catalog requirement in a [`CompletionMatrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequirementIdx(usize);

impl RequirementIdx {
    pub fn value(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletionMatrix {
    members: Vec<MemberId>,
    requirement_ids: Vec<String>,
    #[serde(skip)]
    member_index: HashMap<MemberId, MemberIdx>,
    #[serde(skip)]
    requirement_index: HashMap<String, RequirementIdx>,
    cells: Vec<bool>,
    provenance: Vec<Vec<NaiveDate>>,
}

impl CompletionMatrix {
    /// Recompute the whole matrix from the four input collections.
    ///
    /// Duplicate roster entries keep their first position. Attendance for
    /// members not on the roster, or on dates with no session, is ignored.
    pub fn build(
        roster: &[MemberId],
        catalog: &Catalog,
        coverage: &CoverageIndex,
        attendance: &[AttendanceRecord],
    ) -> Self {
        let mut members = Vec::with_capacity(roster.len());
        let mut member_index = HashMap::with_capacity(roster.len());
        for member in roster {
            if member_index.contains_key(member) {
                debug!(member = %member, "Duplicate roster entry ignored");
                continue;
            }
            member_index.insert(member.clone(), MemberIdx(members.len()));
            members.push(member.clone());
        }

        let requirement_ids: Vec<String> =
            catalog.requirements().iter().map(|r| r.id.clone()).collect();
        let requirement_index: HashMap<String, RequirementIdx> = requirement_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), RequirementIdx(i)))
            .collect();

        let size = members.len() * requirement_ids.len();
        let mut matrix = Self {
            members,
            requirement_ids,
            member_index,
            requirement_index,
            cells: vec![false; size],
            provenance: vec![Vec::new(); size],
        };

        let mut skipped = 0usize;
        for record in attendance {
            let (Some(member), Some(covered)) = (
                matrix.member_index(record.member.as_str()),
                coverage.covered(record.date),
            ) else {
                skipped += 1;
                continue;
            };

            for id in covered {
                if let Some(cell) = matrix
                    .requirement_index(id)
                    .and_then(|requirement| matrix.offset(member, requirement))
                {
                    matrix.cells[cell] = true;
                    matrix.provenance[cell].push(record.date);
                }
            }
        }

        // Attendance order is arbitrary; keep provenance ascending and unique
        for dates in &mut matrix.provenance {
            dates.sort_unstable();
            dates.dedup();
        }

        debug!(
            members = matrix.members.len(),
            requirements = matrix.requirement_ids.len(),
            attendance = attendance.len(),
            skipped,
            "Built completion matrix"
        );

        matrix
    }

    /// Cell position, or `None` when either index is out of range for this
    /// matrix (e.g. an index carried over from an earlier build)
    fn offset(&self, member: MemberIdx, requirement: RequirementIdx) -> Option<usize> {
        if member.0 >= self.members.len() || requirement.0 >= self.requirement_ids.len() {
            return None;
        }
        Some(member.0 * self.requirement_ids.len() + requirement.0)
    }

    pub fn member_index(&self, member: &str) -> Option<MemberIdx> {
        self.member_index.get(member).copied()
    }

    pub fn requirement_index(&self, requirement_id: &str) -> Option<RequirementIdx> {
        self.requirement_index.get(requirement_id).copied()
    }

    /// Roster members in row order
    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    /// Catalog requirement ids in column order
    pub fn requirement_ids(&self) -> &[String] {
        &self.requirement_ids
    }

    pub fn member(&self, member: MemberIdx) -> Option<&MemberId> {
        self.members.get(member.0)
    }

    /// False for indices outside this matrix
    pub fn is_satisfied(&self, member: MemberIdx, requirement: RequirementIdx) -> bool {
        self.offset(member, requirement)
            .is_some_and(|cell| self.cells[cell])
    }

    /// Dates on which the cell was satisfied, ascending; empty for indices
    /// outside this matrix
    pub fn provenance(&self, member: MemberIdx, requirement: RequirementIdx) -> &[NaiveDate] {
        match self.offset(member, requirement) {
            Some(cell) => &self.provenance[cell],
            None => &[],
        }
    }

    /// Satisfaction by name. Unknown members or requirements are never satisfied.
    pub fn satisfied(&self, member: &str, requirement_id: &str) -> bool {
        match (self.member_index(member), self.requirement_index(requirement_id)) {
            (Some(m), Some(r)) => self.is_satisfied(m, r),
            _ => false,
        }
    }

    /// Provenance by name; empty for unknown members or requirements
    pub fn provenance_of(&self, member: &str, requirement_id: &str) -> &[NaiveDate] {
        match (self.member_index(member), self.requirement_index(requirement_id)) {
            (Some(m), Some(r)) => self.provenance(m, r),
            _ => &[],
        }
    }

    /// Number of roster members who have satisfied the requirement
    pub fn completed_count(&self, requirement: RequirementIdx) -> usize {
        (0..self.members.len())
            .filter(|&m| self.is_satisfied(MemberIdx(m), requirement))
            .count()
    }

    /// Members who have not yet satisfied the requirement, in roster order
    pub fn missing_members(&self, requirement: RequirementIdx) -> Vec<MemberId> {
        (0..self.members.len())
            .map(MemberIdx)
            .filter(|&m| !self.is_satisfied(m, requirement))
            .map(|m| self.members[m.0].clone())
            .collect()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn requirement_count(&self) -> usize {
        self.requirement_ids.len()
    }
}
