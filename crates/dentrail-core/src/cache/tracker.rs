use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::config::Config;
use crate::engine::{
    CompletionMatrix, CoverageIndex, IndividualReport, MemberCategories, MemberProgress,
    PlanningReport, RankDefinition, RankStatus, SessionReport,
};
use crate::models::{AttendanceRecord, Catalog, MemberId, Session};
use crate::ranks::PackagedRank;

/// A derived value tagged with the input version it was computed from.
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    pub data: T,
    pub version: u64,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T, version: u64) -> Self {
        Self {
            data,
            version,
            cached_at: Utc::now(),
        }
    }

    pub fn is_current(&self, version: u64) -> bool {
        self.version == version
    }
}

/// Everything derived from the session log and attendance in one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub coverage: CoverageIndex,
    pub matrix: CompletionMatrix,
}

/// Owns the four input collections and memoizes the completion matrix.
///
/// Every mutating call bumps `version()`; the cached snapshot is reused only
/// while its version matches. Callers that cache engine output themselves can
/// key on the same counter.
#[derive(Debug)]
pub struct Tracker {
    roster: Vec<MemberId>,
    catalog: Catalog,
    sessions: Vec<Session>,
    attendance: Vec<AttendanceRecord>,
    rank: RankDefinition,
    version: u64,
    cached: RefCell<Option<CachedData<Rc<Snapshot>>>>,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(RankDefinition::default())
    }
}

impl Tracker {
    pub fn new(rank: RankDefinition) -> Self {
        Self {
            roster: Vec::new(),
            catalog: Catalog::default(),
            sessions: Vec::new(),
            attendance: Vec::new(),
            rank,
            version: 0,
            cached: RefCell::new(None),
        }
    }

    /// Start from the active rank in `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.active_rank_definition())
    }

    pub fn with_data(
        roster: Vec<MemberId>,
        catalog: Catalog,
        sessions: Vec<Session>,
        attendance: Vec<AttendanceRecord>,
        rank: RankDefinition,
    ) -> Self {
        Self {
            roster,
            catalog,
            sessions,
            attendance,
            ..Self::new(rank)
        }
    }

    fn invalidate(&mut self) {
        self.version += 1;
    }

    // ===== Inputs =====

    pub fn roster(&self) -> &[MemberId] {
        &self.roster
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    pub fn rank(&self) -> &RankDefinition {
        &self.rank
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    // ===== Roster =====

    pub fn set_roster(&mut self, roster: Vec<MemberId>) {
        self.roster = roster;
        self.invalidate();
    }

    /// Returns false when the member is already on the roster
    pub fn add_member(&mut self, member: impl Into<MemberId>) -> bool {
        let member = member.into();
        if self.roster.contains(&member) {
            return false;
        }
        self.roster.push(member);
        self.invalidate();
        true
    }

    /// Remove a member along with their attendance history
    pub fn remove_member(&mut self, member: &str) -> bool {
        let before = self.roster.len();
        self.roster.retain(|m| m.as_str() != member);
        if self.roster.len() == before {
            return false;
        }
        self.attendance.retain(|a| a.member.as_str() != member);
        self.invalidate();
        true
    }

    // ===== Catalog and rank =====

    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.invalidate();
    }

    /// Swap in a bundled rank catalog and make that rank active
    pub fn load_packaged(&mut self, rank: PackagedRank) -> Result<()> {
        let catalog = rank.catalog()?;
        self.set_catalog(catalog);
        self.rank = rank.definition();
        Ok(())
    }

    /// The rank only feeds eligibility, so the matrix stays cached
    pub fn set_rank(&mut self, rank: RankDefinition) {
        self.rank = rank;
    }

    // ===== Sessions =====

    pub fn set_sessions(&mut self, sessions: Vec<Session>) {
        self.sessions = sessions;
        self.invalidate();
    }

    /// Replace every session on the same date, or add it
    pub fn upsert_session(&mut self, session: Session) {
        self.sessions.retain(|s| s.date != session.date);
        self.sessions.push(session);
        self.invalidate();
    }

    /// Change what a session covered without touching attendance
    pub fn update_coverage(&mut self, date: NaiveDate, covered_ids: impl Into<String>) -> bool {
        let covered_ids = covered_ids.into();
        let mut found = false;
        for session in self.sessions.iter_mut().filter(|s| s.date == date) {
            session.covered_ids = covered_ids.clone();
            found = true;
        }
        if found {
            self.invalidate();
        }
        found
    }

    /// Remove the session(s) on `date` and the attendance recorded for them
    pub fn remove_session(&mut self, date: NaiveDate) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.date != date);
        if self.sessions.len() == before {
            return false;
        }
        self.attendance.retain(|a| a.date != date);
        self.invalidate();
        true
    }

    // ===== Attendance =====

    pub fn set_attendance(&mut self, attendance: Vec<AttendanceRecord>) {
        self.attendance = attendance;
        self.invalidate();
    }

    /// Returns false when the record already exists
    pub fn record_attendance(&mut self, date: NaiveDate, member: impl Into<MemberId>) -> bool {
        let record = AttendanceRecord::new(date, member);
        if self.attendance.contains(&record) {
            return false;
        }
        self.attendance.push(record);
        self.invalidate();
        true
    }

    pub fn remove_attendance(&mut self, date: NaiveDate, member: &str) -> bool {
        let before = self.attendance.len();
        self.attendance
            .retain(|a| !(a.date == date && a.member.as_str() == member));
        if self.attendance.len() == before {
            return false;
        }
        self.invalidate();
        true
    }

    // ===== Derived =====

    /// Coverage index and matrix for the current inputs, rebuilt on demand
    pub fn snapshot(&self) -> Rc<Snapshot> {
        if let Some(cached) = self.cached.borrow().as_ref() {
            if cached.is_current(self.version) {
                return Rc::clone(&cached.data);
            }
        }

        debug!(version = self.version, "Rebuilding completion snapshot");
        let coverage = CoverageIndex::build(&self.sessions);
        let matrix =
            CompletionMatrix::build(&self.roster, &self.catalog, &coverage, &self.attendance);
        let snapshot = Rc::new(Snapshot { coverage, matrix });
        *self.cached.borrow_mut() = Some(CachedData::new(Rc::clone(&snapshot), self.version));
        snapshot
    }

    /// When the cached snapshot was built, if it is still current
    pub fn last_computed(&self) -> Option<DateTime<Utc>> {
        self.cached
            .borrow()
            .as_ref()
            .filter(|c| c.is_current(self.version))
            .map(|c| c.cached_at)
    }

    pub fn satisfied(&self, member: &str, requirement_id: &str) -> bool {
        self.snapshot().matrix.satisfied(member, requirement_id)
    }

    pub fn member_categories(&self, member: &str) -> MemberCategories {
        MemberCategories::aggregate(&self.snapshot().matrix, &self.catalog, member)
    }

    pub fn rank_status(&self, member: &str) -> RankStatus {
        RankStatus::evaluate(&self.member_categories(member), &self.rank)
    }

    /// One row per roster member, roster order
    pub fn dashboard(&self) -> Vec<MemberProgress> {
        let snapshot = self.snapshot();
        snapshot
            .matrix
            .members()
            .iter()
            .map(|member| {
                let categories =
                    MemberCategories::aggregate(&snapshot.matrix, &self.catalog, member.as_str());
                MemberProgress::new(categories, &self.rank)
            })
            .collect()
    }

    pub fn planning(&self) -> PlanningReport {
        PlanningReport::build(&self.snapshot().matrix, &self.catalog)
    }

    pub fn individual_report(&self, member: &str) -> IndividualReport {
        let snapshot = self.snapshot();
        IndividualReport::build(
            member,
            &snapshot.matrix,
            &snapshot.coverage,
            &self.attendance,
            &self.catalog,
            &self.rank,
        )
    }

    pub fn session_report(&self, date: NaiveDate) -> Option<SessionReport> {
        let snapshot = self.snapshot();
        SessionReport::build(
            date,
            &self.roster,
            &snapshot.coverage,
            &self.attendance,
            &self.catalog,
        )
    }
}
