use chrono::{DateTime, Utc};

use crate::classify::FileClass;
use crate::phase::TddPhase;

/// A phase change performed by [`SessionState::apply_phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: TddPhase,
    pub to: TddPhase,
}

/// What a review attestation did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Approved at `domain-after-red`; phase advanced to `green`.
    ApprovedAfterRed,
    /// Approved at `domain-after-green`; cycle complete, phase is `none`.
    ApprovedAfterGreen,
    /// Approved outside a domain phase; no phase effect.
    Recorded,
    /// Not approved; phase unchanged.
    Rejected,
}

/// Mutable record for one session.
///
/// `phase` is only written through [`apply_phase`](Self::apply_phase) and
/// [`attest_review`](Self::attest_review), which back the phase and review
/// tools. File tracking keeps `test_files_modified` and
/// `production_files_modified` as disjoint partitions of `files_modified`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    phase: TddPhase,
    files_modified: Vec<String>,
    test_files_modified: Vec<String>,
    production_files_modified: Vec<String>,
    /// A domain review checkpoint is owed.
    pub domain_review_pending: bool,
    /// Most recent detected test-runner invocation.
    pub last_test_run: Option<DateTime<Utc>>,
    /// Commit commands seen since the last code review.
    pub commits_since_review: u32,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TddPhase {
        self.phase
    }

    /// Distinct paths touched this cycle, in first-touch order.
    pub fn files_modified(&self) -> &[String] {
        &self.files_modified
    }

    pub fn test_files_modified(&self) -> &[String] {
        &self.test_files_modified
    }

    /// Non-test paths touched this cycle (production and type definitions).
    pub fn production_files_modified(&self) -> &[String] {
        &self.production_files_modified
    }

    /// Record a touched file. Returns `true` if the path was new this cycle.
    pub(crate) fn record_file(&mut self, path: &str, class: FileClass) -> bool {
        if self.files_modified.iter().any(|p| p == path) {
            return false;
        }
        self.files_modified.push(path.to_string());
        let partition = match class {
            FileClass::Test => &mut self.test_files_modified,
            FileClass::TypeDefinition | FileClass::Production => {
                &mut self.production_files_modified
            }
        };
        partition.push(path.to_string());
        true
    }

    pub(crate) fn record_test_run(&mut self, at: DateTime<Utc>) {
        self.last_test_run = Some(at);
    }

    pub(crate) fn record_commit(&mut self) {
        self.commits_since_review = self.commits_since_review.saturating_add(1);
    }

    /// Clear per-cycle tracking: touched files and the last test run.
    fn start_cycle(&mut self) {
        self.files_modified.clear();
        self.test_files_modified.clear();
        self.production_files_modified.clear();
        self.last_test_run = None;
    }

    /// Overwrite the phase with `target`, applying its side effects.
    ///
    /// Entering `red` or `green` owes a domain review; entering a domain
    /// phase clears it. Entering `red` from any other phase starts a fresh
    /// cycle.
    pub(crate) fn apply_phase(&mut self, target: TddPhase) -> PhaseChange {
        let from = self.phase;
        self.phase = target;

        match target {
            TddPhase::Red | TddPhase::Green => self.domain_review_pending = true,
            TddPhase::DomainAfterRed | TddPhase::DomainAfterGreen => {
                self.domain_review_pending = false;
            }
            TddPhase::None => {}
        }

        if target == TddPhase::Red && from != TddPhase::Red {
            self.start_cycle();
        }

        PhaseChange { from, to: target }
    }

    /// Record a domain review attestation.
    ///
    /// The pending gate is cleared unless the review was rejected and
    /// `strict` is set.
    pub(crate) fn attest_review(&mut self, approved: bool, strict: bool) -> ReviewOutcome {
        if approved || !strict {
            self.domain_review_pending = false;
        }
        if !approved {
            return ReviewOutcome::Rejected;
        }
        match self.phase {
            TddPhase::DomainAfterRed => {
                self.phase = TddPhase::Green;
                ReviewOutcome::ApprovedAfterRed
            }
            TddPhase::DomainAfterGreen => {
                self.phase = TddPhase::None;
                ReviewOutcome::ApprovedAfterGreen
            }
            _ => ReviewOutcome::Recorded,
        }
    }

    /// Reset the commit counter after a code review.
    pub(crate) fn reset_commits(&mut self) {
        self.commits_since_review = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partitions_hold(s: &SessionState) -> bool {
        let disjoint = s
            .test_files_modified()
            .iter()
            .all(|t| !s.production_files_modified().contains(t));
        let mut union: Vec<&String> = s
            .test_files_modified()
            .iter()
            .chain(s.production_files_modified())
            .collect();
        union.sort();
        let mut all: Vec<&String> = s.files_modified().iter().collect();
        all.sort();
        disjoint && union == all
    }

    #[test]
    fn new_state_is_default() {
        let s = SessionState::new();
        assert_eq!(s.phase(), TddPhase::None);
        assert!(s.files_modified().is_empty());
        assert!(!s.domain_review_pending);
        assert!(s.last_test_run.is_none());
        assert_eq!(s.commits_since_review, 0);
    }

    #[test]
    fn record_file_partitions_by_class() {
        let mut s = SessionState::new();
        assert!(s.record_file("a.test.ts", FileClass::Test));
        assert!(s.record_file("a.ts", FileClass::Production));
        assert!(s.record_file("types.ts", FileClass::TypeDefinition));
        assert_eq!(s.test_files_modified(), ["a.test.ts"]);
        assert_eq!(s.production_files_modified(), ["a.ts", "types.ts"]);
        assert!(partitions_hold(&s));
    }

    #[test]
    fn record_file_is_idempotent() {
        let mut s = SessionState::new();
        assert!(s.record_file("a.ts", FileClass::Production));
        assert!(!s.record_file("a.ts", FileClass::Production));
        assert_eq!(s.files_modified().len(), 1);
        assert_eq!(s.production_files_modified().len(), 1);
        assert!(partitions_hold(&s));
    }

    #[test]
    fn entering_red_or_green_owes_review() {
        let mut s = SessionState::new();
        s.apply_phase(TddPhase::Red);
        assert!(s.domain_review_pending);
        s.apply_phase(TddPhase::DomainAfterRed);
        assert!(!s.domain_review_pending);
        s.apply_phase(TddPhase::Green);
        assert!(s.domain_review_pending);
        s.apply_phase(TddPhase::DomainAfterGreen);
        assert!(!s.domain_review_pending);
    }

    #[test]
    fn entering_none_leaves_gate_alone() {
        let mut s = SessionState::new();
        s.apply_phase(TddPhase::Red);
        let change = s.apply_phase(TddPhase::None);
        assert_eq!(change, PhaseChange { from: TddPhase::Red, to: TddPhase::None });
        assert!(s.domain_review_pending);
    }

    #[test]
    fn red_to_red_keeps_cycle_tracking() {
        let mut s = SessionState::new();
        s.apply_phase(TddPhase::Red);
        s.record_file("a.test.ts", FileClass::Test);
        s.record_test_run(Utc::now());
        s.apply_phase(TddPhase::Red);
        assert_eq!(s.test_files_modified(), ["a.test.ts"]);
        assert!(s.last_test_run.is_some());
    }

    #[test]
    fn green_to_red_starts_fresh_cycle() {
        let mut s = SessionState::new();
        s.apply_phase(TddPhase::Green);
        s.record_file("a.test.ts", FileClass::Test);
        s.record_file("a.ts", FileClass::Production);
        s.record_test_run(Utc::now());
        s.record_commit();
        s.apply_phase(TddPhase::Red);
        assert!(s.files_modified().is_empty());
        assert!(s.test_files_modified().is_empty());
        assert!(s.production_files_modified().is_empty());
        assert!(s.last_test_run.is_none());
        // Commits are tied to reviews, not cycles.
        assert_eq!(s.commits_since_review, 1);
        assert!(partitions_hold(&s));
    }

    #[test]
    fn approved_review_advances_domain_phases() {
        let mut s = SessionState::new();
        s.apply_phase(TddPhase::DomainAfterRed);
        assert_eq!(s.attest_review(true, false), ReviewOutcome::ApprovedAfterRed);
        assert_eq!(s.phase(), TddPhase::Green);
        assert!(!s.domain_review_pending);

        s.apply_phase(TddPhase::DomainAfterGreen);
        assert_eq!(s.attest_review(true, false), ReviewOutcome::ApprovedAfterGreen);
        assert_eq!(s.phase(), TddPhase::None);
    }

    #[test]
    fn approved_review_outside_domain_phase_only_clears_gate() {
        let mut s = SessionState::new();
        s.apply_phase(TddPhase::Red);
        assert_eq!(s.attest_review(true, false), ReviewOutcome::Recorded);
        assert_eq!(s.phase(), TddPhase::Red);
        assert!(!s.domain_review_pending);
    }

    #[test]
    fn rejected_review_clears_gate_unless_strict() {
        let mut lenient = SessionState::new();
        lenient.apply_phase(TddPhase::Red);
        assert_eq!(lenient.attest_review(false, false), ReviewOutcome::Rejected);
        assert_eq!(lenient.phase(), TddPhase::Red);
        assert!(!lenient.domain_review_pending);

        let mut strict = SessionState::new();
        strict.apply_phase(TddPhase::Red);
        assert_eq!(strict.attest_review(false, true), ReviewOutcome::Rejected);
        assert!(strict.domain_review_pending);
    }

    #[test]
    fn commit_counter_saturates_and_resets() {
        let mut s = SessionState::new();
        s.commits_since_review = u32::MAX;
        s.record_commit();
        assert_eq!(s.commits_since_review, u32::MAX);
        s.reset_commits();
        assert_eq!(s.commits_since_review, 0);
    }
}
