//! Post-action activity tracker.

use chrono::{DateTime, Utc};

use crate::classify::Classifier;
use crate::host::ToolAction;
use crate::session::SessionState;
use crate::signals::CommandSignals;

/// What [`record_action`] observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activity {
    /// Path recorded for the first time this cycle.
    pub new_file: Option<String>,
    pub test_run: bool,
    pub commit: bool,
}

impl Activity {
    pub fn is_empty(&self) -> bool {
        self.new_file.is_none() && !self.test_run && !self.commit
    }
}

/// Update `state` from a completed action.
///
/// File writes are added to the cycle's file sets (set semantics, so a
/// replayed action is not double-counted). Shell commands are checked for a
/// test-runner invocation, which stamps `last_test_run` with `now`, and for
/// a commit, which bumps the commit counter.
pub fn record_action(
    state: &mut SessionState,
    action: &ToolAction,
    classifier: &Classifier,
    signals: &CommandSignals,
    now: DateTime<Utc>,
) -> Activity {
    let mut activity = Activity::default();
    match action {
        ToolAction::FileWrite {
            path: Some(path), ..
        } => {
            if state.record_file(path, classifier.classify(path)) {
                activity.new_file = Some(path.clone());
            }
        }
        ToolAction::Shell { command, .. } => {
            if signals.is_test_run(command) {
                state.record_test_run(now);
                activity.test_run = true;
            }
            if signals.is_commit(command) {
                state.record_commit();
                activity.commit = true;
            }
        }
        _ => {}
    }
    activity
}
