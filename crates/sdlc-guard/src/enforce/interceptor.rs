//! Pre-action interceptor.

use crate::classify::{Classifier, FileClass};
use crate::host::ToolAction;
use crate::phase::TddPhase;
use crate::rules::{BoundaryCheck, check_phase_boundary};
use crate::session::SessionState;

/// Shown when production code is touched in `red` while the domain review
/// after RED is still owed.
pub fn red_review_gate_message(path: &str) -> String {
    format!(
        "Domain review required after RED phase before starting GREEN. \
         \"{path}\" is production code. Run the `sdlc_domain_review` tool first."
    )
}

/// Decide whether `action` may run under `state`.
///
/// Only single-file writes with a resolvable path are evaluated; anything
/// else is allowed. Reads `state` only; tracking happens after the action.
pub fn check_action(
    state: &SessionState,
    action: &ToolAction,
    classifier: &Classifier,
) -> BoundaryCheck {
    let phase = state.phase();
    if phase == TddPhase::None {
        return BoundaryCheck::Allowed;
    }
    let Some(path) = action.file_path() else {
        return BoundaryCheck::Allowed;
    };
    let class = classifier.classify(path);

    if phase == TddPhase::Red && state.domain_review_pending && class == FileClass::Production {
        return BoundaryCheck::Denied(red_review_gate_message(path));
    }
    check_phase_boundary(phase, class, path)
}
