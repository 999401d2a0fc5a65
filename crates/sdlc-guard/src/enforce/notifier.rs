//! Review-gate reminders on idle and stop.

use crate::session::SessionState;
use crate::tools::names;

/// Reminders owed on idle, in a fixed order. Empty when nothing is owed.
///
/// A domain review reminder fires while the gate is pending. A code review
/// reminder fires once `threshold` distinct files are modified with no
/// commit since the last code review.
pub fn idle_reminders(state: &SessionState, threshold: usize) -> Vec<String> {
    let mut reminders = Vec::new();
    if state.domain_review_pending {
        reminders.push(format!(
            "Domain review is pending. Run the `{}` tool before continuing.",
            names::DOMAIN_REVIEW
        ));
    }
    if state.files_modified().len() >= threshold && state.commits_since_review == 0 {
        reminders.push(format!(
            "Multiple files modified without a code review. Consider running `{}` before continuing.",
            names::CODE_REVIEW
        ));
    }
    reminders
}

/// The idle message to send, wrapped in `<sdlc-reminder>`.
pub fn idle_message(state: &SessionState, threshold: usize) -> Option<String> {
    let reminders = idle_reminders(state, threshold);
    if reminders.is_empty() {
        return None;
    }
    Some(format!(
        "<sdlc-reminder>\n{}\n</sdlc-reminder>",
        reminders.join("\n")
    ))
}

/// The message to send when the agent stops with a review still owed.
/// Advisory only; the stop itself is never prevented.
pub fn stop_message(state: &SessionState) -> Option<String> {
    state.domain_review_pending.then(|| {
        format!(
            "Domain review is still pending. Complete the domain review before ending \
             this session. Use `{}` to proceed.",
            names::DOMAIN_REVIEW
        )
    })
}
