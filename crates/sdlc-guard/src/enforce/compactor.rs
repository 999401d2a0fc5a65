//! Text snapshot of a session record for context compaction.

use crate::session::SessionState;

fn list_or_none(files: &[String]) -> String {
    if files.is_empty() {
        "none".to_string()
    } else {
        files.join(", ")
    }
}

/// Render `state` as a `<sdlc-preserved-state>` block. Read-only.
pub fn preserve_state(state: &SessionState) -> String {
    let last_test_run = state
        .last_test_run
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());
    [
        "<sdlc-preserved-state>".to_string(),
        format!("TDD Phase: {}", state.phase()),
        format!("Domain Review Pending: {}", state.domain_review_pending),
        format!(
            "Test Files Modified: {}",
            list_or_none(state.test_files_modified())
        ),
        format!(
            "Production Files Modified: {}",
            list_or_none(state.production_files_modified())
        ),
        format!("Last Test Run: {last_test_run}"),
        format!("Commits Since Review: {}", state.commits_since_review),
        "</sdlc-preserved-state>".to_string(),
    ]
    .join("\n")
}
