//! Operating instructions injected into the system prompt.

use crate::phase::TddPhase;
use crate::tools::names;

/// The `<sdlc-skills>` block naming the guard's tools.
pub fn system_prompt_block() -> String {
    let phases: Vec<&str> = TddPhase::ALL
        .iter()
        .filter(|p| **p != TddPhase::None)
        .map(|p| p.as_str())
        .chain(std::iter::once(TddPhase::None.as_str()))
        .collect();
    [
        "<sdlc-skills>".to_string(),
        "This project uses the SDLC Agent Skills workflow.".to_string(),
        "Active enforcement: TDD phase boundaries, domain review gates.".to_string(),
        String::new(),
        "Available SDLC tools:".to_string(),
        format!(
            "- {}: Set the current TDD phase ({})",
            names::SET_PHASE,
            phases.join("/")
        ),
        format!("- {}: Trigger domain review checkpoint", names::DOMAIN_REVIEW),
        format!("- {}: Trigger three-stage code review", names::CODE_REVIEW),
        format!("- {}: Show current TDD phase and session state", names::STATUS),
        String::new(),
        "Phase boundary enforcement is active. File edits will be blocked".to_string(),
        "if they violate the current TDD phase boundaries.".to_string(),
        "</sdlc-skills>".to_string(),
    ]
    .join("\n")
}
