//! Canonical tool name constants.
//!
//! Prompt text, reminders and tool definitions all reference these, so a
//! rename only touches this file.

pub const SET_PHASE: &str = "sdlc_set_phase";
pub const DOMAIN_REVIEW: &str = "sdlc_domain_review";
pub const CODE_REVIEW: &str = "sdlc_code_review";
pub const STATUS: &str = "sdlc_status";

/// Every tool the guard registers.
pub const ALL: [&str; 4] = [SET_PHASE, DOMAIN_REVIEW, CODE_REVIEW, STATUS];
