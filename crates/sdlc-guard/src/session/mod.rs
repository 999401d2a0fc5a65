//! Per-session state: the record, its identifier, and the store that owns it.
//!
//! Exactly one [`SessionStore`] exists per host process. Sessions are the
//! only unit of isolation; no operation reads or writes across sessions.

mod state;
mod store;

pub use state::{PhaseChange, ReviewOutcome, SessionState};
pub use store::SessionStore;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier of a host session.
///
/// Produced once at the boundary by [`host::payload`](crate::host::payload);
/// nothing past that point re-derives it from raw payloads.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Session used by tool calls that arrive without an id.
    pub const FALLBACK: &'static str = "default";

    /// Wrap a raw id. Blank ids are rejected.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == id.len() {
            Some(Self(id))
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn fallback() -> Self {
        Self(Self::FALLBACK.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_ids_are_rejected() {
        assert!(SessionId::new("").is_none());
        assert!(SessionId::new("   ").is_none());
    }

    #[test]
    fn ids_are_trimmed() {
        assert_eq!(SessionId::new(" ses_1 ").unwrap().as_str(), "ses_1");
        assert_eq!(SessionId::new("ses_1").unwrap().to_string(), "ses_1");
    }

    #[test]
    fn fallback_id() {
        assert_eq!(SessionId::fallback().as_str(), "default");
    }
}
