//! The five TDD phases a session can be constrained to.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current governing phase of a session's red/green cycle.
///
/// `None` disables enforcement. The two `Domain*` phases are review
/// checkpoints where only shared vocabulary (type definitions) may change.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TddPhase {
    #[default]
    None,
    Red,
    DomainAfterRed,
    Green,
    DomainAfterGreen,
}

impl TddPhase {
    /// Every phase, in cycle order starting from `None`.
    pub const ALL: [TddPhase; 5] = [
        TddPhase::None,
        TddPhase::Red,
        TddPhase::DomainAfterRed,
        TddPhase::Green,
        TddPhase::DomainAfterGreen,
    ];

    /// Wire name of the phase (`"domain-after-red"` etc).
    pub fn as_str(self) -> &'static str {
        match self {
            TddPhase::None => "none",
            TddPhase::Red => "red",
            TddPhase::DomainAfterRed => "domain-after-red",
            TddPhase::Green => "green",
            TddPhase::DomainAfterGreen => "domain-after-green",
        }
    }

    /// Whether phase boundaries are enforced at all.
    pub fn is_enforcing(self) -> bool {
        self != TddPhase::None
    }

    /// Human-readable statement of what the phase permits.
    pub fn description(self) -> &'static str {
        match self {
            TddPhase::Red => "RED -- Write one failing test. Only test files can be edited.",
            TddPhase::DomainAfterRed => {
                "DOMAIN (after red) -- Review test for domain violations. \
                 Only type definitions can be edited."
            }
            TddPhase::Green => {
                "GREEN -- Implement minimally to pass the test. \
                 Only production files can be edited."
            }
            TddPhase::DomainAfterGreen => {
                "DOMAIN (after green) -- Review implementation for domain violations. \
                 Only type definitions can be edited."
            }
            TddPhase::None => "No active TDD phase. File boundaries not enforced.",
        }
    }
}

impl fmt::Display for TddPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
