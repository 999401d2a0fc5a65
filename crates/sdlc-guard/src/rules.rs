//! Phase-boundary rule engine.
//!
//! A stateless predicate over `(phase, file class)`. It never advances the
//! phase; transitions belong to the `sdlc_set_phase` and
//! `sdlc_domain_review` tools.

use crate::classify::FileClass;
use crate::phase::TddPhase;

/// Outcome of a boundary check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryCheck {
    Allowed,
    Denied(String),
}

impl BoundaryCheck {
    pub fn is_allowed(&self) -> bool {
        matches!(self, BoundaryCheck::Allowed)
    }

    /// The denial reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            BoundaryCheck::Allowed => None,
            BoundaryCheck::Denied(r) => Some(r),
        }
    }
}

/// Whether `phase` permits editing a file of `class` at all.
pub fn permits(phase: TddPhase, class: FileClass) -> bool {
    match phase {
        TddPhase::None => true,
        TddPhase::Red => class == FileClass::Test,
        TddPhase::DomainAfterRed | TddPhase::DomainAfterGreen => {
            class == FileClass::TypeDefinition
        }
        TddPhase::Green => class != FileClass::Test,
    }
}

/// Check an edit of `path` (already classified as `class`) against `phase`.
///
/// The path is only used to build the denial message.
pub fn check_phase_boundary(phase: TddPhase, class: FileClass, path: &str) -> BoundaryCheck {
    if permits(phase, class) {
        return BoundaryCheck::Allowed;
    }
    let reason = match phase {
        TddPhase::Red => format!(
            "TDD RED phase: only test files can be edited. \"{path}\" is not a test file. \
             Complete the RED phase before editing production code."
        ),
        TddPhase::DomainAfterRed | TddPhase::DomainAfterGreen => format!(
            "TDD DOMAIN phase: only type definition files can be edited. \"{path}\" is not a \
             type definition file. Complete domain review before editing other files."
        ),
        TddPhase::Green => format!(
            "TDD GREEN phase: test files cannot be edited. \"{path}\" is a test file. \
             Only production code can be edited during GREEN."
        ),
        // `None` permits everything.
        TddPhase::None => return BoundaryCheck::Allowed,
    };
    BoundaryCheck::Denied(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSES: [FileClass; 3] = [
        FileClass::Test,
        FileClass::TypeDefinition,
        FileClass::Production,
    ];

    #[test]
    fn decision_table() {
        use FileClass::*;
        let expected: &[(TddPhase, [bool; 3])] = &[
            (TddPhase::None, [true, true, true]),
            (TddPhase::Red, [true, false, false]),
            (TddPhase::DomainAfterRed, [false, true, false]),
            (TddPhase::Green, [false, true, true]),
            (TddPhase::DomainAfterGreen, [false, true, false]),
        ];
        for (phase, row) in expected {
            for (class, allowed) in [Test, TypeDefinition, Production].iter().zip(row) {
                assert_eq!(
                    check_phase_boundary(*phase, *class, "f").is_allowed(),
                    *allowed,
                    "{phase} / {class}"
                );
            }
        }
    }

    #[test]
    fn red_denial_names_phase_and_file() {
        let check = check_phase_boundary(TddPhase::Red, FileClass::Production, "src/widget.ts");
        let reason = check.reason().unwrap();
        assert!(reason.contains("RED"));
        assert!(reason.contains("src/widget.ts"));
    }

    #[test]
    fn green_denial_mentions_tests_frozen() {
        let check = check_phase_boundary(TddPhase::Green, FileClass::Test, "a.test.ts");
        assert!(check.reason().unwrap().contains("test files cannot be edited"));
    }

    #[test]
    fn domain_denial_is_shared_by_both_checkpoints() {
        let a = check_phase_boundary(TddPhase::DomainAfterRed, FileClass::Test, "x");
        let b = check_phase_boundary(TddPhase::DomainAfterGreen, FileClass::Test, "x");
        assert_eq!(a, b);
        assert!(a.reason().unwrap().contains("DOMAIN"));
    }

    #[test]
    fn decisions_depend_only_on_inputs() {
        for phase in TddPhase::ALL {
            for class in CLASSES {
                assert_eq!(
                    check_phase_boundary(phase, class, "p"),
                    check_phase_boundary(phase, class, "p")
                );
                assert_eq!(
                    check_phase_boundary(phase, class, "p").is_allowed(),
                    permits(phase, class)
                );
            }
        }
    }
}
