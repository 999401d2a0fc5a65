//! The four agent-callable SDLC tools.
//!
//! | Tool | Name | Effect |
//! |------|------|--------|
//! | [`SetPhase`] | `sdlc_set_phase` | Overwrite the TDD phase |
//! | [`DomainReview`] | `sdlc_domain_review` | Attest a domain review, possibly advancing the phase |
//! | [`CodeReview`] | `sdlc_code_review` | Reset the commit counter, return the review checklist |
//! | [`Status`] | `sdlc_status` | Report the session record |
//!
//! These are the only writers of the phase.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::core::{Tool, ToolContext, ToolFuture, parse_tool_args};
use super::names;
use super::spec::ToolSpec;
use crate::ToolDef;
use crate::phase::TddPhase;
use crate::session::{ReviewOutcome, SessionState, SessionStore};

fn list_or_none(files: &[String]) -> String {
    if files.is_empty() {
        "none".to_string()
    } else {
        files.join(", ")
    }
}

// ── SetPhase ────────────────────────────────────────────────────────

/// Arguments for `sdlc_set_phase`.
#[derive(Deserialize, JsonSchema)]
pub struct SetPhaseArgs {
    /// The TDD phase to enter.
    pub phase: TddPhase,
}

/// Set the current TDD phase.
pub struct SetPhase {
    store: Arc<SessionStore>,
}

impl SetPhase {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Apply the phase change and render the report.
    pub fn run(&self, ctx: &ToolContext, args: SetPhaseArgs) -> String {
        let change = self
            .store
            .with_session(&ctx.session, |s| s.apply_phase(args.phase));
        info!(session = %ctx.session, from = %change.from, to = %change.to, "phase changed");
        format!(
            "Phase changed: {} -> {}\n{}",
            change.from,
            change.to,
            change.to.description()
        )
    }
}

impl Tool for SetPhase {
    fn definition(&self) -> ToolDef {
        ToolSpec::new(names::SET_PHASE, "Set the current TDD phase")
            .use_when(
                "When transitioning between RED, DOMAIN and GREEN phases. Phase boundaries \
                 are enforced: RED allows only test files, DOMAIN allows only type \
                 definitions, GREEN allows only production code. Set to 'none' to disable \
                 enforcement.",
            )
            .avoid_when(format!(
                "To finish a domain review checkpoint; use {} so the review is recorded",
                names::DOMAIN_REVIEW
            ))
            .parameters_for::<SetPhaseArgs>()
            .example(
                r#"sdlc_set_phase(phase="red")"#,
                "Phase changed: none -> red",
            )
            .to_tool_def()
    }

    fn execute(&self, ctx: &ToolContext, arguments: &str) -> ToolFuture<'_> {
        let ctx = ctx.clone();
        let arguments = arguments.to_string();
        Box::pin(async move {
            match parse_tool_args::<SetPhaseArgs>(&arguments) {
                Ok(args) => self.run(&ctx, args),
                Err(e) => e,
            }
        })
    }
}

// ── DomainReview ────────────────────────────────────────────────────

/// Arguments for `sdlc_domain_review`.
#[derive(Deserialize, JsonSchema)]
pub struct DomainReviewArgs {
    /// Summary of domain review findings. State APPROVED if no violations,
    /// or describe the violations found.
    pub findings: String,
    /// Whether the domain review passes. If false, the current phase must be
    /// revised before proceeding.
    pub approved: bool,
}

/// Attest a domain review checkpoint.
pub struct DomainReview {
    store: Arc<SessionStore>,
    strict: bool,
}

impl DomainReview {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            strict: false,
        }
    }

    /// Keep the review gate closed after a rejected review.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn run(&self, ctx: &ToolContext, args: DomainReviewArgs) -> String {
        let outcome = self.store.with_session(&ctx.session, |s| {
            s.attest_review(args.approved, self.strict)
        });
        info!(session = %ctx.session, ?outcome, "domain review attested");
        let findings = &args.findings;
        match outcome {
            ReviewOutcome::ApprovedAfterRed => format!(
                "Domain review APPROVED after RED.\n{findings}\n\
                 Phase advanced to GREEN. Implement minimally to pass the test."
            ),
            ReviewOutcome::ApprovedAfterGreen => format!(
                "Domain review APPROVED after GREEN.\n{findings}\n\
                 TDD cycle complete. Commit, then start the next test or tidy."
            ),
            ReviewOutcome::Recorded => format!("Domain review recorded.\n{findings}"),
            ReviewOutcome::Rejected => format!(
                "Domain review REJECTED.\n{findings}\n\
                 Revise the current phase to address domain violations before proceeding."
            ),
        }
    }
}

impl Tool for DomainReview {
    fn definition(&self) -> ToolDef {
        ToolSpec::new(names::DOMAIN_REVIEW, "Record a domain review checkpoint")
            .use_when(
                "After RED (review the test for primitive obsession) or after GREEN \
                 (review the implementation for domain violations). Clears the domain \
                 review gate; an approval in a DOMAIN phase advances to the next phase.",
            )
            .avoid_when(format!(
                "For a full pre-merge review; use {} instead",
                names::CODE_REVIEW
            ))
            .parameters_for::<DomainReviewArgs>()
            .example(
                r#"sdlc_domain_review(findings="APPROVED", approved=true)"#,
                "Domain review APPROVED after RED. Phase advanced to GREEN.",
            )
            .to_tool_def()
    }

    fn execute(&self, ctx: &ToolContext, arguments: &str) -> ToolFuture<'_> {
        let ctx = ctx.clone();
        let arguments = arguments.to_string();
        Box::pin(async move {
            match parse_tool_args::<DomainReviewArgs>(&arguments) {
                Ok(args) => self.run(&ctx, args),
                Err(e) => e,
            }
        })
    }
}

// ── CodeReview ──────────────────────────────────────────────────────

/// Arguments for `sdlc_code_review`.
#[derive(Deserialize, JsonSchema, Default)]
pub struct CodeReviewArgs {
    /// Git base ref for the diff (defaults to the configured base, usually main).
    #[serde(default)]
    pub base: Option<String>,
}

const REVIEW_STAGES: &str = "\
Follow the code-review skill protocol:

STAGE 1: SPEC COMPLIANCE
For each acceptance criterion, verify:
- Code exists that implements it
- Test exists that verifies it
- Implementation matches spec exactly

STAGE 2: CODE QUALITY
For each changed file, check:
- Clarity and naming
- Domain type usage (no primitive obsession)
- Error handling coverage
- Test quality and coverage
- YAGNI (no unused or speculative code)

STAGE 3: DOMAIN INTEGRITY
Check for:
- Compile-time enforcement opportunities
- Consistent domain type usage
- Validation at construction boundaries
- Invalid states that are representable

Produce a structured summary with PASS/FAIL per stage.";

/// Start a three-stage code review.
pub struct CodeReview {
    store: Arc<SessionStore>,
    default_base: String,
}

impl CodeReview {
    pub fn new(store: Arc<SessionStore>, default_base: impl Into<String>) -> Self {
        Self {
            store,
            default_base: default_base.into(),
        }
    }

    pub fn run(&self, ctx: &ToolContext, args: CodeReviewArgs) -> String {
        let base = args
            .base
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| self.default_base.clone());
        let files = self.store.with_session(&ctx.session, |s| {
            s.reset_commits();
            s.files_modified().len()
        });
        info!(session = %ctx.session, %base, files, "code review started");
        format!(
            "THREE-STAGE CODE REVIEW\n\
             =======================\n\
             \n\
             Base: {base}\n\
             Files modified this session: {files}\n\
             \n\
             {REVIEW_STAGES}"
        )
    }
}

impl Tool for CodeReview {
    fn definition(&self) -> ToolDef {
        ToolSpec::new(
            names::CODE_REVIEW,
            "Start a three-stage code review (spec compliance, code quality, domain integrity)",
        )
        .use_when("Before creating a pull request or after completing a feature")
        .avoid_when(format!(
            "To clear the domain review gate; use {} instead",
            names::DOMAIN_REVIEW
        ))
        .parameters_for::<CodeReviewArgs>()
        .output_format("A structured review checklist")
        .to_tool_def()
    }

    fn execute(&self, ctx: &ToolContext, arguments: &str) -> ToolFuture<'_> {
        let ctx = ctx.clone();
        let arguments = arguments.to_string();
        Box::pin(async move {
            match parse_tool_args::<CodeReviewArgs>(&arguments) {
                Ok(args) => self.run(&ctx, args),
                Err(e) => e,
            }
        })
    }
}

// ── Status ──────────────────────────────────────────────────────────

/// Arguments for `sdlc_status` (none).
#[derive(Deserialize, JsonSchema, Default)]
pub struct StatusArgs {}

/// Report the session record.
pub struct Status {
    store: Arc<SessionStore>,
}

impl Status {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    pub fn run(&self, ctx: &ToolContext) -> String {
        render_status(&self.store.snapshot(&ctx.session))
    }
}

/// Render the status report for `state`.
pub fn render_status(state: &SessionState) -> String {
    let phase = state.phase();
    let last_test_run = state
        .last_test_run
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());
    let boundaries = if phase.is_enforcing() {
        format!("  Phase boundaries: ACTIVE ({phase})")
    } else {
        format!("  Phase boundaries: INACTIVE (set phase with {})", names::SET_PHASE)
    };
    let gate = if state.domain_review_pending {
        format!("  Domain review gate: BLOCKING (run {})", names::DOMAIN_REVIEW)
    } else {
        "  Domain review gate: CLEAR".to_string()
    };
    [
        "SDLC SESSION STATUS".to_string(),
        "===================".to_string(),
        String::new(),
        format!("TDD Phase: {phase}"),
        format!("Domain Review Pending: {}", state.domain_review_pending),
        String::new(),
        "Files Modified:".to_string(),
        format!("  Test files: {}", list_or_none(state.test_files_modified())),
        format!(
            "  Production files: {}",
            list_or_none(state.production_files_modified())
        ),
        format!("  Total: {}", state.files_modified().len()),
        String::new(),
        format!("Last Test Run: {last_test_run}"),
        format!("Commits Since Last Review: {}", state.commits_since_review),
        String::new(),
        "Enforcement:".to_string(),
        boundaries,
        gate,
    ]
    .join("\n")
}

impl Tool for Status {
    fn definition(&self) -> ToolDef {
        ToolSpec::new(
            names::STATUS,
            "Show the SDLC session state: TDD phase, files modified, pending reviews and enforcement",
        )
        .use_when("Before choosing the next phase, or when an edit was blocked unexpectedly")
        .avoid_when(format!("To change the phase; use {} instead", names::SET_PHASE))
        .parameters_for::<StatusArgs>()
        .example("sdlc_status()", "SDLC SESSION STATUS\n...\nTDD Phase: red")
        .to_tool_def()
    }

    fn execute(&self, ctx: &ToolContext, _arguments: &str) -> ToolFuture<'_> {
        let report = self.run(ctx);
        Box::pin(async move { report })
    }
}
