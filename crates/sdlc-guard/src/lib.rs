//! TDD phase-boundary enforcement for autonomous coding sessions.
//!
//! `sdlc-guard` watches every file edit and shell command an agent attempts,
//! checks edits against the session's current TDD phase, and blocks the ones
//! that cross a phase boundary before they run. It also tracks touched
//! files, test runs and commits so it can remind the agent when a domain
//! review or code review is owed.
//!
//! # Where to find things
//!
//! - **Classify a path:** [`classify::Classifier`] and [`classify::classify_path`].
//! - **Phase rules:** [`phase::TddPhase`] and [`rules::check_phase_boundary`].
//! - **Per-session state:** [`session::SessionStore`] and [`session::SessionState`].
//! - **Host integration:** [`host::normalize`] turns raw payloads into
//!   [`host::HostMessage`]s; [`host::HostEvent`]s are dispatched to an
//!   [`host::EventHandler`]. [`guard::SdlcGuard`] is the
//!   [`host::SessionHook`] that does the enforcing.
//! - **Agent tools:** [`tools::SdlcToolsExt`] registers `sdlc_set_phase`,
//!   `sdlc_domain_review`, `sdlc_code_review` and `sdlc_status` on a
//!   [`tools::core::ToolSet`].
//! - **Configuration:** [`config::GuardConfig`], loaded from `.sdlc/guard.json`.
//!
//! ```ignore
//! use sdlc_guard::prelude::*;
//!
//! let config = GuardConfig::load_from_project(".");
//! let guard = SdlcGuard::new(config.clone())?;
//! let tools = guard.tool_set();
//! let handler = CompositeEventHandler::new()
//!     .with(LoggingHandler)
//!     .with(SessionHookAdapter::new(guard));
//!
//! if let Some(HostMessage::Session { .. }) = normalize(&payload, &config)? { /* dispatch */ }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`classify`] | Ordered rule table mapping paths to test / type-definition / production |
//! | [`rules`] | Stateless (phase, class) allow/deny predicate |
//! | [`session`] | Session ids, records, and the store |
//! | [`signals`] | Test-runner and commit command signatures |
//! | [`enforce`] | Interceptor, tracker, notifier, compactor, system prompt |
//! | [`host`] | Payload normalization, events, handlers, hooks |
//! | [`tools`] | Tool trait, tool set, the four SDLC tools |

pub mod classify;
pub mod config;
pub mod enforce;
pub mod guard;
pub mod host;
pub mod phase;
pub mod prelude;
pub mod rules;
pub mod session;
pub mod signals;
pub mod tools;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Schema generation ──────────────────────────────────────────────

/// Generate a JSON Schema value from a type implementing
/// `schemars::JsonSchema`. Used for tool parameter schemas.
///
/// ```
/// use sdlc_guard::json_schema_for;
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct ReviewArgs {
///     findings: String,
///     #[serde(default)]
///     approved: Option<bool>,
/// }
///
/// let schema = json_schema_for::<ReviewArgs>();
/// assert_eq!(schema["type"], "object");
/// assert!(schema["required"].as_array().unwrap().contains(&"findings".into()));
/// ```
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}

// ── Tool definitions ───────────────────────────────────────────────

/// The type of a tool definition. Currently always `Function`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ToolType {
    #[serde(rename = "function")]
    Function,
}

/// Tool definition in function-calling format.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ToolDef {
    #[serde(rename = "type")]
    pub tool_type: ToolType,
    pub function: FunctionDef,
}

impl ToolDef {
    /// Create a function-calling tool definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            tool_type: ToolType::Function,
            function: FunctionDef {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}
