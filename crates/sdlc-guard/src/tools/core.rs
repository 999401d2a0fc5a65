//! Tool abstraction for the guard's agent-callable operations.
//!
//! The [`Tool`] trait defines the interface every tool implements: a static
//! definition (name, description, JSON schema) and an async `execute`
//! method that receives the calling session through a [`ToolContext`].
//! Tools are collected into a [`ToolSet`] which handles dispatch,
//! definition export, optional argument validation, and result truncation.

use crate::ToolDef;
use crate::session::SessionId;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info, trace};

/// Maximum size (in bytes) for tool output before truncation.
pub const DEFAULT_MAX_RESULT_BYTES: usize = 30_000;

/// Boxed future returned by [`Tool::execute`].
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = String> + Send + 'a>>;

/// Per-call context handed to every tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolContext {
    /// Session the call belongs to.
    pub session: SessionId,
}

impl ToolContext {
    pub fn new(session: SessionId) -> Self {
        Self { session }
    }

    /// Build a context from an optional raw id, falling back to the
    /// [`default`](SessionId::FALLBACK) session.
    pub fn from_raw(session: Option<&str>) -> Self {
        Self::new(
            session
                .and_then(SessionId::new)
                .unwrap_or_else(SessionId::fallback),
        )
    }
}

// ── Tool trait ─────────────────────────────────────────────────────

/// A tool the agent can invoke.
///
/// ```ignore
/// struct Echo;
///
/// impl Tool for Echo {
///     fn definition(&self) -> ToolDef { /* ... */ }
///
///     fn execute(&self, ctx: &ToolContext, arguments: &str) -> ToolFuture<'_> {
///         let reply = format!("{}: {arguments}", ctx.session);
///         Box::pin(async move { reply })
///     }
/// }
/// ```
pub trait Tool: Send + Sync {
    /// The definition shown to the agent.
    fn definition(&self) -> ToolDef;

    /// Execute the tool with the given raw JSON arguments string.
    ///
    /// Errors are returned as `"Error: ..."` strings rather than panicking;
    /// the host passes the string back to the agent either way.
    fn execute(&self, ctx: &ToolContext, arguments: &str) -> ToolFuture<'_>;

    fn name(&self) -> String {
        self.definition().function.name
    }
}

// ── ToolSet ────────────────────────────────────────────────────────

/// A collection of tools that can be dispatched by name.
///
/// ```ignore
/// let tools = ToolSet::new()
///     .with_arg_validation(true)
///     .with_sdlc_tools(store, &config);
/// let defs = tools.definitions();
/// ```
pub struct ToolSet {
    tools: HashMap<String, Box<dyn Tool>>,
    /// Validate arguments against the tool's JSON Schema before execution.
    validate_args: bool,
}

impl fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSet")
            .field("tools", &self.names())
            .field("validate_args", &self.validate_args)
            .finish()
    }
}

impl ToolSet {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            validate_args: false,
        }
    }

    /// Enable JSON Schema argument validation before tool execution.
    pub fn with_arg_validation(mut self, enabled: bool) -> Self {
        self.validate_args = enabled;
        self
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        self.tools.insert(tool.name(), Box::new(tool));
    }

    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        self.register(tool);
        self
    }

    /// All tool definitions, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDef> {
        let mut defs: Vec<ToolDef> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        defs
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool call by name, with optional validation, timing, and
    /// truncation. Unknown tools yield an error string.
    pub async fn execute(&self, name: &str, ctx: &ToolContext, arguments: &str) -> String {
        let Some(tool) = self.tools.get(name) else {
            return format!("Error: unknown tool '{name}'");
        };

        if self.validate_args
            && let Some(error) = validate_tool_arguments(tool.as_ref(), arguments)
        {
            return error;
        }

        log_tool_call(name, arguments);
        let start = std::time::Instant::now();
        let result = tool.execute(ctx, arguments).await;
        debug!(
            session = %ctx.session,
            "Tool {name} completed in {:.0}ms ({} bytes)",
            start.elapsed().as_secs_f64() * 1000.0,
            result.len()
        );

        truncate_result(result, DEFAULT_MAX_RESULT_BYTES)
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        Self::new()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Validate tool arguments against the tool's declared JSON Schema.
///
/// Returns `None` if valid, or an error string the agent can act on.
pub fn validate_tool_arguments(tool: &dyn Tool, arguments: &str) -> Option<String> {
    let args_value: serde_json::Value = match serde_json::from_str(arguments) {
        Ok(v) => v,
        Err(e) => {
            return Some(format!(
                "Error: invalid JSON arguments for tool '{}': {e}. \
                 Please provide valid JSON matching the tool's parameter schema.",
                tool.name()
            ));
        }
    };

    let schema = tool.definition().function.parameters;
    // An unusable schema skips validation.
    let validator = jsonschema::validator_for(&schema).ok()?;

    let errors: Vec<String> = validator
        .iter_errors(&args_value)
        .map(|e| format!("  - {}: {e}", e.instance_path()))
        .collect();

    if errors.is_empty() {
        None
    } else {
        Some(format!(
            "Error: argument validation failed for tool '{}':\n{}\n\
             Please fix the arguments and try again.",
            tool.name(),
            errors.join("\n")
        ))
    }
}

/// Log a tool call at INFO level with a truncated preview of arguments.
pub fn log_tool_call(name: &str, arguments: &str) {
    let args_preview: String = arguments.chars().take(120).collect();
    info!(
        "[tool] {}({args_preview}{})",
        name,
        if arguments.chars().nth(120).is_some() { "..." } else { "" }
    );
    trace!("[tool] {name} arguments: {arguments}");
}

/// Truncate a string to at most `max` bytes (on a char boundary),
/// appending a notice if trimmed.
pub fn truncate_result(s: String, max: usize) -> String {
    if s.len() <= max {
        return s;
    }
    let cut = (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    format!(
        "{}...\n[truncated: {} bytes total]",
        s.get(..cut).unwrap_or_default(),
        s.len()
    )
}

/// Parse raw JSON arguments into a typed struct.
///
/// The error is already formatted for returning from [`Tool::execute`].
/// Empty arguments are treated as `{}`.
pub fn parse_tool_args<T: serde::de::DeserializeOwned>(arguments: &str) -> Result<T, String> {
    let arguments = if arguments.trim().is_empty() { "{}" } else { arguments };
    serde_json::from_str(arguments).map_err(|e| {
        format!(
            "Error: invalid tool arguments: {e}. \
             Please provide valid JSON matching the tool's parameter schema."
        )
    })
}
