//! Request handling for the JSON-lines protocol.
//!
//! Request: a host payload as accepted by [`sdlc_guard::host::normalize`],
//! optionally carrying an `"id"` that is echoed back.
//!
//! Response fields (all optional, omitted when absent):
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `id` | Echo of the request id |
//! | `abort` | Block the pending action with this reason |
//! | `message` | Send this text into the session |
//! | `context` | Append this text to the preserved context |
//! | `system` | Append this block to the system prompt |
//! | `result` | Output of a `tool.call` |
//! | `error` | The line could not be handled; the host should proceed as if allowed |

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use sdlc_guard::prelude::*;

/// One response line.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    fn error(id: Option<Value>, error: impl Into<String>) -> Self {
        Self {
            id,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    fn apply(&mut self, response: EventResponse) {
        match response {
            EventResponse::Deny(reason) => self.abort = Some(reason),
            EventResponse::InjectMessage(text) => self.message = Some(text),
            EventResponse::AppendContext(text) => self.context = Some(text),
            EventResponse::AppendSystem(text) => self.system = Some(text),
        }
    }

    /// Serialize as a single JSON line (no trailing newline).
    pub fn to_line(&self) -> String {
        // A struct of strings and a JSON value always serializes.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Guard, tools and handler chain for one host process.
pub struct Adapter {
    config: GuardConfig,
    tools: ToolSet,
    handler: CompositeEventHandler,
}

impl Adapter {
    /// Build an adapter. Fails if the config carries invalid patterns.
    pub fn new(config: GuardConfig) -> Result<Self, String> {
        let guard = SdlcGuard::new(config.clone())?;
        let tools = guard.tool_set();
        let handler = CompositeEventHandler::new()
            .with(LoggingHandler)
            .with(SessionHookAdapter::new(guard));
        Ok(Self {
            config,
            tools,
            handler,
        })
    }

    /// Validate tool arguments against their schemas before execution.
    pub fn with_arg_validation(mut self, enabled: bool) -> Self {
        self.tools = self.tools.with_arg_validation(enabled);
        self
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// Handle one input line. Blank lines yield `None`; every other line
    /// yields exactly one response.
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let payload: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!("unparsable host payload: {e}");
                return Some(Response::error(None, format!("invalid JSON: {e}")));
            }
        };
        Some(self.handle(&payload).await)
    }

    /// Handle one parsed payload.
    pub async fn handle(&self, payload: &Value) -> Response {
        let id = payload.get("id").cloned();
        let message = match normalize(payload, &self.config) {
            Ok(Some(message)) => message,
            Ok(None) => {
                return Response {
                    id,
                    ..Response::default()
                };
            }
            Err(e) => {
                warn!("rejected host payload: {e}");
                return Response::error(id, e);
            }
        };

        let mut response = Response {
            id,
            ..Response::default()
        };
        match &message {
            HostMessage::ToolCall {
                session,
                tool,
                arguments,
            } => {
                let ctx = ToolContext::new(session.clone());
                response.result = Some(self.tools.execute(tool, &ctx, arguments).await);
            }
            other => {
                if let Some(event) = other.as_event()
                    && let Some(reply) = self.handler.on_event(&event)
                {
                    debug!(event = event.name(), "handler responded");
                    response.apply(reply);
                }
            }
        }
        response
    }
}
