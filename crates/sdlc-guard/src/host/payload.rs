//! Normalization of raw host payloads.
//!
//! This is the only place that knows the several spellings a host may use
//! for the session id or the event name. Everything past [`normalize`]
//! works with [`SessionId`] and [`ToolAction`].
//!
//! A payload is a JSON object:
//!
//! ```json
//! {"event": "tool.execute.before", "sessionID": "ses_1",
//!  "tool": "edit", "args": {"file_path": "src/widget.ts"}}
//! ```

use serde_json::Value;
use tracing::{debug, trace};

use super::action::ToolAction;
use super::events::HostEvent;
use crate::config::GuardConfig;
use crate::session::SessionId;

/// Top-level keys that may carry the session id, checked after
/// `properties.sessionID`.
const SESSION_KEYS: [&str; 3] = ["sessionID", "session_id", "sessionId"];

/// Extract the session id from a payload.
///
/// Lookup order: `properties.sessionID`, `sessionID`, `session_id`,
/// `sessionId`. Non-string and blank values are skipped.
pub fn extract_session_id(payload: &Value) -> Option<SessionId> {
    let nested = payload
        .get("properties")
        .and_then(|p| p.get("sessionID"));
    std::iter::once(nested)
        .chain(SESSION_KEYS.iter().map(|k| payload.get(*k)))
        .flatten()
        .filter_map(Value::as_str)
        .find_map(SessionId::new)
}

/// A per-session lifecycle signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSignal {
    Created,
    Deleted,
    Idle,
    Before(ToolAction),
    After(ToolAction),
    Stop,
    Compacting,
}

/// A normalized host message.
#[derive(Debug, Clone, PartialEq)]
pub enum HostMessage {
    /// An event scoped to one session.
    Session {
        session: SessionId,
        signal: SessionSignal,
    },
    /// System prompt assembly. Not scoped to a session.
    SystemPrompt,
    /// A call of one of the guard's own tools.
    ToolCall {
        session: SessionId,
        tool: String,
        arguments: String,
    },
}

impl HostMessage {
    /// The event to dispatch to handlers, if this message is one.
    /// Tool calls are routed to the tool set instead.
    pub fn as_event(&self) -> Option<HostEvent<'_>> {
        let (session, signal) = match self {
            HostMessage::Session { session, signal } => (session, signal),
            HostMessage::SystemPrompt => return Some(HostEvent::SystemPrompt),
            HostMessage::ToolCall { .. } => return None,
        };
        Some(match signal {
            SessionSignal::Created => HostEvent::SessionCreated { session },
            SessionSignal::Deleted => HostEvent::SessionDeleted { session },
            SessionSignal::Idle => HostEvent::SessionIdle { session },
            SessionSignal::Before(action) => HostEvent::BeforeAction { session, action },
            SessionSignal::After(action) => HostEvent::AfterAction { session, action },
            SessionSignal::Stop => HostEvent::Stop { session },
            SessionSignal::Compacting => HostEvent::Compacting { session },
        })
    }
}

/// Normalize a raw payload.
///
/// Returns `Ok(None)` for events that should be skipped (unknown event name,
/// or a session-scoped event without a session id) and `Err` for payloads
/// that aren't usable at all.
pub fn normalize(payload: &Value, config: &GuardConfig) -> Result<Option<HostMessage>, String> {
    trace!(%payload, "host payload");
    if !payload.is_object() {
        return Err("payload must be a JSON object".to_string());
    }
    let name = payload
        .get("event")
        .or_else(|| payload.get("type"))
        .and_then(Value::as_str)
        .ok_or_else(|| "payload has no \"event\" name".to_string())?;

    let tool_name = || payload.get("tool").and_then(Value::as_str).unwrap_or_default();
    let args = || {
        payload
            .get("args")
            .or_else(|| payload.get("arguments"))
            .unwrap_or(&Value::Null)
    };

    let signal = match name {
        "system.transform" | "system.prompt" => return Ok(Some(HostMessage::SystemPrompt)),
        "tool.call" => {
            let tool = tool_name();
            if tool.is_empty() {
                return Err("tool.call payload has no \"tool\" name".to_string());
            }
            let arguments = match args() {
                Value::Null => "{}".to_string(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let session = extract_session_id(payload).unwrap_or_else(SessionId::fallback);
            return Ok(Some(HostMessage::ToolCall {
                session,
                tool: tool.to_string(),
                arguments,
            }));
        }
        "session.created" => SessionSignal::Created,
        "session.deleted" => SessionSignal::Deleted,
        "session.idle" => SessionSignal::Idle,
        "tool.execute.before" => {
            SessionSignal::Before(ToolAction::from_invocation(tool_name(), args(), config))
        }
        "tool.execute.after" => {
            SessionSignal::After(ToolAction::from_invocation(tool_name(), args(), config))
        }
        "stop" | "session.stop" => SessionSignal::Stop,
        "session.compacting" | "experimental.session.compacting" => SessionSignal::Compacting,
        other => {
            debug!(event = other, "ignoring unknown host event");
            return Ok(None);
        }
    };

    match extract_session_id(payload) {
        Some(session) => Ok(Some(HostMessage::Session { session, signal })),
        None => {
            debug!(event = name, "skipping event without session id");
            Ok(None)
        }
    }
}
