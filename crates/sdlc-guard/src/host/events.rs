//! Host events, handler responses, and event handlers.
//!
//! The host drives the guard through [`HostEvent`] variants covering the
//! session lifecycle, the pre/post hooks around every tool action, idle and
//! stop signals, context compaction and system-prompt construction.
//! Handlers implement [`EventHandler`] and answer with an optional
//! [`EventResponse`].
//!
//! | Handler | Use case |
//! |---------|----------|
//! | [`LoggingHandler`] | Structured logging via `tracing` |
//! | [`CompositeEventHandler`] | Compose multiple handlers in order |
//! | [`SessionHookAdapter`](super::hooks::SessionHookAdapter) | Typed per-lifecycle hooks |

use tracing::{debug, info};

use super::action::ToolAction;
use crate::session::SessionId;

// ── Events ─────────────────────────────────────────────────────────

/// Events delivered by the host.
#[derive(Debug, Clone, Copy)]
pub enum HostEvent<'a> {
    /// A session began. Its record starts from defaults.
    SessionCreated { session: &'a SessionId },
    /// A session ended. Its record is discarded.
    SessionDeleted { session: &'a SessionId },
    /// The session went idle waiting for input.
    SessionIdle { session: &'a SessionId },
    /// A tool action is about to execute. Handlers may return
    /// [`EventResponse::Deny`] to block it.
    BeforeAction {
        session: &'a SessionId,
        action: &'a ToolAction,
    },
    /// A tool action completed (whether or not it was blocked).
    AfterAction {
        session: &'a SessionId,
        action: &'a ToolAction,
    },
    /// The agent is about to stop.
    Stop { session: &'a SessionId },
    /// The host is about to compact the session's context. Handlers may
    /// return [`EventResponse::AppendContext`] to preserve state.
    Compacting { session: &'a SessionId },
    /// The host is assembling the system prompt.
    SystemPrompt,
}

impl HostEvent<'_> {
    /// Stable event name, matching the host's wire names.
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::SessionCreated { .. } => "session.created",
            HostEvent::SessionDeleted { .. } => "session.deleted",
            HostEvent::SessionIdle { .. } => "session.idle",
            HostEvent::BeforeAction { .. } => "tool.execute.before",
            HostEvent::AfterAction { .. } => "tool.execute.after",
            HostEvent::Stop { .. } => "stop",
            HostEvent::Compacting { .. } => "session.compacting",
            HostEvent::SystemPrompt => "system.transform",
        }
    }
}

/// Response from an event handler for events that support feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResponse {
    /// Block the pending action with a reason shown to the agent.
    Deny(String),
    /// Send a message into the session.
    InjectMessage(String),
    /// Append text to the context the host preserves through compaction.
    AppendContext(String),
    /// Append a block to the system prompt.
    AppendSystem(String),
}

/// Handler for host events.
///
/// Return `None` for events that need no feedback. For
/// [`HostEvent::BeforeAction`], `Some(EventResponse::Deny(reason))` blocks
/// the action; `None` allows it.
pub trait EventHandler: Send + Sync {
    fn on_event(&self, event: &HostEvent<'_>) -> Option<EventResponse> {
        let _ = event;
        None
    }
}

/// An event handler that delegates to multiple inner handlers.
///
/// Events are dispatched to handlers in registration order until one
/// returns a response, which wins.
///
/// ```ignore
/// let handler = CompositeEventHandler::new()
///     .with(LoggingHandler)
///     .with(SessionHookAdapter::new(guard));
/// ```
pub struct CompositeEventHandler {
    handlers: Vec<Box<dyn EventHandler>>,
}

impl CompositeEventHandler {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Add a handler to the chain.
    pub fn with(mut self, handler: impl EventHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for CompositeEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CompositeEventHandler {
    fn on_event(&self, event: &HostEvent<'_>) -> Option<EventResponse> {
        self.handlers.iter().find_map(|h| h.on_event(event))
    }
}

/// An event handler that logs events via `tracing`. Never responds.
pub struct LoggingHandler;

impl EventHandler for LoggingHandler {
    fn on_event(&self, event: &HostEvent<'_>) -> Option<EventResponse> {
        match event {
            HostEvent::SessionCreated { session } => info!(%session, "session created"),
            HostEvent::SessionDeleted { session } => info!(%session, "session deleted"),
            HostEvent::SessionIdle { session } => debug!(%session, "session idle"),
            HostEvent::BeforeAction { session, action } => {
                debug!(%session, tool = action.tool(), "before action");
            }
            HostEvent::AfterAction { session, action } => {
                debug!(%session, tool = action.tool(), "after action");
            }
            HostEvent::Stop { session } => debug!(%session, "stop requested"),
            HostEvent::Compacting { session } => debug!(%session, "context compaction"),
            HostEvent::SystemPrompt => debug!("system prompt assembly"),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<EventResponse>);
    impl EventHandler for Fixed {
        fn on_event(&self, _event: &HostEvent<'_>) -> Option<EventResponse> {
            self.0.clone()
        }
    }

    #[test]
    fn default_handler_returns_none() {
        struct Noop;
        impl EventHandler for Noop {}
        assert!(Noop.on_event(&HostEvent::SystemPrompt).is_none());
    }

    #[test]
    fn composite_first_response_wins() {
        let handler = CompositeEventHandler::new()
            .with(LoggingHandler)
            .with(Fixed(Some(EventResponse::Deny("first".into()))))
            .with(Fixed(Some(EventResponse::Deny("second".into()))));
        assert_eq!(handler.len(), 3);
        assert_eq!(
            handler.on_event(&HostEvent::SystemPrompt),
            Some(EventResponse::Deny("first".into()))
        );
    }

    #[test]
    fn empty_composite_never_responds() {
        let handler = CompositeEventHandler::default();
        assert!(handler.is_empty());
        assert!(handler.on_event(&HostEvent::SystemPrompt).is_none());
    }

    #[test]
    fn event_wire_names() {
        let id = SessionId::new("s1").unwrap();
        let action = ToolAction::Other { tool: "read".into() };
        let event = HostEvent::BeforeAction {
            session: &id,
            action: &action,
        };
        assert_eq!(event.name(), "tool.execute.before");
        assert_eq!(HostEvent::Compacting { session: &id }.name(), "session.compacting");
        assert_eq!(HostEvent::SystemPrompt.name(), "system.transform");
    }
}
