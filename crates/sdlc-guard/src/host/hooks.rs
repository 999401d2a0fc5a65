//! Typed per-session lifecycle hooks.
//!
//! [`SessionHook`] has one named method per host lifecycle point.
//! [`SessionHookAdapter`] converts any `SessionHook` into an
//! [`EventHandler`] so it plugs into a
//! [`CompositeEventHandler`](super::events::CompositeEventHandler) chain.

use super::action::ToolAction;
use super::events::{EventHandler, EventResponse, HostEvent};
use crate::session::SessionId;

// ── Enums ──────────────────────────────────────────────────────────

/// Action returned by [`SessionHook::pre_tool_use`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookAction {
    /// Allow the action to execute.
    Proceed,
    /// Block the action with the given reason (shown to the agent).
    Block(String),
}

/// Action returned by [`SessionHook::on_stop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopAction {
    /// Allow the agent to stop.
    Allow,
    /// Inject a message and keep the agent going.
    Continue(String),
}

// ── SessionHook trait ──────────────────────────────────────────────

/// Typed lifecycle hook, keyed by session.
///
/// All methods have default no-op implementations. Implement only the
/// hooks you need, then wrap with [`SessionHookAdapter`] to use as an
/// [`EventHandler`].
///
/// ```ignore
/// struct NoShell;
///
/// impl SessionHook for NoShell {
///     fn pre_tool_use(&self, _session: &SessionId, action: &ToolAction) -> HookAction {
///         match action {
///             ToolAction::Shell { .. } => HookAction::Block("Shell disabled.".into()),
///             _ => HookAction::Proceed,
///         }
///     }
/// }
/// ```
pub trait SessionHook: Send + Sync {
    fn session_created(&self, _session: &SessionId) {}

    fn session_deleted(&self, _session: &SessionId) {}

    /// Called before a tool action executes. Return `Block` to prevent it.
    fn pre_tool_use(&self, _session: &SessionId, _action: &ToolAction) -> HookAction {
        HookAction::Proceed
    }

    /// Called after a tool action executes.
    fn post_tool_use(&self, _session: &SessionId, _action: &ToolAction) {}

    /// Called when the session goes idle. Return a message to send.
    fn on_idle(&self, _session: &SessionId) -> Option<String> {
        None
    }

    /// Called when the agent would stop. Return `Continue` to keep it going.
    fn on_stop(&self, _session: &SessionId) -> StopAction {
        StopAction::Allow
    }

    /// Called before context compaction. Return text to preserve.
    fn pre_compact(&self, _session: &SessionId) -> Option<String> {
        None
    }

    /// Called while the host assembles the system prompt. Return a block
    /// to append.
    fn system_prompt(&self) -> Option<String> {
        None
    }
}

// ── SessionHookAdapter ─────────────────────────────────────────────

/// Adapts a [`SessionHook`] into an [`EventHandler`].
///
/// - `SessionCreated` → `session_created()`
/// - `SessionDeleted` → `session_deleted()`
/// - `BeforeAction` → `pre_tool_use()`
/// - `AfterAction` → `post_tool_use()`
/// - `SessionIdle` → `on_idle()`
/// - `Stop` → `on_stop()`
/// - `Compacting` → `pre_compact()`
/// - `SystemPrompt` → `system_prompt()`
pub struct SessionHookAdapter<H: SessionHook> {
    hook: H,
}

impl<H: SessionHook> SessionHookAdapter<H> {
    pub fn new(hook: H) -> Self {
        Self { hook }
    }

    /// The wrapped hook.
    pub fn hook(&self) -> &H {
        &self.hook
    }
}

impl<H: SessionHook> EventHandler for SessionHookAdapter<H> {
    fn on_event(&self, event: &HostEvent<'_>) -> Option<EventResponse> {
        match *event {
            HostEvent::SessionCreated { session } => {
                self.hook.session_created(session);
                None
            }
            HostEvent::SessionDeleted { session } => {
                self.hook.session_deleted(session);
                None
            }
            HostEvent::BeforeAction { session, action } => {
                match self.hook.pre_tool_use(session, action) {
                    HookAction::Block(reason) => Some(EventResponse::Deny(reason)),
                    HookAction::Proceed => None,
                }
            }
            HostEvent::AfterAction { session, action } => {
                self.hook.post_tool_use(session, action);
                None
            }
            HostEvent::SessionIdle { session } => {
                self.hook.on_idle(session).map(EventResponse::InjectMessage)
            }
            HostEvent::Stop { session } => match self.hook.on_stop(session) {
                StopAction::Continue(msg) => Some(EventResponse::InjectMessage(msg)),
                StopAction::Allow => None,
            },
            HostEvent::Compacting { session } => {
                self.hook.pre_compact(session).map(EventResponse::AppendContext)
            }
            HostEvent::SystemPrompt => self.hook.system_prompt().map(EventResponse::AppendSystem),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder {
        seen: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl SessionHook for Recorder {
        fn session_created(&self, session: &SessionId) {
            self.seen.lock().unwrap().push(format!("created:{session}"));
        }
        fn post_tool_use(&self, session: &SessionId, action: &ToolAction) {
            self.seen
                .lock()
                .unwrap()
                .push(format!("after:{session}:{}", action.tool()));
        }
    }

    struct BlockShell;

    impl SessionHook for BlockShell {
        fn pre_tool_use(&self, _session: &SessionId, action: &ToolAction) -> HookAction {
            match action {
                ToolAction::Shell { .. } => HookAction::Block("no shell".into()),
                _ => HookAction::Proceed,
            }
        }
        fn on_stop(&self, _session: &SessionId) -> StopAction {
            StopAction::Continue("keep going".into())
        }
        fn pre_compact(&self, _session: &SessionId) -> Option<String> {
            Some("state".into())
        }
        fn system_prompt(&self) -> Option<String> {
            Some("rules".into())
        }
    }

    fn sid() -> SessionId {
        SessionId::new("s1").unwrap()
    }

    #[test]
    fn default_hooks_produce_no_responses() {
        struct Noop;
        impl SessionHook for Noop {}
        let adapter = SessionHookAdapter::new(Noop);
        let id = sid();
        let action = ToolAction::Other { tool: "read".into() };
        assert!(adapter.on_event(&HostEvent::SessionIdle { session: &id }).is_none());
        assert!(adapter.on_event(&HostEvent::Stop { session: &id }).is_none());
        assert!(
            adapter
                .on_event(&HostEvent::BeforeAction {
                    session: &id,
                    action: &action
                })
                .is_none()
        );
        assert!(adapter.on_event(&HostEvent::SystemPrompt).is_none());
    }

    #[test]
    fn block_maps_to_deny() {
        let adapter = SessionHookAdapter::new(BlockShell);
        let id = sid();
        let shell = ToolAction::Shell {
            tool: "bash".into(),
            command: "ls".into(),
        };
        assert_eq!(
            adapter.on_event(&HostEvent::BeforeAction {
                session: &id,
                action: &shell
            }),
            Some(EventResponse::Deny("no shell".into()))
        );
    }

    #[test]
    fn responses_map_to_their_kinds() {
        let adapter = SessionHookAdapter::new(BlockShell);
        let id = sid();
        assert_eq!(
            adapter.on_event(&HostEvent::Stop { session: &id }),
            Some(EventResponse::InjectMessage("keep going".into()))
        );
        assert_eq!(
            adapter.on_event(&HostEvent::Compacting { session: &id }),
            Some(EventResponse::AppendContext("state".into()))
        );
        assert_eq!(
            adapter.on_event(&HostEvent::SystemPrompt),
            Some(EventResponse::AppendSystem("rules".into()))
        );
    }

    #[test]
    fn lifecycle_calls_reach_the_hook() {
        let adapter = SessionHookAdapter::new(Recorder::new());
        let id = sid();
        let action = ToolAction::FileWrite {
            tool: "edit".into(),
            path: Some("a.ts".into()),
        };
        assert!(adapter.on_event(&HostEvent::SessionCreated { session: &id }).is_none());
        assert!(
            adapter
                .on_event(&HostEvent::AfterAction {
                    session: &id,
                    action: &action
                })
                .is_none()
        );
        let seen = adapter.hook().seen.lock().unwrap().clone();
        assert_eq!(seen, ["created:s1", "after:s1:edit"]);
    }
}
