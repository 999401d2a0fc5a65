//! Boundary with the hosting agent runtime.
//!
//! - [`payload`] normalizes loosely-typed host payloads into typed values
//!   (one place for session-id and file-path fallbacks).
//! - [`events`] defines [`HostEvent`], [`EventResponse`] and the
//!   [`EventHandler`] trait the engine is driven through.
//! - [`hooks`] offers the typed [`SessionHook`] trait and its adapter.

pub mod action;
pub mod events;
pub mod hooks;
pub mod payload;

pub use action::ToolAction;
pub use events::{CompositeEventHandler, EventHandler, EventResponse, HostEvent, LoggingHandler};
pub use hooks::{HookAction, SessionHook, SessionHookAdapter, StopAction};
pub use payload::{HostMessage, SessionSignal, extract_session_id, normalize};
