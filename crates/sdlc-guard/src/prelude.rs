//! Convenience re-exports for embedding the guard in a host adapter.
//!
//! ```ignore
//! use sdlc_guard::prelude::*;
//! ```

pub use crate::{ToolDef, json_schema_for};

pub use crate::classify::{Classifier, FileClass, classify_path};
pub use crate::config::GuardConfig;
pub use crate::guard::SdlcGuard;
pub use crate::phase::TddPhase;
pub use crate::session::{SessionId, SessionState, SessionStore};

pub use crate::host::{
    CompositeEventHandler, EventHandler, EventResponse, HookAction, HostEvent, HostMessage,
    LoggingHandler, SessionHook, SessionHookAdapter, StopAction, ToolAction, normalize,
};

pub use crate::tools::SdlcToolsExt;
pub use crate::tools::core::{Tool, ToolContext, ToolFuture, ToolSet, parse_tool_args};
