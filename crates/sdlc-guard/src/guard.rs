//! The guard: enforcement engines wired to one session store.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::classify::Classifier;
use crate::config::GuardConfig;
use crate::enforce::{
    check_action, idle_message, preserve_state, record_action, stop_message, system_prompt_block,
};
use crate::host::{HookAction, SessionHook, StopAction, ToolAction};
use crate::rules::BoundaryCheck;
use crate::session::{SessionId, SessionStore};
use crate::signals::CommandSignals;
use crate::tools::SdlcToolsExt;
use crate::tools::core::ToolSet;

/// Phase-boundary enforcement for every session of one host process.
///
/// Implements [`SessionHook`]; wrap it in a
/// [`SessionHookAdapter`](crate::host::SessionHookAdapter) to drive it with
/// host events. The tools from [`tool_set`](Self::tool_set) share the same
/// store, so phase changes made by the agent are seen by the hooks.
///
/// ```ignore
/// let guard = SdlcGuard::new(GuardConfig::load_from_project("."))?;
/// let tools = guard.tool_set();
/// let handler = CompositeEventHandler::new()
///     .with(LoggingHandler)
///     .with(SessionHookAdapter::new(guard));
/// ```
pub struct SdlcGuard {
    store: Arc<SessionStore>,
    config: GuardConfig,
    classifier: Classifier,
    signals: CommandSignals,
}

impl SdlcGuard {
    /// Build a guard with a fresh store. Fails if a configured extra
    /// pattern doesn't compile.
    pub fn new(config: GuardConfig) -> Result<Self, String> {
        Self::with_store(config, Arc::new(SessionStore::new()))
    }

    /// Build a guard over an existing store.
    pub fn with_store(config: GuardConfig, store: Arc<SessionStore>) -> Result<Self, String> {
        let classifier = config.build_classifier()?;
        let signals = config.build_signals()?;
        Ok(Self {
            store,
            config,
            classifier,
            signals,
        })
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// The four SDLC tools, bound to this guard's store.
    pub fn tool_set(&self) -> ToolSet {
        ToolSet::new().with_sdlc_tools(self.store.clone(), &self.config)
    }
}

impl SessionHook for SdlcGuard {
    fn session_created(&self, session: &SessionId) {
        self.store.create(session);
    }

    fn session_deleted(&self, session: &SessionId) {
        if self.store.remove(session).is_none() {
            debug!(%session, "deleted session had no record");
        }
    }

    fn pre_tool_use(&self, session: &SessionId, action: &ToolAction) -> HookAction {
        if action.file_path().is_none() {
            return HookAction::Proceed;
        }
        let check = self
            .store
            .with_session(session, |s| check_action(s, action, &self.classifier));
        match check {
            BoundaryCheck::Allowed => HookAction::Proceed,
            BoundaryCheck::Denied(reason) => {
                info!(
                    %session,
                    tool = action.tool(),
                    path = action.file_path().unwrap_or_default(),
                    "action blocked"
                );
                HookAction::Block(reason)
            }
        }
    }

    fn post_tool_use(&self, session: &SessionId, action: &ToolAction) {
        if matches!(action, ToolAction::Other { .. }) {
            return;
        }
        let activity = self.store.with_session(session, |s| {
            record_action(s, action, &self.classifier, &self.signals, Utc::now())
        });
        if !activity.is_empty() {
            debug!(
                %session,
                new_file = activity.new_file.as_deref().unwrap_or_default(),
                test_run = activity.test_run,
                commit = activity.commit,
                "activity tracked"
            );
        }
    }

    fn on_idle(&self, session: &SessionId) -> Option<String> {
        let threshold = self.config.review_file_threshold;
        self.store
            .with_session(session, |s| idle_message(s, threshold))
    }

    fn on_stop(&self, session: &SessionId) -> StopAction {
        match self.store.with_session(session, |s| stop_message(s)) {
            Some(msg) => StopAction::Continue(msg),
            None => StopAction::Allow,
        }
    }

    fn pre_compact(&self, session: &SessionId) -> Option<String> {
        let state = self.store.get(session);
        if state.is_none() {
            debug!(%session, "no record to preserve through compaction");
        }
        state.map(|s| preserve_state(&s))
    }

    fn system_prompt(&self) -> Option<String> {
        Some(system_prompt_block())
    }
}
