//! Agent-callable tools.
//!
//! [`core`] holds the [`Tool`](core::Tool) trait and [`ToolSet`](core::ToolSet),
//! [`spec`] the structured description builder, and [`sdlc`] the four
//! guard tools. [`SdlcToolsExt`] registers those on a `ToolSet`.

pub mod core;
pub mod names;
pub mod sdlc;
pub mod spec;

use std::sync::Arc;

pub use sdlc::{CodeReview, DomainReview, SetPhase, Status};

use crate::config::GuardConfig;
use crate::session::SessionStore;

/// Extension trait for registering the SDLC tools on a
/// [`ToolSet`](core::ToolSet).
///
/// ```ignore
/// let store = Arc::new(SessionStore::new());
/// let tools = ToolSet::new().with_sdlc_tools(store, &GuardConfig::default());
/// ```
pub trait SdlcToolsExt {
    fn with_sdlc_tools(self, store: Arc<SessionStore>, config: &GuardConfig) -> Self;
}

impl SdlcToolsExt for core::ToolSet {
    fn with_sdlc_tools(self, store: Arc<SessionStore>, config: &GuardConfig) -> Self {
        self.with(SetPhase::new(store.clone()))
            .with(DomainReview::new(store.clone()).strict(config.strict_review_gate))
            .with(CodeReview::new(store.clone(), config.default_review_base.clone()))
            .with(Status::new(store))
    }
}
