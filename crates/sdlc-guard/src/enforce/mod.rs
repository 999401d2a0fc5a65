//! Enforcement engines driven by host events.
//!
//! Each engine is a plain function over a [`SessionState`](crate::session::SessionState)
//! so it can be tested without any hook plumbing. [`SdlcGuard`](crate::guard::SdlcGuard)
//! wires them to the store.

pub mod compactor;
pub mod interceptor;
pub mod notifier;
pub mod prompt;
pub mod tracker;

pub use compactor::preserve_state;
pub use interceptor::{check_action, red_review_gate_message};
pub use notifier::{idle_message, idle_reminders, stop_message};
pub use prompt::system_prompt_block;
pub use tracker::{Activity, record_action};
