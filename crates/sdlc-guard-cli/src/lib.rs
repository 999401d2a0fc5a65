//! JSON-lines adapter between a host runtime and [`sdlc_guard`].
//!
//! The host writes one JSON payload per line; the adapter answers each line
//! with exactly one JSON response line. See [`protocol`] for the shapes and
//! [`serve`] for the loop.

pub mod protocol;
pub mod serve;

pub use protocol::{Adapter, Response};
pub use serve::serve;
