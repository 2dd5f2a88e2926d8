//! Host integrations.
//!
//! - [`http`] - The reqwest-backed [`crate::Transport`]

pub mod http;
