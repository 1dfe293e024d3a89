//! Shared helpers used by every binary and crate in the workspace.

pub mod utils;
