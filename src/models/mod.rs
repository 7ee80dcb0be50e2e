//! Data structures shared across the CLI and core modules.

pub mod credential;
pub mod target;
