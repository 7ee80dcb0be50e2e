//! Ergo node shutdown CLI.
//!
//! Sends `POST /node/shutdown` to a locally running Ergo node, managing the
//! API key it needs: flag, `.env` file, or interactive prompt, with a
//! re-prompt when the node rejects the key.
//!
//! ## Modules
//! - `cli` — Command-line handlers
//! - `core` — Credential store, prompting, node client, shutdown flow
//! - `models` — Data structures
//! - `util` — Filesystem and logging helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod util;
