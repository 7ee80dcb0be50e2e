//! Core logic: credential storage, prompting, node client, shutdown flow.

pub mod credstore;
pub mod node_client;
pub mod orchestrator;
pub mod prompt;
