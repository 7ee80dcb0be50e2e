use crate::cli::CliContext;
use crate::core::node_client::HttpNodeClient;
use crate::core::orchestrator::ShutdownSession;
use crate::core::prompt::TerminalPrompter;
use crate::models::credential::ApiKey;
use anyhow::Result;
use tracing::info;

pub fn run(ctx: &CliContext) -> Result<bool> {
    let node = HttpNodeClient::new(ctx.target.clone())?;
    let prompter = TerminalPrompter::new();
    info!(node = %node.target(), "shutting down node");

    let outcome = ShutdownSession::new(&ctx.store, &prompter, &node)
        .with_api_key(ctx.api_key.as_deref().and_then(ApiKey::new))
        .run()?;
    Ok(outcome.is_success())
}
