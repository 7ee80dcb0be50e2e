//! Shutdown flow: resolve a key, confirm, send, and re-prompt on HTTP 403.

use crate::core::credstore::CredentialStore;
use crate::core::node_client::{NodeApi, RequestError};
use crate::core::prompt::Prompter;
use crate::models::credential::ApiKey;
use anyhow::Result;
use tracing::{debug, warn};

pub const ENTER_KEY_PROMPT: &str = "Please enter your Ergo node API key";
pub const ENTER_NEW_KEY_PROMPT: &str = "Please enter a new API key";
pub const SAVE_KEY_PROMPT: &str = "Would you like to save this API key for future use? ([y/Y]es/[n/N]o)";
pub const CONFIRM_PROMPT: &str = "Are you sure you want to shut down the Ergo node? ([y/Y]es/[n/N]o)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Node accepted the request; carries the rendered response payload.
    Completed { payload: String },
    /// User declined at the confirmation prompt.
    Cancelled,
    /// Missing key, unreachable node, or any non-403 failure.
    Failed,
}

impl ShutdownOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ShutdownOutcome::Completed { .. })
    }
}

enum Step {
    AcquireCredential,
    Confirm(ApiKey),
    Request(ApiKey),
    AuthRetry,
    Done(ShutdownOutcome),
}

/// One shutdown attempt, including any 403-driven retries.
pub struct ShutdownSession<'a> {
    store: &'a dyn CredentialStore,
    prompter: &'a dyn Prompter,
    node: &'a dyn NodeApi,
    api_key: Option<ApiKey>,
}

impl<'a> ShutdownSession<'a> {
    pub fn new(
        store: &'a dyn CredentialStore,
        prompter: &'a dyn Prompter,
        node: &'a dyn NodeApi,
    ) -> Self {
        Self {
            store,
            prompter,
            node,
            api_key: None,
        }
    }

    /// Use this key for the session; the store is not consulted.
    pub fn with_api_key(mut self, key: Option<ApiKey>) -> Self {
        self.api_key = key;
        self
    }

    /// Drive the attempt to a final outcome. `Err` means a prompt could not be read.
    pub fn run(mut self) -> Result<ShutdownOutcome> {
        let mut step = Step::AcquireCredential;
        loop {
            step = match step {
                Step::AcquireCredential => self.acquire_credential()?,
                Step::Confirm(key) => self.confirm(key)?,
                Step::Request(key) => self.request(key),
                Step::AuthRetry => self.auth_retry()?,
                Step::Done(outcome) => return Ok(outcome),
            };
        }
    }

    fn acquire_credential(&mut self) -> Result<Step> {
        if let Some(key) = self.api_key.take() {
            debug!("using API key from command line");
            return Ok(Step::Confirm(key));
        }
        if let Some(key) = self.store.retrieve() {
            debug!("using stored API key");
            return Ok(Step::Confirm(key));
        }

        println!("No API key found. Use --set-key to save an API key.");
        match ApiKey::new(self.prompter.ask_secret(ENTER_KEY_PROMPT)?) {
            Some(key) => {
                self.offer_save(&key, false)?;
                Ok(Step::Confirm(key))
            }
            None => {
                eprintln!("Error: API key must be provided");
                Ok(Step::Done(ShutdownOutcome::Failed))
            }
        }
    }

    fn confirm(&mut self, key: ApiKey) -> Result<Step> {
        if self.prompter.confirm(CONFIRM_PROMPT)? {
            Ok(Step::Request(key))
        } else {
            println!("Shutdown cancelled.");
            Ok(Step::Done(ShutdownOutcome::Cancelled))
        }
    }

    fn request(&mut self, key: ApiKey) -> Step {
        match self.node.shutdown(&key) {
            Ok(payload) => {
                println!("Success: {}", payload);
                println!("Node is shutting down...");
                Step::Done(ShutdownOutcome::Completed { payload })
            }
            Err(RequestError::Forbidden) => {
                eprintln!("Error: Authentication failed. Current API key is invalid.");
                Step::AuthRetry
            }
            Err(RequestError::NodeUnreachable(url)) => {
                warn!(%url, "node unreachable");
                eprintln!("Error: Could not connect to the Ergo node. Please check if it's running.");
                Step::Done(ShutdownOutcome::Failed)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                Step::Done(ShutdownOutcome::Failed)
            }
        }
    }

    /// The rejected key was consumed by the request; only a freshly typed
    /// one is tried next, the store is not re-read.
    fn auth_retry(&mut self) -> Result<Step> {
        match ApiKey::new(self.prompter.ask_secret(ENTER_NEW_KEY_PROMPT)?) {
            Some(key) => {
                self.offer_save(&key, true)?;
                Ok(Step::Confirm(key))
            }
            None => {
                println!("No API key provided. Exiting...");
                Ok(Step::Done(ShutdownOutcome::Failed))
            }
        }
    }

    fn offer_save(&self, key: &ApiKey, replacing: bool) -> Result<()> {
        if !self.prompter.confirm(SAVE_KEY_PROMPT)? {
            return Ok(());
        }
        match self.store.save(key) {
            Ok(()) => {
                println!("API key has been saved successfully.");
                if replacing {
                    println!("New API key has been saved.");
                }
            }
            Err(e) => eprintln!("Error saving API key: {:#}", e),
        }
        Ok(())
    }
}
