//! HTTP call to the node's shutdown endpoint.

use crate::constants;
use crate::models::credential::ApiKey;
use crate::models::target::ConnectionTarget;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::error::Error as _;
use std::io;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum RequestError {
    /// HTTP 403: the node rejected the API key.
    #[error("authentication failed (HTTP 403)")]
    Forbidden,

    #[error("could not connect to {0}")]
    NodeUnreachable(String),

    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("{0}")]
    Transport(String),
}

/// Something that can ask a node to shut down.
pub trait NodeApi {
    /// Send the shutdown request. `Ok` carries the response payload for display.
    fn shutdown(&self, key: &ApiKey) -> Result<String, RequestError>;
}

pub struct HttpNodeClient {
    client: Client,
    target: ConnectionTarget,
}

impl HttpNodeClient {
    pub fn new(target: ConnectionTarget) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build HTTP client")?;
        Ok(Self { client, target })
    }

    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }
}

impl NodeApi for HttpNodeClient {
    fn shutdown(&self, key: &ApiKey) -> Result<String, RequestError> {
        let url = self.target.shutdown_url();
        debug!(%url, "sending shutdown request");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(constants::API_KEY_HEADER, key.expose())
            .body("")
            .send()
            .map_err(|e| classify_send_error(&self.target, e))?;

        let status = response.status();
        info!(%status, "node responded");
        if status == StatusCode::FORBIDDEN {
            return Err(RequestError::Forbidden);
        }

        let body = response
            .text()
            .map_err(|e| RequestError::Transport(format!("read response body: {}", error_chain(e))))?;
        if !status.is_success() {
            return Err(RequestError::Status { status, body });
        }
        Ok(render_payload(&body))
    }
}

/// Only a refused connection means "node not running"; DNS, TLS and other
/// failures keep their full cause chain.
fn classify_send_error(target: &ConnectionTarget, err: reqwest::Error) -> RequestError {
    if is_connection_refused(&err) {
        return RequestError::NodeUnreachable(target.base_url());
    }
    RequestError::Transport(error_chain(err))
}

fn error_chain(err: reqwest::Error) -> String {
    format!("{:#}", anyhow::Error::new(err))
}

fn is_connection_refused(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

/// Pretty-print JSON bodies; anything else is echoed as-is.
pub fn render_payload(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.trim().to_string(),
    }
}
