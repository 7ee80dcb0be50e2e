//! Persisted API key: a single `ERGO_API_KEY=<value>` line in a `.env` file.

use crate::constants;
use crate::models::credential::ApiKey;
use crate::util::fs as env_fs;
use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage for the one API key this tool remembers.
pub trait CredentialStore {
    /// Overwrite the stored key.
    fn save(&self, key: &ApiKey) -> Result<()>;

    /// Stored key, or `None` when missing, unreadable, or malformed.
    fn retrieve(&self) -> Option<ApiKey>;

    /// Blank the stored key. The backing storage stays in place.
    fn erase(&self) -> Result<()>;

    fn display_masked(&self) -> String {
        match self.retrieve() {
            Some(key) => format!("Current API key: {}", key.masked()),
            None => "No API key found.".to_string(),
        }
    }
}

/// `.env`-file backed store.
#[derive(Debug, Clone)]
pub struct EnvFileStore {
    path: PathBuf,
}

impl EnvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the CLI-provided path, or `.env` in the working directory.
    pub fn resolve(path_arg: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path_arg {
            return Ok(Self::new(path));
        }
        let cwd = env::current_dir().context("resolve current directory")?;
        Ok(Self::new(cwd.join(constants::ENV_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for EnvFileStore {
    fn save(&self, key: &ApiKey) -> Result<()> {
        let value = key.expose();
        if value.contains(['\n', '\r']) {
            bail!("API key must be a single line");
        }
        if value.len() > constants::MAX_KEY_SIZE {
            bail!(
                "API key exceeds maximum size ({} bytes, max {} bytes)",
                value.len(),
                constants::MAX_KEY_SIZE
            );
        }
        let line = zeroize::Zeroizing::new(format!("{}={}\n", constants::API_KEY_VAR, value));
        env_fs::write_atomic(&self.path, line.as_bytes(), constants::ENV_FILE_MODE)
            .with_context(|| format!("write {}", self.path.display()))?;
        debug!(path = %self.path.display(), "api key saved");
        Ok(())
    }

    fn retrieve(&self) -> Option<ApiKey> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => zeroize::Zeroizing::new(c),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no readable key file");
                return None;
            }
        };
        parse_key_line(&content)
    }

    fn erase(&self) -> Result<()> {
        env_fs::write_atomic(&self.path, b"", constants::ENV_FILE_MODE)
            .with_context(|| format!("write {}", self.path.display()))?;
        debug!(path = %self.path.display(), "api key erased");
        Ok(())
    }
}

/// First `ERGO_API_KEY=` line with a non-empty value. Other lines are ignored.
fn parse_key_line(content: &str) -> Option<ApiKey> {
    let prefix = format!("{}=", constants::API_KEY_VAR);
    content
        .lines()
        .filter_map(|line| line.trim_end_matches('\r').strip_prefix(prefix.as_str()))
        .find_map(ApiKey::new)
}
