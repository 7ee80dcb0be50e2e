//! Centralized constants for defaults, names, and limits.

/// Default node API host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default node API port.
pub const DEFAULT_PORT: u16 = 9053;

/// Default URL scheme for the node API.
pub const DEFAULT_SCHEME: &str = "http";

/// Accepted URL schemes.
pub const VALID_SCHEMES: &[&str] = &["http", "https"];

/// Credential file name, resolved against the working directory.
pub const ENV_FILE_NAME: &str = ".env";

/// Variable name used for the API key line in the credential file.
pub const API_KEY_VAR: &str = "ERGO_API_KEY";

/// REST path of the shutdown endpoint.
pub const SHUTDOWN_PATH: &str = "/node/shutdown";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "api_key";

/// Permission mode for the credential file.
pub const ENV_FILE_MODE: u32 = 0o600;

/// Number of trailing characters left visible when masking a key.
pub const MASK_VISIBLE_SUFFIX: usize = 4;

/// Maximum API key size in bytes (64 KiB).
pub const MAX_KEY_SIZE: usize = 65_536;

/// Answers accepted as "yes" at a prompt (compared lowercased).
pub const AFFIRMATIVE_ANSWERS: &[&str] = &["y", "yes"];
