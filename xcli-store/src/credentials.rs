//! Credential loading.
//!
//! Each of the five variables is looked up in the process environment
//! first, then in `~/.config/x-cli/.env`, then in `./.env`. The first
//! non-empty value wins. Files are read, never exported into the process
//! environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use xcli_core::Credentials;

use crate::error::StoreError;
use crate::paths::default_env_path;

/// Consumer (API) key.
pub const API_KEY_VAR: &str = "X_API_KEY";
/// Consumer (API) secret.
pub const API_SECRET_VAR: &str = "X_API_SECRET";
/// User access token.
pub const ACCESS_TOKEN_VAR: &str = "X_ACCESS_TOKEN";
/// User access token secret.
pub const ACCESS_TOKEN_SECRET_VAR: &str = "X_ACCESS_TOKEN_SECRET";
/// App bearer token.
pub const BEARER_TOKEN_VAR: &str = "X_BEARER_TOKEN";

// ============================================================================
// Loader
// ============================================================================

/// Resolves credentials from the environment and `.env` files.
#[derive(Debug, Clone)]
pub struct CredentialLoader {
    env_files: Vec<PathBuf>,
}

impl CredentialLoader {
    /// Creates a loader using `~/.config/x-cli/.env` then `./.env`.
    pub fn new() -> Self {
        Self {
            env_files: vec![default_env_path(), PathBuf::from(".env")],
        }
    }

    /// Creates a loader reading the given `.env` files, highest priority first.
    pub fn with_env_files(env_files: Vec<PathBuf>) -> Self {
        Self { env_files }
    }

    /// Loads credentials from the process environment and `.env` files.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingCredential`] naming the first variable
    /// that is unset everywhere.
    pub fn load(&self) -> Result<Credentials, StoreError> {
        self.load_with(|name| std::env::var(name).ok())
    }

    /// Loads credentials using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingCredential`] naming the first variable
    /// that is unset everywhere.
    pub fn load_with<F>(&self, lookup: F) -> Result<Credentials, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let files: Vec<HashMap<String, String>> =
            self.env_files.iter().filter_map(|p| read_env_file(p)).collect();

        let require = |name: &str| -> Result<String, StoreError> {
            lookup(name)
                .filter(|v| !v.is_empty())
                .or_else(|| {
                    files
                        .iter()
                        .find_map(|vars| vars.get(name).filter(|v| !v.is_empty()).cloned())
                })
                .ok_or_else(|| StoreError::MissingCredential(name.to_string()))
        };

        Ok(Credentials::new(
            require(API_KEY_VAR)?,
            require(API_SECRET_VAR)?,
            require(ACCESS_TOKEN_VAR)?,
            require(ACCESS_TOKEN_SECRET_VAR)?,
            require(BEARER_TOKEN_VAR)?,
        ))
    }
}

impl Default for CredentialLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads credentials from the default locations.
///
/// # Errors
///
/// Returns [`StoreError::MissingCredential`] if any variable is unset.
pub fn load_credentials() -> Result<Credentials, StoreError> {
    CredentialLoader::new().load()
}

fn read_env_file(path: &Path) -> Option<HashMap<String, String>> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => {
            debug!(path = %path.display(), "Read env file");
            Some(collect_vars(iter, &path.display().to_string()))
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read env file");
            None
        }
    }
}

// ============================================================================
// .env Parsing
// ============================================================================

/// Parses `.env` content without touching the process environment.
///
/// Supports comments, `export` prefixes, single and double quotes (with
/// escapes inside double quotes), and `${VAR}` substitution. A repeated key
/// keeps its first value. Parsing stops at the first malformed line.
pub fn parse_env(content: &str) -> HashMap<String, String> {
    collect_vars(dotenvy::from_read_iter(content.as_bytes()), "<inline>")
}

fn collect_vars<I>(iter: I, origin: &str) -> HashMap<String, String>
where
    I: Iterator<Item = dotenvy::Result<(String, String)>>,
{
    let mut vars = HashMap::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                vars.entry(key).or_insert(value);
            }
            Err(e) => {
                warn!(origin, error = %e, "Malformed env line; ignoring the rest");
                break;
            }
        }
    }
    vars
}
