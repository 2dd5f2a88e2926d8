// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # x-cli Store
//!
//! Credential loading and on-disk configuration for x-cli.
//!
//! - **Credentials**: five variables from the environment or `.env` files
//! - **Config**: JSON settings with defaults for every field
//!
//! ## Usage
//!
//! ```ignore
//! use xcli_store::{Config, load_credentials};
//!
//! let credentials = load_credentials()?;
//! let config = Config::load()?;
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod paths;

pub use config::{ApiConfig, Config, OutputConfig, WatchConfig};
pub use credentials::{CredentialLoader, load_credentials, parse_env};
pub use error::StoreError;
pub use paths::{default_config_dir, default_config_path, default_env_path};
