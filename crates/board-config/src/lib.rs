//! # board-config
//!
//! Figment-backed configuration for Boardroom.
//!
//! Later layers win:
//! 1. defaults compiled into each section
//! 2. `<config_dir>/boardroom/config.toml`
//! 3. `.boardroom/config.toml` in the working directory
//! 4. `BOARDROOM_*` environment variables
//!
//! Nested keys use `__`: `BOARDROOM_UPSTREAM__MODEL` sets `upstream.model`,
//! `BOARDROOM_SERVER__BIND` sets `server.bind`.
//!
//! The upstream credential is not required here: the gateway resolves it per
//! request (see [`UpstreamConfig::resolve_api_key`]).
//!
//! ```no_run
//! use board_config::BoardConfig;
//!
//! let config = BoardConfig::load_with_dotenv().expect("config");
//! println!("proxy: {}{}", config.server.bind, config.server.path);
//! ```

mod client;
mod error;
mod general;
mod server;
mod upstream;

pub use client::ClientConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "BOARDROOM_";

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG: &str = ".boardroom/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl BoardConfig {
    /// Extract and validate the merged configuration. Does not read `.env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or a value
    /// has the wrong type, and [`ConfigError::InvalidValue`] if the server
    /// section fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.server.validate()?;
        Ok(config)
    }

    /// Export the nearest `.env` into the process, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::current_dir()
            .ok()
            .and_then(|cwd| find_dotenv(&cwd))
        {
            // An unreadable .env leaves the environment as it was.
            let _ = dotenvy::from_path(&path);
        }
        Self::load()
    }

    /// The provider chain behind [`Self::load`], exposed so tests can add
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let files = [user_config_path(), Some(PathBuf::from(PROJECT_CONFIG))];
        files
            .into_iter()
            .flatten()
            .filter(|path| path.is_file())
            .fold(
                Figment::from(Serialized::defaults(Self::default())),
                |figment, path| figment.merge(Toml::file(path)),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("boardroom").join("config.toml"))
}

/// First `.env` file in `start` or one of its ancestors.
fn find_dotenv(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".env"))
        .find(|candidate| candidate.is_file())
}
