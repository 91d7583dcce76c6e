//! Load configuration from XDG `config.toml` and project `.env`, then apply to
//! the process environment with priority: **existing env > .env > XDG**.
//!
//! The engine and server read configuration exclusively through the
//! environment; this crate is the single place that fills it. Typed readers
//! ([`model_env`]) sit on top so call sites do not scatter `std::env::var`
//! string keys.

mod dotenv;
mod xdg_toml;

#[cfg(feature = "tracing-init")]
mod tracing_init;

#[cfg(feature = "tracing-init")]
pub use tracing_init::init_tracing;

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Loads config from `$XDG_CONFIG_HOME/<app_name>/config.toml` (its `[env]`
/// table) and an optional project `.env`, then sets environment variables only
/// for keys that are **not** already set, so existing env always wins.
///
/// When a key is missing from the process environment, the `.env` value is
/// preferred over the XDG value.
///
/// * `app_name`: e.g. `"edugenius"`; selects `~/.config/<app_name>/config.toml`.
/// * `override_dir`: if `Some`, look for `.env` there instead of the current
///   directory.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;

    for (key, value) in xdg_map {
        if std::env::var(&key).is_err() && !dotenv_map.contains_key(&key) {
            std::env::set_var(&key, value);
        }
    }
    for (key, value) in dotenv_map {
        if std::env::var(&key).is_err() {
            std::env::set_var(&key, value);
        }
    }
    Ok(())
}

/// Default model when `EDUGENIUS_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default per-call timeout when `EDUGENIUS_FLOW_TIMEOUT_SECS` is unset.
pub const DEFAULT_FLOW_TIMEOUT_SECS: u64 = 30;

/// Model-related configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEnv {
    /// `GEMINI_API_KEY`; absent means the server cannot reach the hosted model.
    pub api_key: Option<String>,
    /// `EDUGENIUS_MODEL`, defaulting to [`DEFAULT_MODEL`].
    pub model: String,
    /// `EDUGENIUS_FLOW_TIMEOUT_SECS`, defaulting to
    /// [`DEFAULT_FLOW_TIMEOUT_SECS`]; invalid values fall back to the default.
    pub flow_timeout: Duration,
}

/// Reads [`ModelEnv`] from the current process environment. Call
/// [`load_and_apply`] first so `.env`/XDG values are visible.
pub fn model_env() -> ModelEnv {
    let api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
    let model = std::env::var("EDUGENIUS_MODEL")
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let flow_timeout = std::env::var("EDUGENIUS_FLOW_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(DEFAULT_FLOW_TIMEOUT_SECS));
    ModelEnv {
        api_key,
        model,
        flow_timeout,
    }
}
