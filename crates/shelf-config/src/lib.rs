//! Shared configuration for the shelf CLI and TUI.
//!
//! TOML profiles naming catalog services, layered with `SHELF_`
//! environment variables, and translation to `shelf_core::CatalogConfig`.
//! Both binaries depend on this crate; the CLI applies its global flags
//! on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use shelf_core::{CatalogConfig, DEFAULT_BASE_URL};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    ProfileNotFound { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named catalog profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Catalog base URL (e.g., "https://fakestoreapi.com").
    pub base_url: String,

    /// Items fetched on first load.
    pub initial_count: Option<u32>,

    /// Load-more increment.
    pub page_step: Option<u32>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Path to an extra CA certificate.
    pub ca_cert: Option<PathBuf>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            initial_count: None,
            page_step: None,
            timeout: None,
            ca_cert: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("rs", "shelf", "shelf").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("shelf");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from `path` + environment. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SHELF_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

/// Pick the profile to use.
///
/// An explicitly named profile must exist. Otherwise the config's
/// `default_profile` is used when present; `None` means "no profile",
/// i.e. the public catalog.
pub fn active_profile<'a>(
    cfg: &'a Config,
    name: Option<&str>,
) -> Result<Option<(&'a str, &'a Profile)>, ConfigError> {
    if let Some(name) = name {
        return cfg
            .profiles
            .get_key_value(name)
            .map(|(k, p)| Some((k.as_str(), p)))
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.into() });
    }

    Ok(cfg
        .default_profile
        .as_deref()
        .and_then(|name| cfg.profiles.get_key_value(name))
        .map(|(k, p)| (k.as_str(), p)))
}

/// Build a `CatalogConfig` from a profile, falling back to `defaults`
/// for anything the profile leaves unset.
pub fn profile_to_catalog_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<CatalogConfig, ConfigError> {
    let base_url: Url = profile
        .base_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {}", profile.base_url),
        })?;

    let mut config = CatalogConfig::new(base_url);
    if let Some(count) = profile.initial_count {
        config.initial_count = count;
    }
    if let Some(step) = profile.page_step {
        config.page_step = step;
    }
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.ca_cert.clone_from(&profile.ca_cert);

    config.validate().map_err(|e| ConfigError::Validation {
        field: "profile".into(),
        reason: e.to_string(),
    })?;
    Ok(config)
}

/// Resolve the catalog config for `name` (or the default profile, or
/// the public catalog when no profile applies).
pub fn resolve_catalog_config(
    cfg: &Config,
    name: Option<&str>,
) -> Result<CatalogConfig, ConfigError> {
    match active_profile(cfg, name)? {
        Some((name, profile)) => {
            debug!(profile = name, "using catalog profile");
            profile_to_catalog_config(profile, &cfg.defaults)
        }
        None => profile_to_catalog_config(&Profile::default(), &cfg.defaults),
    }
}
