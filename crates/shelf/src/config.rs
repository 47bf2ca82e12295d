//! CLI configuration: a thin wrapper around `shelf_config` that applies
//! `GlobalOpts` overrides (--base-url, --timeout).

use std::time::Duration;

use url::Url;

use shelf_core::CatalogConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use shelf_config::{Config, Profile, config_path, load_config, save_config};

/// Resolve the catalog to talk to: profile (or the public catalog),
/// then flag/env overrides on top.
pub fn resolve_catalog_config(global: &GlobalOpts) -> Result<CatalogConfig, CliError> {
    let cfg = load_config()?;

    let mut catalog = match shelf_config::resolve_catalog_config(&cfg, global.profile.as_deref())
    {
        Ok(catalog) => catalog,
        Err(shelf_config::ConfigError::ProfileNotFound { name }) => {
            return Err(CliError::ProfileNotFound {
                name,
                available: available_profiles(&cfg),
            });
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(ref raw) = global.base_url {
        catalog.base_url = Url::parse(raw).map_err(|_| CliError::Validation {
            field: "base-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }
    if let Some(secs) = global.timeout {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be greater than zero".into(),
            });
        }
        catalog.timeout = Duration::from_secs(secs);
    }

    Ok(catalog)
}

/// Comma-separated profile names, sorted, or "(none)".
pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}
