// ── Runtime catalog configuration ──
//
// Describes *where* the catalog lives and how the loader pages through
// it. Never touches disk: the CLI/TUI builds a `CatalogConfig` and hands
// it to `Catalog::new`.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::CoreError;

/// Public catalog used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Items requested by the first fetch.
pub const DEFAULT_INITIAL_COUNT: u32 = 10;

/// Increment applied to the requested count by "load more".
pub const DEFAULT_PAGE_STEP: u32 = 5;

/// Configuration for a single catalog service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Catalog base URL (e.g., `https://fakestoreapi.com`).
    pub base_url: Url,
    /// Item count of the first fetch.
    pub initial_count: u32,
    /// Load-more step.
    pub page_step: u32,
    /// Request timeout.
    pub timeout: Duration,
    /// Extra CA certificate to trust.
    pub ca_cert: Option<PathBuf>,
}

impl CatalogConfig {
    /// Config for `base_url` with default paging and timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            initial_count: DEFAULT_INITIAL_COUNT,
            page_step: DEFAULT_PAGE_STEP,
            timeout: Duration::from_secs(30),
            ca_cert: None,
        }
    }

    /// Reject counts the loader can't work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.initial_count == 0 {
            return Err(CoreError::Config {
                message: "initial_count must be at least 1".into(),
            });
        }
        if self.page_step == 0 {
            return Err(CoreError::Config {
                message: "page_step must be at least 1".into(),
            });
        }
        if self.timeout.is_zero() {
            return Err(CoreError::Config {
                message: "timeout must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        // The constant is a valid absolute URL.
        #[allow(clippy::expect_used)]
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("default catalog URL parses");
        Self::new(base_url)
    }
}
