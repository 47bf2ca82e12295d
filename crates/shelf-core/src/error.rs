// ── Core error types ──
//
// User-facing errors from shelf-core. Every failed request collapses into
// a single `FetchFailed` kind carrying a human-readable message; callers
// never see status codes or parse errors as structured data. A client
// that cannot be built at all (bad URL, unreadable CA) is a `Config`
// error and never reaches the view.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A catalog fetch failed (transport, non-success status, or bad body).
    #[error("{message}")]
    FetchFailed { message: String },

    /// Requested item counts must be positive.
    #[error("Requested item count must be at least 1, got {count}")]
    InvalidCount { count: u32 },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// The message shown to the user for this error.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<shelf_api::Error> for CoreError {
    fn from(err: shelf_api::Error) -> Self {
        match err {
            shelf_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid catalog URL: {e}"),
            },
            shelf_api::Error::Client(message) => CoreError::Config { message },
            other => CoreError::FetchFailed {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::CoreError;

    #[test]
    fn status_errors_collapse_into_fetch_failure() {
        let err = CoreError::from(shelf_api::Error::Status {
            status: 404,
            body: "not here".into(),
        });
        assert_eq!(
            err,
            CoreError::FetchFailed {
                message: "Network response was not ok (HTTP 404)".into()
            }
        );
    }

    #[test]
    fn fetch_failure_displays_bare_message() {
        let err = CoreError::FetchFailed {
            message: "Request timed out after 30s".into(),
        };
        assert_eq!(err.message(), "Request timed out after 30s");
    }

    #[test]
    fn client_construction_maps_to_config() {
        let err = CoreError::from(shelf_api::Error::Client("bad CA".into()));
        assert!(matches!(err, CoreError::Config { .. }));

        let parse = url::Url::parse("not a url").unwrap_err();
        let err = CoreError::from(shelf_api::Error::InvalidUrl(parse));
        assert!(matches!(
            err,
            CoreError::Config { ref message } if message.starts_with("invalid catalog URL")
        ));
    }

    #[test]
    fn timeouts_collapse_into_fetch_failure() {
        let err = CoreError::from(shelf_api::Error::Timeout {
            timeout: std::time::Duration::from_secs(30),
        });
        assert_eq!(
            err,
            CoreError::FetchFailed {
                message: "Request timed out after 30s".into()
            }
        );
    }
}
