use std::time::Duration;

use thiserror::Error;

/// Top-level error type for the `shelf-api` crate.
///
/// Covers every failure mode of a catalog request: building the HTTP
/// client, the transport itself, non-success responses, and bodies that
/// don't parse. `shelf-core` collapses these into a single user-facing
/// fetch failure.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("Network request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request exceeded the configured transport timeout.
    #[error("Request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// The HTTP client could not be constructed (bad CA file, TLS backend).
    #[error("HTTP client error: {0}")]
    Client(String),

    // ── Response ────────────────────────────────────────────────────
    /// The catalog answered with a non-success status.
    #[error("Network response was not ok (HTTP {status})")]
    Status { status: u16, body: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Malformed catalog response: {message}")]
    Deserialization { message: String, body: String },
}
