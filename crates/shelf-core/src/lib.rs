//! Catalog state machine between `shelf-api` and renderers (CLI / TUI).
//!
//! - **[`Catalog`]** — Coordinator owning all catalog state. Every
//!   mutation goes through a named transition (fetch-start,
//!   fetch-success, fetch-failure, filter-change, load-more) and is
//!   followed by an explicit re-derivation of the [`ViewModel`], which
//!   subscribers receive through a `tokio::sync::watch` channel.
//!
//! - **[`CatalogState`]** — Loaded products plus loading/error flags and
//!   the requested item count. Overlapping fetches are resolved with
//!   monotonically increasing [`RequestToken`]s: only the most recently
//!   issued request may write its result.
//!
//! - **[`filter_products`]** — Pure, order-preserving title/category
//!   filter over the loaded set.
//!
//! - **[`derive_view`]** — Maps state + filter to one of three mutually
//!   exclusive display states: loading, error, or a ready grid with a
//!   "load more" flag.

pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod state;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_INITIAL_COUNT, DEFAULT_PAGE_STEP};
pub use controller::Catalog;
pub use error::CoreError;
pub use filter::{CategoryFilter, FilterState, filter_products};
pub use state::{CatalogState, RequestToken};
pub use view::{ViewModel, ViewState, derive_view, load_more_visible};

pub use shelf_api::{Product, Rating};
