// ── Catalog coordinator ──
//
// Owns the loader state, the filter, and the derived view. Every
// mutation runs inside one `send_if_modified` on the model channel and
// publishes a freshly derived `ViewModel` before releasing it, so view
// updates are totally ordered with the transitions that caused them.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use shelf_api::transport::{TlsMode, TransportConfig};
use shelf_api::{CatalogClient, Product};

use crate::config::CatalogConfig;
use crate::error::CoreError;
use crate::filter::{CategoryFilter, FilterState};
use crate::state::{CatalogState, RequestToken};
use crate::view::{ViewModel, derive_view};

/// Loader state and filter, mutated together.
#[derive(Debug, Clone)]
struct Model {
    state: CatalogState,
    filter: FilterState,
}

/// The main entry point for renderers.
///
/// Cheaply cloneable via `Arc<CatalogInner>`. Fetches run as background
/// tasks; their results are applied only while their request token is
/// still the latest and the catalog has not been shut down.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    config: CatalogConfig,
    client: CatalogClient,
    model: watch::Sender<Model>,
    view: watch::Sender<Arc<ViewModel>>,
    cancel: CancellationToken,
    tracker: TaskTracker,
}

impl Catalog {
    /// Validate `config` and build the HTTP client. Does NOT fetch --
    /// call [`start()`](Self::start) for the first page.
    pub fn new(config: CatalogConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let transport = build_transport(&config);
        let client = CatalogClient::new(config.base_url.as_str(), &transport)?;

        let model = Model {
            state: CatalogState::new(config.initial_count),
            filter: FilterState::default(),
        };
        let view = Arc::new(derive_view(&model.state, &model.filter));
        let (model, _) = watch::channel(model);
        let (view, _) = watch::channel(view);

        Ok(Self {
            inner: Arc::new(CatalogInner {
                config,
                client,
                model,
                view,
                cancel: CancellationToken::new(),
                tracker: TaskTracker::new(),
            }),
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    // ── Loading ──────────────────────────────────────────────────

    /// Issue the first fetch for the configured initial count.
    pub fn start(&self) -> Result<bool, CoreError> {
        self.request_count(self.inner.config.initial_count)
    }

    /// Ask for `count` items. Spawns exactly one fetch when the count
    /// differs from the current one (or nothing has been fetched yet);
    /// returns whether a fetch was issued.
    pub fn request_count(&self, count: u32) -> Result<bool, CoreError> {
        if count == 0 {
            return Err(CoreError::InvalidCount { count });
        }
        if self.inner.cancel.is_cancelled() {
            debug!(count, "catalog shut down, ignoring request");
            return Ok(false);
        }

        let Some(token) = self.transition(|model| {
            if !model.state.needs_fetch(count) {
                return None;
            }
            Some(model.state.begin_fetch(count))
        }) else {
            debug!(count, "requested count unchanged, not refetching");
            return Ok(false);
        };

        self.spawn_fetch(token, count);
        Ok(true)
    }

    /// Grow the requested count by the page step.
    pub fn load_more(&self) -> bool {
        let current = self.inner.model.borrow().state.requested_count;
        let next = current.saturating_add(self.inner.config.page_step);
        if next == current {
            return false;
        }
        info!(from = current, to = next, "loading more products");
        self.request_count(next).unwrap_or(false)
    }

    /// Retry the current count. Only ever called on explicit user action.
    pub fn reload(&self) -> bool {
        if self.inner.cancel.is_cancelled() {
            return false;
        }
        let Some((token, count)) = self.transition(|model| {
            let count = model.state.requested_count;
            Some((model.state.begin_fetch(count), count))
        }) else {
            return false;
        };
        info!(count, "reloading catalog");
        self.spawn_fetch(token, count);
        true
    }

    /// Fetch `count` items and wait for the outcome.
    ///
    /// For one-shot consumers: always issues a request, then applies the
    /// result under the same rules as background fetches. A failed
    /// request is returned as [`CoreError::FetchFailed`].
    pub async fn load(&self, count: u32) -> Result<(), CoreError> {
        if count == 0 {
            return Err(CoreError::InvalidCount { count });
        }
        let cancel = &self.inner.cancel;
        let Some(token) = self.transition(|model| {
            (!cancel.is_cancelled()).then(|| model.state.begin_fetch(count))
        }) else {
            debug!(count, "catalog shut down, ignoring load");
            return Ok(());
        };

        let result = fetch(&self.inner.client, count).await;
        let message = result.as_ref().err().map(CoreError::message);
        self.complete(token, result);

        match message {
            Some(message) => Err(CoreError::FetchFailed { message }),
            None => Ok(()),
        }
    }

    fn spawn_fetch(&self, token: RequestToken, count: u32) {
        let catalog = self.clone();
        let cancel = self.inner.cancel.clone();
        self.inner.tracker.spawn(async move {
            debug!(token = token.get(), count, "fetch started");
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(token = token.get(), "fetch cancelled");
                }
                result = fetch(&catalog.inner.client, count) => {
                    catalog.complete(token, result);
                }
            }
        });
    }

    /// Apply fetch-success / fetch-failure for `token`.
    fn complete(&self, token: RequestToken, result: Result<Vec<Product>, CoreError>) {
        let cancel = &self.inner.cancel;
        let applied = self.transition(|model| {
            if cancel.is_cancelled() {
                return None;
            }
            let applied = match &result {
                Ok(items) => model.state.finish_success(token, items.clone()),
                Err(e) => model.state.finish_failure(token, e.message()),
            };
            applied.then_some(())
        });

        match (applied, &result) {
            (None, _) => debug!(token = token.get(), "discarding stale fetch result"),
            (Some(()), Ok(items)) => info!(count = items.len(), "catalog loaded"),
            (Some(()), Err(e)) => warn!(error = %e, "catalog fetch failed"),
        }
    }

    // ── Filter ───────────────────────────────────────────────────

    /// filter-change: replace the search term.
    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.transition(|model| {
            if model.filter.search_term == term {
                return None;
            }
            model.filter.search_term = term;
            Some(())
        });
    }

    /// filter-change: replace the category selection.
    pub fn set_category(&self, category: impl Into<CategoryFilter>) {
        let category = category.into();
        self.transition(|model| {
            if model.filter.category == category {
                return None;
            }
            model.filter.category = category;
            Some(())
        });
    }

    // ── Observation ──────────────────────────────────────────────

    pub fn state(&self) -> CatalogState {
        self.inner.model.borrow().state.clone()
    }

    pub fn filter(&self) -> FilterState {
        self.inner.model.borrow().filter.clone()
    }

    /// The current derived view.
    pub fn view(&self) -> Arc<ViewModel> {
        self.inner.view.borrow().clone()
    }

    /// Subscribe to view changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewModel>> {
        self.inner.view.subscribe()
    }

    /// Category names offered by the service, in service order.
    pub async fn categories(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.inner.client.list_categories().await?)
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Cancel outstanding fetches and wait for their tasks to finish.
    /// No state changes are applied afterwards.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        self.inner.tracker.close();
        self.inner.tracker.wait().await;
        debug!("catalog shut down");
    }

    // ── Internals ────────────────────────────────────────────────

    /// Run `f` against the model; when it reports a change, re-derive
    /// and publish the view while the model is still locked.
    fn transition<R>(&self, f: impl FnOnce(&mut Model) -> Option<R>) -> Option<R> {
        let view = &self.inner.view;
        let mut out = None;
        self.inner.model.send_if_modified(|model| {
            out = f(model);
            if out.is_some() {
                view.send_replace(Arc::new(derive_view(&model.state, &model.filter)));
            }
            out.is_some()
        });
        out
    }
}

async fn fetch(client: &CatalogClient, count: u32) -> Result<Vec<Product>, CoreError> {
    Ok(client.list_products(count).await?)
}

fn build_transport(config: &CatalogConfig) -> TransportConfig {
    let tls = match &config.ca_cert {
        Some(path) => TlsMode::CustomCa(path.clone()),
        None => TlsMode::System,
    };
    TransportConfig {
        tls,
        ..TransportConfig::default()
    }
    .with_timeout(config.timeout)
}
