// ── Catalog loader state ──
//
// Plain data plus the transitions that are allowed to change it. The
// coordinator serializes calls; this module only decides what each
// transition does and whether a completed request may still write.

use std::sync::Arc;

use shelf_api::Product;

/// Identifies one issued fetch. Tokens grow monotonically, so comparing
/// against the most recently issued token detects stale completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Loaded set plus loading/error flags.
///
/// Invariants:
/// - `loading` is true only while the latest issued fetch is outstanding.
/// - `error` is set only by a failed fetch and never alongside a fresh
///   replacement of `items` from the same cycle.
/// - `items` is replaced wholesale on success and untouched on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    pub items: Arc<Vec<Product>>,
    pub loading: bool,
    pub error: Option<String>,
    pub requested_count: u32,
    latest: Option<RequestToken>,
}

impl CatalogState {
    /// Empty state; no fetch issued yet.
    pub fn new(requested_count: u32) -> Self {
        Self {
            items: Arc::new(Vec::new()),
            loading: false,
            error: None,
            requested_count: requested_count.max(1),
            latest: None,
        }
    }

    /// Most recently issued request, if any.
    pub fn latest_request(&self) -> Option<RequestToken> {
        self.latest
    }

    /// Re-fetching is keyed on a change of `requested_count`: the same
    /// count only fetches if nothing has been issued yet.
    pub fn needs_fetch(&self, count: u32) -> bool {
        self.latest.is_none() || self.requested_count != count
    }

    /// Whether `token` is still the request allowed to write results.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest == Some(token)
    }

    /// fetch-start: record the count, raise `loading`, clear `error`.
    pub fn begin_fetch(&mut self, count: u32) -> RequestToken {
        let next = RequestToken(self.latest.map_or(1, |t| t.0 + 1));
        self.latest = Some(next);
        self.requested_count = count.max(1);
        self.loading = true;
        self.error = None;
        next
    }

    /// fetch-success: replace `items` wholesale. Returns `false` (and
    /// changes nothing) when `token` has been superseded.
    pub fn finish_success(&mut self, token: RequestToken, items: Vec<Product>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.items = Arc::new(items);
        self.loading = false;
        self.error = None;
        true
    }

    /// fetch-failure: keep `items`, record `message`. Returns `false`
    /// (and changes nothing) when `token` has been superseded.
    pub fn finish_failure(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.loading = false;
        self.error = Some(message.into());
        true
    }
}
