// ── Catalog wire models ──

use serde::{Deserialize, Serialize};

/// A single product record as returned by the catalog service.
///
/// Immutable once fetched. Unknown fields are ignored so catalog
/// additions don't break parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}
