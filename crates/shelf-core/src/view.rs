// ── View derivation ──
//
// Maps catalog state + filter to exactly one of three display states.
// Renderers (CLI table, TUI grid) consume `ViewModel` and nothing else.

use serde::Serialize;
use shelf_api::Product;

use crate::filter::{FilterState, filter_products};
use crate::state::CatalogState;

/// Mutually exclusive display states.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewState {
    /// A fetch is outstanding; nothing else is shown.
    Loading,
    /// The last fetch failed.
    Error { message: String },
    /// Filtered grid plus whether "Load More" is offered.
    Ready {
        products: Vec<Product>,
        load_more: bool,
    },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Displayed products; empty unless ready.
    pub fn products(&self) -> &[Product] {
        match self {
            Self::Ready { products, .. } => products,
            _ => &[],
        }
    }

    pub fn load_more(&self) -> bool {
        matches!(self, Self::Ready { load_more: true, .. })
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub state: ViewState,
    pub requested_count: u32,
    /// Size of the loaded (unfiltered) set.
    pub loaded_count: usize,
    pub filter: FilterState,
}

/// "Load More" is shown while the filtered set is at least as large as
/// the requested count. The service reports no total, so this is a
/// heuristic: filtering can hide the action even when more data exists.
pub fn load_more_visible(requested_count: u32, filtered_len: usize) -> bool {
    usize::try_from(requested_count).is_ok_and(|requested| requested <= filtered_len)
}

/// Pure derivation of the view from the latest state and filter.
pub fn derive_view(state: &CatalogState, filter: &FilterState) -> ViewModel {
    let view = if state.loading {
        ViewState::Loading
    } else if let Some(message) = &state.error {
        ViewState::Error {
            message: message.clone(),
        }
    } else {
        let products = filter_products(&state.items, filter);
        let load_more = load_more_visible(state.requested_count, products.len());
        ViewState::Ready {
            products,
            load_more,
        }
    };

    ViewModel {
        state: view,
        requested_count: state.requested_count,
        loaded_count: state.items.len(),
        filter: filter.clone(),
    }
}
