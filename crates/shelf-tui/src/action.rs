//! UI actions. Every state change in the TUI goes through one of these.

use std::sync::Arc;

use shelf_core::{CategoryFilter, ViewModel};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Lifecycle ──
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    ToggleHelp,

    // ── Data (from the bridge) ──
    ViewUpdated(Arc<ViewModel>),
    CategoriesLoaded(Vec<String>),

    // ── User intents ──
    SearchChanged(String),
    CategorySelected(CategoryFilter),
    LoadMore,
    Reload,

    /// Transient status-line message.
    Notify(String),
}
