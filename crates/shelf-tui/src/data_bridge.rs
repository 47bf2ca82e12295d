//! Data bridge — forwards [`Catalog`] view changes to the TUI as actions.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use shelf_core::Catalog;

use crate::action::Action;

/// Push the current view and the category options, then forward every
/// view change until cancelled or the action channel closes.
pub async fn spawn_data_bridge(
    catalog: Catalog,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut views = catalog.subscribe();
    let initial = views.borrow_and_update().clone();
    if action_tx.send(Action::ViewUpdated(initial)).is_err() {
        return;
    }

    let categories = tokio::select! {
        biased;
        () = cancel.cancelled() => return,
        result = catalog.categories() => result,
    };
    let sent = match categories {
        Ok(categories) => action_tx.send(Action::CategoriesLoaded(categories)),
        Err(e) => {
            warn!(error = %e, "failed to load categories");
            action_tx.send(Action::Notify(format!("Categories unavailable: {e}")))
        }
    };
    if sent.is_err() {
        return;
    }

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                if action_tx.send(Action::ViewUpdated(view)).is_err() {
                    break;
                }
            }
        }
    }

    debug!("data bridge stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shelf_core::CatalogConfig;

    #[tokio::test]
    async fn forwards_initial_and_changed_views() {
        // Nothing listens on the discard port, so categories fail fast.
        let config = CatalogConfig::new(url::Url::parse("http://127.0.0.1:9").unwrap());
        let catalog = Catalog::new(config).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let bridge = tokio::spawn(spawn_data_bridge(catalog.clone(), tx, cancel.clone()));

        assert!(matches!(rx.recv().await, Some(Action::ViewUpdated(_))));
        assert!(matches!(rx.recv().await, Some(Action::Notify(_))));

        catalog.set_search_term("lamp");
        match rx.recv().await {
            Some(Action::ViewUpdated(view)) => assert_eq!(view.filter.search_term, "lamp"),
            other => panic!("expected ViewUpdated, got {other:?}"),
        }

        cancel.cancel();
        bridge.await.unwrap();
        catalog.shutdown().await;
    }
}
