//! In-memory catalog collection and its load lifecycle.

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{category_options, CatalogItem, CatalogKind, CategoryOption, ItemId};
use crate::error::{FetchError, UnconfiguredServiceError};
use crate::query;
use crate::store::ItemStore;

/// Load lifecycle of a catalog model.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// No load has been issued yet.
    Idle,
    /// A load is in flight. Previously loaded items are still readable.
    Loading,
    /// The last load succeeded.
    Ready,
    /// The last load failed. Previously loaded items are retained.
    Failed(FetchError),
    /// The store has no endpoint or credentials.
    Unconfigured,
}

/// What a view renders. The variants are deliberately distinct: a view that
/// is still loading, one whose store is empty, one whose load failed and one
/// whose store is not configured must look different.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    /// Nothing requested yet.
    Idle,
    /// Waiting for the store.
    Loading,
    /// Loaded successfully, no items.
    Empty,
    /// Loaded successfully.
    Populated {
        /// Number of loaded items.
        count: usize,
    },
    /// Last load failed.
    Failed {
        /// Error shown to the user.
        message: String,
        /// Items kept from an earlier successful load.
        retained: usize,
    },
    /// Store not configured. Rendered as a labelled, disabled catalog.
    Unconfigured,
}

/// Identifies one issued load. Only the newest ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    /// Generation number of this ticket.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result was applied to the model.
    Applied,
    /// A newer load was issued after this one; the result was dropped.
    Superseded,
    /// The owning view was closed; the result was dropped.
    Closed,
}

/// Catalog contents for one view.
///
/// Each page owns exactly one model. Loads replace the whole collection;
/// failures keep what was there. Results of loads that were superseded by a
/// newer load, or that arrive after [`close`](Self::close), are discarded.
#[derive(Debug)]
pub struct CatalogModel {
    kind: CatalogKind,
    items: Vec<Arc<CatalogItem>>,
    state: LoadState,
    issued: u64,
    closed: bool,
}

impl CatalogModel {
    /// Create an empty model for a catalog kind.
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            state: LoadState::Idle,
            issued: 0,
            closed: false,
        }
    }

    /// Catalog kind.
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Loaded items in store order.
    pub fn items(&self) -> &[Arc<CatalogItem>] {
        &self.items
    }

    /// Current load state.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Whether the owning view has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Render state derived from load state and contents.
    pub fn view_state(&self) -> ViewState {
        match &self.state {
            LoadState::Idle => ViewState::Idle,
            LoadState::Loading => ViewState::Loading,
            LoadState::Ready if self.items.is_empty() => ViewState::Empty,
            LoadState::Ready => ViewState::Populated {
                count: self.items.len(),
            },
            LoadState::Failed(error) => ViewState::Failed {
                message: error.to_string(),
                retained: self.items.len(),
            },
            LoadState::Unconfigured => ViewState::Unconfigured,
        }
    }

    /// Issue a new load. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        if !self.closed {
            self.state = LoadState::Loading;
        }
        tracing::debug!(kind = %self.kind, generation = self.issued, "catalog load started");
        LoadTicket {
            generation: self.issued,
        }
    }

    /// Apply the result of a load issued with `ticket`.
    ///
    /// `configured` reports whether the store had credentials; a failure from
    /// an unconfigured store yields [`LoadState::Unconfigured`] rather than
    /// [`LoadState::Failed`].
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<CatalogItem>, FetchError>,
        configured: bool,
    ) -> LoadOutcome {
        if self.closed {
            tracing::debug!(
                kind = %self.kind,
                generation = ticket.generation,
                "discarding load result for closed view"
            );
            return LoadOutcome::Closed;
        }
        if ticket.generation != self.issued {
            tracing::warn!(
                kind = %self.kind,
                generation = ticket.generation,
                latest = self.issued,
                "discarding superseded load result"
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(items) => {
                tracing::debug!(kind = %self.kind, count = items.len(), "catalog loaded");
                self.items = items.into_iter().map(Arc::new).collect();
                self.state = LoadState::Ready;
            }
            Err(error) if !configured || error.is_unconfigured() => {
                tracing::warn!(kind = %self.kind, "item store not configured");
                self.state = LoadState::Unconfigured;
            }
            Err(error) => {
                tracing::warn!(kind = %self.kind, error = %error, "catalog load failed");
                self.state = LoadState::Failed(error);
            }
        }

        LoadOutcome::Applied
    }

    /// Fetch the whole catalog from `store` and replace the contents.
    ///
    /// Neither an unconfigured store nor the store of a closed view is
    /// contacted.
    pub async fn load<S>(&mut self, store: &S) -> Result<LoadOutcome, FetchError>
    where
        S: ItemStore + ?Sized,
    {
        if self.closed {
            tracing::debug!(kind = %self.kind, "skipping load for closed view");
            return Ok(LoadOutcome::Closed);
        }

        let ticket = self.begin_load();

        if !store.is_configured() {
            let error = FetchError::Unconfigured(UnconfiguredServiceError::new(vec![
                "service url or service key",
            ]));
            self.complete_load(ticket, Err(error.clone()), false);
            return Err(error);
        }

        let result = store.fetch_all(self.kind, None).await;
        let failure = result.as_ref().err().cloned();
        let outcome = self.complete_load(ticket, result, true);

        match failure {
            Some(error) => Err(error),
            None => Ok(outcome),
        }
    }

    /// Mark the owning view as gone. Later results are dropped.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Category bar for the loaded items.
    pub fn categories(&self) -> Vec<CategoryOption> {
        category_options(
            self.kind.default_categories(),
            self.items.iter().map(|item| item.category.as_str()),
        )
    }

    /// Resolve a detail-view slug or fragment.
    pub fn find_by_slug(&self, slug: &str) -> Option<Arc<CatalogItem>> {
        query::find_by_slug(&self.items, slug)
    }

    /// Whether an item with this id is currently loaded.
    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::catalog::{ItemDetails, ReelDetails};

    fn reel(id: &str, category: &str) -> CatalogItem {
        CatalogItem {
            id: ItemId::new(id),
            title: format!("Reel {}", id),
            slug: format!("reel-{}", id),
            category: category.to_string(),
            primary_asset: "https://videos.example/r.mp4".to_string(),
            created_at: Utc.timestamp_opt(100, 0).unwrap(),
            details: ItemDetails::Reel(ReelDetails::default()),
        }
    }

    #[test]
    fn test_states_are_distinct() {
        let mut model = CatalogModel::new(CatalogKind::Reel);
        assert_eq!(model.view_state(), ViewState::Idle);

        let ticket = model.begin_load();
        assert_eq!(model.view_state(), ViewState::Loading);

        model.complete_load(ticket, Ok(vec![]), true);
        assert_eq!(model.view_state(), ViewState::Empty);

        let ticket = model.begin_load();
        model.complete_load(ticket, Err(FetchError::Unreachable("timeout".into())), true);
        assert!(matches!(model.view_state(), ViewState::Failed { retained: 0, .. }));
    }

    #[test]
    fn test_failure_retains_previous_items() {
        let mut model = CatalogModel::new(CatalogKind::Reel);
        let ticket = model.begin_load();
        model.complete_load(ticket, Ok(vec![reel("1", "Food"), reel("2", "Culture")]), true);
        assert_eq!(model.view_state(), ViewState::Populated { count: 2 });

        let ticket = model.begin_load();
        model.complete_load(ticket, Err(FetchError::Malformed("bad json".into())), true);
        assert_eq!(model.items().len(), 2);
        assert!(matches!(model.view_state(), ViewState::Failed { retained: 2, .. }));
    }

    #[test]
    fn test_superseded_result_discarded() {
        let mut model = CatalogModel::new(CatalogKind::Reel);
        let first = model.begin_load();
        let second = model.begin_load();

        let outcome = model.complete_load(second, Ok(vec![reel("new", "Food")]), true);
        assert_eq!(outcome, LoadOutcome::Applied);

        let outcome = model.complete_load(first, Ok(vec![reel("old", "Food")]), true);
        assert_eq!(outcome, LoadOutcome::Superseded);
        assert_eq!(model.items()[0].id.as_str(), "new");
    }

    #[test]
    fn test_closed_model_discards_results() {
        let mut model = CatalogModel::new(CatalogKind::Reel);
        let ticket = model.begin_load();
        model.close();

        let outcome = model.complete_load(ticket, Ok(vec![reel("1", "Food")]), true);
        assert_eq!(outcome, LoadOutcome::Closed);
        assert!(model.items().is_empty());
    }

    #[tokio::test]
    async fn test_closed_model_does_not_fetch() {
        let store = crate::store::MemoryStore::new();
        store.seed(reel("1", "Food"));

        let mut model = CatalogModel::new(CatalogKind::Reel);
        model.close();

        assert_eq!(model.load(&store).await, Ok(LoadOutcome::Closed));
        assert_eq!(store.fetch_calls(), 0);
        assert_eq!(model.view_state(), ViewState::Idle);
    }

    #[test]
    fn test_network_error_from_unconfigured_store_is_unconfigured() {
        let mut model = CatalogModel::new(CatalogKind::Blog);
        let ticket = model.begin_load();
        model.complete_load(ticket, Err(FetchError::Unreachable("dns".into())), false);

        assert_eq!(model.view_state(), ViewState::Unconfigured);
        assert!(model.items().is_empty());
    }

    #[test]
    fn test_categories_merge_defaults() {
        let mut model = CatalogModel::new(CatalogKind::Reel);
        let ticket = model.begin_load();
        model.complete_load(ticket, Ok(vec![reel("1", "Street Art"), reel("2", "food")]), true);

        let labels: Vec<_> = model.categories().into_iter().map(|o| o.label).collect();
        assert_eq!(
            labels,
            vec!["All", "Adventure", "Food", "Culture", "Travel Tips", "Photography", "Street Art"]
        );
    }
}
