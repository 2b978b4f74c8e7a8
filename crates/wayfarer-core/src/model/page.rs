//! Per-view catalog page: model, filter state, selection and change feed.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::catalog_model::{CatalogModel, LoadOutcome, LoadTicket, ViewState};
use super::selection::{LicenseQuote, Selection};
use crate::catalog::{CatalogItem, CatalogKind, CategoryFilter, CategoryOption, ItemId, LicenseTier};
use crate::error::FetchError;
use crate::query::{self, SortKind};
use crate::store::ItemStore;

/// Everything a renderer needs to redraw a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    /// Incremented on every change.
    pub revision: u64,
    /// Load/render state.
    pub state: ViewState,
    /// Active category filter.
    pub filter: CategoryFilter,
    /// Active sort.
    pub sort: SortKind,
    /// Number of items passing the filter.
    pub visible: usize,
    /// Focused item, if any.
    pub selected: Option<ItemId>,
}

/// State owned by one catalog view.
///
/// Changes are published to subscribers as [`PageSnapshot`]s; renderers
/// redraw when the receiver reports a change.
#[derive(Debug)]
pub struct CatalogPage {
    model: CatalogModel,
    filter: CategoryFilter,
    sort: SortKind,
    selection: Selection,
    revision: u64,
    changes: watch::Sender<PageSnapshot>,
}

impl CatalogPage {
    /// Create a page for a catalog kind, sorted newest first.
    pub fn new(kind: CatalogKind) -> Self {
        let model = CatalogModel::new(kind);
        let filter = CategoryFilter::All;
        let sort = SortKind::default();
        let (changes, _) = watch::channel(PageSnapshot {
            revision: 0,
            state: model.view_state(),
            filter: filter.clone(),
            sort,
            visible: 0,
            selected: None,
        });

        Self {
            model,
            filter,
            sort,
            selection: Selection::new(),
            revision: 0,
            changes,
        }
    }

    /// Receive a snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<PageSnapshot> {
        self.changes.subscribe()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> PageSnapshot {
        self.changes.borrow().clone()
    }

    /// The underlying model.
    pub fn model(&self) -> &CatalogModel {
        &self.model
    }

    /// Active filter.
    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Active sort.
    pub fn sort(&self) -> SortKind {
        self.sort
    }

    /// The selection overlay.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Items passing the active filter, in the active order.
    pub fn visible(&self) -> Vec<Arc<CatalogItem>> {
        query::view(self.model.items(), &self.filter, self.sort)
    }

    /// Category bar.
    pub fn categories(&self) -> Vec<CategoryOption> {
        self.model.categories()
    }

    /// Hero item of the page.
    pub fn featured(&self) -> Option<Arc<CatalogItem>> {
        query::featured(self.model.items())
    }

    /// The `n` newest items, ignoring the filter.
    pub fn latest(&self, n: usize) -> Vec<Arc<CatalogItem>> {
        query::latest(self.model.items(), n)
    }

    /// Change the category filter.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.publish();
        }
    }

    /// Change the sort order.
    pub fn set_sort(&mut self, sort: SortKind) {
        if self.sort != sort {
            self.sort = sort;
            self.publish();
        }
    }

    /// Focus an item.
    pub fn select(&mut self, item: Arc<CatalogItem>) {
        self.selection.select(item);
        self.publish();
    }

    /// Focus the item addressed by a slug or `#fragment`.
    ///
    /// Returns the item when found; the selection is unchanged otherwise.
    pub fn select_slug(&mut self, slug: &str) -> Option<Arc<CatalogItem>> {
        let item = self.model.find_by_slug(slug)?;
        self.select(item.clone());
        Some(item)
    }

    /// Drop the focused item.
    pub fn clear_selection(&mut self) {
        if self.selection.is_active() {
            self.selection.clear();
            self.publish();
        }
    }

    /// Choose the license tier shown in the overlay.
    pub fn choose_license(&mut self, tier: LicenseTier) {
        self.selection.choose_license(tier);
    }

    /// Quote for the focused gallery item.
    pub fn quote(&self) -> Option<LicenseQuote> {
        self.selection.quote()
    }

    /// Issue a load; see [`CatalogModel::begin_load`].
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.model.begin_load();
        self.publish();
        ticket
    }

    /// Apply a load result; see [`CatalogModel::complete_load`].
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<CatalogItem>, FetchError>,
        configured: bool,
    ) -> LoadOutcome {
        let outcome = self.model.complete_load(ticket, result, configured);
        if outcome == LoadOutcome::Applied {
            self.publish();
        }
        outcome
    }

    /// Load the catalog from `store`.
    pub async fn load<S>(&mut self, store: &S) -> Result<LoadOutcome, FetchError>
    where
        S: ItemStore + ?Sized,
    {
        if self.model.is_closed() {
            return Ok(LoadOutcome::Closed);
        }

        self.publish_loading();
        let result = self.model.load(store).await;
        if !self.model.is_closed() {
            self.publish();
        }
        result
    }

    /// The view went away; pending results will be discarded.
    pub fn close(&mut self) {
        self.model.close();
    }

    fn publish_loading(&mut self) {
        self.revision += 1;
        let snapshot = PageSnapshot {
            revision: self.revision,
            state: ViewState::Loading,
            filter: self.filter.clone(),
            sort: self.sort,
            visible: self.visible().len(),
            selected: self.selection.current().map(|item| item.id.clone()),
        };
        self.changes.send_replace(snapshot);
    }

    fn publish(&mut self) {
        self.revision += 1;
        let snapshot = PageSnapshot {
            revision: self.revision,
            state: self.model.view_state(),
            filter: self.filter.clone(),
            sort: self.sort,
            visible: self.visible().len(),
            selected: self.selection.current().map(|item| item.id.clone()),
        };
        self.changes.send_replace(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::catalog::{AdventureDetails, ItemDetails};

    fn adventure(id: &str, category: &str, ts: i64) -> CatalogItem {
        CatalogItem {
            id: ItemId::new(id),
            title: format!("Adventure {}", id),
            slug: format!("adventure-{}", id),
            category: category.to_string(),
            primary_asset: format!("https://cdn.example/{}.jpg", id),
            created_at: Utc.timestamp_opt(ts, 0).unwrap(),
            details: ItemDetails::Adventure(AdventureDetails::default()),
        }
    }

    fn loaded_page() -> CatalogPage {
        let mut page = CatalogPage::new(CatalogKind::Adventure);
        let ticket = page.begin_load();
        page.complete_load(
            ticket,
            Ok(vec![
                adventure("1", "Moto Vlogs", 10),
                adventure("2", "Adventure", 30),
                adventure("3", "moto vlogs", 20),
            ]),
            true,
        );
        page
    }

    #[test]
    fn test_filter_change_rederives_visible() {
        let mut page = loaded_page();
        assert_eq!(page.visible().len(), 3);

        page.set_filter(CategoryFilter::parse("Moto Vlogs"));
        let ids: Vec<_> = page.visible().iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, vec!["3", "1"]);
        assert_eq!(page.snapshot().visible, 2);
    }

    #[test]
    fn test_selection_does_not_affect_visible() {
        let mut page = loaded_page();
        page.set_filter(CategoryFilter::parse("adventure"));
        let selected = page.select_slug("#adventure-1").unwrap();

        assert_eq!(selected.id.as_str(), "1");
        assert_eq!(page.visible().len(), 1);
        assert_eq!(page.snapshot().selected, Some(ItemId::new("1")));
    }

    #[test]
    fn test_subscribers_see_changes() {
        let mut page = loaded_page();
        let mut changes = page.subscribe();
        assert!(!changes.has_changed().unwrap());

        page.set_sort(SortKind::Insertion);
        assert!(changes.has_changed().unwrap());
        assert_eq!(changes.borrow_and_update().sort, SortKind::Insertion);

        page.set_sort(SortKind::Insertion);
        assert!(!changes.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_closed_page_stays_quiet() {
        let store = crate::store::MemoryStore::new();
        let mut page = CatalogPage::new(CatalogKind::Adventure);
        let changes = page.subscribe();
        page.close();

        assert_eq!(page.load(&store).await, Ok(LoadOutcome::Closed));
        assert_eq!(store.fetch_calls(), 0);
        assert!(!changes.has_changed().unwrap());
        assert_eq!(page.snapshot().state, ViewState::Idle);
    }

    #[test]
    fn test_clear_selection_twice() {
        let mut page = loaded_page();
        page.select_slug("adventure-2");
        page.clear_selection();
        let revision = page.snapshot().revision;
        page.clear_selection();
        assert_eq!(page.snapshot().revision, revision);
        assert!(page.selection().current().is_none());
    }
}
