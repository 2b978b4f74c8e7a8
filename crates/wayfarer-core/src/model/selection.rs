//! Selection / detail overlay.

use std::sync::Arc;

use serde::Serialize;

use super::catalog_model::CatalogModel;
use crate::catalog::{CatalogItem, LicenseTier};

/// Price quote for licensing the selected gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseQuote {
    /// Title of the image.
    pub title: String,
    /// Chosen tier.
    pub tier: LicenseTier,
    /// Price of the tier.
    pub price: u32,
}

/// At most one focused item per catalog view.
///
/// The overlay keeps a shared handle to the item, not a copy. It does not
/// follow reloads of the model: a selection whose item disappeared stays
/// current until [`clear`](Self::clear) is called. Use
/// [`is_stale`](Self::is_stale) to detect that case.
#[derive(Debug, Default)]
pub struct Selection {
    current: Option<Arc<CatalogItem>>,
    license: LicenseTier,
}

impl Selection {
    /// Create an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus `item`, replacing any previous selection.
    pub fn select(&mut self, item: Arc<CatalogItem>) {
        tracing::debug!(id = %item.id, "item selected");
        self.current = Some(item);
    }

    /// Drop the selection. Does nothing when nothing is selected.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The focused item.
    pub fn current(&self) -> Option<Arc<CatalogItem>> {
        self.current.clone()
    }

    /// Whether something is selected.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the selected item is no longer in `model`.
    pub fn is_stale(&self, model: &CatalogModel) -> bool {
        self.current
            .as_ref()
            .is_some_and(|item| !model.contains(&item.id))
    }

    /// Choose the license tier. The choice survives changes of selection.
    pub fn choose_license(&mut self, tier: LicenseTier) {
        self.license = tier;
    }

    /// Currently chosen license tier.
    pub fn license(&self) -> LicenseTier {
        self.license
    }

    /// Price of the chosen tier for the selected item, if it is licensable.
    pub fn quote(&self) -> Option<LicenseQuote> {
        let item = self.current.as_ref()?;
        let prices = item.license()?;
        Some(LicenseQuote {
            title: item.title.clone(),
            tier: self.license,
            price: prices.price(self.license),
        })
    }
}
