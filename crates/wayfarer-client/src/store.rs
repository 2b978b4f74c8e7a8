//! Item stores backed by the hosted REST API.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use wayfarer_core::store::{Asset, AssetStager, ItemStore, StagedAsset};
use wayfarer_core::{
    CatalogItem, CatalogKind, CategoryFilter, FetchError, NewItem, PersistenceError,
    UnconfiguredServiceError,
};

use crate::client::RestClient;
use crate::config::ServiceConfig;
use crate::error::Error;
use crate::rows;
use crate::stager::StorageApiStager;

/// [`ItemStore`] over the REST table API.
#[derive(Debug, Clone)]
pub struct RestItemStore {
    client: RestClient,
}

impl RestItemStore {
    /// Create a store using `client`.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &RestClient {
        &self.client
    }

    async fn fetch_rows(
        &self,
        kind: CatalogKind,
        category: Option<&str>,
    ) -> Result<Vec<CatalogItem>, Error> {
        let rows: Vec<Value> = self.client.select(kind.table()).await?;
        let items = rows
            .into_iter()
            .map(|row| rows::decode(kind, row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(admit(items, category))
    }

    async fn insert_row(&self, item: &NewItem) -> Result<CatalogItem, Error> {
        let kind = item.kind();
        let row = rows::encode(item)?;
        let stored: Value = self.client.insert(kind.table(), &row).await?;
        rows::decode(kind, stored)
    }
}

#[async_trait]
impl ItemStore for RestItemStore {
    async fn fetch_all(
        &self,
        kind: CatalogKind,
        category: Option<&str>,
    ) -> Result<Vec<CatalogItem>, FetchError> {
        let items = self.fetch_rows(kind, category).await?;
        tracing::debug!(kind = %kind, count = items.len(), "fetched catalog");
        Ok(items)
    }

    async fn create(&self, item: NewItem) -> Result<CatalogItem, PersistenceError> {
        Ok(self.insert_row(&item).await?)
    }
}

/// Keep the items whose category matches `category` after normalization.
/// `None`, blank and `"all"` keep everything.
fn admit(items: Vec<CatalogItem>, category: Option<&str>) -> Vec<CatalogItem> {
    let filter = category.map_or(CategoryFilter::All, CategoryFilter::parse);
    if filter.is_all() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| filter.admits(&item.category))
        .collect()
}

/// Stand-in used when endpoint or key is missing.
///
/// Reports itself unconfigured so views render a disabled catalog; any call
/// that still reaches it fails without network traffic.
#[derive(Debug, Clone)]
pub struct UnconfiguredStore {
    error: UnconfiguredServiceError,
}

impl UnconfiguredStore {
    /// Create a stand-in naming the missing settings.
    pub fn new(error: UnconfiguredServiceError) -> Self {
        Self { error }
    }

    /// Why the backend is unavailable.
    pub fn error(&self) -> &UnconfiguredServiceError {
        &self.error
    }
}

#[async_trait]
impl ItemStore for UnconfiguredStore {
    async fn fetch_all(
        &self,
        _kind: CatalogKind,
        _category: Option<&str>,
    ) -> Result<Vec<CatalogItem>, FetchError> {
        Err(FetchError::Unconfigured(self.error.clone()))
    }

    async fn create(&self, _item: NewItem) -> Result<CatalogItem, PersistenceError> {
        Err(PersistenceError::Unconfigured(self.error.clone()))
    }

    fn is_configured(&self) -> bool {
        false
    }
}

#[async_trait]
impl AssetStager for UnconfiguredStore {
    async fn stage(&self, _bucket: &str, _asset: &Asset) -> Result<StagedAsset, PersistenceError> {
        Err(PersistenceError::Unconfigured(self.error.clone()))
    }
}

/// Resolved backend: either a live store and stager, or the unconfigured
/// stand-in for both.
#[derive(Debug, Clone)]
pub enum Backend {
    /// Endpoint and key present.
    Rest {
        /// Record store.
        store: RestItemStore,
        /// Asset uploads.
        stager: StorageApiStager,
    },
    /// Endpoint or key missing.
    Unconfigured(UnconfiguredStore),
}

impl Backend {
    /// Build a backend from a configuration lookup result.
    pub fn connect(config: Result<ServiceConfig, UnconfiguredServiceError>) -> Result<Self, Error> {
        match config {
            Ok(config) => {
                let client = RestClient::new(config)?;
                tracing::info!(url = %client.config().url, "using hosted backend");
                Ok(Backend::Rest {
                    store: RestItemStore::new(client.clone()),
                    stager: StorageApiStager::new(client),
                })
            }
            Err(error) => {
                tracing::warn!(error = %error, "backend not configured; catalogs disabled");
                Ok(Backend::Unconfigured(UnconfiguredStore::new(error)))
            }
        }
    }

    /// Build a backend from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::connect(ServiceConfig::from_env())
    }

    /// Whether endpoint and key are present.
    pub fn is_configured(&self) -> bool {
        matches!(self, Backend::Rest { .. })
    }

    /// The record store.
    pub fn store(&self) -> &dyn ItemStore {
        match self {
            Backend::Rest { store, .. } => store,
            Backend::Unconfigured(store) => store,
        }
    }

    /// The asset stager.
    pub fn stager(&self) -> &dyn AssetStager {
        match self {
            Backend::Rest { stager, .. } => stager,
            Backend::Unconfigured(store) => store,
        }
    }

    /// Split into shared store and stager handles.
    pub fn into_parts(self) -> (Arc<dyn ItemStore>, Arc<dyn AssetStager>) {
        match self {
            Backend::Rest { store, stager } => (Arc::new(store), Arc::new(stager)),
            Backend::Unconfigured(store) => (Arc::new(store.clone()), Arc::new(store)),
        }
    }
}

#[cfg(test)]
mod tests {
    use wayfarer_core::{CatalogModel, ViewState};

    use super::*;

    #[tokio::test]
    async fn test_unconfigured_backend() {
        let backend = Backend::connect(Err(UnconfiguredServiceError::new(vec![
            crate::config::URL_VAR,
        ])))
        .unwrap();
        assert!(!backend.is_configured());

        let mut model = CatalogModel::new(CatalogKind::Reel);
        let err = model.load(backend.store()).await.unwrap_err();
        assert!(err.is_unconfigured());
        assert_eq!(model.view_state(), ViewState::Unconfigured);
    }

    #[tokio::test]
    async fn test_unconfigured_store_refuses_calls() {
        let store = UnconfiguredStore::new(UnconfiguredServiceError::new(vec![
            crate::config::KEY_VAR,
        ]));
        assert!(store.fetch_all(CatalogKind::Blog, None).await.unwrap_err().is_unconfigured());

        let asset = Asset::new("a.jpg", vec![1u8]);
        assert!(matches!(
            store.stage("blogs", &asset).await,
            Err(PersistenceError::Unconfigured(_))
        ));
    }

    #[test]
    fn test_category_matches_after_normalization() {
        let row = |id: i64, category: &str| {
            serde_json::json!({
                "id": id,
                "title": format!("Reel {}", id),
                "category": category,
                "video_url": "https://videos.example/r.mp4",
                "created_at": "2024-05-10T08:30:00Z"
            })
        };
        let items: Vec<CatalogItem> = [row(1, "Travel Tips"), row(2, "Food"), row(3, "travel-tips")]
            .into_iter()
            .map(|value| rows::decode(CatalogKind::Reel, value).unwrap())
            .collect();

        let tips = admit(items.clone(), Some("travel tips"));
        let ids: Vec<_> = tips.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        assert_eq!(admit(items.clone(), Some("All")).len(), 3);
        assert_eq!(admit(items.clone(), None).len(), 3);
        assert!(admit(items, Some("beaches")).is_empty());
    }

    #[test]
    fn test_configured_backend() {
        let backend = Backend::connect(Ok(ServiceConfig::new("https://abc.example.co", "k"))).unwrap();
        assert!(backend.is_configured());
        assert!(backend.store().is_configured());
    }
}
