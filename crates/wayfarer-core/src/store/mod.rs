//! Item store boundary.
//!
//! The hosted backend is consumed through two traits: [`ItemStore`] for
//! records and [`AssetStager`] for binary uploads. `wayfarer-client`
//! implements both over HTTP; [`MemoryStore`] and [`MemoryStager`] stand in
//! for tests and the demo catalog.

mod asset;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{CatalogItem, CatalogKind, NewItem};
use crate::error::{FetchError, PersistenceError};

pub use asset::{object_name, Asset, StagedAsset};
pub use memory::{MemoryStager, MemoryStore};

/// Remote persistence for catalog records.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Fetch every published item of a kind, in store insertion order.
    ///
    /// `category` narrows the result server-side when given.
    async fn fetch_all(
        &self,
        kind: CatalogKind,
        category: Option<&str>,
    ) -> Result<Vec<CatalogItem>, FetchError>;

    /// Persist a complete record. The store assigns id and timestamp.
    async fn create(&self, item: NewItem) -> Result<CatalogItem, PersistenceError>;

    /// Whether endpoint and credentials are present.
    fn is_configured(&self) -> bool {
        true
    }
}

#[async_trait]
impl<S: ItemStore + ?Sized> ItemStore for Arc<S> {
    async fn fetch_all(
        &self,
        kind: CatalogKind,
        category: Option<&str>,
    ) -> Result<Vec<CatalogItem>, FetchError> {
        (**self).fetch_all(kind, category).await
    }

    async fn create(&self, item: NewItem) -> Result<CatalogItem, PersistenceError> {
        (**self).create(item).await
    }

    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }
}

/// Uploads binary assets and returns their public URLs.
#[async_trait]
pub trait AssetStager: Send + Sync {
    /// Upload `asset` into `bucket`. Never overwrites an existing object.
    async fn stage(&self, bucket: &str, asset: &Asset) -> Result<StagedAsset, PersistenceError>;
}

#[async_trait]
impl<A: AssetStager + ?Sized> AssetStager for Arc<A> {
    async fn stage(&self, bucket: &str, asset: &Asset) -> Result<StagedAsset, PersistenceError> {
        (**self).stage(bucket, asset).await
    }
}
