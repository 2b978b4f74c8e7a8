//! Asset stagers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use object_store::path::Path;
use object_store::{ObjectStore, PutMode, PutOptions, PutPayload};
use wayfarer_core::store::{object_name, Asset, AssetStager, StagedAsset};
use wayfarer_core::PersistenceError;

use crate::client::RestClient;
use crate::error::Error;

fn upload_error(asset: &Asset, error: Error) -> PersistenceError {
    PersistenceError::AssetUpload {
        file_name: asset.file_name.clone(),
        message: error.to_string(),
    }
}

/// Uploads through the backend's storage API.
#[derive(Debug, Clone)]
pub struct StorageApiStager {
    client: RestClient,
}

impl StorageApiStager {
    /// Create a stager sharing `client`'s endpoint and key.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssetStager for StorageApiStager {
    async fn stage(&self, bucket: &str, asset: &Asset) -> Result<StagedAsset, PersistenceError> {
        let name = object_name(&asset.file_name, Utc::now());

        self.client
            .upload(bucket, &name, &asset.content_type, asset.bytes.clone())
            .await
            .map_err(|e| upload_error(asset, e))?;

        let url = self.client.config().public_url(bucket, &name);
        tracing::debug!(bucket, object = %name, bytes = asset.len(), "uploaded asset");

        Ok(StagedAsset {
            object_name: name,
            url,
        })
    }
}

/// Uploads into any [`ObjectStore`] (S3-compatible bucket, local disk,
/// memory). Buckets become top-level path prefixes.
#[derive(Debug, Clone)]
pub struct ObjectStoreStager {
    store: Arc<dyn ObjectStore>,
    public_base_url: String,
}

impl ObjectStoreStager {
    /// Create a stager whose objects are served from `public_base_url`.
    pub fn new(store: Arc<dyn ObjectStore>, public_base_url: impl Into<String>) -> Self {
        Self {
            store,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }
}

#[async_trait]
impl AssetStager for ObjectStoreStager {
    async fn stage(&self, bucket: &str, asset: &Asset) -> Result<StagedAsset, PersistenceError> {
        let name = object_name(&asset.file_name, Utc::now());
        let location = Path::from(format!("{}/{}", bucket, name));

        let options = PutOptions {
            mode: PutMode::Create,
            ..Default::default()
        };
        self.store
            .put_opts(&location, PutPayload::from(asset.bytes.clone()), options)
            .await
            .map_err(|e| upload_error(asset, Error::ObjectStore(e)))?;

        tracing::debug!(location = %location, bytes = asset.len(), "stored asset");

        Ok(StagedAsset {
            url: format!("{}/{}", self.public_base_url, location),
            object_name: name,
        })
    }
}
