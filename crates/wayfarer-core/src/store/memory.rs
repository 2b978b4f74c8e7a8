//! In-memory item store and asset stager.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use super::asset::{object_name, Asset, StagedAsset};
use super::{AssetStager, ItemStore};
use crate::catalog::{CatalogItem, CatalogKind, CategoryFilter, NewItem};
use crate::error::{FetchError, PersistenceError};

#[derive(Default)]
struct MemoryState {
    items: HashMap<CatalogKind, Vec<CatalogItem>>,
    last_created: Option<DateTime<Utc>>,
    fetch_failure: Option<FetchError>,
    create_failure: Option<PersistenceError>,
}

/// Item store held in process memory.
///
/// Counts every call so tests can assert on store traffic, and can be told
/// to fail fetches or creates.
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    configured: bool,
    fetch_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty, configured store.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            configured: true,
            fetch_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }

    /// A store standing in for a backend without credentials.
    ///
    /// Every call fails the way a placeholder client does: with a network
    /// error rather than a configuration error.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Insert an already-persisted item, keeping its id and timestamp.
    pub fn seed(&self, item: CatalogItem) {
        let mut state = self.state.lock();
        let created_at = item.created_at;
        state.items.entry(item.kind()).or_default().push(item);
        if state.last_created.map_or(true, |last| created_at > last) {
            state.last_created = Some(created_at);
        }
    }

    /// Make every following fetch fail with `error`.
    pub fn fail_fetches_with(&self, error: FetchError) {
        self.state.lock().fetch_failure = Some(error);
    }

    /// Make every following create fail with `error`.
    pub fn fail_creates_with(&self, error: PersistenceError) {
        self.state.lock().create_failure = Some(error);
    }

    /// Clear injected failures.
    pub fn recover(&self) {
        let mut state = self.state.lock();
        state.fetch_failure = None;
        state.create_failure = None;
    }

    /// Number of `fetch_all` calls so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of `create` calls so far.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Total store calls so far.
    pub fn total_calls(&self) -> usize {
        self.fetch_calls() + self.create_calls()
    }

    /// Number of stored items of a kind.
    pub fn len(&self, kind: CatalogKind) -> usize {
        self.state.lock().items.get(&kind).map_or(0, Vec::len)
    }

    /// Whether no item of `kind` is stored.
    pub fn is_empty(&self, kind: CatalogKind) -> bool {
        self.len(kind) == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn fetch_all(
        &self,
        kind: CatalogKind,
        category: Option<&str>,
    ) -> Result<Vec<CatalogItem>, FetchError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if !self.configured {
            return Err(FetchError::Unreachable(
                "failed to reach placeholder endpoint".to_string(),
            ));
        }

        let state = self.state.lock();
        if let Some(error) = &state.fetch_failure {
            return Err(error.clone());
        }

        let filter = category.map_or(CategoryFilter::All, CategoryFilter::parse);
        let items = state
            .items
            .get(&kind)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| filter.admits(&item.category))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(items)
    }

    async fn create(&self, item: NewItem) -> Result<CatalogItem, PersistenceError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if !self.configured {
            return Err(PersistenceError::Unreachable(
                "failed to reach placeholder endpoint".to_string(),
            ));
        }

        let mut state = self.state.lock();
        if let Some(error) = &state.create_failure {
            return Err(error.clone());
        }

        // Timestamps never go backwards relative to insertion order.
        let now = Utc::now();
        let created_at = match state.last_created {
            Some(last) if last > now => last,
            _ => now,
        };
        state.last_created = Some(created_at);

        let kind = item.kind();
        let item = item.into_item(Uuid::new_v4().to_string().into(), created_at);
        state.items.entry(kind).or_default().push(item.clone());

        tracing::debug!(kind = %kind, id = %item.id, slug = %item.slug, "memory store created item");

        Ok(item)
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

/// Asset stager keeping uploads in memory.
#[derive(Default)]
pub struct MemoryStager {
    objects: Mutex<HashMap<String, Asset>>,
    failure: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl MemoryStager {
    /// Create an empty stager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following upload fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    /// Clear an injected failure.
    pub fn recover(&self) {
        *self.failure.lock() = None;
    }

    /// Number of upload attempts so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects.lock().len()
    }

    /// Fetch a stored object by `bucket/name` key.
    pub fn object(&self, key: &str) -> Option<Asset> {
        self.objects.lock().get(key).cloned()
    }
}

#[async_trait]
impl AssetStager for MemoryStager {
    async fn stage(&self, bucket: &str, asset: &Asset) -> Result<StagedAsset, PersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.failure.lock().clone() {
            return Err(PersistenceError::AssetUpload {
                file_name: asset.file_name.clone(),
                message,
            });
        }

        let mut objects = self.objects.lock();
        let mut name = object_name(&asset.file_name, Utc::now());
        // Same-millisecond uploads of the same file must not overwrite.
        let mut attempt = 1;
        while objects.contains_key(&format!("{}/{}", bucket, name)) {
            attempt += 1;
            name = format!("{}-{}", attempt, object_name(&asset.file_name, Utc::now()));
        }

        let key = format!("{}/{}", bucket, name);
        objects.insert(key.clone(), asset.clone());

        Ok(StagedAsset {
            object_name: name,
            url: format!("memory://{}", key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemDetails, ReelDetails};

    fn reel(title: &str, category: &str) -> NewItem {
        NewItem {
            title: title.to_string(),
            slug: crate::catalog::slugify(title),
            category: category.to_string(),
            primary_asset: "https://videos.example/r.mp4".to_string(),
            details: ItemDetails::Reel(ReelDetails::default()),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_identity_and_monotonic_time() {
        let store = MemoryStore::new();
        let a = store.create(reel("Sunset", "Adventure")).await.unwrap();
        let b = store.create(reel("Sunrise", "Food")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(b.created_at >= a.created_at);
        assert_eq!(store.create_calls(), 2);
        assert_eq!(store.len(CatalogKind::Reel), 2);
    }

    #[tokio::test]
    async fn test_fetch_filters_by_category() {
        let store = MemoryStore::new();
        store.create(reel("Sunset", "Adventure")).await.unwrap();
        store.create(reel("Biryani", "Food")).await.unwrap();

        let food = store.fetch_all(CatalogKind::Reel, Some("food")).await.unwrap();
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].title, "Biryani");

        let blogs = store.fetch_all(CatalogKind::Blog, None).await.unwrap();
        assert!(blogs.is_empty());
        assert_eq!(store.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_unconfigured_store_fails_with_network_error() {
        let store = MemoryStore::unconfigured();
        assert!(!store.is_configured());
        let err = store.fetch_all(CatalogKind::Blog, None).await.unwrap_err();
        assert!(matches!(err, FetchError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_stager_never_overwrites() {
        let stager = MemoryStager::new();
        let asset = Asset::new("cover.jpg", vec![1, 2, 3]);
        let a = stager.stage("blogs", &asset).await.unwrap();
        let b = stager.stage("blogs", &asset).await.unwrap();

        assert_ne!(a.url, b.url);
        assert_eq!(stager.object_count(), 2);
        assert!(a.url.starts_with("memory://blogs/"));
    }

    #[tokio::test]
    async fn test_stager_failure_injection() {
        let stager = MemoryStager::new();
        stager.fail_with("bucket full");
        let err = stager
            .stage("gallery", &Asset::new("a.jpg", vec![1]))
            .await
            .unwrap_err();
        assert!(matches!(err, PersistenceError::AssetUpload { .. }));
        assert_eq!(stager.object_count(), 0);

        stager.recover();
        assert!(stager.stage("gallery", &Asset::new("a.jpg", vec![1])).await.is_ok());
    }
}
