//! Creation form: validate, stage assets, persist.

use std::collections::{HashMap, HashSet};

use crate::catalog::{
    slugify, unique_slug, AdventureDetails, BlogDetails, CatalogItem, CatalogKind,
    GalleryDetails, ItemDetails, NewItem, ReelDetails, SlugPolicy,
};
use crate::error::{PersistenceError, SubmitError, UnconfiguredServiceError, ValidationError};
use crate::store::{AssetStager, ItemStore, StagedAsset};

use super::draft::{AssetSource, Draft, DraftDetails};
use super::validator;

/// Editor backing one draft.
///
/// # Preconditions
///
/// The form does not deduplicate submissions. Callers must not submit again
/// while a previous [`submit`](Self::submit) is pending (disable the publish
/// trigger until it resolves).
///
/// The draft is never cleared by the form, whether the submission fails or
/// succeeds. Refreshing any catalog view after a successful submission is
/// the caller's job.
pub struct CreationForm<S, A> {
    store: S,
    stager: A,
    draft: Draft,
    slug_policy: SlugPolicy,
    staged: HashMap<String, StagedAsset>,
}

impl<S, A> CreationForm<S, A>
where
    S: ItemStore,
    A: AssetStager,
{
    /// Create a form editing `draft`.
    pub fn new(store: S, stager: A, draft: Draft) -> Self {
        Self {
            store,
            stager,
            draft,
            slug_policy: SlugPolicy::default(),
            staged: HashMap::new(),
        }
    }

    /// Set how slug collisions are handled.
    pub fn with_slug_policy(mut self, policy: SlugPolicy) -> Self {
        self.slug_policy = policy;
        self
    }

    /// The draft being edited.
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Edit the draft.
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Swap in a new draft, returning the old one.
    pub fn replace_draft(&mut self, draft: Draft) -> Draft {
        std::mem::replace(&mut self.draft, draft)
    }

    /// Number of uploads remembered for retries.
    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    /// Run client-side validation only.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validator::validate(&self.draft)
    }

    /// Validate and persist the draft.
    ///
    /// Validation failures return before any store call. Otherwise assets
    /// are uploaded, their URLs substituted into the record, and
    /// [`ItemStore::create`] is called exactly once. On any failure the
    /// draft is left untouched so it can be resubmitted; uploads that already
    /// succeeded are reused on the next attempt.
    pub async fn submit(&mut self) -> Result<CatalogItem, SubmitError> {
        self.validate()?;

        let kind = self.draft.kind();
        if !self.store.is_configured() {
            return Err(PersistenceError::Unconfigured(UnconfiguredServiceError::new(vec![
                "service url or service key",
            ]))
            .into());
        }

        let slug = self.resolve_slug(kind).await?;
        let record = self.assemble(kind, slug).await?;

        tracing::debug!(kind = %kind, slug = %record.slug, "submitting draft");

        match self.store.create(record).await {
            Ok(item) => {
                tracing::info!(kind = %kind, id = %item.id, slug = %item.slug, "item created");
                self.staged.clear();
                Ok(item)
            }
            Err(error) => {
                tracing::warn!(kind = %kind, error = %error, "item creation failed");
                Err(error.into())
            }
        }
    }

    async fn resolve_slug(&self, kind: CatalogKind) -> Result<String, PersistenceError> {
        let base = slugify(&self.draft.title);
        if self.slug_policy == SlugPolicy::Allow {
            return Ok(base);
        }

        let taken: HashSet<String> = self
            .store
            .fetch_all(kind, None)
            .await
            .map_err(PersistenceError::SlugLookup)?
            .into_iter()
            .map(|item| item.slug)
            .collect();

        match self.slug_policy {
            SlugPolicy::Reject if taken.contains(&base) => Err(PersistenceError::SlugConflict(base)),
            SlugPolicy::Suffix => Ok(unique_slug(&base, &taken)),
            _ => Ok(base),
        }
    }

    async fn assemble(&mut self, kind: CatalogKind, slug: String) -> Result<NewItem, PersistenceError> {
        let bucket = kind.bucket();
        let draft = self.draft.clone();

        // Reels are fronted by their video; a cover is never uploaded for them.
        let (primary_asset, details) = match draft.details {
            DraftDetails::Blog(blog) => {
                let cover = self.stage_cover(bucket, draft.cover.as_ref()).await?;
                let mut gallery_images = Vec::with_capacity(blog.gallery_images.len());
                for source in &blog.gallery_images {
                    gallery_images.push(self.stage(bucket, source).await?);
                }
                let details = ItemDetails::Blog(BlogDetails {
                    excerpt: non_blank(blog.excerpt),
                    content: blog.content,
                    author: blog.author.trim().to_string(),
                    tags: blog
                        .tags
                        .into_iter()
                        .map(|tag| tag.trim().to_string())
                        .filter(|tag| !tag.is_empty())
                        .collect(),
                    video_id: non_blank(blog.video_id),
                    gallery_images,
                    read_time: non_blank(blog.read_time),
                    featured: blog.featured,
                });
                (cover, details)
            }
            DraftDetails::Gallery(gallery) => {
                let cover = self.stage_cover(bucket, draft.cover.as_ref()).await?;
                let details = ItemDetails::Gallery(GalleryDetails {
                    location: gallery.location.trim().to_string(),
                    description: gallery.description,
                    license: gallery.license,
                });
                (cover, details)
            }
            DraftDetails::Adventure(adventure) => {
                let cover = self.stage_cover(bucket, draft.cover.as_ref()).await?;
                let mut content_images = Vec::with_capacity(adventure.content_images.len());
                for source in &adventure.content_images {
                    content_images.push(self.stage(bucket, source).await?);
                }
                let details = ItemDetails::Adventure(AdventureDetails {
                    location: adventure.location.trim().to_string(),
                    description: adventure.description,
                    video_id: adventure.video_id.trim().to_string(),
                    duration: non_blank(adventure.duration),
                    difficulty: adventure.difficulty,
                    content_images,
                });
                (cover, details)
            }
            DraftDetails::Reel(reel) => {
                let details = ItemDetails::Reel(ReelDetails {
                    duration: non_blank(reel.duration),
                    views: reel.views,
                });
                (reel.video_url.trim().to_string(), details)
            }
        };

        Ok(NewItem {
            title: draft.title.trim().to_string(),
            slug,
            category: draft.category.trim().to_string(),
            primary_asset,
            details,
        })
    }

    async fn stage_cover(
        &mut self,
        bucket: &str,
        cover: Option<&AssetSource>,
    ) -> Result<String, PersistenceError> {
        match cover {
            Some(source) => self.stage(bucket, source).await,
            None => Ok(String::new()),
        }
    }

    /// Resolve an asset source to a URL, uploading local files once.
    async fn stage(&mut self, bucket: &str, source: &AssetSource) -> Result<String, PersistenceError> {
        let asset = match source {
            AssetSource::Url(url) => return Ok(url.trim().to_string()),
            AssetSource::Upload(asset) => asset,
        };

        let key = format!("{}:{}", bucket, asset.fingerprint());
        if let Some(staged) = self.staged.get(&key) {
            tracing::debug!(file = %asset.file_name, url = %staged.url, "reusing staged asset");
            return Ok(staged.url.clone());
        }

        let staged = self.stager.stage(bucket, asset).await?;
        tracing::debug!(
            file = %asset.file_name,
            bytes = asset.len(),
            object = %staged.object_name,
            "asset staged"
        );
        let url = staged.url.clone();
        self.staged.insert(key, staged);
        Ok(url)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
