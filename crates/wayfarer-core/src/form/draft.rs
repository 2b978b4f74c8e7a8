//! Unsaved catalog records.

use crate::catalog::{CatalogKind, Difficulty, LicensePrices};
use crate::store::Asset;

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Already hosted; used as-is.
    Url(String),
    /// Local file; uploaded on submit.
    Upload(Asset),
}

impl AssetSource {
    /// Build a source from user input: `http(s)://` values are URLs.
    pub fn from_url(url: impl Into<String>) -> Self {
        AssetSource::Url(url.into())
    }
}

/// Blog post fields of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlogDraft {
    /// Short teaser.
    pub excerpt: String,
    /// Body.
    pub content: String,
    /// Author name.
    pub author: String,
    /// Tags.
    pub tags: Vec<String>,
    /// Embedded video id.
    pub video_id: String,
    /// Additional images.
    pub gallery_images: Vec<AssetSource>,
    /// Read time, e.g. "7 min read".
    pub read_time: String,
    /// Hero flag.
    pub featured: bool,
}

/// Gallery image fields of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryDraft {
    /// Where the photo was taken.
    pub location: String,
    /// Caption.
    pub description: String,
    /// License prices.
    pub license: LicensePrices,
}

/// Adventure fields of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdventureDraft {
    /// Place.
    pub location: String,
    /// Description.
    pub description: String,
    /// Video id of the vlog.
    pub video_id: String,
    /// Display duration.
    pub duration: String,
    /// Difficulty.
    pub difficulty: Difficulty,
    /// Inline images, at most four.
    pub content_images: Vec<AssetSource>,
}

/// Reel fields of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReelDraft {
    /// Video URL; the reel's primary asset.
    pub video_url: String,
    /// Display duration.
    pub duration: String,
    /// Initial view count.
    pub views: u64,
}

/// Kind-specific part of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftDetails {
    /// Blog post.
    Blog(BlogDraft),
    /// Gallery image.
    Gallery(GalleryDraft),
    /// Adventure.
    Adventure(AdventureDraft),
    /// Reel.
    Reel(ReelDraft),
}

impl DraftDetails {
    /// Blank details for a kind.
    pub fn empty(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::Blog => DraftDetails::Blog(BlogDraft::default()),
            CatalogKind::Gallery => DraftDetails::Gallery(GalleryDraft::default()),
            CatalogKind::Adventure => DraftDetails::Adventure(AdventureDraft::default()),
            CatalogKind::Reel => DraftDetails::Reel(ReelDraft::default()),
        }
    }

    /// Catalog kind of these details.
    pub fn kind(&self) -> CatalogKind {
        match self {
            DraftDetails::Blog(_) => CatalogKind::Blog,
            DraftDetails::Gallery(_) => CatalogKind::Gallery,
            DraftDetails::Adventure(_) => CatalogKind::Adventure,
            DraftDetails::Reel(_) => CatalogKind::Reel,
        }
    }
}

/// A client-side candidate record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    /// Title.
    pub title: String,
    /// Category label.
    pub category: String,
    /// Cover image. Not used by reels.
    pub cover: Option<AssetSource>,
    /// Kind-specific fields.
    pub details: DraftDetails,
}

impl Draft {
    /// Blank draft, with the kind's first default category preselected.
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            title: String::new(),
            category: kind
                .default_categories()
                .first()
                .map(|c| c.to_string())
                .unwrap_or_default(),
            cover: None,
            details: DraftDetails::empty(kind),
        }
    }

    /// Catalog kind.
    pub fn kind(&self) -> CatalogKind {
        self.details.kind()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the cover image.
    pub fn with_cover(mut self, cover: AssetSource) -> Self {
        self.cover = Some(cover);
        self
    }

    /// Replace the kind-specific fields.
    pub fn with_details(mut self, details: DraftDetails) -> Self {
        self.details = details;
        self
    }
}
