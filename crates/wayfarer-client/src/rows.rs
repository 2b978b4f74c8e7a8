//! Table rows of the hosted backend and their catalog conversions.
//!
//! One row type per table. Rows received from the backend carry `id`,
//! `created_at` and `published`; rows sent for insertion omit the first two
//! and are always published.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wayfarer_core::catalog::{
    AdventureDetails, BlogDetails, GalleryDetails, LicensePrices, ReelDetails,
};
use wayfarer_core::{slugify, CatalogItem, CatalogKind, Difficulty, ItemDetails, ItemId, NewItem};

use crate::error::Error;

/// Primary key as stored: uuid text or serial integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Text key.
    Text(String),
    /// Integer key.
    Number(i64),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Text(id) => f.write_str(id),
            RowId::Number(id) => write!(f, "{}", id),
        }
    }
}

/// Columns shared by every table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowMeta {
    /// Primary key; absent on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    /// Visibility flag; inserted rows are always published.
    #[serde(default = "published")]
    pub published: bool,
    /// Server timestamp; absent on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn published() -> bool {
    true
}

impl RowMeta {
    fn insert() -> Self {
        Self {
            id: None,
            published: true,
            created_at: None,
        }
    }

    fn identity(&self, table: &str) -> Result<(ItemId, DateTime<Utc>), Error> {
        let id = self
            .id
            .as_ref()
            .ok_or_else(|| Error::InvalidRow(format!("{} row without id", table)))?;
        let created_at = self
            .created_at
            .ok_or_else(|| Error::InvalidRow(format!("{} row {} without created_at", table, id)))?;
        Ok((ItemId::new(id.to_string()), created_at))
    }
}

/// Row of the `blogs` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogRow {
    /// Shared columns.
    #[serde(flatten)]
    pub meta: RowMeta,
    /// Title.
    pub title: String,
    /// URL slug; older rows may lack it.
    #[serde(default)]
    pub slug: Option<String>,
    /// Category label as entered.
    pub category: String,
    /// Cover image URL.
    pub cover_image: String,
    /// Short teaser.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Body HTML.
    pub content: String,
    /// Author name.
    pub author: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Embedded video id.
    #[serde(default)]
    pub youtube_video_id: Option<String>,
    /// Additional image URLs.
    #[serde(default)]
    pub gallery_images: Option<Vec<String>>,
    /// Display read time.
    #[serde(default)]
    pub read_time: Option<String>,
    /// Hero flag.
    #[serde(default)]
    pub featured: bool,
}

/// Row of the `gallery_images` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryRow {
    /// Shared columns.
    #[serde(flatten)]
    pub meta: RowMeta,
    /// Title.
    pub title: String,
    /// URL slug; older rows may lack it.
    #[serde(default)]
    pub slug: Option<String>,
    /// Category label as entered.
    pub category: String,
    /// Photograph URL.
    pub image_url: String,
    /// Where the photo or trip took place.
    pub location: String,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Personal license price.
    pub license_personal: u32,
    /// Commercial license price.
    pub license_commercial: u32,
    /// Exclusive license price.
    pub license_exclusive: u32,
}

/// Row of the `adventures` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdventureRow {
    /// Shared columns.
    #[serde(flatten)]
    pub meta: RowMeta,
    /// Title.
    pub title: String,
    /// URL slug; older rows may lack it.
    #[serde(default)]
    pub slug: Option<String>,
    /// Category label as entered.
    pub category: String,
    /// Cover image URL.
    pub cover_image: String,
    /// Where the photo or trip took place.
    pub location: String,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Embedded video id.
    pub youtube_video_id: String,
    /// Display duration.
    #[serde(default)]
    pub duration: Option<String>,
    /// Difficulty label, e.g. "Moderate".
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Inline image URLs.
    #[serde(default)]
    pub content_images: Option<Vec<String>>,
}

/// Row of the `reels` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelRow {
    /// Shared columns.
    #[serde(flatten)]
    pub meta: RowMeta,
    /// Title.
    pub title: String,
    /// URL slug; older rows may lack it.
    #[serde(default)]
    pub slug: Option<String>,
    /// Category label as entered.
    pub category: String,
    /// Video URL.
    pub video_url: String,
    /// Display duration.
    #[serde(default)]
    pub duration: Option<String>,
    /// View counter.
    #[serde(default)]
    pub views: u64,
}

/// Decode a fetched row of `kind`'s table into a catalog item.
pub fn decode(kind: CatalogKind, value: Value) -> Result<CatalogItem, Error> {
    match kind {
        CatalogKind::Blog => parse::<BlogRow>(value)?.into_item(),
        CatalogKind::Gallery => parse::<GalleryRow>(value)?.into_item(),
        CatalogKind::Adventure => parse::<AdventureRow>(value)?.into_item(),
        CatalogKind::Reel => parse::<ReelRow>(value)?.into_item(),
    }
}

/// Encode a record for insertion into its kind's table.
pub fn encode(item: &NewItem) -> Result<Value, Error> {
    let value = match &item.details {
        ItemDetails::Blog(blog) => serde_json::to_value(BlogRow {
            meta: RowMeta::insert(),
            title: item.title.clone(),
            slug: Some(item.slug.clone()),
            category: item.category.clone(),
            cover_image: item.primary_asset.clone(),
            excerpt: blog.excerpt.clone(),
            content: blog.content.clone(),
            author: blog.author.clone(),
            tags: non_empty(&blog.tags),
            youtube_video_id: blog.video_id.clone(),
            gallery_images: non_empty(&blog.gallery_images),
            read_time: blog.read_time.clone(),
            featured: blog.featured,
        })?,
        ItemDetails::Gallery(gallery) => serde_json::to_value(GalleryRow {
            meta: RowMeta::insert(),
            title: item.title.clone(),
            slug: Some(item.slug.clone()),
            category: item.category.clone(),
            image_url: item.primary_asset.clone(),
            location: gallery.location.clone(),
            description: Some(gallery.description.clone()).filter(|d| !d.is_empty()),
            license_personal: gallery.license.personal,
            license_commercial: gallery.license.commercial,
            license_exclusive: gallery.license.exclusive,
        })?,
        ItemDetails::Adventure(adventure) => serde_json::to_value(AdventureRow {
            meta: RowMeta::insert(),
            title: item.title.clone(),
            slug: Some(item.slug.clone()),
            category: item.category.clone(),
            cover_image: item.primary_asset.clone(),
            location: adventure.location.clone(),
            description: Some(adventure.description.clone()),
            youtube_video_id: adventure.video_id.clone(),
            duration: adventure.duration.clone(),
            difficulty: Some(adventure.difficulty.as_str().to_string()),
            content_images: non_empty(&adventure.content_images),
        })?,
        ItemDetails::Reel(reel) => serde_json::to_value(ReelRow {
            meta: RowMeta::insert(),
            title: item.title.clone(),
            slug: Some(item.slug.clone()),
            category: item.category.clone(),
            video_url: item.primary_asset.clone(),
            duration: reel.duration.clone(),
            views: reel.views,
        })?,
    };
    Ok(value)
}

fn parse<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    Ok(serde_json::from_value(value)?)
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

/// Rows written before slugs were stored fall back to the title's slug.
fn slug_or_title(slug: Option<String>, title: &str) -> String {
    slug.filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| slugify(title))
}

impl BlogRow {
    fn into_item(self) -> Result<CatalogItem, Error> {
        let (id, created_at) = self.meta.identity("blogs")?;
        Ok(CatalogItem {
            id,
            slug: slug_or_title(self.slug, &self.title),
            title: self.title,
            category: self.category,
            primary_asset: self.cover_image,
            created_at,
            details: ItemDetails::Blog(BlogDetails {
                excerpt: self.excerpt,
                content: self.content,
                author: self.author,
                tags: self.tags.unwrap_or_default(),
                video_id: self.youtube_video_id,
                gallery_images: self.gallery_images.unwrap_or_default(),
                read_time: self.read_time,
                featured: self.featured,
            }),
        })
    }
}

impl GalleryRow {
    fn into_item(self) -> Result<CatalogItem, Error> {
        let (id, created_at) = self.meta.identity("gallery_images")?;
        Ok(CatalogItem {
            id,
            slug: slug_or_title(self.slug, &self.title),
            title: self.title,
            category: self.category,
            primary_asset: self.image_url,
            created_at,
            details: ItemDetails::Gallery(GalleryDetails {
                location: self.location,
                description: self.description.unwrap_or_default(),
                license: LicensePrices {
                    personal: self.license_personal,
                    commercial: self.license_commercial,
                    exclusive: self.license_exclusive,
                },
            }),
        })
    }
}

impl AdventureRow {
    fn into_item(self) -> Result<CatalogItem, Error> {
        let (id, created_at) = self.meta.identity("adventures")?;
        let difficulty = match self.difficulty.as_deref() {
            None => Difficulty::default(),
            Some(value) => Difficulty::parse(value).ok_or_else(|| {
                Error::InvalidRow(format!("adventure {} has unknown difficulty `{}`", id, value))
            })?,
        };
        Ok(CatalogItem {
            id,
            slug: slug_or_title(self.slug, &self.title),
            title: self.title,
            category: self.category,
            primary_asset: self.cover_image,
            created_at,
            details: ItemDetails::Adventure(AdventureDetails {
                location: self.location,
                description: self.description.unwrap_or_default(),
                video_id: self.youtube_video_id,
                duration: self.duration,
                difficulty,
                content_images: self.content_images.unwrap_or_default(),
            }),
        })
    }
}

impl ReelRow {
    fn into_item(self) -> Result<CatalogItem, Error> {
        let (id, created_at) = self.meta.identity("reels")?;
        Ok(CatalogItem {
            id,
            slug: slug_or_title(self.slug, &self.title),
            title: self.title,
            category: self.category,
            primary_asset: self.video_url,
            created_at,
            details: ItemDetails::Reel(ReelDetails {
                duration: self.duration,
                views: self.views,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_blog_row() {
        let row = json!({
            "id": "6f1c2a4e-0000-4000-8000-000000000001",
            "title": "Street Food of Lahore",
            "slug": "street-food-of-lahore",
            "excerpt": null,
            "content": "<p>Nihari at dawn.</p>",
            "cover_image": "https://cdn.example/lahore.jpg",
            "author": "Ayesha",
            "category": "Food",
            "tags": null,
            "youtube_video_id": null,
            "gallery_images": ["https://cdn.example/1.jpg"],
            "read_time": null,
            "featured": true,
            "published": true,
            "created_at": "2024-03-01T10:00:00+00:00",
            "updated_at": "2024-03-01T10:00:00+00:00"
        });

        let item = decode(CatalogKind::Blog, row).unwrap();
        assert_eq!(item.id.as_str(), "6f1c2a4e-0000-4000-8000-000000000001");
        assert_eq!(item.primary_asset, "https://cdn.example/lahore.jpg");
        assert!(item.is_featured());
        match item.details {
            ItemDetails::Blog(blog) => {
                assert!(blog.tags.is_empty());
                assert_eq!(blog.gallery_images.len(), 1);
                assert_eq!(blog.read_time_or_default(), "5 min read");
            }
            other => panic!("unexpected details {:?}", other),
        }
    }

    #[test]
    fn test_decode_reel_without_slug() {
        let row = json!({
            "id": 42,
            "title": "Sunset at Hunza",
            "category": "Travel Tips",
            "video_url": "https://videos.example/hunza.mp4",
            "views": 1200,
            "published": true,
            "created_at": "2024-05-10T08:30:00Z"
        });

        let item = decode(CatalogKind::Reel, row).unwrap();
        assert_eq!(item.id.as_str(), "42");
        assert_eq!(item.slug, "sunset-at-hunza");
        assert_eq!(item.kind(), CatalogKind::Reel);
    }

    #[test]
    fn test_decode_rejects_missing_identity() {
        let row = json!({
            "title": "Sunset at Hunza",
            "category": "Food",
            "video_url": "https://videos.example/hunza.mp4"
        });
        assert!(matches!(decode(CatalogKind::Reel, row), Err(Error::InvalidRow(_))));
    }

    #[test]
    fn test_decode_rejects_unknown_difficulty() {
        let row = json!({
            "id": "a1",
            "title": "K2 Base Camp",
            "category": "Adventure",
            "cover_image": "https://cdn.example/k2.jpg",
            "location": "Concordia",
            "youtube_video_id": "abc",
            "difficulty": "Lethal",
            "created_at": "2024-05-10T08:30:00Z"
        });
        assert!(matches!(decode(CatalogKind::Adventure, row), Err(Error::InvalidRow(_))));
    }

    #[test]
    fn test_encode_adventure_row() {
        let item = NewItem {
            title: "K2 Base Camp".into(),
            slug: "k2-base-camp".into(),
            category: "Adventure".into(),
            primary_asset: "https://cdn.example/k2.jpg".into(),
            details: ItemDetails::Adventure(AdventureDetails {
                location: "Concordia".into(),
                description: "Glacier walking.".into(),
                video_id: "abc".into(),
                duration: None,
                difficulty: Difficulty::Extreme,
                content_images: Vec::new(),
            }),
        };

        let row = encode(&item).unwrap();
        assert_eq!(row["cover_image"], "https://cdn.example/k2.jpg");
        assert_eq!(row["youtube_video_id"], "abc");
        assert_eq!(row["difficulty"], "Extreme");
        assert_eq!(row["published"], true);
        assert_eq!(row["duration"], Value::Null);
        assert!(row.get("id").is_none());
        assert!(row.get("created_at").is_none());
    }

    #[test]
    fn test_encode_gallery_flattens_license() {
        let item = NewItem {
            title: "Attabad Lake".into(),
            slug: "attabad-lake".into(),
            category: "Lakes".into(),
            primary_asset: "https://cdn.example/attabad.jpg".into(),
            details: ItemDetails::Gallery(GalleryDetails {
                location: "Hunza".into(),
                description: String::new(),
                license: LicensePrices {
                    personal: 20,
                    commercial: 90,
                    exclusive: 500,
                },
            }),
        };

        let row = encode(&item).unwrap();
        assert_eq!(row["image_url"], "https://cdn.example/attabad.jpg");
        assert_eq!(row["license_commercial"], 90);
        assert_eq!(row["description"], Value::Null);
    }
}
