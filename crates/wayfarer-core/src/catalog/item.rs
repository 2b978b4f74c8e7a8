//! Catalog items and their kind-specific details.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::CatalogKind;

/// Read time shown for blog posts that do not carry one.
pub const DEFAULT_READ_TIME: &str = "5 min read";

/// Maximum number of content images attached to an adventure.
pub const MAX_CONTENT_IMAGES: usize = 4;

/// Store-assigned item identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap an identifier issued by the store.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A persisted catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Store-assigned identifier.
    pub id: ItemId,
    /// Human-readable title.
    pub title: String,
    /// URL slug derived from the title.
    pub slug: String,
    /// Category label as stored.
    pub category: String,
    /// Primary display asset (image URL, or video URL for reels).
    pub primary_asset: String,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Kind-specific fields.
    pub details: ItemDetails,
}

impl CatalogItem {
    /// The catalog this item belongs to.
    pub fn kind(&self) -> CatalogKind {
        self.details.kind()
    }

    /// Whether the item is flagged as featured. Only blog posts carry the flag.
    pub fn is_featured(&self) -> bool {
        matches!(&self.details, ItemDetails::Blog(blog) if blog.featured)
    }

    /// License prices, for gallery items.
    pub fn license(&self) -> Option<&LicensePrices> {
        match &self.details {
            ItemDetails::Gallery(gallery) => Some(&gallery.license),
            _ => None,
        }
    }

    /// Detail-view fragment (`#slug`).
    pub fn fragment(&self) -> String {
        super::slug::fragment(&self.slug)
    }
}

impl AsRef<CatalogItem> for CatalogItem {
    fn as_ref(&self) -> &CatalogItem {
        self
    }
}

/// Kind-specific fields of a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemDetails {
    /// Blog post fields.
    Blog(BlogDetails),
    /// Gallery image fields.
    Gallery(GalleryDetails),
    /// Adventure fields.
    Adventure(AdventureDetails),
    /// Reel fields.
    Reel(ReelDetails),
}

impl ItemDetails {
    /// The catalog kind these details belong to.
    pub fn kind(&self) -> CatalogKind {
        match self {
            ItemDetails::Blog(_) => CatalogKind::Blog,
            ItemDetails::Gallery(_) => CatalogKind::Gallery,
            ItemDetails::Adventure(_) => CatalogKind::Adventure,
            ItemDetails::Reel(_) => CatalogKind::Reel,
        }
    }
}

/// Blog post fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlogDetails {
    /// Short teaser.
    pub excerpt: Option<String>,
    /// Full body (HTML from the rich-text editor).
    pub content: String,
    /// Author name.
    pub author: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Embedded video id.
    pub video_id: Option<String>,
    /// Additional image URLs.
    pub gallery_images: Vec<String>,
    /// Display read time, e.g. "7 min read".
    pub read_time: Option<String>,
    /// Shown in the feed's hero slot.
    pub featured: bool,
}

impl BlogDetails {
    /// Read time, falling back to [`DEFAULT_READ_TIME`].
    pub fn read_time_or_default(&self) -> &str {
        self.read_time.as_deref().unwrap_or(DEFAULT_READ_TIME)
    }
}

/// License tier offered for gallery photographs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseTier {
    /// Personal use.
    #[default]
    Personal,
    /// Commercial use.
    Commercial,
    /// Exclusive rights.
    Exclusive,
}

impl LicenseTier {
    /// All tiers, cheapest first.
    pub const ALL: [LicenseTier; 3] = [
        LicenseTier::Personal,
        LicenseTier::Commercial,
        LicenseTier::Exclusive,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            LicenseTier::Personal => "Personal",
            LicenseTier::Commercial => "Commercial",
            LicenseTier::Exclusive => "Exclusive",
        }
    }
}

/// Price of each license tier, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LicensePrices {
    /// Personal-use price.
    pub personal: u32,
    /// Commercial-use price.
    pub commercial: u32,
    /// Exclusive-rights price.
    pub exclusive: u32,
}

impl LicensePrices {
    /// Price of a tier.
    pub fn price(&self, tier: LicenseTier) -> u32 {
        match tier {
            LicenseTier::Personal => self.personal,
            LicenseTier::Commercial => self.commercial,
            LicenseTier::Exclusive => self.exclusive,
        }
    }

    /// Cheapest price ("From $x" in the grid).
    pub fn starting_price(&self) -> u32 {
        self.personal.min(self.commercial).min(self.exclusive)
    }
}

/// Gallery image fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GalleryDetails {
    /// Where the photo was taken.
    pub location: String,
    /// Caption.
    pub description: String,
    /// License prices.
    pub license: LicensePrices,
}

/// Adventure difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Moderate.
    #[default]
    Moderate,
    /// Challenging.
    Challenging,
    /// Extreme.
    Extreme,
}

impl Difficulty {
    /// Display name, matching the stored value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Challenging => "Challenging",
            Difficulty::Extreme => "Extreme",
        }
    }

    /// Parse a stored value, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "moderate" => Some(Difficulty::Moderate),
            "challenging" => Some(Difficulty::Challenging),
            "extreme" => Some(Difficulty::Extreme),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adventure fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdventureDetails {
    /// Place of the adventure.
    pub location: String,
    /// Long description.
    pub description: String,
    /// Video id of the vlog.
    pub video_id: String,
    /// Display duration, e.g. "18:42".
    pub duration: Option<String>,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// Inline image URLs.
    pub content_images: Vec<String>,
}

/// Reel fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReelDetails {
    /// Display duration.
    pub duration: Option<String>,
    /// View counter.
    pub views: u64,
}

/// A complete record ready to be persisted.
///
/// Assets have already been staged: every URL here is final.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewItem {
    /// Title.
    pub title: String,
    /// Slug, already made unique according to the form's policy.
    pub slug: String,
    /// Category label.
    pub category: String,
    /// Primary display asset URL.
    pub primary_asset: String,
    /// Kind-specific fields.
    pub details: ItemDetails,
}

impl NewItem {
    /// The catalog this record goes to.
    pub fn kind(&self) -> CatalogKind {
        self.details.kind()
    }

    /// Attach store-assigned identity.
    pub fn into_item(self, id: ItemId, created_at: DateTime<Utc>) -> CatalogItem {
        CatalogItem {
            id,
            title: self.title,
            slug: self.slug,
            category: self.category,
            primary_asset: self.primary_asset,
            created_at,
            details: self.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_prices() {
        let prices = LicensePrices {
            personal: 29,
            commercial: 99,
            exclusive: 499,
        };
        assert_eq!(prices.price(LicenseTier::Commercial), 99);
        assert_eq!(prices.starting_price(), 29);
        assert_eq!(LicenseTier::default(), LicenseTier::Personal);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("extreme"), Some(Difficulty::Extreme));
        assert_eq!(Difficulty::parse(" Easy "), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("brutal"), None);
        assert_eq!(Difficulty::default(), Difficulty::Moderate);
    }

    #[test]
    fn test_read_time_default() {
        let blog = BlogDetails::default();
        assert_eq!(blog.read_time_or_default(), DEFAULT_READ_TIME);
    }

    #[test]
    fn test_details_serialize_tagged() {
        let details = ItemDetails::Reel(ReelDetails {
            duration: Some("0:45".into()),
            views: 12,
        });
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["kind"], "reel");
        assert_eq!(json["views"], 12);
    }
}
