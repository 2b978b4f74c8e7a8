//! Catalog kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The content type held by a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    /// Blog posts (travel magazine feed).
    Blog,
    /// Licensable gallery photographs.
    Gallery,
    /// Adventure vlogs.
    Adventure,
    /// Short video reels.
    Reel,
}

/// Error returned when parsing an unknown catalog kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown catalog kind `{0}` (expected blog, gallery, adventure or reel)")]
pub struct ParseKindError(pub String);

impl CatalogKind {
    /// All catalog kinds.
    pub const ALL: [CatalogKind; 4] = [
        CatalogKind::Blog,
        CatalogKind::Gallery,
        CatalogKind::Adventure,
        CatalogKind::Reel,
    ];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Blog => "blog",
            CatalogKind::Gallery => "gallery",
            CatalogKind::Adventure => "adventure",
            CatalogKind::Reel => "reel",
        }
    }

    /// Backend table holding this kind of record.
    pub fn table(&self) -> &'static str {
        match self {
            CatalogKind::Blog => "blogs",
            CatalogKind::Gallery => "gallery_images",
            CatalogKind::Adventure => "adventures",
            CatalogKind::Reel => "reels",
        }
    }

    /// Object-storage bucket for this kind's binary assets.
    pub fn bucket(&self) -> &'static str {
        match self {
            CatalogKind::Blog => "blogs",
            CatalogKind::Gallery => "gallery",
            CatalogKind::Adventure => "adventures",
            CatalogKind::Reel => "reels",
        }
    }

    /// Categories offered by the editors even before any item uses them.
    ///
    /// Blog and gallery categories are open sets derived from the data.
    pub fn default_categories(&self) -> &'static [&'static str] {
        match self {
            CatalogKind::Adventure => &["Adventure", "Travel Vlogs", "Moto Vlogs"],
            CatalogKind::Reel => &["Adventure", "Food", "Culture", "Travel Tips", "Photography"],
            CatalogKind::Blog | CatalogKind::Gallery => &[],
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blog" | "blogs" => Ok(CatalogKind::Blog),
            "gallery" | "photo" | "photos" => Ok(CatalogKind::Gallery),
            "adventure" | "adventures" => Ok(CatalogKind::Adventure),
            "reel" | "reels" => Ok(CatalogKind::Reel),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_plural_and_case() {
        assert_eq!("Blogs".parse::<CatalogKind>().unwrap(), CatalogKind::Blog);
        assert_eq!(" reel ".parse::<CatalogKind>().unwrap(), CatalogKind::Reel);
        assert!("shop".parse::<CatalogKind>().is_err());
    }

    #[test]
    fn test_tables_and_buckets() {
        assert_eq!(CatalogKind::Gallery.table(), "gallery_images");
        assert_eq!(CatalogKind::Adventure.bucket(), "adventures");
        for kind in CatalogKind::ALL {
            assert_eq!(kind.as_str().parse::<CatalogKind>().unwrap(), kind);
        }
    }
}
