//! Catalog domain types.
//!
//! Items, catalog kinds, category normalization and slugs.

mod category;
mod item;
mod kind;
mod slug;

pub use category::{category_options, CategoryFilter, CategoryKey, CategoryOption, ALL_KEY, ALL_LABEL};
pub use item::{
    AdventureDetails, BlogDetails, CatalogItem, Difficulty, GalleryDetails, ItemDetails, ItemId,
    LicensePrices, LicenseTier, NewItem, ReelDetails, DEFAULT_READ_TIME, MAX_CONTENT_IMAGES,
};
pub use kind::{CatalogKind, ParseKindError};
pub use slug::{fragment, slug_from_fragment, slugify, unique_slug, SlugPolicy};
