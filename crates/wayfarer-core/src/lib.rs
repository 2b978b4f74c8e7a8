//! Wayfarer Core - catalog browsing and creation for a travel content site.
//!
//! Every content listing (blog feed, photo gallery, adventure vlogs, reels)
//! is an instance of the same pattern:
//!
//! - a [`CatalogModel`] populated from an [`ItemStore`]
//! - a pure filter/sort [`view`](query::view) deriving the visible items
//! - a [`Selection`] overlay focusing at most one item
//! - a [`CreationForm`] validating drafts and writing through the store
//!
//! # Quick Start
//!
//! ```ignore
//! use wayfarer_core::{CatalogKind, CatalogPage, CategoryFilter, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryStore::new();
//!     let mut page = CatalogPage::new(CatalogKind::Blog);
//!     page.load(&store).await.ok();
//!     page.set_filter(CategoryFilter::parse("food"));
//!     for post in page.visible() {
//!         println!("{} {}", post.fragment(), post.title);
//!     }
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod form;
pub mod model;
pub mod query;
pub mod store;

pub use catalog::{
    slugify, CatalogItem, CatalogKind, CategoryFilter, CategoryKey, CategoryOption, Difficulty,
    ItemDetails, ItemId, LicensePrices, LicenseTier, NewItem, SlugPolicy,
};
pub use error::{
    FetchError, PersistenceError, SubmitError, UnconfiguredServiceError, ValidationError,
    ValidationIssue,
};
pub use form::{AssetSource, CreationForm, Draft, DraftDetails};
pub use model::{CatalogModel, CatalogPage, LoadOutcome, LoadState, PageSnapshot, Selection, ViewState};
pub use query::{view, SortKind};
pub use store::{Asset, AssetStager, ItemStore, MemoryStager, MemoryStore, StagedAsset};
