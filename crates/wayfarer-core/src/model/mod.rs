//! Per-view catalog state.
//!
//! [`CatalogModel`] holds the fetched collection, [`Selection`] the focused
//! item, and [`CatalogPage`] ties both to the active filter and publishes
//! snapshots to renderers.

mod catalog_model;
mod page;
mod selection;

pub use catalog_model::{CatalogModel, LoadOutcome, LoadState, LoadTicket, ViewState};
pub use page::{CatalogPage, PageSnapshot};
pub use selection::{LicenseQuote, Selection};
