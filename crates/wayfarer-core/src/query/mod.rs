//! Filter/sort engine.
//!
//! Pure functions deriving the visible subset of a catalog. Nothing here
//! mutates its input.

mod view;

pub use view::{featured, find_by_slug, latest, view, SortKind};
