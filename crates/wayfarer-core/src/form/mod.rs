//! Creation form for new catalog items.

mod creation;
mod draft;
mod validator;

pub use creation::CreationForm;
pub use draft::{
    AdventureDraft, AssetSource, BlogDraft, Draft, DraftDetails, GalleryDraft, ReelDraft,
};
pub use validator::validate;
