//! Client-side draft validation.
//!
//! Runs before any network call. The first failing field is reported.

use super::draft::{
    AdventureDraft, AssetSource, BlogDraft, Draft, DraftDetails, GalleryDraft, ReelDraft,
};
use crate::catalog::{slugify, MAX_CONTENT_IMAGES};
use crate::error::ValidationError;

/// Validate a draft.
///
/// Checks, in order:
/// - title present and sluggable
/// - category present
/// - primary asset (cover image, or video URL for reels)
/// - kind-specific required fields
pub fn validate(draft: &Draft) -> Result<(), ValidationError> {
    if is_blank(&draft.title) {
        return Err(ValidationError::missing("title"));
    }
    if slugify(&draft.title).is_empty() {
        return Err(ValidationError::invalid(
            "title",
            "must contain at least one letter or digit",
        ));
    }
    if is_blank(&draft.category) {
        return Err(ValidationError::missing("category"));
    }

    match &draft.details {
        DraftDetails::Reel(reel) => check_reel(reel),
        DraftDetails::Blog(blog) => {
            check_asset("cover", draft.cover.as_ref())?;
            check_blog(blog)
        }
        DraftDetails::Gallery(gallery) => {
            check_asset("cover", draft.cover.as_ref())?;
            check_gallery(gallery)
        }
        DraftDetails::Adventure(adventure) => {
            check_asset("cover", draft.cover.as_ref())?;
            check_adventure(adventure)
        }
    }
}

fn check_adventure(adventure: &AdventureDraft) -> Result<(), ValidationError> {
    if is_blank(&adventure.location) {
        return Err(ValidationError::missing("location"));
    }
    if is_blank(&adventure.video_id) {
        return Err(ValidationError::missing("video_id"));
    }
    check_images(
        "content_images",
        &adventure.content_images,
        Some(MAX_CONTENT_IMAGES),
    )
}

fn check_blog(blog: &BlogDraft) -> Result<(), ValidationError> {
    if is_blank(&blog.content) {
        return Err(ValidationError::missing("content"));
    }
    if is_blank(&blog.author) {
        return Err(ValidationError::missing("author"));
    }
    check_images("gallery_images", &blog.gallery_images, None)
}

fn check_gallery(gallery: &GalleryDraft) -> Result<(), ValidationError> {
    if is_blank(&gallery.location) {
        return Err(ValidationError::missing("location"));
    }
    let prices = &gallery.license;
    if prices.personal == 0 || prices.commercial == 0 || prices.exclusive == 0 {
        return Err(ValidationError::invalid(
            "license",
            "every tier needs a positive price",
        ));
    }
    Ok(())
}

fn check_reel(reel: &ReelDraft) -> Result<(), ValidationError> {
    if is_blank(&reel.video_url) {
        return Err(ValidationError::missing("video_url"));
    }
    if !is_http_url(&reel.video_url) {
        return Err(ValidationError::invalid("video_url", "must be an http(s) URL"));
    }
    Ok(())
}

fn check_asset(field: &'static str, source: Option<&AssetSource>) -> Result<(), ValidationError> {
    match source {
        None => Err(ValidationError::missing(field)),
        Some(AssetSource::Url(url)) if is_blank(url) => Err(ValidationError::missing(field)),
        Some(AssetSource::Url(url)) if !is_http_url(url) => {
            Err(ValidationError::invalid(field, "must be an http(s) URL"))
        }
        Some(AssetSource::Upload(asset)) if asset.is_empty() => {
            Err(ValidationError::invalid(field, format!("`{}` is empty", asset.file_name)))
        }
        Some(_) => Ok(()),
    }
}

fn check_images(
    field: &'static str,
    images: &[AssetSource],
    max: Option<usize>,
) -> Result<(), ValidationError> {
    if let Some(max) = max {
        if images.len() > max {
            return Err(ValidationError::too_many(field, max));
        }
    }
    images
        .iter()
        .try_for_each(|image| check_asset(field, Some(image)))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    value.starts_with("https://") || value.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogKind, LicensePrices};
    use crate::error::ValidationIssue;
    use crate::store::Asset;

    fn adventure() -> Draft {
        Draft::new(CatalogKind::Adventure)
            .with_title("Fairy Meadows Trek")
            .with_cover(AssetSource::Upload(Asset::new("cover.jpg", vec![1, 2, 3])))
            .with_details(DraftDetails::Adventure(AdventureDraft {
                location: "Fairy Meadows".into(),
                video_id: "dQw4w9WgXcQ".into(),
                ..Default::default()
            }))
    }

    #[test]
    fn test_valid_adventure() {
        assert!(validate(&adventure()).is_ok());
    }

    #[test]
    fn test_missing_title() {
        let draft = adventure().with_title("   ");
        assert_eq!(validate(&draft), Err(ValidationError::missing("title")));
    }

    #[test]
    fn test_unsluggable_title() {
        let draft = adventure().with_title("!!!");
        let err = validate(&draft).unwrap_err();
        assert_eq!(err.field, "title");
        assert!(matches!(err.issue, ValidationIssue::Invalid(_)));
    }

    #[test]
    fn test_missing_cover() {
        let mut draft = adventure();
        draft.cover = None;
        assert_eq!(validate(&draft), Err(ValidationError::missing("cover")));
    }

    #[test]
    fn test_adventure_requires_video() {
        let mut draft = adventure();
        if let DraftDetails::Adventure(a) = &mut draft.details {
            a.video_id.clear();
        }
        assert_eq!(validate(&draft), Err(ValidationError::missing("video_id")));
    }

    #[test]
    fn test_adventure_content_image_cap() {
        let mut draft = adventure();
        if let DraftDetails::Adventure(a) = &mut draft.details {
            a.content_images = (0..5)
                .map(|i| AssetSource::from_url(format!("https://cdn.example/{}.jpg", i)))
                .collect();
        }
        assert_eq!(
            validate(&draft),
            Err(ValidationError::too_many("content_images", MAX_CONTENT_IMAGES))
        );
    }

    #[test]
    fn test_empty_upload_rejected() {
        let draft = adventure().with_cover(AssetSource::Upload(Asset::new("cover.jpg", Vec::new())));
        let err = validate(&draft).unwrap_err();
        assert_eq!(err.field, "cover");
    }

    #[test]
    fn test_reel_requires_video_url_not_cover() {
        let draft = Draft::new(CatalogKind::Reel).with_title("Sunset at Hunza");
        assert_eq!(validate(&draft), Err(ValidationError::missing("video_url")));

        let draft = draft.with_details(DraftDetails::Reel(ReelDraft {
            video_url: "https://videos.example/hunza.mp4".into(),
            ..Default::default()
        }));
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn test_blog_requires_content_and_author() {
        let draft = Draft::new(CatalogKind::Blog)
            .with_title("Street Food of Lahore")
            .with_category("Food")
            .with_cover(AssetSource::from_url("https://cdn.example/lahore.jpg"));
        assert_eq!(validate(&draft), Err(ValidationError::missing("content")));

        let draft = draft.with_details(DraftDetails::Blog(BlogDraft {
            content: "<p>Nihari at dawn.</p>".into(),
            ..Default::default()
        }));
        assert_eq!(validate(&draft), Err(ValidationError::missing("author")));
    }

    #[test]
    fn test_blog_requires_category() {
        let draft = Draft::new(CatalogKind::Blog).with_title("Untitled trip");
        assert_eq!(validate(&draft), Err(ValidationError::missing("category")));
    }

    #[test]
    fn test_gallery_prices_positive() {
        let draft = Draft::new(CatalogKind::Gallery)
            .with_title("Attabad Lake")
            .with_category("Lakes")
            .with_cover(AssetSource::from_url("https://cdn.example/attabad.jpg"))
            .with_details(DraftDetails::Gallery(GalleryDraft {
                location: "Hunza".into(),
                description: String::new(),
                license: LicensePrices {
                    personal: 20,
                    commercial: 0,
                    exclusive: 500,
                },
            }));
        let err = validate(&draft).unwrap_err();
        assert_eq!(err.field, "license");
    }
}
