//! Binary assets awaiting upload.

use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::catalog::slugify;

/// A binary file selected in the editor (cover image, content image).
#[derive(Clone, PartialEq, Eq)]
pub struct Asset {
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// File contents.
    pub bytes: Bytes,
}

impl std::fmt::Debug for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Asset")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Asset {
    /// Create an asset, guessing the MIME type from the file name.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Read an asset from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    /// Content hash, used to avoid re-uploading the same file on retry.
    pub fn fingerprint(&self) -> String {
        blake3::hash(&self.bytes).to_hex().to_string()
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the asset has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Result of uploading an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedAsset {
    /// Object name inside the bucket.
    pub object_name: String,
    /// Public URL substituted into the persisted record.
    pub url: String,
}

/// Object name for an upload: `{unix_millis}-{stem}.{ext}`.
///
/// The stem is slugified and the extension reduced to lowercase ASCII
/// alphanumerics, so the name is URL-safe as-is and the upload path matches
/// the public URL.
pub fn object_name(file_name: &str, now: DateTime<Utc>) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|stem| slugify(&stem.to_string_lossy()))
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "upload".to_string());
    let extension: String = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    if extension.is_empty() {
        format!("{}-{}", now.timestamp_millis(), stem)
    } else {
        format!("{}-{}.{}", now.timestamp_millis(), stem, extension)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_content_type_guess() {
        assert_eq!(Asset::new("cover.jpg", vec![1, 2]).content_type, "image/jpeg");
        assert_eq!(Asset::new("clip.png", vec![1]).content_type, "image/png");
        assert_eq!(
            Asset::new("unknown", vec![1]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_fingerprint_depends_on_content_only() {
        let a = Asset::new("a.jpg", vec![1, 2, 3]);
        let b = Asset::new("b.jpg", vec![1, 2, 3]);
        let c = Asset::new("a.jpg", vec![3, 2, 1]);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_object_name() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(object_name("cover.jpg", now), "1700000000123-cover.jpg");
        assert_eq!(object_name("Hunza Valley.JPG", now), "1700000000123-hunza-valley.jpg");
        assert_eq!(object_name("noext", now), "1700000000123-noext");
        assert_eq!(object_name("???.png", now), "1700000000123-upload.png");
    }

    #[test]
    fn test_object_name_is_url_safe() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let name = object_name("trip #1?.jpg", now);
        assert_eq!(name, "1700000000000-trip-1.jpg");
        assert!(name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.'));
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hunza.webp");
        std::fs::write(&path, b"not really webp").unwrap();

        let asset = Asset::from_path(&path).await.unwrap();
        assert_eq!(asset.file_name, "hunza.webp");
        assert_eq!(asset.content_type, "image/webp");
        assert_eq!(asset.len(), 15);
    }
}
