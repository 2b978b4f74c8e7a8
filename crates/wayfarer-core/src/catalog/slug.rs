//! URL-safe slugs for detail-view addressing.

use std::collections::HashSet;

/// How the creation form treats a slug already used in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlugPolicy {
    /// Append `-2`, `-3`, ... until the slug is unused.
    #[default]
    Suffix,
    /// Refuse the submission.
    Reject,
    /// Skip the check and let the store decide.
    Allow,
}

/// Derive a slug from a title.
///
/// Lowercases the title and replaces every run of characters outside
/// `[a-z0-9]` with a single hyphen. Leading and trailing hyphens are dropped.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// URL fragment addressing a detail view.
pub fn fragment(slug: &str) -> String {
    format!("#{}", slug)
}

/// Strip a leading `#` from a fragment.
pub fn slug_from_fragment(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

/// First slug derived from `base` not contained in `taken`.
pub fn unique_slug(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hiking Nanga Parbat Base Camp"), "hiking-nanga-parbat-base-camp");
        assert_eq!(slugify("  Street Food: Bangkok!! "), "street-food-bangkok");
        assert_eq!(slugify("Café & Crêpes"), "caf-cr-pes");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("Top 10 (2024)"), "top-10-2024");
    }

    #[test]
    fn test_fragment_round_trip() {
        assert_eq!(fragment("hunza-valley"), "#hunza-valley");
        assert_eq!(slug_from_fragment("#hunza-valley"), "hunza-valley");
        assert_eq!(slug_from_fragment("hunza-valley"), "hunza-valley");
    }

    #[test]
    fn test_unique_slug_suffixes() {
        let mut taken = HashSet::new();
        assert_eq!(unique_slug("skardu", &taken), "skardu");

        taken.insert("skardu".to_string());
        taken.insert("skardu-2".to_string());
        assert_eq!(unique_slug("skardu", &taken), "skardu-3");
    }
}
