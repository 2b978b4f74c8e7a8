//! Derivation of the visible item sequence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogItem, CategoryFilter};

/// Ordering applied to the visible items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    /// Newest first. Equal timestamps keep their input order.
    #[default]
    #[serde(rename = "recent")]
    MostRecent,
    /// Oldest first. Equal timestamps keep their input order.
    Oldest,
    /// Order as loaded from the store.
    Insertion,
    /// Title, ignoring case. Equal titles keep their input order.
    Title,
}

impl SortKind {
    /// Lowercase name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKind::MostRecent => "recent",
            SortKind::Oldest => "oldest",
            SortKind::Insertion => "insertion",
            SortKind::Title => "title",
        }
    }
}

impl fmt::Display for SortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recent" | "most-recent" | "newest" => Ok(SortKind::MostRecent),
            "oldest" => Ok(SortKind::Oldest),
            "insertion" | "none" => Ok(SortKind::Insertion),
            "title" => Ok(SortKind::Title),
            other => Err(format!(
                "unknown sort `{}` (expected recent, oldest, insertion or title)",
                other
            )),
        }
    }
}

/// Filter and order a collection.
///
/// Returns a new sequence; `items` is left untouched. Items are cloned
/// handles, so passing `Arc<CatalogItem>` shares rather than copies records.
pub fn view<T>(items: &[T], filter: &CategoryFilter, sort: SortKind) -> Vec<T>
where
    T: AsRef<CatalogItem> + Clone,
{
    let mut visible: Vec<T> = items
        .iter()
        .filter(|item| filter.admits(&item.as_ref().category))
        .cloned()
        .collect();

    // `sort_by` is stable, which the tie-breaking contract relies on.
    match sort {
        SortKind::MostRecent => {
            visible.sort_by(|a, b| b.as_ref().created_at.cmp(&a.as_ref().created_at))
        }
        SortKind::Oldest => {
            visible.sort_by(|a, b| a.as_ref().created_at.cmp(&b.as_ref().created_at))
        }
        SortKind::Insertion => {}
        SortKind::Title => visible.sort_by_cached_key(|item| item.as_ref().title.to_lowercase()),
    }

    visible
}

/// The hero item: first featured item, else the first item.
pub fn featured<T>(items: &[T]) -> Option<T>
where
    T: AsRef<CatalogItem> + Clone,
{
    items
        .iter()
        .find(|item| item.as_ref().is_featured())
        .or_else(|| items.first())
        .cloned()
}

/// The `n` most recent items.
pub fn latest<T>(items: &[T], n: usize) -> Vec<T>
where
    T: AsRef<CatalogItem> + Clone,
{
    let mut recent = view(items, &CategoryFilter::All, SortKind::MostRecent);
    recent.truncate(n);
    recent
}

/// Resolve a detail view by slug. The first match in input order wins.
pub fn find_by_slug<T>(items: &[T], slug: &str) -> Option<T>
where
    T: AsRef<CatalogItem> + Clone,
{
    let slug = crate::catalog::slug_from_fragment(slug);
    items.iter().find(|item| item.as_ref().slug == slug).cloned()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::catalog::{BlogDetails, ItemDetails, ItemId};

    fn item(id: &str, category: &str, ts: i64) -> CatalogItem {
        CatalogItem {
            id: ItemId::new(id),
            title: format!("Item {}", id),
            slug: format!("item-{}", id),
            category: category.to_string(),
            primary_asset: format!("https://cdn.example/{}.jpg", id),
            created_at: Utc.timestamp_opt(ts, 0).unwrap(),
            details: ItemDetails::Blog(BlogDetails::default()),
        }
    }

    fn ids<T: AsRef<CatalogItem>>(items: &[T]) -> Vec<&str> {
        items.iter().map(|i| i.as_ref().id.as_str()).collect()
    }

    fn scenario() -> Vec<CatalogItem> {
        vec![item("1", "food", 10), item("2", "culture", 30), item("3", "food", 20)]
    }

    #[test]
    fn test_scenario_food_recent() {
        let items = scenario();
        let visible = view(&items, &CategoryFilter::parse("food"), SortKind::MostRecent);
        assert_eq!(ids(&visible), vec!["3", "1"]);
    }

    #[test]
    fn test_scenario_all_recent() {
        let items = scenario();
        let visible = view(&items, &CategoryFilter::All, SortKind::MostRecent);
        assert_eq!(ids(&visible), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_all_is_permutation() {
        let items = scenario();
        for sort in [SortKind::MostRecent, SortKind::Oldest, SortKind::Insertion, SortKind::Title] {
            let visible = view(&items, &CategoryFilter::All, sort);
            assert_eq!(visible.len(), items.len());
            let mut got = ids(&visible);
            got.sort();
            assert_eq!(got, vec!["1", "2", "3"]);
        }
    }

    #[test]
    fn test_filter_only_matching_category() {
        let items = scenario();
        let visible = view(&items, &CategoryFilter::parse("Culture"), SortKind::Insertion);
        assert_eq!(ids(&visible), vec!["2"]);
        assert!(visible.iter().all(|i| i.category == "culture"));

        let none = view(&items, &CategoryFilter::parse("beaches"), SortKind::Insertion);
        assert!(none.is_empty());
    }

    #[test]
    fn test_recent_sort_is_stable() {
        let items = vec![
            item("a", "food", 5),
            item("b", "food", 7),
            item("c", "food", 5),
            item("d", "food", 7),
            item("e", "food", 5),
        ];
        let visible = view(&items, &CategoryFilter::All, SortKind::MostRecent);
        assert_eq!(ids(&visible), vec!["b", "d", "a", "c", "e"]);

        let visible = view(&items, &CategoryFilter::All, SortKind::Oldest);
        assert_eq!(ids(&visible), vec!["a", "c", "e", "b", "d"]);
    }

    #[test]
    fn test_view_does_not_mutate_input() {
        let items = scenario();
        let before = items.clone();
        let _ = view(&items, &CategoryFilter::parse("food"), SortKind::MostRecent);
        assert_eq!(items, before);
    }

    #[test]
    fn test_view_shares_arc_handles() {
        let items: Vec<Arc<CatalogItem>> = scenario().into_iter().map(Arc::new).collect();
        let visible = view(&items, &CategoryFilter::All, SortKind::Insertion);
        assert!(Arc::ptr_eq(&visible[0], &items[0]));
    }

    #[test]
    fn test_featured_and_latest() {
        let mut items = scenario();
        assert_eq!(featured(&items).unwrap().id.as_str(), "1");

        if let ItemDetails::Blog(blog) = &mut items[2].details {
            blog.featured = true;
        }
        assert_eq!(featured(&items).unwrap().id.as_str(), "3");
        assert_eq!(ids(&latest(&items, 2)), vec!["2", "3"]);
        assert!(featured::<CatalogItem>(&[]).is_none());
    }

    #[test]
    fn test_find_by_slug_accepts_fragment() {
        let items = scenario();
        assert_eq!(find_by_slug(&items, "#item-2").unwrap().id.as_str(), "2");
        assert!(find_by_slug(&items, "missing").is_none());
    }

    #[test]
    fn test_sort_kind_parse() {
        assert_eq!("recent".parse::<SortKind>().unwrap(), SortKind::MostRecent);
        assert_eq!("Insertion".parse::<SortKind>().unwrap(), SortKind::Insertion);
        assert!("random".parse::<SortKind>().is_err());
    }
}
