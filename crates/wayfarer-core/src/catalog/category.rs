//! Category labels and the category filter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel filter key selecting every category.
pub const ALL_KEY: &str = "all";

/// Display label of the identity filter.
pub const ALL_LABEL: &str = "All";

/// Normalized, comparable form of a category label.
///
/// `"Travel Tips"`, `"travel tips"` and `"travel-tips"` share one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryKey(String);

impl CategoryKey {
    /// Normalize a label.
    pub fn new(label: &str) -> Self {
        let mut key = String::with_capacity(label.len());
        let mut pending_hyphen = false;

        for c in label.trim().chars().flat_map(char::to_lowercase) {
            if c.is_alphanumeric() {
                if pending_hyphen && !key.is_empty() {
                    key.push('-');
                }
                pending_hyphen = false;
                key.push(c);
            } else {
                pending_hyphen = true;
            }
        }

        Self(key)
    }

    /// The normalized key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a label normalizes to this key.
    pub fn matches(&self, label: &str) -> bool {
        CategoryKey::new(label) == *self
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category filter applied by the view engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Identity filter.
    #[default]
    All,
    /// Keep only items whose category normalizes to this key.
    Only(CategoryKey),
}

impl CategoryFilter {
    /// Parse a filter key. `"all"` (any case) and blank keys select everything.
    pub fn parse(key: &str) -> Self {
        let key = CategoryKey::new(key);
        if key.as_str().is_empty() || key.as_str() == ALL_KEY {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(key)
        }
    }

    /// Filter on one category label.
    pub fn only(label: &str) -> Self {
        CategoryFilter::Only(CategoryKey::new(label))
    }

    /// Whether an item with this category passes the filter.
    pub fn admits(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(key) => key.matches(category),
        }
    }

    /// Whether this is the identity filter.
    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_KEY),
            CategoryFilter::Only(key) => write!(f, "{}", key),
        }
    }
}

/// One entry of a category bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    /// Label shown to the user.
    pub label: String,
    /// Filter selected by this option.
    pub filter: CategoryFilter,
}

/// Build the category bar: `All` first, then each distinct category.
///
/// `defaults` come first in their given order; labels from `items` follow in
/// first-appearance order. Labels that normalize to the same key appear once,
/// under the first spelling seen.
pub fn category_options<'a, I>(defaults: &[&'a str], items: I) -> Vec<CategoryOption>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut options = vec![CategoryOption {
        label: ALL_LABEL.to_string(),
        filter: CategoryFilter::All,
    }];

    let labels = defaults.iter().copied().chain(items);
    for label in labels {
        let filter = CategoryFilter::parse(label);
        if filter.is_all() || options.iter().any(|o| o.filter == filter) {
            continue;
        }
        options.push(CategoryOption {
            label: label.trim().to_string(),
            filter,
        });
    }

    options
}
