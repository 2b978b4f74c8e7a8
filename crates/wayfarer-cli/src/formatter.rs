//! Output formatters for catalog listings.

use std::sync::Arc;

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use wayfarer_core::model::LicenseQuote;
use wayfarer_core::{CatalogItem, CatalogKind, CategoryOption, ItemDetails, ViewState};

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter: Send + Sync {
    /// Format a list of items.
    fn format_items(&self, kind: CatalogKind, items: &[Arc<CatalogItem>]) -> String;

    /// Format one item in detail, with a license quote for gallery items.
    fn format_item(&self, item: &CatalogItem, quote: Option<&LicenseQuote>) -> String;

    /// Format a category bar.
    fn format_categories(&self, options: &[CategoryOption]) -> String;

    /// Format a freshly created item.
    fn format_created(&self, item: &CatalogItem) -> String;

    /// Format a catalog that has nothing to list.
    fn format_state(&self, kind: CatalogKind, state: &ViewState) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_items(&self, kind: CatalogKind, items: &[Arc<CatalogItem>]) -> String {
        if items.is_empty() {
            return format!("No {} items found", kind);
        }

        let mut table = Table::new();
        table.set_header(vec!["Slug", "Title", "Category", "Created", "Details"]);

        for item in items {
            table.add_row(vec![
                Cell::new(item.fragment()),
                Cell::new(&item.title),
                Cell::new(&item.category),
                Cell::new(item.created_at.format("%Y-%m-%d")),
                Cell::new(summary(item)),
            ]);
        }

        format!("{}\n{} item(s)", table, items.len())
    }

    fn format_item(&self, item: &CatalogItem, quote: Option<&LicenseQuote>) -> String {
        let mut table = Table::new();
        table.set_header(vec!["Field", "Value"]);

        let mut rows: Vec<(&str, String)> = vec![
            ("id", item.id.to_string()),
            ("title", item.title.clone()),
            ("slug", item.fragment()),
            ("category", item.category.clone()),
            ("asset", item.primary_asset.clone()),
            ("created", item.created_at.to_rfc3339()),
        ];
        rows.extend(detail_rows(&item.details));
        if let Some(quote) = quote {
            rows.push(("license", format!("{} ${}", quote.tier.name(), quote.price)));
        }

        for (field, value) in rows {
            table.add_row(vec![Cell::new(field), Cell::new(value)]);
        }

        table.to_string()
    }

    fn format_categories(&self, options: &[CategoryOption]) -> String {
        let mut table = Table::new();
        table.set_header(vec!["Category", "Filter"]);

        for option in options {
            table.add_row(vec![option.label.clone(), option.filter.to_string()]);
        }

        table.to_string()
    }

    fn format_created(&self, item: &CatalogItem) -> String {
        format!(
            "Published {} \"{}\" as {} (id {})",
            item.kind(),
            item.title,
            item.fragment(),
            item.id
        )
    }

    fn format_state(&self, kind: CatalogKind, state: &ViewState) -> String {
        match state {
            ViewState::Unconfigured => format!(
                "{} catalog unavailable: backend not configured (set WAYFARER_SERVICE_URL and WAYFARER_SERVICE_KEY, or use --demo)",
                kind
            ),
            ViewState::Empty => format!("No {} items found", kind),
            ViewState::Failed { message, retained } => {
                format!("Failed to load {} ({} cached): {}", kind.as_str(), retained, message)
            }
            ViewState::Idle | ViewState::Loading => format!("{} catalog not loaded", kind),
            ViewState::Populated { count } => format!("{} {} loaded", count, kind.as_str()),
        }
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_items(&self, _kind: CatalogKind, items: &[Arc<CatalogItem>]) -> String {
        let items: Vec<&CatalogItem> = items.iter().map(|item| item.as_ref()).collect();
        serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_item(&self, item: &CatalogItem, quote: Option<&LicenseQuote>) -> String {
        serde_json::to_string_pretty(&serde_json::json!({
            "item": item,
            "quote": quote,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    fn format_categories(&self, options: &[CategoryOption]) -> String {
        serde_json::to_string_pretty(options).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_created(&self, item: &CatalogItem) -> String {
        serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_state(&self, kind: CatalogKind, state: &ViewState) -> String {
        serde_json::json!({
            "kind": kind,
            "view": state,
        })
        .to_string()
    }
}

/// One-line kind-specific summary for list rows.
fn summary(item: &CatalogItem) -> String {
    match &item.details {
        ItemDetails::Blog(blog) => {
            let mut text = format!("{} · {}", blog.author, blog.read_time_or_default());
            if blog.featured {
                text.push_str(" · featured");
            }
            text
        }
        ItemDetails::Gallery(gallery) => {
            format!("{} · from ${}", gallery.location, gallery.license.starting_price())
        }
        ItemDetails::Adventure(adventure) => format!(
            "{} · {}{}",
            adventure.location,
            adventure.difficulty,
            adventure
                .duration
                .as_ref()
                .map(|d| format!(" · {}", d))
                .unwrap_or_default()
        ),
        ItemDetails::Reel(reel) => format!(
            "{} views{}",
            reel.views,
            reel.duration
                .as_ref()
                .map(|d| format!(" · {}", d))
                .unwrap_or_default()
        ),
    }
}

fn detail_rows(details: &ItemDetails) -> Vec<(&'static str, String)> {
    match details {
        ItemDetails::Blog(blog) => {
            let mut rows = vec![
                ("author", blog.author.clone()),
                ("read time", blog.read_time_or_default().to_string()),
                ("featured", blog.featured.to_string()),
            ];
            if let Some(excerpt) = &blog.excerpt {
                rows.push(("excerpt", excerpt.clone()));
            }
            if !blog.tags.is_empty() {
                rows.push(("tags", blog.tags.join(", ")));
            }
            if let Some(video) = &blog.video_id {
                rows.push(("video", video.clone()));
            }
            if !blog.gallery_images.is_empty() {
                rows.push(("images", blog.gallery_images.join("\n")));
            }
            rows
        }
        ItemDetails::Gallery(gallery) => vec![
            ("location", gallery.location.clone()),
            ("description", gallery.description.clone()),
            ("personal", format!("${}", gallery.license.personal)),
            ("commercial", format!("${}", gallery.license.commercial)),
            ("exclusive", format!("${}", gallery.license.exclusive)),
        ],
        ItemDetails::Adventure(adventure) => {
            let mut rows = vec![
                ("location", adventure.location.clone()),
                ("difficulty", adventure.difficulty.to_string()),
                ("video", adventure.video_id.clone()),
            ];
            if let Some(duration) = &adventure.duration {
                rows.push(("duration", duration.clone()));
            }
            if !adventure.content_images.is_empty() {
                rows.push(("images", adventure.content_images.join("\n")));
            }
            rows
        }
        ItemDetails::Reel(reel) => {
            let mut rows = vec![("views", reel.views.to_string())];
            if let Some(duration) = &reel.duration {
                rows.push(("duration", duration.clone()));
            }
            rows
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_state_is_labelled() {
        let text = TableFormatter.format_state(CatalogKind::Reel, &ViewState::Unconfigured);
        assert!(text.contains("not configured"));

        let json = JsonFormatter.format_state(CatalogKind::Reel, &ViewState::Unconfigured);
        assert_eq!(json, r#"{"kind":"reel","view":{"state":"unconfigured"}}"#);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            TableFormatter.format_items(CatalogKind::Blog, &[]),
            "No blog items found"
        );
        assert_eq!(JsonFormatter.format_items(CatalogKind::Blog, &[]), "[]");
    }
}
