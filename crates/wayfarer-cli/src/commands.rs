//! Command execution.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use wayfarer_core::form::{AdventureDraft, BlogDraft, GalleryDraft, ReelDraft};
use wayfarer_core::{
    Asset, AssetSource, AssetStager, CatalogKind, CatalogPage, CategoryFilter, CreationForm,
    Draft, DraftDetails, FetchError, ItemStore, LicensePrices, LicenseTier, SlugPolicy, SortKind,
    SubmitError, ViewState,
};

use crate::formatter::Formatter;
use crate::{Command, CommonArgs, CreateCommand};

/// Execution errors.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The catalog could not be loaded.
    #[error("failed to load {kind} catalog: {source}")]
    Load {
        kind: CatalogKind,
        #[source]
        source: FetchError,
    },

    /// No item with the requested slug.
    #[error("no {kind} with slug `{slug}`")]
    NotFound { kind: CatalogKind, slug: String },

    /// A local asset could not be read.
    #[error("cannot read asset `{}`: {}", .path.display(), .source)]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Validation or persistence failed.
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Store and stager used by the commands.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn ItemStore>,
    pub stager: Arc<dyn AssetStager>,
}

/// Execute a command and return formatted output.
pub async fn execute(
    services: &Services,
    command: Command,
    formatter: &dyn Formatter,
) -> Result<String, CommandError> {
    match command {
        Command::List {
            kind,
            category,
            sort,
            limit,
        } => list(services, kind, category.as_deref(), sort, limit, formatter).await,
        Command::Categories { kind } => {
            let page = load_page(services, kind).await?;
            if let Some(state) = unavailable(&page) {
                return Ok(formatter.format_state(kind, &state));
            }
            Ok(formatter.format_categories(&page.categories()))
        }
        Command::Featured { kind } => {
            let page = load_page(services, kind).await?;
            match page.featured() {
                Some(item) => Ok(formatter.format_item(&item, None)),
                None => Ok(formatter.format_state(kind, &page.snapshot().state)),
            }
        }
        Command::Show {
            kind,
            slug,
            license,
        } => show(services, kind, &slug, license.into(), formatter).await,
        Command::Create { slug_policy, draft } => {
            create(services, draft, slug_policy.into(), formatter).await
        }
    }
}

async fn list(
    services: &Services,
    kind: CatalogKind,
    category: Option<&str>,
    sort: SortKind,
    limit: Option<usize>,
    formatter: &dyn Formatter,
) -> Result<String, CommandError> {
    let mut page = load_page(services, kind).await?;
    if let Some(state) = unavailable(&page) {
        return Ok(formatter.format_state(kind, &state));
    }

    page.set_filter(category.map_or(CategoryFilter::All, CategoryFilter::parse));
    page.set_sort(sort);

    let mut items = page.visible();
    if let Some(limit) = limit {
        items.truncate(limit);
    }

    Ok(formatter.format_items(kind, &items))
}

async fn show(
    services: &Services,
    kind: CatalogKind,
    slug: &str,
    tier: LicenseTier,
    formatter: &dyn Formatter,
) -> Result<String, CommandError> {
    let mut page = load_page(services, kind).await?;
    if page.snapshot().state == ViewState::Unconfigured {
        return Ok(formatter.format_state(kind, &ViewState::Unconfigured));
    }

    page.choose_license(tier);
    let item = page
        .select_slug(slug)
        .ok_or_else(|| CommandError::NotFound {
            kind,
            slug: slug.to_string(),
        })?;

    Ok(formatter.format_item(&item, page.quote().as_ref()))
}

async fn create(
    services: &Services,
    command: CreateCommand,
    policy: SlugPolicy,
    formatter: &dyn Formatter,
) -> Result<String, CommandError> {
    let draft = build_draft(command).await?;
    let mut form = CreationForm::new(services.store.clone(), services.stager.clone(), draft)
        .with_slug_policy(policy);

    let item = form.submit().await?;
    Ok(formatter.format_created(&item))
}

/// Load a catalog page. An unconfigured backend is not an error: the page
/// reports [`ViewState::Unconfigured`].
async fn load_page(services: &Services, kind: CatalogKind) -> Result<CatalogPage, CommandError> {
    let mut page = CatalogPage::new(kind);
    match page.load(services.store.as_ref()).await {
        Ok(_) => Ok(page),
        Err(error) if error.is_unconfigured() => Ok(page),
        Err(source) => Err(CommandError::Load { kind, source }),
    }
}

/// The page's state when there is nothing to list.
fn unavailable(page: &CatalogPage) -> Option<ViewState> {
    let state = page.snapshot().state;
    match state {
        ViewState::Unconfigured | ViewState::Empty => Some(state),
        _ => None,
    }
}

fn local_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// `http(s)://` values are used as-is; anything else is read from disk.
async fn asset_source(value: &str) -> Result<AssetSource, CommandError> {
    match local_path(value) {
        None => Ok(AssetSource::from_url(value.trim())),
        Some(path) => match Asset::from_path(&path).await {
            Ok(asset) => Ok(AssetSource::Upload(asset)),
            Err(source) => Err(CommandError::Asset { path, source }),
        },
    }
}

async fn asset_sources(values: &[String]) -> Result<Vec<AssetSource>, CommandError> {
    let mut sources = Vec::with_capacity(values.len());
    for value in values {
        sources.push(asset_source(value).await?);
    }
    Ok(sources)
}

fn base_draft(kind: CatalogKind, common: CommonArgs) -> Draft {
    let draft = Draft::new(kind).with_title(common.title);
    match common.category {
        Some(category) => draft.with_category(category),
        None => draft,
    }
}

async fn build_draft(command: CreateCommand) -> Result<Draft, CommandError> {
    let kind = command.kind();
    let draft = match command {
        CreateCommand::Adventure {
            common,
            cover,
            location,
            video_id,
            description,
            duration,
            difficulty,
            images,
        } => base_draft(kind, common)
            .with_cover(asset_source(&cover).await?)
            .with_details(DraftDetails::Adventure(AdventureDraft {
                location,
                description,
                video_id,
                duration,
                difficulty: difficulty.into(),
                content_images: asset_sources(&images).await?,
            })),
        CreateCommand::Blog {
            common,
            cover,
            content,
            author,
            excerpt,
            tags,
            video_id,
            images,
            read_time,
            featured,
        } => base_draft(kind, common)
            .with_cover(asset_source(&cover).await?)
            .with_details(DraftDetails::Blog(BlogDraft {
                excerpt,
                content,
                author,
                tags,
                video_id,
                gallery_images: asset_sources(&images).await?,
                read_time,
                featured,
            })),
        CreateCommand::Gallery {
            common,
            cover,
            location,
            description,
            personal,
            commercial,
            exclusive,
        } => base_draft(kind, common)
            .with_cover(asset_source(&cover).await?)
            .with_details(DraftDetails::Gallery(GalleryDraft {
                location,
                description,
                license: LicensePrices {
                    personal,
                    commercial,
                    exclusive,
                },
            })),
        CreateCommand::Reel {
            common,
            video_url,
            duration,
            views,
        } => base_draft(kind, common).with_details(DraftDetails::Reel(ReelDraft {
            video_url,
            duration,
            views,
        })),
    };
    Ok(draft)
}
