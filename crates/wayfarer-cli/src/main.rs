//! Wayfarer Command-Line Client
//!
//! Browse the travel catalogs (blogs, gallery, adventures, reels) and publish
//! new items to the hosted backend.

mod commands;
mod demo;
mod formatter;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use formatter::OutputFormat;
use wayfarer_client::{Backend, ServiceConfig, KEY_VAR, URL_VAR};
use wayfarer_core::{
    CatalogKind, Difficulty, LicenseTier, MemoryStager, SlugPolicy, SortKind,
    UnconfiguredServiceError,
};

use crate::commands::Services;

/// Wayfarer Command-Line Client
#[derive(Parser, Debug)]
#[command(name = "wayfarer")]
#[command(version, about = "Browse and publish Wayfarer travel catalogs")]
pub struct Args {
    /// Use a seeded in-memory catalog instead of the backend
    #[arg(long, global = true)]
    pub demo: bool,

    /// Backend URL (overrides WAYFARER_SERVICE_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Backend API key (overrides WAYFARER_SERVICE_KEY)
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// Base URL for public asset links
    #[arg(long, global = true)]
    pub public_base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Output format
    #[arg(long, global = true, default_value = "table", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Catalog commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the items of a catalog
    List {
        /// Catalog kind (blog, gallery, adventure, reel)
        kind: CatalogKind,

        /// Only items of this category ("all" for every category)
        #[arg(long)]
        category: Option<String>,

        /// Sort order (recent, oldest, insertion, title)
        #[arg(long, default_value = "recent")]
        sort: SortKind,

        /// Show at most this many items
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the category bar of a catalog
    Categories {
        /// Catalog kind
        kind: CatalogKind,
    },

    /// Show the hero item of a catalog
    Featured {
        /// Catalog kind
        kind: CatalogKind,
    },

    /// Show one item by slug or #fragment
    Show {
        /// Catalog kind
        kind: CatalogKind,

        /// Slug, with or without leading '#'
        slug: String,

        /// License tier to quote for gallery items
        #[arg(long, value_enum, default_value_t = TierArg::Personal)]
        license: TierArg,
    },

    /// Publish a new item
    Create {
        /// What to do when the slug is already taken
        #[arg(long, value_enum, default_value_t = PolicyArg::Suffix)]
        slug_policy: PolicyArg,

        #[command(subcommand)]
        draft: CreateCommand,
    },
}

/// Fields common to every draft.
#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// Title
    #[arg(long)]
    pub title: String,

    /// Category label (defaults to the catalog's first category)
    #[arg(long)]
    pub category: Option<String>,
}

/// Kind-specific draft fields.
#[derive(Subcommand, Debug)]
pub enum CreateCommand {
    /// Publish an adventure vlog
    Adventure {
        #[command(flatten)]
        common: CommonArgs,

        /// Cover image: local path or http(s) URL
        #[arg(long)]
        cover: String,

        /// Place of the adventure
        #[arg(long)]
        location: String,

        /// Video id of the vlog
        #[arg(long)]
        video_id: String,

        /// Long description
        #[arg(long, default_value = "")]
        description: String,

        /// Display duration, e.g. "18:42"
        #[arg(long, default_value = "")]
        duration: String,

        /// Difficulty rating
        #[arg(long, value_enum, default_value_t = DifficultyArg::Moderate)]
        difficulty: DifficultyArg,

        /// Inline image: local path or URL (repeatable, at most 4)
        #[arg(long = "image")]
        images: Vec<String>,
    },

    /// Publish a blog post
    Blog {
        #[command(flatten)]
        common: CommonArgs,

        /// Cover image: local path or http(s) URL
        #[arg(long)]
        cover: String,

        /// Body (HTML)
        #[arg(long)]
        content: String,

        /// Author name
        #[arg(long)]
        author: String,

        /// Short teaser
        #[arg(long, default_value = "")]
        excerpt: String,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Embedded video id
        #[arg(long, default_value = "")]
        video_id: String,

        /// Gallery image: local path or URL (repeatable)
        #[arg(long = "image")]
        images: Vec<String>,

        /// Read time, e.g. "7 min read"
        #[arg(long, default_value = "")]
        read_time: String,

        /// Feature the post on the landing page
        #[arg(long)]
        featured: bool,
    },

    /// Publish a licensable photograph
    Gallery {
        #[command(flatten)]
        common: CommonArgs,

        /// Image: local path or http(s) URL
        #[arg(long)]
        cover: String,

        /// Where the photo was taken
        #[arg(long)]
        location: String,

        /// Caption
        #[arg(long, default_value = "")]
        description: String,

        /// Personal license price
        #[arg(long)]
        personal: u32,

        /// Commercial license price
        #[arg(long)]
        commercial: u32,

        /// Exclusive license price
        #[arg(long)]
        exclusive: u32,
    },

    /// Publish a reel
    Reel {
        #[command(flatten)]
        common: CommonArgs,

        /// Video URL
        #[arg(long)]
        video_url: String,

        /// Display duration
        #[arg(long, default_value = "")]
        duration: String,

        /// Initial view count
        #[arg(long, default_value_t = 0)]
        views: u64,
    },
}

impl CreateCommand {
    /// Catalog the draft goes to.
    pub fn kind(&self) -> CatalogKind {
        match self {
            CreateCommand::Adventure { .. } => CatalogKind::Adventure,
            CreateCommand::Blog { .. } => CatalogKind::Blog,
            CreateCommand::Gallery { .. } => CatalogKind::Gallery,
            CreateCommand::Reel { .. } => CatalogKind::Reel,
        }
    }
}

/// License tier flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TierArg {
    Personal,
    Commercial,
    Exclusive,
}

impl From<TierArg> for LicenseTier {
    fn from(arg: TierArg) -> Self {
        match arg {
            TierArg::Personal => LicenseTier::Personal,
            TierArg::Commercial => LicenseTier::Commercial,
            TierArg::Exclusive => LicenseTier::Exclusive,
        }
    }
}

/// Slug collision flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Append -2, -3, ...
    Suffix,
    /// Refuse to publish
    Reject,
    /// Let the backend decide
    Allow,
}

impl From<PolicyArg> for SlugPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Suffix => SlugPolicy::Suffix,
            PolicyArg::Reject => SlugPolicy::Reject,
            PolicyArg::Allow => SlugPolicy::Allow,
        }
    }
}

/// Difficulty flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Moderate,
    Challenging,
    Extreme,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Moderate => Difficulty::Moderate,
            DifficultyArg::Challenging => Difficulty::Challenging,
            DifficultyArg::Extreme => Difficulty::Extreme,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("wayfarer=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let services = connect(&args)?;
    let formatter = formatter::create_formatter(args.format);

    let output = commands::execute(&services, args.command, &*formatter).await?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

/// Resolve the store and stager for this invocation.
fn connect(args: &Args) -> anyhow::Result<Services> {
    if args.demo {
        tracing::info!("using demo catalog");
        return Ok(Services {
            store: Arc::new(demo::demo_store()),
            stager: Arc::new(MemoryStager::new()),
        });
    }

    let (store, stager) = Backend::connect(service_config(args))?.into_parts();
    Ok(Services { store, stager })
}

/// Flags take precedence over the environment.
fn service_config(args: &Args) -> Result<ServiceConfig, UnconfiguredServiceError> {
    let config = ServiceConfig::from_lookup(|name| {
        let flag = match name {
            URL_VAR => args.url.clone(),
            KEY_VAR => args.key.clone(),
            _ => None,
        };
        flag.or_else(|| std::env::var(name).ok())
    })?
    .with_timeout(Duration::from_secs(args.timeout));

    Ok(match &args.public_base_url {
        Some(url) => config.with_public_base_url(url),
        None => config,
    })
}
