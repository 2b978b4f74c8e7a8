//! Wayfarer Client - hosted backend for Wayfarer catalogs.
//!
//! Implements the core [`ItemStore`](wayfarer_core::ItemStore) and
//! [`AssetStager`](wayfarer_core::AssetStager) traits over the backend's REST
//! table API and storage API. Configuration comes from
//! `WAYFARER_SERVICE_URL` / `WAYFARER_SERVICE_KEY`; when either is missing the
//! backend resolves to an unconfigured stand-in instead of failing.
//!
//! # Quick Start
//!
//! ```ignore
//! use wayfarer_client::Backend;
//! use wayfarer_core::{CatalogKind, CatalogPage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Backend::from_env()?;
//!
//!     let mut page = CatalogPage::new(CatalogKind::Adventure);
//!     page.load(backend.store()).await.ok();
//!
//!     println!("{:?}", page.snapshot().state);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod rows;
pub mod stager;
pub mod store;

pub use client::RestClient;
pub use config::{ServiceConfig, DEFAULT_TIMEOUT, KEY_VAR, URL_VAR};
pub use error::Error;
pub use stager::{ObjectStoreStager, StorageApiStager};
pub use store::{Backend, RestItemStore, UnconfiguredStore};
