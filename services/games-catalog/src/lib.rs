//! Catalog of games served from a single serverless HTTP handler: list,
//! create (with optional cover upload) and delete, backed by Postgres and
//! an S3-compatible object store.

pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod lambda;
pub mod models;
pub mod storage;
pub mod types;
pub mod validation;

pub use config::CatalogConfig;
pub use db::{GameRepository, PgGameRepository};
pub use error::{CatalogError, CatalogResult};
pub use handler::CatalogHandler;
pub use storage::{ImageStore, S3ImageStore};
pub use types::{CatalogEvent, CatalogResponse};
