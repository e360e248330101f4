//! Data layer for the catalog backend.
//!
//! Provides the generic entity store, the film and plant catalogs,
//! validation rules, and snapshot persistence.

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod store;

pub use catalog::{FilmCatalog, PlantCatalog};
pub use error::CatalogError;
