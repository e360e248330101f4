//! Canonical entity schemas and validation rules.
//!
//! Each entity has one stored shape (with id) and one inbound payload shape
//! (without id). Payloads are validated before any store mutation.

pub mod film;
pub mod plant;

pub use film::{CastLink, Genre, Movie, MovieRecord, NewGenre, NewMovie, NewPerson, Person};
pub use plant::{NewPlant, NewPlantType, Plant, PlantType};

use crate::error::CatalogError;

/// Closed validation rules applied to inbound payloads.
pub trait Validate {
    /// Checks bounded-range and domain rules. Never checks other stores.
    fn validate(&self) -> Result<(), CatalogError>;
}
