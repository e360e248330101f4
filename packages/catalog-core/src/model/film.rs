//! Film catalog entities: genres, people, movies, and cast links.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::Validate;
use crate::store::Entity;

/// Earliest year a movie can claim; cinema has no earlier origin.
pub const MIN_RELEASE_YEAR: i32 = 1888;

/// A movie genre, referenced by `Movie::genre`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

impl Entity for Genre {
    const KIND: &'static str = "genre";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Inbound payload for creating or replacing a genre.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGenre {
    pub name: String,
}

impl From<NewGenre> for Genre {
    fn from(new: NewGenre) -> Self {
        Genre {
            id: 0,
            name: new.name,
        }
    }
}

impl Validate for NewGenre {
    fn validate(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}

/// A person in the film industry, referenced by `Movie::director` and by
/// cast links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub age: i32,
    pub role: String,
}

impl Entity for Person {
    const KIND: &'static str = "person";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Inbound payload for creating or replacing a person.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub age: i32,
    pub role: String,
}

impl From<NewPerson> for Person {
    fn from(new: NewPerson) -> Self {
        Person {
            id: 0,
            name: new.name,
            age: new.age,
            role: new.role,
        }
    }
}

impl Validate for NewPerson {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.age <= 0 || self.age > 100 {
            return Err(CatalogError::Validation("invalid age"));
        }
        Ok(())
    }
}

/// A movie record. `director` and `genre` are foreign keys; the cast lives
/// in the join table, not on the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub director: u64,
    pub release_year: i32,
    pub duration: i32,
    pub genre: u64,
    pub country_of_origin: String,
}

impl Entity for Movie {
    const KIND: &'static str = "movie";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Inbound payload for creating or replacing a movie, including its full
/// cast list.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub director: u64,
    pub release_year: i32,
    pub duration: i32,
    pub genre: u64,
    pub country_of_origin: String,
    #[serde(default)]
    pub cast: Vec<u64>,
}

impl From<NewMovie> for Movie {
    fn from(new: NewMovie) -> Self {
        Movie {
            id: 0,
            title: new.title,
            director: new.director,
            release_year: new.release_year,
            duration: new.duration,
            genre: new.genre,
            country_of_origin: new.country_of_origin,
        }
    }
}

impl Validate for NewMovie {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.release_year < MIN_RELEASE_YEAR {
            return Err(CatalogError::Validation("invalid release year"));
        }
        if self.duration <= 0 {
            return Err(CatalogError::Validation("invalid duration"));
        }
        Ok(())
    }
}

/// Outbound movie representation: the stored row plus its resolved cast,
/// in link order. Director and genre stay raw ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    pub id: u64,
    pub title: String,
    pub director: u64,
    pub release_year: i32,
    pub duration: i32,
    pub genre: u64,
    pub country_of_origin: String,
    pub cast: Vec<u64>,
}

impl MovieRecord {
    /// Combines a stored movie with its cast list.
    pub fn new(movie: Movie, cast: Vec<u64>) -> Self {
        MovieRecord {
            id: movie.id,
            title: movie.title,
            director: movie.director,
            release_year: movie.release_year,
            duration: movie.duration,
            genre: movie.genre,
            country_of_origin: movie.country_of_origin,
            cast,
        }
    }
}

/// One row of the Movie↔Person join table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastLink {
    pub movie_id: u64,
    pub person_id: u64,
}
