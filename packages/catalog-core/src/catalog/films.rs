//! Film catalog: genres, people, movies, and the cast association manager.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::{
    CastLink, Genre, Movie, MovieRecord, NewGenre, NewMovie, NewPerson, Person, Validate,
};
use crate::store::EntityStore;

/// The Movie↔Person join table.
///
/// Links are kept in the order they were created so `cast_for` reflects
/// link order. Replacement is whole-set: a movie's links are dropped and
/// re-appended from the new list with duplicates collapsed to their first
/// occurrence.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CastLinks {
    links: Vec<CastLink>,
}

impl CastLinks {
    /// Replaces the full set of links for a movie.
    ///
    /// Person ids are taken as given; existence is not checked here. A
    /// dangling id only surfaces when the cast is resolved for display.
    pub fn set_cast(&mut self, movie_id: u64, person_ids: &[u64]) {
        self.remove_movie(movie_id);
        for &person_id in person_ids {
            let already_linked = self
                .links
                .iter()
                .any(|l| l.movie_id == movie_id && l.person_id == person_id);
            if !already_linked {
                self.links.push(CastLink {
                    movie_id,
                    person_id,
                });
            }
        }
    }

    /// Returns the person ids linked to a movie, in link order.
    pub fn cast_for(&self, movie_id: u64) -> Vec<u64> {
        self.links
            .iter()
            .filter(|l| l.movie_id == movie_id)
            .map(|l| l.person_id)
            .collect()
    }

    /// Removes every link referencing the movie.
    pub fn remove_movie(&mut self, movie_id: u64) {
        self.links.retain(|l| l.movie_id != movie_id);
    }

    /// Removes every link referencing the person.
    pub fn remove_person(&mut self, person_id: u64) {
        self.links.retain(|l| l.person_id != person_id);
    }

    /// Returns the total number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true if the join table is empty.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Stores owned by the film catalog. Serialized as one unit in snapshots.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FilmState {
    pub genres: EntityStore<Genre>,
    pub people: EntityStore<Person>,
    pub movies: EntityStore<Movie>,
    pub cast: CastLinks,
}

/// The film catalog subsystem.
///
/// A single lock over all four stores makes movie create/update/delete
/// atomic with respect to readers: a concurrent `movie` call sees either
/// the old complete cast set or the new one, never a partial replacement.
#[derive(Debug, Default)]
pub struct FilmCatalog {
    state: RwLock<FilmState>,
}

impl FilmCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a catalog from snapshot state.
    pub fn from_state(state: FilmState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Clones the current state for snapshotting.
    pub fn snapshot_state(&self) -> Result<FilmState, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        Ok(FilmState {
            genres: state.genres.clone(),
            people: state.people.clone(),
            movies: state.movies.clone(),
            cast: state.cast.clone(),
        })
    }

    // Genre operations

    pub fn create_genre(&self, new: NewGenre) -> Result<Genre, CatalogError> {
        new.validate()?;
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        Ok(state.genres.insert(new.into()))
    }

    pub fn genre(&self, id: u64) -> Result<Genre, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        state.genres.get(id).cloned()
    }

    pub fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        Ok(state.genres.list())
    }

    pub fn update_genre(&self, id: u64, new: NewGenre) -> Result<Genre, CatalogError> {
        new.validate()?;
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        state.genres.update(id, new.into())
    }

    /// Deletes a genre. Movies referencing it keep their foreign key;
    /// integrity is enforced at write time only.
    pub fn delete_genre(&self, id: u64) -> Result<(), CatalogError> {
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        state.genres.remove(id).map(|_| ())
    }

    // Person operations

    pub fn create_person(&self, new: NewPerson) -> Result<Person, CatalogError> {
        new.validate()?;
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        Ok(state.people.insert(new.into()))
    }

    pub fn person(&self, id: u64) -> Result<Person, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        state.people.get(id).cloned()
    }

    pub fn people(&self) -> Result<Vec<Person>, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        Ok(state.people.list())
    }

    pub fn update_person(&self, id: u64, new: NewPerson) -> Result<Person, CatalogError> {
        new.validate()?;
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        state.people.update(id, new.into())
    }

    /// Deletes a person and any cast links naming them, in one critical
    /// section. Links exist only while both parent rows exist.
    pub fn delete_person(&self, id: u64) -> Result<(), CatalogError> {
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        state.people.remove(id)?;
        state.cast.remove_person(id);
        Ok(())
    }

    // Movie operations

    /// Creates a movie and installs its cast list atomically.
    pub fn create_movie(&self, new: NewMovie) -> Result<MovieRecord, CatalogError> {
        new.validate()?;
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        check_movie_refs(&state, &new)?;
        let cast_ids = new.cast.clone();
        let movie = state.movies.insert(Movie::from(new));
        state.cast.set_cast(movie.id, &cast_ids);
        let cast = state.cast.cast_for(movie.id);
        Ok(MovieRecord::new(movie, cast))
    }

    /// Returns a movie with its cast resolved from the join table.
    pub fn movie(&self, id: u64) -> Result<MovieRecord, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        let movie = state.movies.get(id)?.clone();
        let cast = state.cast.cast_for(id);
        Ok(MovieRecord::new(movie, cast))
    }

    /// Returns all movies with their casts resolved, in insertion order.
    pub fn movies(&self) -> Result<Vec<MovieRecord>, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        Ok(state
            .movies
            .list()
            .into_iter()
            .map(|m| {
                let cast = state.cast.cast_for(m.id);
                MovieRecord::new(m, cast)
            })
            .collect())
    }

    /// Replaces every field of a movie and its full cast list atomically.
    pub fn update_movie(&self, id: u64, new: NewMovie) -> Result<MovieRecord, CatalogError> {
        new.validate()?;
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        check_movie_refs(&state, &new)?;
        let cast_ids = new.cast.clone();
        let movie = state.movies.update(id, Movie::from(new))?;
        state.cast.set_cast(id, &cast_ids);
        let cast = state.cast.cast_for(id);
        Ok(MovieRecord::new(movie, cast))
    }

    /// Deletes a movie and its cast links in one critical section, so no
    /// link ever references a nonexistent movie.
    pub fn delete_movie(&self, id: u64) -> Result<(), CatalogError> {
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        state.movies.remove(id)?;
        state.cast.remove_movie(id);
        Ok(())
    }
}

/// Verifies that a movie's director and genre references point at existing
/// rows. Cast person ids are deliberately left unchecked; see `CastLinks`.
fn check_movie_refs(state: &FilmState, new: &NewMovie) -> Result<(), CatalogError> {
    if !state.people.contains(new.director) {
        return Err(CatalogError::DanglingReference {
            entity: "movie",
            field: "director",
            target: "person",
            id: new.director,
        });
    }
    if !state.genres.contains(new.genre) {
        return Err(CatalogError::DanglingReference {
            entity: "movie",
            field: "genre",
            target: "genre",
            id: new.genre,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntest::timeout;

    fn seed(catalog: &FilmCatalog) -> (Person, Genre) {
        let director = catalog
            .create_person(NewPerson {
                name: "A".to_string(),
                age: 40,
                role: "director".to_string(),
            })
            .unwrap();
        let genre = catalog
            .create_genre(NewGenre {
                name: "Drama".to_string(),
            })
            .unwrap();
        (director, genre)
    }

    fn new_movie(director: u64, genre: u64, cast: Vec<u64>) -> NewMovie {
        NewMovie {
            title: "X".to_string(),
            director,
            release_year: 2000,
            duration: 90,
            genre,
            country_of_origin: "US".to_string(),
            cast,
        }
    }

    #[timeout(1000)]
    #[test]
    fn test_cast_duplicates_collapse() {
        let catalog = FilmCatalog::new();
        let (director, genre) = seed(&catalog);
        let movie = catalog
            .create_movie(new_movie(director.id, genre.id, vec![3, 7, 7, 9]))
            .unwrap();
        assert_eq!(movie.cast, vec![3, 7, 9]);
        assert_eq!(catalog.movie(movie.id).unwrap().cast, vec![3, 7, 9]);
    }

    #[timeout(1000)]
    #[test]
    fn test_cast_preserves_link_order() {
        let catalog = FilmCatalog::new();
        let (director, genre) = seed(&catalog);
        let movie = catalog
            .create_movie(new_movie(director.id, genre.id, vec![9, 3, 7]))
            .unwrap();
        assert_eq!(movie.cast, vec![9, 3, 7]);
    }

    #[timeout(1000)]
    #[test]
    fn test_update_replaces_full_cast() {
        let catalog = FilmCatalog::new();
        let (director, genre) = seed(&catalog);
        let movie = catalog
            .create_movie(new_movie(director.id, genre.id, Vec::new()))
            .unwrap();
        assert!(movie.cast.is_empty());

        let updated = catalog
            .update_movie(movie.id, new_movie(director.id, genre.id, vec![director.id]))
            .unwrap();
        assert_eq!(updated.id, movie.id);
        assert_eq!(updated.cast, vec![director.id]);
    }

    #[timeout(1000)]
    #[test]
    fn test_delete_movie_removes_its_links() {
        let catalog = FilmCatalog::new();
        let (director, genre) = seed(&catalog);
        let movie = catalog
            .create_movie(new_movie(director.id, genre.id, vec![3, 7]))
            .unwrap();
        catalog.delete_movie(movie.id).unwrap();
        assert!(catalog.movie(movie.id).is_err());

        let state = catalog.snapshot_state().unwrap();
        assert!(state.cast.is_empty());
    }

    #[timeout(1000)]
    #[test]
    fn test_delete_person_removes_their_links() {
        let catalog = FilmCatalog::new();
        let (director, genre) = seed(&catalog);
        let actor = catalog
            .create_person(NewPerson {
                name: "B".to_string(),
                age: 30,
                role: "actor".to_string(),
            })
            .unwrap();
        let movie = catalog
            .create_movie(new_movie(director.id, genre.id, vec![actor.id, 9]))
            .unwrap();

        catalog.delete_person(actor.id).unwrap();
        assert_eq!(catalog.movie(movie.id).unwrap().cast, vec![9]);
    }

    #[timeout(1000)]
    #[test]
    fn test_unknown_director_is_rejected() {
        let catalog = FilmCatalog::new();
        let (_, genre) = seed(&catalog);
        let err = catalog
            .create_movie(new_movie(42, genre.id, Vec::new()))
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DanglingReference {
                field: "director",
                id: 42,
                ..
            }
        ));
        assert!(catalog.movies().unwrap().is_empty());
    }

    #[timeout(1000)]
    #[test]
    fn test_unknown_genre_is_rejected() {
        let catalog = FilmCatalog::new();
        let (director, _) = seed(&catalog);
        let err = catalog
            .create_movie(new_movie(director.id, 42, Vec::new()))
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DanglingReference {
                field: "genre",
                id: 42,
                ..
            }
        ));
    }

    #[timeout(1000)]
    #[test]
    fn test_cast_ids_are_not_reference_checked() {
        let catalog = FilmCatalog::new();
        let (director, genre) = seed(&catalog);
        // Persons 500 and 501 do not exist; the links are still accepted.
        let movie = catalog
            .create_movie(new_movie(director.id, genre.id, vec![500, 501]))
            .unwrap();
        assert_eq!(movie.cast, vec![500, 501]);
    }

    #[timeout(1000)]
    #[test]
    fn test_validation_failure_leaves_stores_untouched() {
        let catalog = FilmCatalog::new();
        let (director, genre) = seed(&catalog);
        let mut bad = new_movie(director.id, genre.id, vec![1]);
        bad.release_year = 1887;
        assert!(catalog.create_movie(bad).is_err());
        assert!(catalog.movies().unwrap().is_empty());
        assert!(catalog.snapshot_state().unwrap().cast.is_empty());
    }

    #[timeout(1000)]
    #[test]
    fn test_movies_list_resolves_each_cast() {
        let catalog = FilmCatalog::new();
        let (director, genre) = seed(&catalog);
        let first = catalog
            .create_movie(new_movie(director.id, genre.id, vec![1]))
            .unwrap();
        let second = catalog
            .create_movie(new_movie(director.id, genre.id, vec![2, 3]))
            .unwrap();

        let all = catalog.movies().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].cast, vec![1]);
        assert_eq!(all[1].id, second.id);
        assert_eq!(all[1].cast, vec![2, 3]);
    }

    #[timeout(1000)]
    #[test]
    fn test_genre_and_person_crud() {
        let catalog = FilmCatalog::new();
        let (director, genre) = seed(&catalog);

        let renamed = catalog
            .update_genre(
                genre.id,
                NewGenre {
                    name: "Thriller".to_string(),
                },
            )
            .unwrap();
        assert_eq!(renamed.name, "Thriller");

        let older = catalog
            .update_person(
                director.id,
                NewPerson {
                    name: "A".to_string(),
                    age: 41,
                    role: "director".to_string(),
                },
            )
            .unwrap();
        assert_eq!(older.age, 41);

        catalog.delete_genre(genre.id).unwrap();
        assert!(catalog.genre(genre.id).is_err());
    }
}
