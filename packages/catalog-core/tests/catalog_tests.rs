//! End-to-end catalog workflows across both subsystems.

use catalog_core::config::CatalogConfig;
use catalog_core::model::{NewGenre, NewMovie, NewPerson, NewPlant, NewPlantType};
use catalog_core::snapshot::SnapshotStore;
use catalog_core::{CatalogError, FilmCatalog, PlantCatalog};

use tempfile::tempdir;

#[test]
fn test_plant_lifecycle() {
    let catalog = PlantCatalog::new();

    let kind = catalog
        .create_plant_type(NewPlantType {
            name: "Succulent".to_string(),
        })
        .unwrap();
    assert_eq!(kind.id, 1);

    let plant = catalog
        .create_plant(NewPlant {
            scientific_name: "Aloe vera".to_string(),
            common_name: "Aloe".to_string(),
            plant_type: kind.id,
            watering_needs: "low".to_string(),
            ideal_temperature: 22.5,
            description: None,
        })
        .unwrap();
    assert_eq!(plant.id, 1);

    let fetched = catalog.plant(plant.id).unwrap();
    assert_eq!(fetched.scientific_name, "Aloe vera");
    assert_eq!(fetched.common_name, "Aloe");
    assert_eq!(fetched.plant_type, kind.id);
    assert_eq!(fetched.watering_needs, "low");
    assert_eq!(fetched.ideal_temperature, 22.5);

    catalog.delete_plant(plant.id).unwrap();
    assert_eq!(
        catalog.plant(plant.id),
        Err(CatalogError::NotFound {
            entity: "plant",
            id: plant.id
        })
    );
}

#[test]
fn test_movie_lifecycle_with_cast_replace() {
    let catalog = FilmCatalog::new();

    let person = catalog
        .create_person(NewPerson {
            name: "A".to_string(),
            age: 40,
            role: "director".to_string(),
        })
        .unwrap();
    assert_eq!(person.id, 1);

    let genre = catalog
        .create_genre(NewGenre {
            name: "Drama".to_string(),
        })
        .unwrap();
    assert_eq!(genre.id, 1);

    let movie = catalog
        .create_movie(NewMovie {
            title: "X".to_string(),
            director: person.id,
            release_year: 2000,
            duration: 90,
            genre: genre.id,
            country_of_origin: "US".to_string(),
            cast: Vec::new(),
        })
        .unwrap();
    assert_eq!(movie.id, 1);
    assert!(movie.cast.is_empty());

    let updated = catalog
        .update_movie(
            movie.id,
            NewMovie {
                title: "X".to_string(),
                director: person.id,
                release_year: 2000,
                duration: 90,
                genre: genre.id,
                country_of_origin: "US".to_string(),
                cast: vec![person.id],
            },
        )
        .unwrap();
    assert_eq!(updated.cast, vec![person.id]);
    assert_eq!(catalog.movie(movie.id).unwrap().cast, vec![person.id]);
}

#[test]
fn test_snapshot_round_trip() {
    let dir = tempdir().unwrap();
    let config = CatalogConfig {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let store = SnapshotStore::new(&config);

    let (plants, films) = store.load().unwrap();
    let kind = plants
        .create_plant_type(NewPlantType {
            name: "Fern".to_string(),
        })
        .unwrap();
    plants
        .create_plant(NewPlant {
            scientific_name: "Nephrolepis exaltata".to_string(),
            common_name: "Boston fern".to_string(),
            plant_type: kind.id,
            watering_needs: "high".to_string(),
            ideal_temperature: 18.0,
            description: Some("indoor".to_string()),
        })
        .unwrap();

    let director = films
        .create_person(NewPerson {
            name: "B".to_string(),
            age: 55,
            role: "director".to_string(),
        })
        .unwrap();
    let genre = films
        .create_genre(NewGenre {
            name: "Noir".to_string(),
        })
        .unwrap();
    let movie = films
        .create_movie(NewMovie {
            title: "Y".to_string(),
            director: director.id,
            release_year: 1950,
            duration: 101,
            genre: genre.id,
            country_of_origin: "FR".to_string(),
            cast: vec![director.id, 4],
        })
        .unwrap();

    store.save(&plants, &films).unwrap();

    let (plants2, films2) = store.load().unwrap();
    assert_eq!(plants2.plants().unwrap().len(), 1);
    assert_eq!(plants2.plant(1).unwrap().common_name, "Boston fern");

    let restored = films2.movie(movie.id).unwrap();
    assert_eq!(restored.title, "Y");
    assert_eq!(restored.cast, vec![director.id, 4]);

    // Identity assignment resumes past restored records.
    let next = films2
        .create_genre(NewGenre {
            name: "Western".to_string(),
        })
        .unwrap();
    assert_eq!(next.id, genre.id + 1);
}

#[test]
fn test_snapshot_load_without_file_is_empty() {
    let dir = tempdir().unwrap();
    let config = CatalogConfig {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let store = SnapshotStore::new(&config);

    let (plants, films) = store.load().unwrap();
    assert!(plants.plants().unwrap().is_empty());
    assert!(plants.plant_types().unwrap().is_empty());
    assert!(films.movies().unwrap().is_empty());
}

#[test]
fn test_concurrent_readers_never_see_partial_cast() {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    let catalog = Arc::new(FilmCatalog::new());
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

    let movie_with_cast = |cast: Vec<u64>| NewMovie {
        title: "X".to_string(),
        director: director.id,
        release_year: 2000,
        duration: 90,
        genre: genre.id,
        country_of_origin: "US".to_string(),
        cast,
    };

    let first: Vec<u64> = vec![2, 3, 4];
    let second: Vec<u64> = vec![5, 6, 7];
    let movie = catalog.create_movie(movie_with_cast(first.clone())).unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            let done = Arc::clone(&done);
            let first = first.clone();
            let second = second.clone();
            let id = movie.id;
            thread::spawn(move || {
                while !done.load(Ordering::Relaxed) {
                    let cast = catalog.movie(id).unwrap().cast;
                    assert!(
                        cast == first || cast == second,
                        "observed a partial cast set: {:?}",
                        cast
                    );
                }
            })
        })
        .collect();

    for i in 0..500 {
        let cast = if i % 2 == 0 {
            second.clone()
        } else {
            first.clone()
        };
        catalog.update_movie(movie.id, movie_with_cast(cast)).unwrap();
    }

    done.store(true, Ordering::Relaxed);
    for reader in readers {
        reader.join().unwrap();
    }
}
