//! HTTP endpoint handlers.

pub mod auth_handlers;
pub mod film_handlers;
pub mod plant_handlers;
pub mod request_utils;
pub mod response;

pub use auth_handlers::login;
pub use film_handlers::{
    create_genre, create_movie, create_person, delete_genre, delete_movie, delete_person,
    list_genres, list_movies, list_people, read_genre, read_movie, read_person, update_genre,
    update_movie, update_person,
};
pub use plant_handlers::{
    create_plant, create_plant_type, delete_plant, delete_plant_type, list_plant_types,
    list_plants, read_plant, read_plant_type, update_plant, update_plant_type,
};
pub use response::ErrorResponse;
