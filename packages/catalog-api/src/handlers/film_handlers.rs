//! Endpoint handlers for the film catalog.

use hyper::{body::Bytes, Request, Response};

use crate::router::{AppState, RouterError};
use catalog_core::model::{NewGenre, NewMovie, NewPerson};

use super::request_utils::{
    build_empty_response, json_response, map_catalog_error, parse_id, read_json_body,
    MatchitParams,
};

// Genre endpoints

/// Creates a new genre. `POST /api/genres`
pub async fn create_genre(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let new: NewGenre = read_json_body(req, state.config.request_timeout_ms).await?;
    let stored = state.films.create_genre(new).map_err(map_catalog_error)?;
    json_response(201, stored)
}

/// Lists all genres. `GET /api/genres`
pub async fn list_genres(
    _req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let all = state.films.genres().map_err(map_catalog_error)?;
    json_response(200, all)
}

/// Reads one genre. `GET /api/genres/{id}`
pub async fn read_genre(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    let stored = state.films.genre(id).map_err(map_catalog_error)?;
    json_response(200, stored)
}

/// Replaces a genre. `PUT /api/genres/{id}`
pub async fn update_genre(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    let new: NewGenre = read_json_body(req, state.config.request_timeout_ms).await?;
    let stored = state
        .films
        .update_genre(id, new)
        .map_err(map_catalog_error)?;
    json_response(200, stored)
}

/// Deletes a genre. `DELETE /api/genres/{id}`
pub async fn delete_genre(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    state.films.delete_genre(id).map_err(map_catalog_error)?;
    build_empty_response(204)
}

// Person endpoints

/// Creates a new person.
///
/// # Endpoint
/// `POST /api/people`
///
/// # Request Body
/// ```json
/// {"name": "A", "age": 40, "role": "director"}
/// ```
///
/// # Response
/// - **201 Created**: Returns the stored person with their assigned id
/// - **422 Unprocessable Entity**: Age outside (0, 100]
pub async fn create_person(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let new: NewPerson = read_json_body(req, state.config.request_timeout_ms).await?;
    let stored = state.films.create_person(new).map_err(map_catalog_error)?;
    json_response(201, stored)
}

/// Lists all people. `GET /api/people`
pub async fn list_people(
    _req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let all = state.films.people().map_err(map_catalog_error)?;
    json_response(200, all)
}

/// Reads one person. `GET /api/people/{id}`
pub async fn read_person(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    let stored = state.films.person(id).map_err(map_catalog_error)?;
    json_response(200, stored)
}

/// Replaces every field of a person. `PUT /api/people/{id}`
pub async fn update_person(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    let new: NewPerson = read_json_body(req, state.config.request_timeout_ms).await?;
    let stored = state
        .films
        .update_person(id, new)
        .map_err(map_catalog_error)?;
    json_response(200, stored)
}

/// Deletes a person and their cast links. `DELETE /api/people/{id}`
pub async fn delete_person(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    state.films.delete_person(id).map_err(map_catalog_error)?;
    build_empty_response(204)
}

// Movie endpoints

/// Creates a new movie with its cast list.
///
/// # Endpoint
/// `POST /api/movies`
///
/// # Request Body
/// ```json
/// {
///   "title": "X",
///   "director": 1,
///   "release_year": 2000,
///   "duration": 90,
///   "genre": 1,
///   "country_of_origin": "US",
///   "cast": [3, 7, 9]
/// }
/// ```
///
/// # Response
/// - **201 Created**: Returns the stored movie including its cast
/// - **422 Unprocessable Entity**: Release year before 1888, non-positive
///   duration, or director/genre references a missing row
///
/// # Notes
/// - Duplicate cast ids collapse to a single link
/// - Cast person ids are not existence-checked at write time
pub async fn create_movie(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let new: NewMovie = read_json_body(req, state.config.request_timeout_ms).await?;
    let stored = state.films.create_movie(new).map_err(map_catalog_error)?;
    json_response(201, stored)
}

/// Lists all movies with their casts. `GET /api/movies`
pub async fn list_movies(
    _req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let all = state.films.movies().map_err(map_catalog_error)?;
    json_response(200, all)
}

/// Reads one movie with its cast. `GET /api/movies/{id}`
pub async fn read_movie(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    let stored = state.films.movie(id).map_err(map_catalog_error)?;
    json_response(200, stored)
}

/// Replaces every field of a movie and its full cast list.
/// `PUT /api/movies/{id}`
pub async fn update_movie(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    let new: NewMovie = read_json_body(req, state.config.request_timeout_ms).await?;
    let stored = state
        .films
        .update_movie(id, new)
        .map_err(map_catalog_error)?;
    json_response(200, stored)
}

/// Deletes a movie and its cast links. `DELETE /api/movies/{id}`
pub async fn delete_movie(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    state.films.delete_movie(id).map_err(map_catalog_error)?;
    build_empty_response(204)
}
