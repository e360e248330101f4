//! Endpoint handlers for the botanical catalog.

use hyper::{body::Bytes, Request, Response};

use crate::router::{AppState, RouterError};
use catalog_core::model::{NewPlant, NewPlantType};

use super::request_utils::{
    build_empty_response, json_response, map_catalog_error, parse_id, read_json_body,
    MatchitParams,
};

// Plant type endpoints

/// Creates a new plant type.
///
/// # Endpoint
/// `POST /api/plant-types`
///
/// # Request Body
/// ```json
/// {"name": "Succulent"}
/// ```
///
/// # Response
/// - **201 Created**: Returns the stored plant type with its assigned id
/// - **403 Forbidden**: Missing or expired API key
pub async fn create_plant_type(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let new: NewPlantType = read_json_body(req, state.config.request_timeout_ms).await?;
    let stored = state.plants.create_plant_type(new).map_err(map_catalog_error)?;
    json_response(201, stored)
}

/// Lists all plant types. `GET /api/plant-types`
pub async fn list_plant_types(
    _req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let all = state.plants.plant_types().map_err(map_catalog_error)?;
    json_response(200, all)
}

/// Reads one plant type. `GET /api/plant-types/{id}`
pub async fn read_plant_type(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    let stored = state.plants.plant_type(id).map_err(map_catalog_error)?;
    json_response(200, stored)
}

/// Replaces a plant type. `PUT /api/plant-types/{id}`
pub async fn update_plant_type(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    let new: NewPlantType = read_json_body(req, state.config.request_timeout_ms).await?;
    let stored = state
        .plants
        .update_plant_type(id, new)
        .map_err(map_catalog_error)?;
    json_response(200, stored)
}

/// Deletes a plant type. `DELETE /api/plant-types/{id}`
pub async fn delete_plant_type(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    state.plants.delete_plant_type(id).map_err(map_catalog_error)?;
    build_empty_response(204)
}

// Plant endpoints

/// Creates a new plant.
///
/// # Endpoint
/// `POST /api/plants`
///
/// # Request Body
/// ```json
/// {
///   "scientific_name": "Aloe vera",
///   "common_name": "Aloe",
///   "plant_type": 1,
///   "watering_needs": "low",
///   "ideal_temperature": 22.5,
///   "description": null
/// }
/// ```
///
/// # Response
/// - **201 Created**: Returns the stored plant with its assigned id
/// - **422 Unprocessable Entity**: Non-positive temperature, or
///   `plant_type` references a missing row
pub async fn create_plant(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let new: NewPlant = read_json_body(req, state.config.request_timeout_ms).await?;
    let stored = state.plants.create_plant(new).map_err(map_catalog_error)?;
    json_response(201, stored)
}

/// Lists all plants. `GET /api/plants`
pub async fn list_plants(
    _req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let all = state.plants.plants().map_err(map_catalog_error)?;
    json_response(200, all)
}

/// Reads one plant. `GET /api/plants/{id}`
pub async fn read_plant(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    let stored = state.plants.plant(id).map_err(map_catalog_error)?;
    json_response(200, stored)
}

/// Replaces every field of a plant. `PUT /api/plants/{id}`
pub async fn update_plant(
    req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    let new: NewPlant = read_json_body(req, state.config.request_timeout_ms).await?;
    let stored = state
        .plants
        .update_plant(id, new)
        .map_err(map_catalog_error)?;
    json_response(200, stored)
}

/// Deletes a plant. `DELETE /api/plants/{id}`
pub async fn delete_plant(
    _req: Request<hyper::body::Incoming>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params)?;
    state.plants.delete_plant(id).map_err(map_catalog_error)?;
    build_empty_response(204)
}
