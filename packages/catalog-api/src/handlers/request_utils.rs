//! Request utilities shared by the endpoint handlers.

use http_body_util::BodyExt;
use hyper::{body::Bytes, Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time;

use crate::router::RouterError;
use catalog_core::CatalogError;

use super::response::ApiResponse;

/// Type alias for matchit parameters with explicit lifetimes.
pub type MatchitParams<'a, 'b> = matchit::Params<'a, 'b>;

/// Reads the request body with a timeout and deserializes it.
pub async fn read_json_body<T: DeserializeOwned>(
    req: Request<hyper::body::Incoming>,
    timeout_ms: u64,
) -> Result<T, RouterError> {
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, req.collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    serde_json::from_slice(&body.to_bytes())
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))
}

/// Parses the `{id}` route parameter.
pub fn parse_id(params: &MatchitParams<'_, '_>) -> Result<u64, RouterError> {
    let raw = params.get("id").unwrap_or("0");
    raw.parse()
        .map_err(|e| RouterError::BadRequest(format!("Invalid record ID '{}': {}", raw, e)))
}

/// Maps a core error to the matching transport error.
pub fn map_catalog_error(e: CatalogError) -> RouterError {
    match e {
        CatalogError::NotFound { .. } => RouterError::NotFound(e.to_string()),
        CatalogError::Validation(_) | CatalogError::DanglingReference { .. } => {
            RouterError::Unprocessable(e.to_string())
        }
        _ => RouterError::InternalError(e.to_string()),
    }
}

/// Builds a JSON response with the given status.
pub fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Builds an empty response (for 204 No Content).
pub fn build_empty_response(status: u16) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Serializes `data` into the success envelope with the given status.
pub fn json_response<T: Serialize>(status: u16, data: T) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(&ApiResponse::wrap(data))
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    build_response(status, json)
}
