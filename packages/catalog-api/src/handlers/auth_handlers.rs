//! Login endpoint issuing API-key sessions.

use hyper::{body::Bytes, Request, Response};
use serde::Deserialize;

use crate::router::{AppState, RouterError};

use super::request_utils::{json_response, read_json_body, MatchitParams};

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Validates credentials and issues an API key.
///
/// # Endpoint
/// `POST /api/auth/login`
///
/// # Request Body
/// ```json
/// {
///   "username": "ana@example.com",
///   "password": "s3cret"
/// }
/// ```
///
/// # Response
/// - **200 OK**:
///   `{"success": true, "data": {"api_key": "...", "expires_in_secs": 600}}`
/// - **403 Forbidden**: Unknown user or wrong password
pub async fn login(
    req: Request<hyper::body::Incoming>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let request: LoginRequest = read_json_body(req, state.config.request_timeout_ms).await?;

    match state.sessions.login(&request.username, &request.password) {
        Some(issued) => {
            tracing::info!(username = %request.username, "session issued");
            json_response(200, issued)
        }
        None => {
            tracing::warn!(username = %request.username, "login rejected");
            Err(RouterError::Unauthorized)
        }
    }
}
