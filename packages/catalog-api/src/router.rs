//! Matchit routing configuration and the API-key gate.

use std::sync::Arc;

use hyper::{body::Bytes, Request, Response};
use matchit::Router as MatchitRouter;

use crate::auth::{SessionStore, API_KEY_HEADER};
use crate::handlers;
use catalog_core::config::CatalogConfig;
use catalog_core::{FilmCatalog, PlantCatalog};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Botanical catalog
    pub plants: Arc<PlantCatalog>,
    /// Film catalog
    pub films: Arc<FilmCatalog>,
    /// API-key session table
    pub sessions: Arc<SessionStore>,
    /// Backend configuration
    pub config: Arc<CatalogConfig>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with the catalog routes.
    pub fn new(state: AppState) -> Self {
        let mut router = MatchitRouter::new();

        router
            .insert("/api/auth/login", RouteHandler::Login)
            .expect("Failed to insert /api/auth/login route");

        router
            .insert("/api/plant-types", RouteHandler::PlantTypes)
            .expect("Failed to insert /api/plant-types route");
        router
            .insert("/api/plant-types/{id}", RouteHandler::PlantTypes)
            .expect("Failed to insert /api/plant-types/{id} route");

        router
            .insert("/api/plants", RouteHandler::Plants)
            .expect("Failed to insert /api/plants route");
        router
            .insert("/api/plants/{id}", RouteHandler::Plants)
            .expect("Failed to insert /api/plants/{id} route");

        router
            .insert("/api/genres", RouteHandler::Genres)
            .expect("Failed to insert /api/genres route");
        router
            .insert("/api/genres/{id}", RouteHandler::Genres)
            .expect("Failed to insert /api/genres/{id} route");

        router
            .insert("/api/people", RouteHandler::People)
            .expect("Failed to insert /api/people route");
        router
            .insert("/api/people/{id}", RouteHandler::People)
            .expect("Failed to insert /api/people/{id} route");

        router
            .insert("/api/movies", RouteHandler::Movies)
            .expect("Failed to insert /api/movies route");
        router
            .insert("/api/movies/{id}", RouteHandler::Movies)
            .expect("Failed to insert /api/movies/{id} route");

        Self {
            inner: router,
            state,
        }
    }

    /// Routes an incoming request to the appropriate handler.
    ///
    /// Every route except login requires a valid `x-api-key` header; the
    /// gate runs before any catalog operation is invoked.
    pub async fn route(
        &self,
        req: Request<hyper::body::Incoming>,
    ) -> Result<Response<Bytes>, RouterError> {
        let path = req.uri().path().to_string();

        match self.inner.at(&path) {
            Ok(matched) => {
                let handler = matched.value;
                if handler.requires_api_key() {
                    self.authorize(&req)?;
                }
                let deadline =
                    std::time::Duration::from_millis(self.state.config.response_timeout_ms);
                tokio::time::timeout(
                    deadline,
                    handler.handle(req, matched.params, self.state.clone()),
                )
                .await
                .unwrap_or(Err(RouterError::Timeout))
            }
            Err(_) => {
                let error_response = handlers::ErrorResponse::with_details(
                    404,
                    "Not Found".to_string(),
                    format!("No route found for {}", path),
                );
                let body = serde_json::to_vec(&error_response).map_err(|e| {
                    RouterError::InternalError(format!("Failed to serialize error response: {}", e))
                })?;
                Ok(Response::builder()
                    .status(404)
                    .header("Content-Type", "application/json")
                    .body(Bytes::from(body))
                    .map_err(|e| {
                        RouterError::InternalError(format!("Failed to build response: {}", e))
                    })?)
            }
        }
    }

    /// Rejects the request unless it carries an unexpired API key.
    fn authorize(&self, req: &Request<hyper::body::Incoming>) -> Result<(), RouterError> {
        let api_key = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(RouterError::Unauthorized)?;
        if self.state.sessions.authorize(api_key) {
            Ok(())
        } else {
            Err(RouterError::Unauthorized)
        }
    }
}

/// Route handler family.
enum RouteHandler {
    Login,
    PlantTypes,
    Plants,
    Genres,
    People,
    Movies,
}

impl RouteHandler {
    /// Login is the only route reachable without a key.
    fn requires_api_key(&self) -> bool {
        !matches!(self, RouteHandler::Login)
    }

    /// Handles a request with the given route parameters.
    async fn handle(
        &self,
        req: Request<hyper::body::Incoming>,
        params: matchit::Params<'_, '_>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError> {
        use hyper::Method;

        let has_id = params.get("id").is_some();
        let method = req.method().clone();

        match self {
            RouteHandler::Login => {
                if method == Method::POST {
                    handlers::login(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::PlantTypes => {
                if method == Method::POST && !has_id {
                    handlers::create_plant_type(req, params, state).await
                } else if method == Method::GET && !has_id {
                    handlers::list_plant_types(req, params, state).await
                } else if method == Method::GET && has_id {
                    handlers::read_plant_type(req, params, state).await
                } else if method == Method::PUT && has_id {
                    handlers::update_plant_type(req, params, state).await
                } else if method == Method::DELETE && has_id {
                    handlers::delete_plant_type(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Plants => {
                if method == Method::POST && !has_id {
                    handlers::create_plant(req, params, state).await
                } else if method == Method::GET && !has_id {
                    handlers::list_plants(req, params, state).await
                } else if method == Method::GET && has_id {
                    handlers::read_plant(req, params, state).await
                } else if method == Method::PUT && has_id {
                    handlers::update_plant(req, params, state).await
                } else if method == Method::DELETE && has_id {
                    handlers::delete_plant(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Genres => {
                if method == Method::POST && !has_id {
                    handlers::create_genre(req, params, state).await
                } else if method == Method::GET && !has_id {
                    handlers::list_genres(req, params, state).await
                } else if method == Method::GET && has_id {
                    handlers::read_genre(req, params, state).await
                } else if method == Method::PUT && has_id {
                    handlers::update_genre(req, params, state).await
                } else if method == Method::DELETE && has_id {
                    handlers::delete_genre(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::People => {
                if method == Method::POST && !has_id {
                    handlers::create_person(req, params, state).await
                } else if method == Method::GET && !has_id {
                    handlers::list_people(req, params, state).await
                } else if method == Method::GET && has_id {
                    handlers::read_person(req, params, state).await
                } else if method == Method::PUT && has_id {
                    handlers::update_person(req, params, state).await
                } else if method == Method::DELETE && has_id {
                    handlers::delete_person(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Movies => {
                if method == Method::POST && !has_id {
                    handlers::create_movie(req, params, state).await
                } else if method == Method::GET && !has_id {
                    handlers::list_movies(req, params, state).await
                } else if method == Method::GET && has_id {
                    handlers::read_movie(req, params, state).await
                } else if method == Method::PUT && has_id {
                    handlers::update_movie(req, params, state).await
                } else if method == Method::DELETE && has_id {
                    handlers::delete_movie(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    MethodNotAllowed,
    InternalError(String),
    Timeout,
    BadRequest(String),
    NotFound(String),
    Unprocessable(String),
    Unauthorized,
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::Timeout => write!(f, "Request Timeout"),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            RouterError::Unprocessable(msg) => write!(f, "Unprocessable Entity: {}", msg),
            RouterError::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl std::error::Error for RouterError {}

impl RouterError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            RouterError::MethodNotAllowed => 405,
            RouterError::InternalError(_) => 500,
            RouterError::Timeout => 408,
            RouterError::BadRequest(_) => 400,
            RouterError::NotFound(_) => 404,
            RouterError::Unprocessable(_) => 422,
            RouterError::Unauthorized => 403,
        }
    }
}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let status = err.status();
        let message = match &err {
            RouterError::MethodNotAllowed => "Method Not Allowed",
            RouterError::InternalError(msg) => msg.as_str(),
            RouterError::Timeout => "Request Timeout",
            RouterError::BadRequest(msg) => msg.as_str(),
            RouterError::NotFound(msg) => msg.as_str(),
            RouterError::Unprocessable(msg) => msg.as_str(),
            RouterError::Unauthorized => "Unauthorized",
        };

        let error_response = handlers::ErrorResponse::new(status, message.to_string());
        let body = serde_json::to_vec(&error_response)
            .unwrap_or_else(|e| format!("{{\"success\":false,\"error\":{{\"code\":\"500\",\"message\":\"Failed to serialize error: {}\",\"details\":null}}}}", e).into_bytes());

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(500)
                    .body(Bytes::from("Internal Server Error"))
                    .expect("Failed to build fallback error response")
            })
    }
}
