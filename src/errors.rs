use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::model::MapId;

/// Registry-level errors raised by game operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Map not found: {map_id}")]
    MapNotFound { map_id: MapId },
}

/// Rejections raised while building the map catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate map id: {map_id}")]
    DuplicateMapId { map_id: MapId },

    #[error("Duplicate office id '{office_id}' on map {map_id}")]
    DuplicateOfficeId { map_id: MapId, office_id: String },

    #[error("Map {map_id} has no roads")]
    NoRoads { map_id: MapId },
}

/// Fatal startup errors from loading the game configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid map catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Errors returned over the HTTP API as `{code, message}` JSON bodies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Bad request")]
    BadRequest,

    #[error("{0}")]
    InvalidArgument(&'static str),

    #[error("Map not found")]
    MapNotFound,

    #[error("{0}")]
    InvalidToken(&'static str),

    #[error("{message}")]
    InvalidMethod {
        message: &'static str,
        allow: &'static str,
    },
}

/// Result type aliases for convenience
pub type GameResult<T> = Result<T, GameError>;
pub type ApiResult<T> = Result<T, ApiError>;

/// Helper constructors for the fixed wire messages
impl ApiError {
    pub fn join_parse() -> Self {
        ApiError::InvalidArgument("Join game request parse error")
    }

    pub fn invalid_username() -> Self {
        ApiError::InvalidArgument("Invalid username")
    }

    pub fn missing_auth() -> Self {
        ApiError::InvalidToken("Authorization header is missing")
    }

    pub fn unknown_token() -> Self {
        ApiError::InvalidToken("Player token has not been found")
    }

    pub fn post_only() -> Self {
        ApiError::InvalidMethod {
            message: "Only POST method is expected",
            allow: "POST",
        }
    }

    pub fn get_head_only() -> Self {
        ApiError::InvalidMethod {
            message: "Only GET and HEAD methods are expected",
            allow: "GET, HEAD",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest | ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::MapNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidMethod { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest => "badRequest",
            ApiError::InvalidArgument(_) => "invalidArgument",
            ApiError::MapNotFound => "mapNotFound",
            ApiError::InvalidToken(_) => "invalidToken",
            ApiError::InvalidMethod { .. } => "invalidMethod",
        }
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::MapNotFound { .. } => ApiError::MapNotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "code": self.code(),
            "message": self.to_string(),
        }));
        let mut response = (self.status(), body).into_response();
        if let ApiError::InvalidMethod { allow, .. } = self {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}
