// HTTP endpoint handlers for the JSON API.

pub mod game;
pub mod maps;

use std::sync::Arc;

use crate::errors::ApiError;
use crate::model::Game;

/// Shared handle to the game registry, cloned into every handler.
pub type SharedGame = Arc<Game>;

/// Any `/api` path no endpoint claims is a client error, not a 404.
pub async fn api_fallback() -> ApiError {
    ApiError::BadRequest
}
