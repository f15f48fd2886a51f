// Dogtown Server Library - Core Module Organization
//
// This file serves as the central organization point for the dog world
// game server, exporting the domain model, HTTP layer and supporting
// infrastructure in a clean, structured manner.

// Domain model: maps, dogs, sessions, players and the game facade
pub mod model;

// HTTP layer
pub mod handlers;
pub mod server;

// Supporting infrastructure
pub mod config;
pub mod errors;

// Re-export common types for convenient access
pub use crate::errors::{ApiError, CatalogError, ConfigError, GameError};
pub use crate::model::{
    Direction, Dog, DogId, Game, GameSession, Map, MapCatalog, MapId, Player, Token, Vec2,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
