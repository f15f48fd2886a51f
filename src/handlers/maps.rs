use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::errors::{ApiError, ApiResult};
use crate::model::{Map, MapId};

use super::SharedGame;

/// Catalog listing entry: just enough to pick a map.
#[derive(Debug, Serialize)]
pub struct MapInfo {
    id: MapId,
    name: String,
}

/// `GET /api/v1/maps`: ids and names of every configured map.
pub async fn list_maps(State(game): State<SharedGame>) -> Json<Vec<MapInfo>> {
    let maps = game
        .maps()
        .iter()
        .map(|map| MapInfo {
            id: map.id.clone(),
            name: map.name.clone(),
        })
        .collect();
    Json(maps)
}

/// `GET /api/v1/maps/{id}`: the full map description. The id is the whole
/// path suffix, so ids containing `/` resolve too.
pub async fn map_by_id(
    State(game): State<SharedGame>,
    Path(id): Path<String>,
) -> ApiResult<Json<Map>> {
    let id = MapId::new(id);
    let map = game.find_map(&id).ok_or(ApiError::MapNotFound)?;
    Ok(Json(map.clone()))
}
