use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, ApiResult};
use crate::model::{Direction, DogId, MapId, Player, Token, Vec2};

use super::SharedGame;

/// Body of `POST /api/v1/game/join`.
#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    #[serde(rename = "userName")]
    user_name: String,
    #[serde(rename = "mapId")]
    map_id: MapId,
}

/// Credential and dog id handed to a joining player.
#[derive(Debug, Serialize)]
pub struct JoinResponse {
    #[serde(rename = "authToken")]
    auth_token: Token,
    #[serde(rename = "playerId")]
    player_id: DogId,
}

/// Roster entry in the players listing.
#[derive(Debug, Serialize)]
pub struct PlayerInfo {
    name: String,
}

/// One dog in the game state listing.
#[derive(Debug, Serialize)]
pub struct DogState {
    pos: Vec2,
    speed: Vec2,
    dir: Direction,
}

/// Payload of `GET /api/v1/game/state`.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    players: HashMap<DogId, DogState>,
}

/// `POST /api/v1/game/join`: create a player on a map.
pub async fn join(
    State(game): State<SharedGame>,
    method: Method,
    body: Bytes,
) -> ApiResult<Json<JoinResponse>> {
    if method != Method::POST {
        return Err(ApiError::post_only());
    }
    let request: JoinRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::join_parse())?;
    if request.user_name.is_empty() {
        return Err(ApiError::invalid_username());
    }
    let (player, token) = game.join(&request.user_name, &request.map_id)?;
    Ok(Json(JoinResponse {
        auth_token: token,
        player_id: player.dog_id,
    }))
}

/// `GET /api/v1/game/players`: names of everyone in the caller's session.
pub async fn players(
    State(game): State<SharedGame>,
    method: Method,
    headers: HeaderMap,
) -> ApiResult<Json<HashMap<DogId, PlayerInfo>>> {
    let player = authorize(&game, &method, &headers)?;
    let roster = game
        .players_on_map(&player.map_id)
        .into_iter()
        .map(|(id, p)| (id, PlayerInfo { name: p.name }))
        .collect();
    Ok(Json(roster))
}

/// `GET /api/v1/game/state`: position and movement of every dog in the
/// caller's session.
pub async fn state(
    State(game): State<SharedGame>,
    method: Method,
    headers: HeaderMap,
) -> ApiResult<Json<StateResponse>> {
    let player = authorize(&game, &method, &headers)?;
    let players = game
        .dogs_on_map(&player.map_id)
        .into_iter()
        .map(|(id, dog)| {
            let state = DogState {
                pos: dog.position,
                speed: dog.velocity,
                dir: dog.direction,
            };
            (id, state)
        })
        .collect();
    Ok(Json(StateResponse { players }))
}

/// Gate for the authenticated read endpoints. Check order is part of the
/// wire contract: header first, then method, then the token itself.
fn authorize(game: &SharedGame, method: &Method, headers: &HeaderMap) -> ApiResult<Player> {
    let token = bearer_token(headers)?;
    if method != Method::GET && method != Method::HEAD {
        return Err(ApiError::get_head_only());
    }
    game.find_player(&token).ok_or_else(ApiError::unknown_token)
}

/// Pulls the bearer token out of the `Authorization` header. A missing
/// scheme or an empty credential counts the same as a missing header.
fn bearer_token(headers: &HeaderMap) -> ApiResult<Token> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or_default();
    if raw.is_empty() {
        return Err(ApiError::missing_auth());
    }
    Ok(Token::from(raw))
}
