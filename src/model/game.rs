use std::collections::HashMap;
use std::sync::RwLock;

use crate::errors::{GameError, GameResult};

use super::dog::{Dog, DogId, DogSpawner};
use super::map::{Map, MapCatalog, MapId};
use super::player::{Player, PlayerTokens, Players, Token};
use super::session::GameSession;

/// Runtime state behind the lock: sessions, players, credentials.
#[derive(Debug)]
struct World {
    sessions: HashMap<MapId, GameSession>,
    players: Players,
    tokens: PlayerTokens,
    spawner: DogSpawner,
}

impl World {
    fn new(tokens: PlayerTokens, spawner: DogSpawner) -> Self {
        World {
            sessions: HashMap::new(),
            players: Players::default(),
            tokens,
            spawner,
        }
    }
}

/// The game registry: the immutable map catalog plus everything that
/// changes as players join.
///
/// Reads share the lock; `join` is the only writer.
#[derive(Debug)]
pub struct Game {
    catalog: MapCatalog,
    world: RwLock<World>,
}

impl Game {
    pub fn new(catalog: MapCatalog) -> Self {
        Game {
            catalog,
            world: RwLock::new(World::new(PlayerTokens::new(), DogSpawner::new())),
        }
    }

    /// Registry with deterministic spawns and tokens, for tests.
    pub fn with_seed(catalog: MapCatalog, seed: u64) -> Self {
        Game {
            catalog,
            world: RwLock::new(World::new(
                PlayerTokens::with_seed(seed),
                DogSpawner::with_seed(seed),
            )),
        }
    }

    /// All configured maps, in configuration order.
    pub fn maps(&self) -> &[Map] {
        self.catalog.maps()
    }

    /// Looks up a map by id without touching the lock.
    pub fn find_map(&self, id: &MapId) -> Option<&Map> {
        self.catalog.find(id)
    }

    /// Adds a player to the map's session, creating the session on first
    /// join. Returns the new player record and its bearer token.
    pub fn join(&self, name: &str, map_id: &MapId) -> GameResult<(Player, Token)> {
        let map = self.catalog.find(map_id).ok_or_else(|| GameError::MapNotFound {
            map_id: map_id.clone(),
        })?;

        let mut world = self.world.write().unwrap();
        let world = &mut *world;
        let session = world
            .sessions
            .entry(map_id.clone())
            .or_insert_with(|| GameSession::new(map_id.clone()));

        let dog = world.spawner.spawn(map, name);
        let player = Player {
            dog_id: dog.id,
            map_id: map_id.clone(),
            name: name.to_owned(),
        };
        session.add_dog(dog);
        let token = world.tokens.issue(&player);
        world.players.add(player.clone());

        log::info!(
            "Player '{}' joined map {} as dog {}",
            name,
            session.map_id(),
            player.dog_id.0
        );
        Ok((player, token))
    }

    /// Resolves a bearer token to the player it was issued to.
    pub fn find_player(&self, token: &Token) -> Option<Player> {
        let world = self.world.read().unwrap();
        let (map_id, dog_id) = world.tokens.resolve(token)?;
        world.players.find(&map_id, dog_id).cloned()
    }

    /// Snapshot of every player on one map.
    pub fn players_on_map(&self, map_id: &MapId) -> HashMap<DogId, Player> {
        self.world.read().unwrap().players.on_map(map_id)
    }

    /// Snapshot of every dog in one map's session.
    pub fn dogs_on_map(&self, map_id: &MapId) -> HashMap<DogId, Dog> {
        let world = self.world.read().unwrap();
        world
            .sessions
            .get(map_id)
            .map(|session| session.dogs().clone())
            .unwrap_or_default()
    }

    /// Number of sessions created so far.
    pub fn session_count(&self) -> usize {
        self.world.read().unwrap().sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::geometry::{Direction, Point, Vec2};
    use crate::model::map::Road;

    fn map(id: &str) -> Map {
        Map {
            id: MapId::new(id),
            name: id.to_owned(),
            roads: vec![
                Road::horizontal(Point { x: 0, y: 0 }, 40),
                Road::vertical(Point { x: 0, y: 0 }, 30),
            ],
            buildings: vec![],
            offices: vec![],
        }
    }

    fn game() -> Game {
        let catalog = MapCatalog::new(vec![map("town"), map("village")]).unwrap();
        Game::with_seed(catalog, 42)
    }

    #[test]
    fn test_join_assigns_sequential_dog_ids() {
        let game = game();
        let town = MapId::new("town");
        let village = MapId::new("village");
        let (first, _) = game.join("Pat", &town).unwrap();
        let (second, _) = game.join("Sam", &village).unwrap();
        let (third, _) = game.join("Kim", &town).unwrap();
        assert_eq!(first.dog_id, DogId(0));
        assert_eq!(second.dog_id, DogId(1));
        assert_eq!(third.dog_id, DogId(2));
    }

    #[test]
    fn test_join_reuses_the_map_session() {
        let game = game();
        let town = MapId::new("town");
        assert_eq!(game.session_count(), 0);
        game.join("Pat", &town).unwrap();
        game.join("Sam", &town).unwrap();
        assert_eq!(game.session_count(), 1);
        game.join("Kim", &MapId::new("village")).unwrap();
        assert_eq!(game.session_count(), 2);
    }

    #[test]
    fn test_join_rejects_unknown_map() {
        let game = game();
        let missing = MapId::new("missing");
        let result = game.join("Pat", &missing);
        assert_eq!(result, Err(GameError::MapNotFound { map_id: missing }));
        assert_eq!(game.session_count(), 0);
    }

    #[test]
    fn test_token_resolves_to_its_player() {
        let game = game();
        let (player, token) = game.join("Pat", &MapId::new("town")).unwrap();
        assert_eq!(game.find_player(&token), Some(player));
    }

    #[test]
    fn test_unknown_token_resolves_to_nobody() {
        let game = game();
        game.join("Pat", &MapId::new("town")).unwrap();
        assert_eq!(game.find_player(&Token::from("f".repeat(32))), None);
    }

    #[test]
    fn test_tokens_are_distinct_across_joins() {
        let game = game();
        let town = MapId::new("town");
        let (_, first) = game.join("Pat", &town).unwrap();
        let (_, second) = game.join("Sam", &town).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_rosters_are_per_map() {
        let game = game();
        let town = MapId::new("town");
        let village = MapId::new("village");
        game.join("Pat", &town).unwrap();
        game.join("Sam", &village).unwrap();
        game.join("Kim", &town).unwrap();

        let roster = game.players_on_map(&town);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[&DogId(0)].name, "Pat");
        assert_eq!(roster[&DogId(2)].name, "Kim");
        assert!(game.players_on_map(&MapId::new("missing")).is_empty());
    }

    #[test]
    fn test_joined_dog_starts_parked() {
        let game = game();
        let town = MapId::new("town");
        let (player, _) = game.join("Pat", &town).unwrap();

        let dogs = game.dogs_on_map(&town);
        let dog = &dogs[&player.dog_id];
        assert_eq!(dog.velocity, Vec2::ZERO);
        assert_eq!(dog.direction, Direction::North);
        let on_road = game
            .find_map(&town)
            .unwrap()
            .roads
            .iter()
            .any(|road| {
                road.contains(Point {
                    x: dog.position.x as i32,
                    y: dog.position.y as i32,
                })
            });
        assert!(on_road, "spawned off road: {:?}", dog.position);
    }
}
