use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::dog::DogId;
use super::map::MapId;

/// A joined participant. Identity is the dog it controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub dog_id: DogId,
    pub map_id: MapId,
    pub name: String,
}

/// Registry of joined players, grouped by map.
#[derive(Debug, Default)]
pub struct Players {
    by_map: HashMap<MapId, HashMap<DogId, Player>>,
}

impl Players {
    pub fn add(&mut self, player: Player) {
        self.by_map
            .entry(player.map_id.clone())
            .or_default()
            .insert(player.dog_id, player);
    }

    /// Snapshot of everyone on one map.
    pub fn on_map(&self, map_id: &MapId) -> HashMap<DogId, Player> {
        self.by_map.get(map_id).cloned().unwrap_or_default()
    }

    pub fn find(&self, map_id: &MapId, dog_id: DogId) -> Option<&Player> {
        self.by_map.get(map_id)?.get(&dog_id)
    }
}

/// Opaque bearer credential issued at join time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Token {
    fn from(raw: String) -> Self {
        Token(raw)
    }
}

impl From<&str> for Token {
    fn from(raw: &str) -> Self {
        Token(raw.to_owned())
    }
}

/// Issues tokens and resolves them back to the player each was handed to.
#[derive(Debug)]
pub struct PlayerTokens {
    rng: StdRng,
    tokens: HashMap<Token, (MapId, DogId)>,
}

impl PlayerTokens {
    pub fn new() -> Self {
        PlayerTokens {
            rng: StdRng::from_entropy(),
            tokens: HashMap::new(),
        }
    }

    /// Deterministic issuer for tests.
    pub fn with_seed(seed: u64) -> Self {
        PlayerTokens {
            rng: StdRng::seed_from_u64(seed),
            tokens: HashMap::new(),
        }
    }

    /// Mints a fresh 128-bit token bound to `player`. Tokens never expire.
    pub fn issue(&mut self, player: &Player) -> Token {
        let token = Token(format!(
            "{:016x}{:016x}",
            self.rng.gen::<u64>(),
            self.rng.gen::<u64>()
        ));
        self.tokens
            .insert(token.clone(), (player.map_id.clone(), player.dog_id));
        token
    }

    /// Finds the player a token was issued to.
    pub fn resolve(&self, token: &Token) -> Option<(MapId, DogId)> {
        self.tokens.get(token).cloned()
    }
}

impl Default for PlayerTokens {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(dog_id: u64, map_id: &str, name: &str) -> Player {
        Player {
            dog_id: DogId(dog_id),
            map_id: MapId::new(map_id),
            name: name.to_owned(),
        }
    }

    #[test]
    fn test_tokens_are_32_lowercase_hex_chars() {
        let mut tokens = PlayerTokens::with_seed(7);
        for i in 0..50 {
            let token = tokens.issue(&player(i, "town", "Pat"));
            let raw = token.as_str();
            assert_eq!(raw.len(), 32, "bad length: {raw}");
            assert!(raw.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }

    #[test]
    fn test_issue_then_resolve_round_trip() {
        let mut tokens = PlayerTokens::with_seed(8);
        let token = tokens.issue(&player(3, "town", "Pat"));
        assert_eq!(
            tokens.resolve(&token),
            Some((MapId::new("town"), DogId(3)))
        );
    }

    #[test]
    fn test_unknown_token_does_not_resolve() {
        let tokens = PlayerTokens::with_seed(9);
        assert_eq!(tokens.resolve(&Token::from("0".repeat(32))), None);
    }

    #[test]
    fn test_tokens_are_distinct() {
        let mut tokens = PlayerTokens::with_seed(10);
        let first = tokens.issue(&player(0, "town", "Pat"));
        let second = tokens.issue(&player(1, "town", "Sam"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_players_are_grouped_by_map() {
        let mut players = Players::default();
        players.add(player(0, "town", "Pat"));
        players.add(player(1, "village", "Sam"));
        players.add(player(2, "town", "Kim"));

        let town = players.on_map(&MapId::new("town"));
        assert_eq!(town.len(), 2);
        assert_eq!(town[&DogId(2)].name, "Kim");
        assert_eq!(players.on_map(&MapId::new("village")).len(), 1);
        assert!(players.on_map(&MapId::new("missing")).is_empty());
        assert!(players.find(&MapId::new("village"), DogId(0)).is_none());
    }
}
