use std::collections::HashMap;

use super::dog::{Dog, DogId};
use super::map::MapId;

/// A running game on one map. Created on first join, never torn down.
#[derive(Debug)]
pub struct GameSession {
    map_id: MapId,
    dogs: HashMap<DogId, Dog>,
}

impl GameSession {
    pub fn new(map_id: MapId) -> Self {
        GameSession {
            map_id,
            dogs: HashMap::new(),
        }
    }

    pub fn map_id(&self) -> &MapId {
        &self.map_id
    }

    pub fn add_dog(&mut self, dog: Dog) {
        self.dogs.insert(dog.id, dog);
    }

    pub fn dogs(&self) -> &HashMap<DogId, Dog> {
        &self.dogs
    }
}
