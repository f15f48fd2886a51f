use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::geometry::{Direction, Vec2};
use super::map::Map;

/// Identifier of a dog, unique for the lifetime of the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DogId(pub u64);

/// Runtime state of one dog.
#[derive(Debug, Clone, PartialEq)]
pub struct Dog {
    pub id: DogId,
    pub name: String,
    pub position: Vec2,
    pub velocity: Vec2,
    pub direction: Direction,
}

/// Creates dogs: fresh ids, random positions on the map's roads.
#[derive(Debug)]
pub struct DogSpawner {
    next_id: u64,
    rng: StdRng,
}

impl DogSpawner {
    pub fn new() -> Self {
        DogSpawner {
            next_id: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic spawner for tests.
    pub fn with_seed(seed: u64) -> Self {
        DogSpawner {
            next_id: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a dog standing still on a random point of a random road.
    pub fn spawn(&mut self, map: &Map, name: &str) -> Dog {
        let id = DogId(self.next_id);
        self.next_id += 1;
        Dog {
            id,
            name: name.to_owned(),
            position: self.random_road_point(map),
            velocity: Vec2::ZERO,
            direction: Direction::North,
        }
    }

    // The catalog guarantees at least one road per map.
    fn random_road_point(&mut self, map: &Map) -> Vec2 {
        let road = &map.roads[self.rng.gen_range(0..map.roads.len())];
        let (start, end) = (road.start(), road.end());
        if road.is_horizontal() {
            let (lo, hi) = (start.x.min(end.x), start.x.max(end.x));
            Vec2::new(self.rng.gen_range(lo..=hi) as f64, start.y as f64)
        } else {
            let (lo, hi) = (start.y.min(end.y), start.y.max(end.y));
            Vec2::new(start.x as f64, self.rng.gen_range(lo..=hi) as f64)
        }
    }
}

impl Default for DogSpawner {
    fn default() -> Self {
        Self::new()
    }
}
