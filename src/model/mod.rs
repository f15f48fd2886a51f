// Domain model: static map data plus the runtime registry built on it.

pub mod dog;
pub mod game;
pub mod geometry;
pub mod map;
pub mod player;
pub mod session;

pub use dog::{Dog, DogId, DogSpawner};
pub use game::Game;
pub use geometry::{Coord, Direction, Offset, Point, Rectangle, Size, Vec2};
pub use map::{Building, Map, MapCatalog, MapId, Office, Road};
pub use player::{Player, PlayerTokens, Players, Token};
pub use session::GameSession;
