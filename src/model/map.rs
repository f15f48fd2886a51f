use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

use super::geometry::{Coord, Offset, Point, Rectangle, Size};

/// Identifier of a map from the game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(String);

impl MapId {
    pub fn new(id: impl Into<String>) -> Self {
        MapId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Straight road segment, axis-aligned by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoadRepr", into = "RoadRepr")]
pub struct Road {
    start: Point,
    end: Point,
    horizontal: bool,
}

impl Road {
    pub fn horizontal(start: Point, end_x: Coord) -> Self {
        Road {
            start,
            end: Point { x: end_x, y: start.y },
            horizontal: true,
        }
    }

    pub fn vertical(start: Point, end_y: Coord) -> Self {
        Road {
            start,
            end: Point { x: start.x, y: end_y },
            horizontal: false,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }

    pub fn is_vertical(&self) -> bool {
        !self.horizontal
    }

    /// True if `point` lies on this segment. Endpoints may be given in
    /// either order in the configuration.
    pub fn contains(&self, point: Point) -> bool {
        if self.horizontal {
            point.y == self.start.y
                && point.x >= self.start.x.min(self.end.x)
                && point.x <= self.start.x.max(self.end.x)
        } else {
            point.x == self.start.x
                && point.y >= self.start.y.min(self.end.y)
                && point.y <= self.start.y.max(self.end.y)
        }
    }
}

/// Wire form of a road: `{x0, y0, x1}` or `{x0, y0, y1}`.
#[derive(Serialize, Deserialize)]
struct RoadRepr {
    x0: Coord,
    y0: Coord,
    #[serde(skip_serializing_if = "Option::is_none")]
    x1: Option<Coord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y1: Option<Coord>,
}

impl TryFrom<RoadRepr> for Road {
    type Error = String;

    fn try_from(repr: RoadRepr) -> Result<Self, Self::Error> {
        let start = Point {
            x: repr.x0,
            y: repr.y0,
        };
        match (repr.x1, repr.y1) {
            (Some(x1), None) => Ok(Road::horizontal(start, x1)),
            (None, Some(y1)) => Ok(Road::vertical(start, y1)),
            _ => Err("road must set exactly one of x1 and y1".to_owned()),
        }
    }
}

impl From<Road> for RoadRepr {
    fn from(road: Road) -> Self {
        RoadRepr {
            x0: road.start.x,
            y0: road.start.y,
            x1: road.horizontal.then_some(road.end.x),
            y1: (!road.horizontal).then_some(road.end.y),
        }
    }
}

/// A building footprint on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BuildingRepr", into = "BuildingRepr")]
pub struct Building {
    pub bounds: Rectangle,
}

#[derive(Serialize, Deserialize)]
struct BuildingRepr {
    x: Coord,
    y: Coord,
    w: Coord,
    h: Coord,
}

impl From<BuildingRepr> for Building {
    fn from(repr: BuildingRepr) -> Self {
        Building {
            bounds: Rectangle {
                position: Point {
                    x: repr.x,
                    y: repr.y,
                },
                size: Size {
                    width: repr.w,
                    height: repr.h,
                },
            },
        }
    }
}

impl From<Building> for BuildingRepr {
    fn from(building: Building) -> Self {
        BuildingRepr {
            x: building.bounds.position.x,
            y: building.bounds.position.y,
            w: building.bounds.size.width,
            h: building.bounds.size.height,
        }
    }
}

/// A delivery office on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OfficeRepr", into = "OfficeRepr")]
pub struct Office {
    pub id: String,
    pub position: Point,
    pub offset: Offset,
}

#[derive(Serialize, Deserialize)]
struct OfficeRepr {
    id: String,
    x: Coord,
    y: Coord,
    #[serde(rename = "offsetX")]
    offset_x: Coord,
    #[serde(rename = "offsetY")]
    offset_y: Coord,
}

impl From<OfficeRepr> for Office {
    fn from(repr: OfficeRepr) -> Self {
        Office {
            id: repr.id,
            position: Point {
                x: repr.x,
                y: repr.y,
            },
            offset: Offset {
                dx: repr.offset_x,
                dy: repr.offset_y,
            },
        }
    }
}

impl From<Office> for OfficeRepr {
    fn from(office: Office) -> Self {
        OfficeRepr {
            id: office.id,
            x: office.position.x,
            y: office.position.y,
            offset_x: office.offset.dx,
            offset_y: office.offset.dy,
        }
    }
}

/// Static description of one level. Geometry only, no runtime state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Map {
    pub id: MapId,
    pub name: String,
    pub roads: Vec<Road>,
    pub buildings: Vec<Building>,
    pub offices: Vec<Office>,
}

/// Validated, immutable collection of maps, indexed by id.
#[derive(Debug)]
pub struct MapCatalog {
    maps: Vec<Map>,
    index: HashMap<MapId, usize>,
}

impl MapCatalog {
    /// Builds the catalog, rejecting configurations the server cannot run.
    pub fn new(maps: Vec<Map>) -> Result<Self, CatalogError> {
        let mut index = HashMap::new();
        for (i, map) in maps.iter().enumerate() {
            if index.insert(map.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateMapId {
                    map_id: map.id.clone(),
                });
            }
            if map.roads.is_empty() {
                return Err(CatalogError::NoRoads {
                    map_id: map.id.clone(),
                });
            }
            let mut office_ids = HashSet::new();
            for office in &map.offices {
                if !office_ids.insert(office.id.as_str()) {
                    return Err(CatalogError::DuplicateOfficeId {
                        map_id: map.id.clone(),
                        office_id: office.id.clone(),
                    });
                }
            }
        }
        Ok(MapCatalog { maps, index })
    }

    /// All maps, in configuration order.
    pub fn maps(&self) -> &[Map] {
        &self.maps
    }

    /// Looks up a map by id.
    pub fn find(&self, id: &MapId) -> Option<&Map> {
        self.index.get(id).map(|&i| &self.maps[i])
    }
}
