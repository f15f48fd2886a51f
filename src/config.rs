use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::ConfigError;
use crate::model::{Game, Map, MapCatalog};

/// Top-level shape of the configuration file.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    maps: Vec<Map>,
}

/// Reads the map configuration and builds a fresh game registry.
pub fn load_game(path: impl AsRef<Path>) -> Result<Game, ConfigError> {
    let raw = fs::read_to_string(path)?;
    from_json(&raw)
}

/// Builds a game registry from configuration JSON.
pub fn from_json(raw: &str) -> Result<Game, ConfigError> {
    let config: ConfigFile = serde_json::from_str(raw)?;
    Ok(Game::new(MapCatalog::new(config.maps)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CatalogError;
    use crate::model::MapId;

    const SAMPLE: &str = r#"{
        "maps": [
            {
                "id": "town",
                "name": "Town",
                "roads": [
                    {"x0": 0, "y0": 0, "x1": 40},
                    {"x0": 40, "y0": 0, "y1": 30}
                ],
                "buildings": [{"x": 5, "y": 5, "w": 30, "h": 20}],
                "offices": [{"id": "o0", "x": 40, "y": 30, "offsetX": 5, "offsetY": 0}]
            },
            {
                "id": "village",
                "name": "Village",
                "roads": [{"x0": 0, "y0": 0, "y1": 20}],
                "buildings": [],
                "offices": []
            }
        ]
    }"#;

    #[test]
    fn test_loads_maps_in_order() {
        let game = from_json(SAMPLE).unwrap();
        let ids: Vec<_> = game.maps().iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids, vec![MapId::new("town"), MapId::new("village")]);

        let town = game.find_map(&MapId::new("town")).unwrap();
        assert_eq!(town.name, "Town");
        assert_eq!(town.roads.len(), 2);
        assert_eq!(town.buildings.len(), 1);
        assert_eq!(town.offices[0].id, "o0");
    }

    #[test]
    fn test_ignores_unknown_fields() {
        let raw = r#"{
            "maps": [{
                "id": "town",
                "name": "Town",
                "dogSpeed": 4.0,
                "roads": [{"x0": 0, "y0": 0, "x1": 10}],
                "buildings": [],
                "offices": []
            }]
        }"#;
        assert!(from_json(raw).is_ok());
    }

    #[test]
    fn test_rejects_roads_without_an_endpoint() {
        let raw = r#"{
            "maps": [{
                "id": "town",
                "name": "Town",
                "roads": [{"x0": 0, "y0": 0}],
                "buildings": [],
                "offices": []
            }]
        }"#;
        assert!(matches!(from_json(raw), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_duplicate_map_ids() {
        let raw = r#"{
            "maps": [
                {"id": "town", "name": "A", "roads": [{"x0": 0, "y0": 0, "x1": 10}], "buildings": [], "offices": []},
                {"id": "town", "name": "B", "roads": [{"x0": 0, "y0": 0, "x1": 10}], "buildings": [], "offices": []}
            ]
        }"#;
        assert!(matches!(
            from_json(raw),
            Err(ConfigError::Catalog(CatalogError::DuplicateMapId { .. }))
        ));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = load_game("/definitely/not/there.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
