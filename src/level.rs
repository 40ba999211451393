//! Level definitions
//!
//! A level is a named, ordered list of lane radii stored as JSON:
//!
//! ```json
//! { "name": "Level 01 - Test", "radii": [3.0, 5.0, 7.0] }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TrackError;
use crate::sim::{CircleLane, LaneGeometry};

/// One level: lane radii from the innermost lane outward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub radii: Vec<f32>,
}

impl LevelDefinition {
    pub fn from_json(json: &str) -> Result<Self, TrackError> {
        Ok(serde_json::from_str(json)?)
    }

    /// One circular lane per radius, in order. Stops at the first bad radius.
    pub fn build_lanes(&self, theta_scale: f32) -> Result<Vec<LaneGeometry>, TrackError> {
        self.radii
            .iter()
            .map(|&radius| {
                CircleLane::new(radius)
                    .map(|lane| LaneGeometry::Circle(lane.with_theta_scale(theta_scale)))
            })
            .collect()
    }
}

/// All levels known to the game
#[derive(Debug, Clone, Default)]
pub struct LevelLibrary {
    levels: Vec<LevelDefinition>,
}

impl LevelLibrary {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Parse several level documents; any malformed one fails the whole batch
    pub fn from_json_strs<'a>(docs: impl IntoIterator<Item = &'a str>) -> Result<Self, TrackError> {
        let mut library = Self::new();
        for doc in docs {
            library.insert(LevelDefinition::from_json(doc)?);
        }
        Ok(library)
    }

    /// Load every `*.json` file in `dir`. Files that fail to parse are
    /// skipped with a warning.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, TrackError> {
        let mut paths: Vec<_> = fs::read_dir(dir.as_ref())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut library = Self::new();
        for path in paths {
            log::info!("Trying to load level asset: {}", path.display());
            let parsed = fs::read_to_string(&path)
                .map_err(TrackError::from)
                .and_then(|text| LevelDefinition::from_json(&text));
            match parsed {
                Ok(level) => library.insert(level),
                Err(e) => log::warn!("Skipping level asset {}: {e}", path.display()),
            }
        }
        log::info!("Loaded {} levels", library.len());
        Ok(library)
    }

    /// Add a level, replacing any previous level with the same name
    pub fn insert(&mut self, level: LevelDefinition) {
        match self.levels.iter_mut().find(|l| l.name == level.name) {
            Some(existing) => *existing = level,
            None => self.levels.push(level),
        }
    }

    pub fn find(&self, name: &str) -> Result<&LevelDefinition, TrackError> {
        self.levels
            .iter()
            .find(|level| level.name == name)
            .ok_or_else(|| TrackError::LevelNotFound {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(|level| level.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_THETA_SCALE;
    use crate::sim::PathGeometry;

    const TEST_LEVEL: &str = r#"{ "name": "Level 01 - Test", "radii": [3.0, 5.0, 7.0] }"#;

    #[test]
    fn test_parse_and_build_lanes() {
        let level = LevelDefinition::from_json(TEST_LEVEL).unwrap();
        assert_eq!(level.radii, vec![3.0, 5.0, 7.0]);

        let lanes = level.build_lanes(DEFAULT_THETA_SCALE).unwrap();
        assert_eq!(lanes.len(), 3);
        assert_eq!(lanes[1].initial_position(), glam::Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_bad_radius_aborts_build() {
        let level = LevelDefinition {
            name: "broken".into(),
            radii: vec![3.0, 0.0, 7.0],
        };
        assert!(matches!(
            level.build_lanes(DEFAULT_THETA_SCALE),
            Err(TrackError::InvalidGeometry { radius }) if radius == 0.0
        ));
    }

    #[test]
    fn test_missing_level_is_an_error() {
        let library = LevelLibrary::from_json_strs([TEST_LEVEL]).unwrap();
        assert!(library.find("Level 01 - Test").is_ok());
        assert!(matches!(
            library.find("Level 99"),
            Err(TrackError::LevelNotFound { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            LevelLibrary::from_json_strs([r#"{ "name": 3 }"#]),
            Err(TrackError::LevelParse(_))
        ));
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let mut library = LevelLibrary::new();
        library.insert(LevelDefinition {
            name: "a".into(),
            radii: vec![1.0],
        });
        library.insert(LevelDefinition {
            name: "a".into(),
            radii: vec![2.0, 4.0],
        });
        assert_eq!(library.len(), 1);
        assert_eq!(library.find("a").unwrap().radii.len(), 2);
    }

    #[test]
    fn test_bundled_levels_load() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/levels");
        let library = LevelLibrary::load_dir(dir).unwrap();
        assert!(library.find(crate::consts::DEFAULT_LEVEL_NAME).is_ok());
    }
}
