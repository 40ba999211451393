//! Race settings and player roster
//!
//! Stored as JSON next to the level assets. A missing file means defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LEVEL_NAME, DEFAULT_PLAYER_SPEED, DEFAULT_THETA_SCALE};
use crate::error::TrackError;
use crate::sim::{PlayerCommand, PlayerId, PlayerState};

/// Keys a player uses to steer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: String,
    pub right: String,
    pub swap_direction: String,
}

impl KeyBindings {
    pub fn new(left: &str, right: &str, swap_direction: &str) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
            swap_direction: swap_direction.to_string(),
        }
    }

    /// The command for this frame's pressed keys. At most one command per
    /// player: left wins over right, right over swap.
    pub fn resolve(&self, pressed: &[&str]) -> Option<PlayerCommand> {
        let is_down = |key: &str| pressed.iter().any(|k| k.eq_ignore_ascii_case(key));
        if is_down(self.left.as_str()) {
            Some(PlayerCommand::MoveLeft)
        } else if is_down(self.right.as_str()) {
            Some(PlayerCommand::MoveRight)
        } else if is_down(self.swap_direction.as_str()) {
            Some(PlayerCommand::SwapDirection)
        } else {
            None
        }
    }
}

/// One roster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    /// Falls back to [`Settings::player_speed`]
    #[serde(default)]
    pub speed: Option<f32>,
    pub bindings: KeyBindings,
}

/// Race configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level started by `Game::start_game`
    pub level: String,
    /// Default player speed (lane units per tick)
    pub player_speed: f32,
    /// Lane rendering sample step, as a fraction of a full turn
    pub theta_scale: f32,
    pub players: Vec<PlayerConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL_NAME.to_string(),
            player_speed: DEFAULT_PLAYER_SPEED,
            theta_scale: DEFAULT_THETA_SCALE,
            players: vec![
                PlayerConfig {
                    name: "Player 1".to_string(),
                    speed: None,
                    bindings: KeyBindings::new("q", "w", "e"),
                },
                PlayerConfig {
                    name: "Player 2".to_string(),
                    speed: None,
                    bindings: KeyBindings::new("o", "p", "l"),
                },
            ],
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, TrackError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, TrackError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from disk, falling back to defaults if the file is absent
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TrackError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let settings = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Build the roster. Player ids follow roster order, starting at 1.
    pub fn build_players(&self) -> Result<Vec<PlayerState>, TrackError> {
        self.players
            .iter()
            .zip(1u32..)
            .map(|(config, id)| {
                PlayerState::new(
                    PlayerId(id),
                    config.name.clone(),
                    config.speed.unwrap_or(self.player_speed),
                )
            })
            .collect()
    }
}
