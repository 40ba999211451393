//! Per-player simulation state
//!
//! Position and heading are written only by the track simulation; the
//! player itself can only flip its travel direction.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::TrackError;

/// Stable player identifier, used as the key of the lane assignment table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Travel direction around a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TravelDirection {
    /// Advances the polar angle (clockwise in the original screen space)
    #[default]
    Forward,
    /// Retreats the polar angle
    Reverse,
}

impl TravelDirection {
    /// Multiplier applied to the angular step
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            TravelDirection::Forward => 1.0,
            TravelDirection::Reverse => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            TravelDirection::Forward => TravelDirection::Reverse,
            TravelDirection::Reverse => TravelDirection::Forward,
        }
    }
}

/// A racer on the track
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PlayerStateData")]
pub struct PlayerState {
    id: PlayerId,
    name: String,
    speed: f32,
    direction: TravelDirection,
    position: Vec2,
    /// Facing angle (radians, normalized to [-π, π))
    heading: f32,
}

/// Unchecked wire form of [`PlayerState`]
#[derive(Deserialize)]
struct PlayerStateData {
    id: PlayerId,
    name: String,
    speed: f32,
    #[serde(default)]
    direction: TravelDirection,
    #[serde(default)]
    position: Vec2,
    #[serde(default)]
    heading: f32,
}

impl TryFrom<PlayerStateData> for PlayerState {
    type Error = TrackError;

    fn try_from(data: PlayerStateData) -> Result<Self, TrackError> {
        let mut player = PlayerState::new(data.id, data.name, data.speed)?;
        player.direction = data.direction;
        player.position = data.position;
        player.heading = crate::normalize_angle(data.heading);
        Ok(player)
    }
}

impl PlayerState {
    /// Create a player travelling forward. Speed must be positive and finite.
    pub fn new(id: PlayerId, name: impl Into<String>, speed: f32) -> Result<Self, TrackError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(TrackError::InvalidSpeed { speed });
        }
        Ok(Self {
            id,
            name: name.into(),
            speed,
            direction: TravelDirection::Forward,
            position: Vec2::ZERO,
            heading: 0.0,
        })
    }

    #[inline]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn direction(&self) -> TravelDirection {
        self.direction
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Toggle travel direction; takes effect on the next tick
    pub fn swap_direction(&mut self) {
        self.direction = self.direction.flipped();
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub(crate) fn set_heading(&mut self, heading: f32) {
        self.heading = heading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        let player = PlayerState::new(PlayerId(1), "Player 1", 10.0).unwrap();
        assert_eq!(player.direction(), TravelDirection::Forward);
        assert_eq!(player.position(), Vec2::ZERO);
        assert_eq!(player.name(), "Player 1");
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        for speed in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                PlayerState::new(PlayerId(1), "p", speed),
                Err(TrackError::InvalidSpeed { .. })
            ));
        }
    }

    #[test]
    fn test_deserialize_rejects_bad_speed() {
        let json = r#"{"id":1,"name":"p","speed":-5.0}"#;
        let err = serde_json::from_str::<PlayerState>(json).unwrap_err().to_string();
        assert!(err.contains("player speed must be positive"), "{err}");

        let json = r#"{"id":1,"name":"p","speed":5.0,"direction":"Reverse"}"#;
        let player: PlayerState = serde_json::from_str(json).unwrap();
        assert_eq!(player.speed(), 5.0);
        assert_eq!(player.direction(), TravelDirection::Reverse);
    }

    #[test]
    fn test_swap_direction_twice_restores_sign() {
        let mut player = PlayerState::new(PlayerId(1), "p", 10.0).unwrap();
        let original = player.direction().sign();

        player.swap_direction();
        assert_eq!(player.direction().sign(), -original);

        player.swap_direction();
        assert_eq!(player.direction().sign(), original);
    }
}
