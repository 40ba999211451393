//! Lane Racer - players racing around concentric circular lanes
//!
//! Core modules:
//! - `sim`: Lane geometry, lane topology, player state and the track simulation
//! - `level`: Level definitions (ordered lane radii) and the level library
//! - `settings`: Race configuration and player roster
//! - `game`: Session driver tying levels, settings and input to a race
//! - `error`: Crate error type

pub mod error;
pub mod game;
pub mod level;
pub mod settings;
pub mod sim;

pub use error::TrackError;
pub use game::{Game, GameStatus};
pub use level::{LevelDefinition, LevelLibrary};
pub use settings::{KeyBindings, PlayerConfig, Settings};

use glam::Vec2;

/// Simulation defaults
pub mod consts {
    /// Player speed in lane units per tick
    pub const DEFAULT_PLAYER_SPEED: f32 = 10.0;
    /// Angular step between rendering samples, as a fraction of a full turn
    pub const DEFAULT_THETA_SCALE: f32 = 0.01;
    /// Level started by a fresh game
    pub const DEFAULT_LEVEL_NAME: &str = "Level 01 - Test";
    /// Distance tolerance used when comparing positions
    pub const POSITION_EPSILON: f32 = 1e-3;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps_into_range() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert_eq!(normalize_angle(0.25), 0.25);
    }

    #[test]
    fn test_polar_round_trip() {
        let p = polar_to_cartesian(5.0, PI / 3.0);
        let (r, theta) = cartesian_to_polar(p);
        assert!((r - 5.0).abs() < 1e-4);
        assert!((theta - PI / 3.0).abs() < 1e-4);
    }
}
