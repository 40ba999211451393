//! Lane geometry
//!
//! A lane is a closed path a player travels along. Every lane shape
//! implements [`PathGeometry`]; [`LaneGeometry`] is the tagged set of shapes
//! the topology stores. Circular lanes are the only shape so far.
//!
//! Heading convention: players face along the tangent in their direction of
//! travel, i.e. the radial angle rotated by +π/2 going forward and by -π/2 in
//! reverse.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::PlayerState;
use crate::consts::DEFAULT_THETA_SCALE;
use crate::error::TrackError;
use crate::{cartesian_to_polar, normalize_angle, polar_to_cartesian};

/// Shape and kinematics of a single lane
pub trait PathGeometry {
    /// Polyline iterator returned by [`PathGeometry::sample_for_rendering`]
    type Samples: Iterator<Item = Vec2> + Clone;

    /// Where a newly assigned player starts
    fn initial_position(&self) -> Vec2;

    /// Player position after one tick on this lane
    fn next_position(&self, player: &PlayerState) -> Vec2;

    /// Heading the player faces after one tick on this lane
    fn next_heading(&self, player: &PlayerState) -> f32;

    /// Landing point for a player changing onto this lane from `previous`
    fn lane_swap_position(&self, player: &PlayerState, previous: &LaneGeometry) -> Vec2;

    /// Points approximating the lane, for drawing only. Each call starts a
    /// fresh pass over the shape.
    fn sample_for_rendering(&self) -> Self::Samples;
}

fn default_theta_scale() -> f32 {
    DEFAULT_THETA_SCALE
}

/// Circular lane around a fixed center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircleLaneData")]
pub struct CircleLane {
    radius: f32,
    center: Vec2,
    /// Fraction of a full turn between two rendering samples
    theta_scale: f32,
}

/// Unchecked wire form of [`CircleLane`]
#[derive(Deserialize)]
struct CircleLaneData {
    radius: f32,
    #[serde(default)]
    center: Vec2,
    #[serde(default = "default_theta_scale")]
    theta_scale: f32,
}

impl TryFrom<CircleLaneData> for CircleLane {
    type Error = TrackError;

    fn try_from(data: CircleLaneData) -> Result<Self, TrackError> {
        Ok(CircleLane::with_center(data.radius, data.center)?.with_theta_scale(data.theta_scale))
    }
}

impl CircleLane {
    /// Circle around the origin. Fails unless `radius` is positive and finite.
    pub fn new(radius: f32) -> Result<Self, TrackError> {
        Self::with_center(radius, Vec2::ZERO)
    }

    pub fn with_center(radius: f32, center: Vec2) -> Result<Self, TrackError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(TrackError::InvalidGeometry { radius });
        }
        Ok(Self {
            radius,
            center,
            theta_scale: DEFAULT_THETA_SCALE,
        })
    }

    /// Override the rendering sample step (clamped to [1e-4, 1])
    pub fn with_theta_scale(mut self, theta_scale: f32) -> Self {
        self.theta_scale = if theta_scale.is_finite() {
            theta_scale.clamp(1e-4, 1.0)
        } else {
            DEFAULT_THETA_SCALE
        };
        self
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn circumference(&self) -> f32 {
        TAU * self.radius
    }

    /// Signed angle (radians) a player sweeps in one tick.
    ///
    /// `speed / circumference` is a step in degrees, so speed 10 on a radius
    /// 3 lane moves about half a degree per tick.
    #[inline]
    pub fn angular_step(&self, player: &PlayerState) -> f32 {
        (player.direction().sign() * player.speed() / self.circumference()).to_radians()
    }

    /// Polar angle of a point relative to this lane's center
    #[inline]
    pub fn angle_of(&self, point: Vec2) -> f32 {
        cartesian_to_polar(point - self.center).1
    }
}

impl PathGeometry for CircleLane {
    type Samples = CircleSamples;

    fn initial_position(&self) -> Vec2 {
        self.center + polar_to_cartesian(self.radius, 0.0)
    }

    fn next_position(&self, player: &PlayerState) -> Vec2 {
        let offset = player.position() - self.center;
        self.center + Vec2::from_angle(self.angular_step(player)).rotate(offset)
    }

    fn next_heading(&self, player: &PlayerState) -> f32 {
        let theta = self.angle_of(self.next_position(player));
        normalize_angle(theta + player.direction().sign() * FRAC_PI_2)
    }

    fn lane_swap_position(&self, player: &PlayerState, _previous: &LaneGeometry) -> Vec2 {
        let offset = player.position() - self.center;
        // A player sitting on the center has no angle to keep; use angle 0.
        let dir = offset.try_normalize().unwrap_or(Vec2::X);
        self.center + dir * self.radius
    }

    fn sample_for_rendering(&self) -> CircleSamples {
        CircleSamples {
            center: self.center,
            radius: self.radius,
            step: TAU * self.theta_scale,
            index: 0,
            count: (1.0 / self.theta_scale + 1.0) as usize,
        }
    }
}

/// Evenly spaced points around a circle, closing back on the start
#[derive(Debug, Clone)]
pub struct CircleSamples {
    center: Vec2,
    radius: f32,
    step: f32,
    index: usize,
    count: usize,
}

impl Iterator for CircleSamples {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.index >= self.count {
            return None;
        }
        let theta = self.index as f32 * self.step;
        self.index += 1;
        Some(self.center + polar_to_cartesian(self.radius, theta))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CircleSamples {}

/// Every lane shape the track can hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LaneGeometry {
    Circle(CircleLane),
}

impl From<CircleLane> for LaneGeometry {
    fn from(lane: CircleLane) -> Self {
        LaneGeometry::Circle(lane)
    }
}

/// Rendering samples of any lane shape
#[derive(Debug, Clone)]
pub enum LaneSamples {
    Circle(CircleSamples),
}

impl Iterator for LaneSamples {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        match self {
            LaneSamples::Circle(samples) => samples.next(),
        }
    }
}

impl PathGeometry for LaneGeometry {
    type Samples = LaneSamples;

    fn initial_position(&self) -> Vec2 {
        match self {
            LaneGeometry::Circle(lane) => lane.initial_position(),
        }
    }

    fn next_position(&self, player: &PlayerState) -> Vec2 {
        match self {
            LaneGeometry::Circle(lane) => lane.next_position(player),
        }
    }

    fn next_heading(&self, player: &PlayerState) -> f32 {
        match self {
            LaneGeometry::Circle(lane) => lane.next_heading(player),
        }
    }

    fn lane_swap_position(&self, player: &PlayerState, previous: &LaneGeometry) -> Vec2 {
        match self {
            LaneGeometry::Circle(lane) => lane.lane_swap_position(player, previous),
        }
    }

    fn sample_for_rendering(&self) -> LaneSamples {
        match self {
            LaneGeometry::Circle(lane) => LaneSamples::Circle(lane.sample_for_rendering()),
        }
    }
}
