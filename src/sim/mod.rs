//! Track simulation module
//!
//! Pure, single-threaded and tick-driven:
//! - Lane changes and direction swaps are applied before the tick that
//!   should see them
//! - Players advance in roster order
//! - No rendering, input device or asset dependencies

pub mod actor;
pub mod lane;
pub mod player;
pub mod tick;
pub mod topology;
pub mod track;

pub use actor::{ActorHandle, ActorLifecycle, NullActors};
pub use lane::{CircleLane, CircleSamples, LaneGeometry, LaneSamples, PathGeometry};
pub use player::{PlayerId, PlayerState, TravelDirection};
pub use tick::{PlayerCommand, TickInput};
pub use topology::{LaneId, LaneTopology, Side};
pub use track::{SimPhase, TrackSimulation};
