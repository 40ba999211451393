//! Visual actor lifecycle seam
//!
//! The simulation never builds visual objects itself. It asks an
//! [`ActorLifecycle`] implementation for an opaque handle per player and
//! pushes transforms through it.

use glam::Vec2;

use super::player::PlayerState;

/// Opaque handle to a player's visual representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorHandle(pub u64);

/// Creates, moves and destroys player actors
pub trait ActorLifecycle {
    fn spawn(&mut self, player: &PlayerState) -> ActorHandle;

    /// Move and orient an actor (heading in radians)
    fn place(&mut self, handle: ActorHandle, position: Vec2, heading: f32);

    fn destroy(&mut self, handle: ActorHandle);
}

/// Headless runs: hands out sequential handles and ignores everything else
#[derive(Debug, Default)]
pub struct NullActors {
    next: u64,
}

impl ActorLifecycle for NullActors {
    fn spawn(&mut self, _player: &PlayerState) -> ActorHandle {
        self.next += 1;
        ActorHandle(self.next)
    }

    fn place(&mut self, _handle: ActorHandle, _position: Vec2, _heading: f32) {}

    fn destroy(&mut self, _handle: ActorHandle) {}
}
