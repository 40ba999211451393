//! Track simulation
//!
//! Owns the lane topology, the player roster and the player -> lane
//! assignment table. Lifecycle is `Uninitialized -> Active -> Destroyed`;
//! an instance is single-use.
//!
//! Per tick, all lane changes and direction swaps are applied first, then
//! every assigned player advances along its lane. Players never read each
//! other's state, so roster order only affects write order.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::actor::{ActorHandle, ActorLifecycle, NullActors};
use super::lane::{LaneGeometry, LaneSamples, PathGeometry};
use super::player::{PlayerId, PlayerState};
use super::tick::{PlayerCommand, TickInput};
use super::topology::{LaneId, LaneTopology, Side};
use crate::error::TrackError;

/// Lifecycle phase of a simulation instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    Uninitialized,
    Active,
    Destroyed,
}

impl SimPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimPhase::Uninitialized => "uninitialized",
            SimPhase::Active => "active",
            SimPhase::Destroyed => "destroyed",
        }
    }
}

/// A race: lanes, players and who is on which lane
#[derive(Debug)]
pub struct TrackSimulation<A: ActorLifecycle = NullActors> {
    phase: SimPhase,
    topology: LaneTopology,
    /// Roster in insertion order (tick iteration order)
    players: Vec<PlayerState>,
    assignments: HashMap<PlayerId, LaneId>,
    handles: HashMap<PlayerId, ActorHandle>,
    actors: A,
    time_ticks: u64,
}

impl Default for TrackSimulation<NullActors> {
    fn default() -> Self {
        Self::new(NullActors::default())
    }
}

impl<A: ActorLifecycle> TrackSimulation<A> {
    pub fn new(actors: A) -> Self {
        Self {
            phase: SimPhase::Uninitialized,
            topology: LaneTopology::new(),
            players: Vec::new(),
            assignments: HashMap::new(),
            handles: HashMap::new(),
            actors,
            time_ticks: 0,
        }
    }

    /// Build the track and place every player on the first lane.
    ///
    /// On error nothing changes and the simulation stays uninitialized.
    pub fn start(
        &mut self,
        players: Vec<PlayerState>,
        lanes: Vec<LaneGeometry>,
    ) -> Result<(), TrackError> {
        if self.phase != SimPhase::Uninitialized {
            return Err(self.phase_error("start"));
        }
        if lanes.is_empty() {
            return Err(TrackError::EmptyTopology);
        }
        let mut seen = HashSet::new();
        for player in &players {
            if !seen.insert(player.id()) {
                return Err(TrackError::DuplicatePlayer { id: player.id() });
            }
        }

        for lane in lanes {
            self.topology.append(lane);
        }
        self.phase = SimPhase::Active;
        for player in players {
            self.join(player);
        }

        log::info!(
            "Race started: {} lanes, {} players",
            self.topology.len(),
            self.players.len()
        );
        Ok(())
    }

    /// Add late joiners to the first lane of a running race
    pub fn add_players(&mut self, players: Vec<PlayerState>) -> Result<(), TrackError> {
        if self.phase != SimPhase::Active {
            return Err(self.phase_error("add players"));
        }
        let mut seen: HashSet<PlayerId> = self.players.iter().map(PlayerState::id).collect();
        for player in &players {
            if !seen.insert(player.id()) {
                return Err(TrackError::DuplicatePlayer { id: player.id() });
            }
        }
        for player in players {
            self.join(player);
        }
        Ok(())
    }

    /// Append a lane to the outer end of a running race
    pub fn add_lane(&mut self, lane: impl Into<LaneGeometry>) -> Result<LaneId, TrackError> {
        if self.phase != SimPhase::Active {
            return Err(self.phase_error("add a lane"));
        }
        Ok(self.topology.append(lane))
    }

    fn join(&mut self, mut player: PlayerState) {
        let id = player.id();
        let first = self
            .topology
            .first_lane()
            .and_then(|lane| Some((lane, self.topology.get(lane)?)));
        if let Some((lane_id, lane)) = first {
            player.set_position(lane.initial_position());
            self.assignments.insert(id, lane_id);
        }

        let handle = self.actors.spawn(&player);
        self.actors.place(handle, player.position(), player.heading());
        self.handles.insert(id, handle);
        self.players.push(player);
    }

    /// Move a player to the neighbouring lane on `side`, keeping its angle.
    ///
    /// Unassigned players and boundary moves are no-ops.
    pub fn request_lane_change(&mut self, id: PlayerId, side: Side) {
        if !self.ensure_active("change lanes") {
            return;
        }
        let Some(&current) = self.assignments.get(&id) else {
            log::debug!("Lane change for unassigned player {id} ignored");
            return;
        };
        let Some(target) = self.topology.adjacent(current, side) else {
            log::debug!("Player {id} already on the {side:?} boundary lane");
            return;
        };
        let (Some(from), Some(to)) = (self.topology.get(current), self.topology.get(target))
        else {
            return;
        };
        let Some(player) = self.players.iter_mut().find(|p| p.id() == id) else {
            return;
        };

        let landing = to.lane_swap_position(player, from);
        player.set_position(landing);
        self.assignments.insert(id, target);
        if let Some(&handle) = self.handles.get(&id) {
            self.actors.place(handle, landing, player.heading());
        }
        log::debug!("Player {id} moved from lane {} to lane {}", current.0, target.0);
    }

    /// Flip a player's travel direction from the next tick on
    pub fn swap_direction(&mut self, id: PlayerId) {
        if !self.ensure_active("swap direction") {
            return;
        }
        match self.players.iter_mut().find(|p| p.id() == id) {
            Some(player) => player.swap_direction(),
            None => log::debug!("Direction swap for unknown player {id} ignored"),
        }
    }

    /// Advance every assigned player one step along its lane
    pub fn tick(&mut self) {
        if !self.ensure_active("tick") {
            return;
        }
        for player in &mut self.players {
            let Some(lane) = self
                .assignments
                .get(&player.id())
                .and_then(|&lane| self.topology.get(lane))
            else {
                continue;
            };
            let position = lane.next_position(player);
            let heading = lane.next_heading(player);
            player.set_position(position);
            player.set_heading(heading);

            if let Some(&handle) = self.handles.get(&player.id()) {
                self.actors.place(handle, position, heading);
            }
        }
        self.time_ticks += 1;
    }

    /// Apply one tick worth of input, then advance. Cancel tears the race
    /// down instead.
    pub fn step(&mut self, input: &TickInput) {
        if input.cancel {
            self.destroy();
            return;
        }
        for &(id, command) in &input.commands {
            match command {
                PlayerCommand::MoveLeft => self.request_lane_change(id, Side::Left),
                PlayerCommand::MoveRight => self.request_lane_change(id, Side::Right),
                PlayerCommand::SwapDirection => self.swap_direction(id),
            }
        }
        self.tick();
    }

    /// Release every actor and lane. The instance cannot be restarted.
    pub fn destroy(&mut self) {
        if self.phase == SimPhase::Destroyed {
            log::warn!("Race already destroyed");
            return;
        }
        for player in &self.players {
            if let Some(handle) = self.handles.remove(&player.id()) {
                self.actors.destroy(handle);
            }
        }
        self.players.clear();
        self.assignments.clear();
        self.handles.clear();
        self.topology.destroy();
        self.phase = SimPhase::Destroyed;
        log::info!("Race destroyed after {} ticks", self.time_ticks);
    }

    /// Rendering polylines, one per lane, in lane order
    pub fn lane_polylines(&self) -> impl Iterator<Item = (LaneId, LaneSamples)> + '_ {
        self.topology
            .iter()
            .map(|(id, lane)| (id, lane.sample_for_rendering()))
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Lane a player is assigned to, if any
    pub fn lane_of(&self, id: PlayerId) -> Option<LaneId> {
        self.assignments.get(&id).copied()
    }

    pub fn topology(&self) -> &LaneTopology {
        &self.topology
    }

    pub fn actors(&self) -> &A {
        &self.actors
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    fn ensure_active(&self, operation: &str) -> bool {
        if self.phase == SimPhase::Active {
            return true;
        }
        log::warn!("Cannot {operation} while the race is {}", self.phase.as_str());
        false
    }

    fn phase_error(&self, operation: &'static str) -> TrackError {
        TrackError::InvalidPhase {
            operation,
            phase: self.phase.as_str(),
        }
    }
}
