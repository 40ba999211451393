//! Per-tick input commands
//!
//! The input collaborator turns device events into these; the simulation
//! applies them before advancing players.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A discrete action a player can take in one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    MoveLeft,
    MoveRight,
    SwapDirection,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// At most one command per player, applied in order
    pub commands: Vec<(PlayerId, PlayerCommand)>,
    /// Abort the race
    pub cancel: bool,
}

impl TickInput {
    pub fn with_command(mut self, player: PlayerId, command: PlayerCommand) -> Self {
        self.commands.push((player, command));
        self
    }

    /// Queue `command` for `player`, replacing any command already queued
    /// for that player this tick
    pub fn set_command(&mut self, player: PlayerId, command: PlayerCommand) {
        match self.commands.iter_mut().find(|(id, _)| *id == player) {
            Some(entry) => entry.1 = command,
            None => self.commands.push((player, command)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && !self.cancel
    }
}
