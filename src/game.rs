//! Game session driver
//!
//! Holds the loaded levels and settings, turns key presses into tick input
//! and owns the current race, if any. The host loop calls
//! [`Game::handle_keys`] then [`Game::update`] once per frame.

use crate::error::TrackError;
use crate::level::LevelLibrary;
use crate::settings::{KeyBindings, Settings};
use crate::sim::{
    ActorLifecycle, NullActors, PlayerId, PlayerState, SimPhase, TickInput, TrackSimulation,
};

/// Whether a race is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Idle,
    Running,
}

pub struct Game<A: ActorLifecycle + Default = NullActors> {
    status: GameStatus,
    levels: LevelLibrary,
    settings: Settings,
    race: Option<TrackSimulation<A>>,
    bindings: Vec<(PlayerId, KeyBindings)>,
    input: TickInput,
}

impl<A: ActorLifecycle + Default> Game<A> {
    pub fn new(levels: LevelLibrary, settings: Settings) -> Self {
        Self {
            status: GameStatus::Idle,
            levels,
            settings,
            race: None,
            bindings: Vec::new(),
            input: TickInput::default(),
        }
    }

    /// Start a race on the configured level, replacing any running race
    pub fn start_game(&mut self) -> Result<(), TrackError> {
        let level = self.levels.find(&self.settings.level)?;
        let lanes = level.build_lanes(self.settings.theta_scale)?;
        let players = self.settings.build_players()?;
        let bindings = players
            .iter()
            .map(PlayerState::id)
            .zip(self.settings.players.iter().map(|p| p.bindings.clone()))
            .collect();

        let mut race = TrackSimulation::new(A::default());
        race.start(players, lanes)?;
        log::info!("Started level \"{}\"", level.name);

        self.stop();
        self.race = Some(race);
        self.bindings = bindings;
        self.status = GameStatus::Running;
        Ok(())
    }

    /// Queue this frame's input. `cancel` ends the race on the next update.
    /// A later call before `update` overrides a player's earlier command.
    pub fn handle_keys(&mut self, pressed: &[&str], cancel: bool) {
        if self.race.is_none() {
            return;
        }
        for (id, bindings) in &self.bindings {
            if let Some(command) = bindings.resolve(pressed) {
                self.input.set_command(*id, command);
            }
        }
        self.input.cancel |= cancel;
    }

    /// Apply queued input and advance the race one tick
    pub fn update(&mut self) {
        let input = std::mem::take(&mut self.input);
        let Some(race) = self.race.as_mut() else {
            return;
        };
        race.step(&input);
        if race.phase() == SimPhase::Destroyed {
            log::info!("Race cancelled");
            self.race = None;
            self.bindings.clear();
            self.status = GameStatus::Idle;
        }
    }

    /// Tear down the running race, if any
    pub fn stop(&mut self) {
        if let Some(mut race) = self.race.take() {
            race.destroy();
        }
        self.bindings.clear();
        self.input = TickInput::default();
        self.status = GameStatus::Idle;
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn race(&self) -> Option<&TrackSimulation<A>> {
        self.race.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn levels(&self) -> &LevelLibrary {
        &self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::POSITION_EPSILON;
    use crate::level::LevelDefinition;
    use crate::sim::LaneId;

    fn game() -> Game {
        let mut levels = LevelLibrary::new();
        levels.insert(LevelDefinition {
            name: crate::consts::DEFAULT_LEVEL_NAME.to_string(),
            radii: vec![3.0, 5.0, 7.0],
        });
        Game::new(levels, Settings::default())
    }

    #[test]
    fn test_start_game_runs_race() {
        let mut game = game();
        game.start_game().unwrap();
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.race().unwrap().players().len(), 2);
    }

    #[test]
    fn test_missing_level_is_surfaced() {
        let mut game: Game = Game::new(LevelLibrary::new(), Settings::default());
        assert!(matches!(
            game.start_game(),
            Err(TrackError::LevelNotFound { .. })
        ));
        assert_eq!(game.status(), GameStatus::Idle);
        assert!(game.race().is_none());
    }

    #[test]
    fn test_keys_drive_players() {
        let mut game = game();
        game.start_game().unwrap();

        // Player 1 moves right, player 2 swaps direction
        game.handle_keys(&["w", "l"], false);
        game.update();

        let race = game.race().unwrap();
        assert_eq!(race.lane_of(PlayerId(1)), Some(LaneId(1)));
        assert!((race.player(PlayerId(1)).unwrap().position().length() - 5.0).abs() < POSITION_EPSILON);
        assert!(race.player(PlayerId(2)).unwrap().position().y < 0.0);
    }

    #[test]
    fn test_repeated_keys_queue_one_command_per_player() {
        let mut game = game();
        game.start_game().unwrap();

        // Player 1 presses right, then swap, before the tick runs
        game.handle_keys(&["w"], false);
        game.handle_keys(&["e"], false);
        game.update();

        let race = game.race().unwrap();
        assert_eq!(race.lane_of(PlayerId(1)), Some(LaneId(0)));
        assert_eq!(
            race.player(PlayerId(1)).unwrap().direction(),
            crate::sim::TravelDirection::Reverse
        );
        assert!(race.player(PlayerId(1)).unwrap().position().y < 0.0);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut game = game();
        game.start_game().unwrap();
        game.handle_keys(&[], true);
        game.update();

        assert_eq!(game.status(), GameStatus::Idle);
        assert!(game.race().is_none());
        // Updating without a race is harmless
        game.update();
    }
}
