//! Lane Racer entry point
//!
//! Headless native driver: loads settings and levels, starts the configured
//! race and plays a short scripted session.
//!
//! Usage: `lane-racer [LEVELS_DIR] [SETTINGS_FILE] [TICKS]`

use std::process::ExitCode;

use lane_racer::{Game, GameStatus, LevelLibrary, Settings, TrackError};

const DEFAULT_LEVELS_DIR: &str = "levels";
const DEFAULT_SETTINGS_FILE: &str = "settings.json";
const DEFAULT_TICKS: u64 = 240;

/// Keys pressed on a given tick of the demo script
fn scripted_keys(tick: u64) -> &'static [&'static str] {
    match tick {
        30 => &["w"],      // Player 1 moves out a lane
        60 => &["p", "e"], // Player 2 moves out, player 1 turns around
        90 => &["w"],
        120 => &["o"],     // Player 2 moves back in
        150 => &["l"],
        _ => &[],
    }
}

fn run() -> Result<(), TrackError> {
    let mut args = std::env::args().skip(1);
    let levels_dir = args.next().unwrap_or_else(|| DEFAULT_LEVELS_DIR.to_string());
    let settings_file = args.next().unwrap_or_else(|| DEFAULT_SETTINGS_FILE.to_string());
    let ticks = args
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let settings = Settings::load(&settings_file)?;
    let levels = LevelLibrary::load_dir(&levels_dir)?;
    log::info!(
        "Available levels: {}",
        levels.names().collect::<Vec<_>>().join(", ")
    );

    let mut game: Game = Game::new(levels, settings);
    game.start_game()?;

    for tick in 0..ticks {
        game.handle_keys(scripted_keys(tick), false);
        game.update();

        let Some(race) = game.race().filter(|_| tick % 60 == 0) else {
            continue;
        };
        for player in race.players() {
            log::info!(
                "tick {tick}: {} lane {:?} pos ({:.2}, {:.2}) heading {:.1}°",
                player.name(),
                race.lane_of(player.id()).map(|lane| lane.0),
                player.position().x,
                player.position().y,
                player.heading().to_degrees()
            );
        }
    }

    game.handle_keys(&[], true);
    game.update();
    debug_assert_eq!(game.status(), GameStatus::Idle);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Lane Racer (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
