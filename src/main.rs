use std::io;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;

use gridsnake::config::{
    GameConfig, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_PELLET_COUNT,
    DEFAULT_TICK_INTERVAL_MS, DEFAULT_TILE_SIZE,
};
use gridsnake::game::GameSession;
use gridsnake::input::{poll_input, GameInput};
use gridsnake::renderer;
use gridsnake::score::{load_high_score, save_high_score};
use gridsnake::terminal_runtime::TerminalGuard;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Parser)]
#[command(name = "gridsnake", version, about = "Tile-grid Snake for the terminal")]
struct Cli {
    /// Board width in pixels.
    #[arg(long, default_value_t = DEFAULT_BOARD_WIDTH)]
    width: i32,

    /// Board height in pixels.
    #[arg(long, default_value_t = DEFAULT_BOARD_HEIGHT)]
    height: i32,

    /// Edge length of one grid cell in pixels.
    #[arg(long = "tile-size", default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: i32,

    /// Simulation tick interval in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    interval: u64,

    /// Number of pellets kept on the board.
    #[arg(long, default_value_t = DEFAULT_PELLET_COUNT)]
    pellets: usize,

    /// Fixed RNG seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = GameConfig {
        board_width: cli.width,
        board_height: cli.height,
        tile_size: cli.tile_size,
        tick_interval_ms: cli.interval,
        pellet_count: cli.pellets,
        ..GameConfig::default()
    };

    let high_score = match load_high_score() {
        Ok(score) => score,
        Err(error) => {
            eprintln!("Warning: could not read high score file: {error}");
            0
        }
    };

    let session = match cli.seed {
        Some(seed) => GameSession::with_seed(config, high_score, seed),
        None => GameSession::new(config, high_score),
    };
    let mut session = match session {
        Ok(session) => session,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = run(&mut session) {
        eprintln!("Terminal error: {error}");
        return ExitCode::FAILURE;
    }

    persist_high_score(&mut session);
    ExitCode::SUCCESS
}

fn run(session: &mut GameSession) -> io::Result<()> {
    let mut guard = TerminalGuard::enter()?;
    let tick_interval = Duration::from_millis(session.config().tick_interval_ms);
    let mut last_tick = Instant::now();
    let mut was_game_over = session.is_game_over();

    loop {
        guard
            .terminal_mut()
            .draw(|frame| renderer::render(frame, session))?;

        match poll_input(INPUT_POLL_INTERVAL)? {
            Some(GameInput::Quit) => break,
            Some(GameInput::Restart) => {
                if session.is_game_over() {
                    session.restart();
                    was_game_over = false;
                }
            }
            Some(GameInput::Direction(direction)) => session.handle_direction(direction),
            None => {}
        }

        if last_tick.elapsed() >= tick_interval {
            session.update();
            last_tick = Instant::now();
        }

        if session.is_game_over() && !was_game_over {
            persist_high_score(session);
            was_game_over = true;
        }
    }

    Ok(())
}

fn persist_high_score(session: &mut GameSession) {
    let high_score = session.scores.record_high();
    if let Err(error) = save_high_score(high_score) {
        eprintln!("Failed to save high score: {error}");
    }
}
