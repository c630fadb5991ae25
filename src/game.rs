use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::Board;
use crate::config::{ConfigError, GameConfig};
use crate::input::Direction;
use crate::score::ScoreManager;
use crate::snake::Snake;
use crate::tile::Tile;

/// Current high-level session state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// One game of snake: board, snake, scores, and the per-tick state machine.
///
/// An external timer drives [`GameSession::update`] once per configured
/// interval; nothing in here blocks or spawns threads. `GameOver` is terminal
/// until [`GameSession::restart`] rebuilds the board and snake.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub board: Board,
    pub scores: ScoreManager,
    pub status: GameStatus,
    pub tick_count: u64,
    config: GameConfig,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session with an entropy-seeded RNG.
    pub fn new(config: GameConfig, high_score: u32) -> Result<Self, ConfigError> {
        Self::from_rng(config, high_score, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    pub fn with_seed(config: GameConfig, high_score: u32, seed: u64) -> Result<Self, ConfigError> {
        Self::from_rng(config, high_score, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: GameConfig, high_score: u32, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let snake = Snake::new(config.board_width / 2, config.board_height / 2, config.tile_size);
        let board = Board::new(&mut rng, config);

        Ok(Self {
            snake,
            board,
            scores: ScoreManager::new(high_score),
            status: GameStatus::Running,
            tick_count: 0,
            config,
            rng,
        })
    }

    /// Advances the simulation by one tick. A no-op after game over.
    ///
    /// Tick order: expire a lapsed power-up, check collisions, run
    /// eat-detection (growing, scoring, and respawning per eaten pellet),
    /// then move the snake one cell.
    pub fn update(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }

        self.tick_count += 1;
        self.snake.expire_power_up(self.tick_count);

        if self.board.is_collision(&self.snake) {
            self.status = GameStatus::GameOver;
            return;
        }

        self.check_pellet_collisions();
        self.snake.advance();
    }

    /// Forwards directional input to the snake while the game is running.
    pub fn handle_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::Running {
            self.snake.set_direction(direction);
        }
    }

    /// Rebuilds the board and snake for a fresh game.
    ///
    /// The current score resets; the high score carries over.
    pub fn restart(&mut self) {
        self.snake = Snake::new(
            self.config.board_width / 2,
            self.config.board_height / 2,
            self.config.tile_size,
        );
        self.board = Board::new(&mut self.rng, self.config);
        self.scores.reset();
        self.status = GameStatus::Running;
        self.tick_count = 0;
    }

    /// Returns true once the session has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Session configuration, fixed at construction.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Remaining power-up ticks, for the HUD countdown.
    #[must_use]
    pub fn power_up_ticks_left(&self) -> u64 {
        if !self.snake.is_powered_up() {
            return 0;
        }
        self.config
            .power_up_duration_ticks()
            .min(self.power_up_deadline_distance())
    }

    fn power_up_deadline_distance(&self) -> u64 {
        // Powered-up is Some(deadline) with deadline > tick_count, enforced
        // by expire_power_up at the top of every tick.
        self.snake
            .power_up_deadline()
            .map_or(0, |deadline| deadline.saturating_sub(self.tick_count))
    }

    /// Eats every pellet the snake reaches this tick.
    ///
    /// A powered-up snake eats in the 5x5 block of cells centered on its
    /// head; otherwise only the exact head cell counts. Each eaten pellet
    /// scores one point, grows the snake, and respawns; power-up pellets arm
    /// the snake's power-up (replacing any pending deadline), and pellets
    /// respawned while the snake is powered cannot themselves be power-ups.
    fn check_pellet_collisions(&mut self) {
        let head = self.snake.head();

        for i in 0..self.board.pellets().len() {
            let eaten = if self.snake.is_powered_up() {
                self.detect_in_power_window(i, head)
            } else {
                self.board.pellets_mut()[i].detect_collision(head)
            };

            if !eaten {
                continue;
            }

            if self.board.pellets()[i].is_power_up() {
                self.snake
                    .power_up(self.tick_count + self.config.power_up_duration_ticks());
            }

            let can_power_up = !self.snake.is_powered_up();
            self.board.pellets_mut()[i].respawn(
                &mut self.rng,
                &self.config,
                can_power_up,
                &self.snake,
            );
            self.scores.add(1);
            self.snake.grow();
        }
    }

    fn detect_in_power_window(&mut self, pellet_index: usize, head: Tile) -> bool {
        for dy in -2..=2 {
            for dx in -2..=2 {
                let probe = Tile::from_grid(
                    head.tile_x() + dx,
                    head.tile_y() + dy,
                    self.config.tile_size,
                );
                if self.board.pellets_mut()[pellet_index].detect_collision(probe) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigError, GameConfig};
    use crate::input::Direction;
    use crate::snake::Snake;
    use crate::tile::Tile;

    use super::{GameSession, GameStatus};

    fn test_config() -> GameConfig {
        GameConfig {
            board_width: 600,
            board_height: 600,
            tile_size: 20,
            pellet_count: 1,
            ..GameConfig::default()
        }
    }

    fn test_session() -> GameSession {
        GameSession::with_seed(test_config(), 0, 42).expect("test config should be valid")
    }

    #[test]
    fn construction_fails_fast_on_invalid_config() {
        let config = GameConfig {
            pellet_count: 0,
            ..test_config()
        };
        assert_eq!(
            GameSession::with_seed(config, 0, 1).err(),
            Some(ConfigError::ZeroPelletCount)
        );
    }

    #[test]
    fn snake_starts_at_the_board_center() {
        let session = test_session();
        assert_eq!(session.snake.head(), Tile::from_grid(15, 15, 20));
        assert_eq!(session.status, GameStatus::Running);
    }

    #[test]
    fn eating_a_pellet_scores_grows_and_respawns() {
        let mut session = test_session();
        let pellet_tile = session.board.pellets()[0].tile();
        // Park the snake's head on the pellet cell.
        session.snake = Snake::from_segments(
            vec![pellet_tile],
            Direction::Right,
            session.config().tile_size,
        );

        session.update();

        assert_eq!(session.scores.current_score(), 1);
        assert_eq!(session.snake.len(), 2);
        // Respawn runs before the snake advances, so every cell except the
        // head's advance target is guaranteed pellet-free.
        let relocated = session.board.pellets()[0].tile();
        assert_ne!(relocated, pellet_tile);
        assert!(session.snake.segments().skip(1).all(|s| *s != relocated));
        assert!(!session.board.pellets()[0].is_eaten());
    }

    /// Interior cell exactly two columns from the pellet, whichever side has
    /// room: outside exact-head reach, inside the 5x5 power window.
    fn cell_two_off(pellet_tile: Tile) -> Tile {
        let tile_x = if pellet_tile.tile_x() <= 26 {
            pellet_tile.tile_x() + 2
        } else {
            pellet_tile.tile_x() - 2
        };
        Tile::from_grid(tile_x, pellet_tile.tile_y(), 20)
    }

    #[test]
    fn powered_snake_eats_in_a_five_by_five_window() {
        let mut session = test_session();
        let pellet_tile = session.board.pellets()[0].tile();
        session.snake = Snake::from_segments(vec![cell_two_off(pellet_tile)], Direction::Up, 20);
        session.snake.power_up(1_000);

        session.update();

        assert_eq!(session.scores.current_score(), 1);
        assert_eq!(session.snake.len(), 2);
    }

    #[test]
    fn unpowered_snake_only_eats_the_exact_head_cell() {
        let mut session = test_session();
        let pellet_tile = session.board.pellets()[0].tile();
        session.snake = Snake::from_segments(vec![cell_two_off(pellet_tile)], Direction::Up, 20);

        session.update();

        assert_eq!(session.scores.current_score(), 0);
        assert_eq!(session.snake.len(), 1);
    }

    #[test]
    fn wall_collision_ends_the_session_and_updates_become_no_ops() {
        let mut session = test_session();
        session.snake = Snake::from_segments(vec![Tile::from_grid(0, 10, 20)], Direction::Left, 20);

        session.update();
        assert_eq!(session.status, GameStatus::GameOver);

        let head_after_game_over = session.snake.head();
        let ticks = session.tick_count;
        session.update();
        assert_eq!(session.snake.head(), head_after_game_over);
        assert_eq!(session.tick_count, ticks);
    }

    #[test]
    fn direction_input_is_ignored_after_game_over() {
        let mut session = test_session();
        session.snake = Snake::from_segments(vec![Tile::from_grid(0, 10, 20)], Direction::Left, 20);
        session.update();
        assert!(session.is_game_over());

        session.handle_direction(Direction::Up);
        assert_eq!(session.snake.direction(), Direction::Left);
    }

    #[test]
    fn restart_rebuilds_the_session_and_keeps_the_high_score() {
        let mut session = test_session();
        let pellet_tile = session.board.pellets()[0].tile();
        session.snake = Snake::from_segments(vec![pellet_tile], Direction::Right, 20);
        session.update();
        assert_eq!(session.scores.current_score(), 1);
        session.scores.record_high();

        session.snake = Snake::from_segments(vec![Tile::from_grid(0, 10, 20)], Direction::Left, 20);
        session.update();
        assert!(session.is_game_over());

        session.restart();

        assert_eq!(session.status, GameStatus::Running);
        assert_eq!(session.tick_count, 0);
        assert_eq!(session.scores.current_score(), 0);
        assert_eq!(session.scores.high_score(), 1);
        assert_eq!(session.snake.len(), 1);
        assert_eq!(session.snake.head(), Tile::from_grid(15, 15, 20));
    }

    #[test]
    fn power_up_expires_after_its_configured_duration() {
        let config = GameConfig {
            tick_interval_ms: 75,
            power_up_duration_ms: 150,
            ..test_config()
        };
        let mut session = GameSession::with_seed(config, 0, 7).expect("valid config");
        // Keep the head at least five rows away from the pellet so the 5x5
        // power window cannot eat anything during the two observed ticks.
        let pellet_tile = session.board.pellets()[0].tile();
        let head_y = if pellet_tile.tile_y() <= 23 {
            pellet_tile.tile_y() + 5
        } else {
            pellet_tile.tile_y() - 5
        };
        session.snake =
            Snake::from_segments(vec![Tile::from_grid(5, head_y, 20)], Direction::Right, 20);
        session
            .snake
            .power_up(session.tick_count + config.power_up_duration_ticks());
        assert!(session.snake.is_powered_up());

        session.update();
        assert!(session.snake.is_powered_up());

        session.update();
        assert!(!session.snake.is_powered_up());
    }
}
