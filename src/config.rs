use thiserror::Error;

/// Default board width in pixels.
pub const DEFAULT_BOARD_WIDTH: i32 = 600;

/// Default board height in pixels.
pub const DEFAULT_BOARD_HEIGHT: i32 = 600;

/// Default edge length of one grid cell in pixels.
pub const DEFAULT_TILE_SIZE: i32 = 20;

/// Default simulation tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 75;

/// Default number of pellets kept on the board.
pub const DEFAULT_PELLET_COUNT: usize = 5;

/// Default 1-in-N odds of a spawned pellet being a power-up.
pub const DEFAULT_POWER_UP_CHANCE: u32 = 10;

/// Default power-up duration in milliseconds.
pub const DEFAULT_POWER_UP_DURATION_MS: u64 = 15_000;

/// Rejected session configuration.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    NonPositiveBoard { width: i32, height: i32 },
    #[error("tile size must be positive, got {0}")]
    NonPositiveTileSize(i32),
    #[error("tick interval must be positive")]
    ZeroTickInterval,
    #[error("pellet count must be positive")]
    ZeroPelletCount,
    #[error("power-up odds must be positive")]
    ZeroPowerUpChance,
    #[error(
        "board {width}x{height} is too small for tile size {tile_size}: \
         pellet spawning needs more than 3 tiles per axis"
    )]
    BoardTooSmall {
        width: i32,
        height: i32,
        tile_size: i32,
    },
}

/// Externally supplied session parameters.
///
/// Everything the simulation used to read from scattered constants lives
/// here, so tests can run tiny boards with fixed odds and seeds.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    /// Board width in pixels.
    pub board_width: i32,
    /// Board height in pixels.
    pub board_height: i32,
    /// Edge length of one grid cell in pixels.
    pub tile_size: i32,
    /// Simulation tick interval in milliseconds.
    pub tick_interval_ms: u64,
    /// Number of pellets kept on the board.
    pub pellet_count: usize,
    /// 1-in-N odds of a spawned pellet being a power-up.
    pub power_up_chance: u32,
    /// How long a power-up stays active, in milliseconds.
    pub power_up_duration_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            pellet_count: DEFAULT_PELLET_COUNT,
            power_up_chance: DEFAULT_POWER_UP_CHANCE,
            power_up_duration_ms: DEFAULT_POWER_UP_DURATION_MS,
        }
    }
}

impl GameConfig {
    /// Rejects configurations the simulation cannot run on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width <= 0 || self.board_height <= 0 {
            return Err(ConfigError::NonPositiveBoard {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if self.tile_size <= 0 {
            return Err(ConfigError::NonPositiveTileSize(self.tile_size));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.pellet_count == 0 {
            return Err(ConfigError::ZeroPelletCount);
        }
        if self.power_up_chance == 0 {
            return Err(ConfigError::ZeroPowerUpChance);
        }
        // Pellet spawning rolls inside a 1-tile interior belt with a 3-tile
        // margin budget, so each axis needs more than 3 tiles of room.
        if self.board_width <= 3 * self.tile_size || self.board_height <= 3 * self.tile_size {
            return Err(ConfigError::BoardTooSmall {
                width: self.board_width,
                height: self.board_height,
                tile_size: self.tile_size,
            });
        }
        Ok(())
    }

    /// Board width in whole grid cells.
    #[must_use]
    pub fn tiles_wide(&self) -> i32 {
        self.board_width.div_euclid(self.tile_size)
    }

    /// Board height in whole grid cells.
    #[must_use]
    pub fn tiles_high(&self) -> i32 {
        self.board_height.div_euclid(self.tile_size)
    }

    /// Power-up lifetime expressed in simulation ticks, at least one.
    #[must_use]
    pub fn power_up_duration_ticks(&self) -> u64 {
        (self.power_up_duration_ms / self.tick_interval_ms).max(1)
    }
}
