use rand::Rng;

use crate::config::GameConfig;
use crate::food::FoodPellet;
use crate::snake::Snake;
use crate::tile::Tile;

/// Fixed-size tile grid holding the pellets for one session.
///
/// The playable interior excludes a 1-tile border belt; the collision test
/// checks the snake's head against that belt and against the snake itself.
#[derive(Debug, Clone)]
pub struct Board {
    config: GameConfig,
    pellets: Vec<FoodPellet>,
}

impl Board {
    /// Creates a board and spawns the configured number of pellets.
    ///
    /// Single-pellet boards use the white pellet variant.
    #[must_use]
    pub fn new<R: Rng + ?Sized>(rng: &mut R, config: GameConfig) -> Self {
        let is_white = config.pellet_count == 1;
        let pellets = (0..config.pellet_count)
            .map(|_| FoodPellet::new(rng, &config, is_white))
            .collect();

        Self { config, pellets }
    }

    /// Board width in pixels.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.config.board_width
    }

    /// Board height in pixels.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.config.board_height
    }

    /// Board width in whole grid cells.
    #[must_use]
    pub fn tiles_wide(&self) -> i32 {
        self.config.tiles_wide()
    }

    /// Board height in whole grid cells.
    #[must_use]
    pub fn tiles_high(&self) -> i32 {
        self.config.tiles_high()
    }

    /// Read-only view of the pellets, for eat-detection and rendering.
    #[must_use]
    pub fn pellets(&self) -> &[FoodPellet] {
        &self.pellets
    }

    pub(crate) fn pellets_mut(&mut self) -> &mut [FoodPellet] {
        &mut self.pellets
    }

    /// Returns true when `tile` lies on or beyond the 1-tile border belt.
    #[must_use]
    pub fn is_wall(&self, tile: Tile) -> bool {
        tile.tile_x() <= 0
            || tile.tile_x() >= self.tiles_wide() - 1
            || tile.tile_y() <= 0
            || tile.tile_y() >= self.tiles_high() - 1
    }

    /// Returns true when the snake's head has hit the wall belt or the snake
    /// has run into itself.
    #[must_use]
    pub fn is_collision(&self, snake: &Snake) -> bool {
        self.is_wall(snake.head()) || snake.has_collided_with_self()
    }
}
