use rand::Rng;

use crate::config::GameConfig;
use crate::snake::Snake;
use crate::tile::Tile;

/// Random re-roll attempts before respawn falls back to scanning free cells.
const MAX_RESPAWN_ATTEMPTS: u32 = 64;

/// Render color class of a pellet.
///
/// `Gold` is reserved for power-ups and `White` for the single-pellet board
/// variant; the rest form the random palette.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PelletColor {
    Red,
    Orange,
    Yellow,
    Cyan,
    Blue,
    Pink,
    Purple,
    White,
    Gold,
}

const PALETTE: [PelletColor; 7] = [
    PelletColor::Red,
    PelletColor::Orange,
    PelletColor::Yellow,
    PelletColor::Cyan,
    PelletColor::Blue,
    PelletColor::Pink,
    PelletColor::Purple,
];

/// One collectible pellet on the board.
#[derive(Debug, Clone)]
pub struct FoodPellet {
    tile: Tile,
    color: PelletColor,
    is_white: bool,
    is_power_up: bool,
    is_eaten: bool,
}

impl FoodPellet {
    /// Creates a pellet and rolls its first position.
    ///
    /// White pellets keep a fixed color and are used on single-pellet boards.
    #[must_use]
    pub fn new<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig, is_white: bool) -> Self {
        let mut pellet = Self {
            tile: Tile::from_grid(1, 1, config.tile_size),
            color: PelletColor::White,
            is_white,
            is_power_up: false,
            is_eaten: false,
        };
        pellet.spawn(rng, config, true);
        pellet
    }

    /// Rolls a new position and color.
    ///
    /// The position lands in the playable interior, one tile in from a 3-tile
    /// margin budget per axis. When `can_power_up` holds, the pellet becomes a
    /// power-up with the configured 1-in-N odds and its color turns gold.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &GameConfig, can_power_up: bool) {
        self.is_power_up = can_power_up
            && rng.gen_range(0..config.power_up_chance) == config.power_up_chance - 1;

        self.color = if self.is_power_up {
            PelletColor::Gold
        } else if self.is_white {
            PelletColor::White
        } else {
            PALETTE[rng.gen_range(0..PALETTE.len())]
        };

        let x = rng.gen_range(0..config.board_width - 3 * config.tile_size);
        let y = rng.gen_range(0..config.board_height - 3 * config.tile_size);
        self.tile = Tile::from_pixels(x + config.tile_size, y + config.tile_size, config.tile_size);
    }

    /// Re-rolls until the pellet lands off its previous cell and off every
    /// snake segment, then clears the eaten flag.
    ///
    /// Random re-rolls are bounded; on a crowded board the remaining free
    /// interior cells are scanned directly, so this always terminates. When
    /// the snake covers the entire interior there is nowhere to go and the
    /// pellet keeps its last rolled position.
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &GameConfig,
        can_power_up: bool,
        snake: &Snake,
    ) {
        let old_tile = self.tile;

        for _ in 0..MAX_RESPAWN_ATTEMPTS {
            self.spawn(rng, config, can_power_up);
            if self.tile != old_tile && !snake.occupies(self.tile) {
                self.is_eaten = false;
                return;
            }
        }

        let free: Vec<Tile> = interior_cells(config)
            .filter(|tile| *tile != old_tile && !snake.occupies(*tile))
            .collect();
        if !free.is_empty() {
            self.tile = free[rng.gen_range(0..free.len())];
        }
        self.is_eaten = false;
    }

    /// Tests `tile` against the pellet's cell, marking the pellet eaten on a
    /// match. This is the pellet's only way of learning it was consumed.
    pub fn detect_collision(&mut self, tile: Tile) -> bool {
        if tile == self.tile {
            self.is_eaten = true;
            return true;
        }
        false
    }

    /// Returns the cell the pellet currently occupies.
    #[must_use]
    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// Returns the pellet's render color class.
    #[must_use]
    pub fn color(&self) -> PelletColor {
        self.color
    }

    /// Returns true when eating this pellet grants a power-up.
    #[must_use]
    pub fn is_power_up(&self) -> bool {
        self.is_power_up
    }

    /// Returns true between being eaten and the subsequent respawn.
    #[must_use]
    pub fn is_eaten(&self) -> bool {
        self.is_eaten
    }
}

fn interior_cells(config: &GameConfig) -> impl Iterator<Item = Tile> + '_ {
    let tile_size = config.tile_size;
    (1..config.tiles_high() - 1)
        .flat_map(move |ty| (1..config.tiles_wide() - 1).map(move |tx| (tx, ty)))
        .map(move |(tx, ty)| Tile::from_grid(tx, ty, tile_size))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GameConfig;
    use crate::snake::Snake;
    use crate::tile::Tile;

    use super::{FoodPellet, PelletColor};

    fn test_config() -> GameConfig {
        GameConfig {
            board_width: 600,
            board_height: 600,
            tile_size: 20,
            ..GameConfig::default()
        }
    }

    #[test]
    fn spawn_respects_the_interior_margin() {
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(11);
        let mut pellet = FoodPellet::new(&mut rng, &config, false);

        for _ in 0..500 {
            pellet.spawn(&mut rng, &config, true);
            let tile = pellet.tile();
            assert!(tile.tile_x() >= 1 && tile.tile_x() <= config.tiles_wide() - 2);
            assert!(tile.tile_y() >= 1 && tile.tile_y() <= config.tiles_high() - 2);
        }
    }

    #[test]
    fn spawn_never_rolls_a_power_up_when_disallowed() {
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(12);
        let mut pellet = FoodPellet::new(&mut rng, &config, false);

        for _ in 0..200 {
            pellet.spawn(&mut rng, &config, false);
            assert!(!pellet.is_power_up());
            assert_ne!(pellet.color(), PelletColor::Gold);
        }
    }

    #[test]
    fn power_up_rolls_appear_and_turn_the_pellet_gold() {
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(13);
        let mut pellet = FoodPellet::new(&mut rng, &config, false);

        let mut power_ups = 0;
        for _ in 0..500 {
            pellet.spawn(&mut rng, &config, true);
            if pellet.is_power_up() {
                power_ups += 1;
                assert_eq!(pellet.color(), PelletColor::Gold);
            }
        }
        // 1-in-10 odds over 500 rolls: a run of zero would be astronomical.
        assert!(power_ups > 0);
    }

    #[test]
    fn white_pellet_keeps_its_color_unless_powered() {
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(14);
        let mut pellet = FoodPellet::new(&mut rng, &config, true);

        for _ in 0..200 {
            pellet.spawn(&mut rng, &config, false);
            assert_eq!(pellet.color(), PelletColor::White);
        }
    }

    #[test]
    fn detect_collision_marks_the_pellet_eaten() {
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(15);
        let mut pellet = FoodPellet::new(&mut rng, &config, false);
        let tile = pellet.tile();

        let elsewhere = Tile::from_grid(tile.tile_x() + 1, tile.tile_y(), config.tile_size);
        assert!(!pellet.detect_collision(elsewhere));
        assert!(!pellet.is_eaten());

        assert!(pellet.detect_collision(tile));
        assert!(pellet.is_eaten());
    }

    #[test]
    fn respawn_avoids_the_old_tile_and_the_snake_body() {
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(16);
        let mut snake = Snake::new(300, 300, config.tile_size);
        for _ in 0..10 {
            snake.grow();
        }
        let mut pellet = FoodPellet::new(&mut rng, &config, false);

        for _ in 0..100 {
            let old_tile = pellet.tile();
            pellet.detect_collision(old_tile);
            pellet.respawn(&mut rng, &config, true, &snake);

            assert!(!pellet.is_eaten());
            assert_ne!(pellet.tile(), old_tile);
            assert!(!snake.occupies(pellet.tile()));
        }
    }

    #[test]
    fn respawn_terminates_on_a_nearly_full_board() {
        // 6x6 grid: interior cells are (1..=4)x(1..=4). Fill all but two with
        // snake body so random re-rolls almost surely exhaust their budget and
        // the free-cell fallback has to finish the job.
        let config = GameConfig {
            board_width: 120,
            board_height: 120,
            tile_size: 20,
            ..GameConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(17);

        let body: Vec<Tile> = (1..=4)
            .flat_map(|ty| (1..=4).map(move |tx| (tx, ty)))
            .filter(|cell| *cell != (1, 1) && *cell != (2, 1))
            .map(|(tx, ty)| Tile::from_grid(tx, ty, config.tile_size))
            .collect();
        let snake = Snake::from_segments(body, crate::input::Direction::Right, config.tile_size);

        let mut pellet = FoodPellet::new(&mut rng, &config, false);
        let old_tile = pellet.tile();
        pellet.respawn(&mut rng, &config, true, &snake);

        assert!(!snake.occupies(pellet.tile()));
        assert_ne!(pellet.tile(), old_tile);
        assert!(!pellet.is_eaten());
    }
}
