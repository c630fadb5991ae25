use std::fmt;
use std::hash::{Hash, Hasher};

/// One cell of the board, addressed by pixel position but identified by
/// grid cell.
///
/// Two tiles constructed from different pixel coordinates compare (and hash)
/// equal whenever they floor-divide into the same grid cell. Negative pixel
/// coordinates floor toward negative infinity, so a tile at `(-1, -1)` with
/// tile size 20 lives in cell `(-1, -1)`, not `(0, 0)`.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    x: i32,
    y: i32,
    tile_x: i32,
    tile_y: i32,
}

impl Tile {
    /// Creates a tile from pixel coordinates, deriving the grid cell.
    #[must_use]
    pub fn from_pixels(x: i32, y: i32, tile_size: i32) -> Self {
        Self {
            x,
            y,
            tile_x: x.div_euclid(tile_size),
            tile_y: y.div_euclid(tile_size),
        }
    }

    /// Creates a tile aligned to the top-left pixel of a grid cell.
    #[must_use]
    pub fn from_grid(tile_x: i32, tile_y: i32, tile_size: i32) -> Self {
        Self {
            x: tile_x * tile_size,
            y: tile_y * tile_size,
            tile_x,
            tile_y,
        }
    }

    /// Pixel x-coordinate this tile was constructed from.
    #[must_use]
    pub fn x(self) -> i32 {
        self.x
    }

    /// Pixel y-coordinate this tile was constructed from.
    #[must_use]
    pub fn y(self) -> i32 {
        self.y
    }

    /// Grid column.
    #[must_use]
    pub fn tile_x(self) -> i32 {
        self.tile_x
    }

    /// Grid row.
    #[must_use]
    pub fn tile_y(self) -> i32 {
        self.tile_y
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.tile_x == other.tile_x && self.tile_y == other.tile_y
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tile_x.hash(state);
        self.tile_y.hash(state);
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.tile_x, self.tile_y)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::Tile;

    const TILE_SIZE: i32 = 20;

    #[test]
    fn pixel_coordinates_floor_into_grid_cells() {
        let tile = Tile::from_pixels(45, 59, TILE_SIZE);
        assert_eq!(tile.tile_x(), 2);
        assert_eq!(tile.tile_y(), 2);
        assert_eq!(tile.x(), 45);
        assert_eq!(tile.y(), 59);
    }

    #[test]
    fn negative_pixels_floor_toward_negative_infinity() {
        let tile = Tile::from_pixels(-1, -21, TILE_SIZE);
        assert_eq!(tile.tile_x(), -1);
        assert_eq!(tile.tile_y(), -2);
    }

    #[test]
    fn tiles_in_the_same_cell_are_equal_and_hash_equal() {
        let a = Tile::from_pixels(21, 21, TILE_SIZE);
        let b = Tile::from_pixels(25, 25, TILE_SIZE);
        let c = Tile::from_pixels(41, 21, TILE_SIZE);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn grid_constructor_matches_pixel_constructor() {
        let from_grid = Tile::from_grid(3, 4, TILE_SIZE);
        let from_pixels = Tile::from_pixels(60, 80, TILE_SIZE);

        assert_eq!(from_grid, from_pixels);
        assert_eq!(from_grid.x(), 60);
        assert_eq!(from_grid.y(), 80);
    }

    #[test]
    fn display_shows_the_grid_cell() {
        let tile = Tile::from_pixels(45, 59, TILE_SIZE);
        assert_eq!(tile.to_string(), "(2, 2)");
    }
}
