use std::collections::VecDeque;

use crate::input::Direction;
use crate::tile::Tile;

/// Mutable snake state: ordered body segments, heading, and power-up timer.
///
/// The body always holds at least one segment and only ever grows until the
/// session is reset. The power-up is stored as an explicit tick deadline and
/// expired by the tick driver, so no state is shared across threads.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Tile>,
    direction: Direction,
    power_up_expires_at: Option<u64>,
    tile_size: i32,
}

impl Snake {
    /// Creates a one-segment snake at the given pixel position, heading right.
    #[must_use]
    pub fn new(x: i32, y: i32, tile_size: i32) -> Self {
        let mut body = VecDeque::new();
        body.push_front(Tile::from_pixels(x, y, tile_size));

        Self {
            body,
            direction: Direction::Right,
            power_up_expires_at: None,
            tile_size,
        }
    }

    /// Creates a snake from explicit body segments, head first.
    ///
    /// `segments` must not be empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Tile>, direction: Direction, tile_size: i32) -> Self {
        assert!(!segments.is_empty(), "snake body must not be empty");
        Self {
            body: VecDeque::from(segments),
            direction,
            power_up_expires_at: None,
            tile_size,
        }
    }

    /// Returns the head tile.
    #[must_use]
    pub fn head(&self) -> Tile {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Tile> {
        self.body.iter()
    }

    /// Returns the current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns true if any segment occupies the same grid cell as `tile`.
    #[must_use]
    pub fn occupies(&self, tile: Tile) -> bool {
        self.body.contains(&tile)
    }

    /// Translates the snake one grid cell along its current direction.
    ///
    /// The new head is inserted at the front and the tail dropped, so length
    /// is preserved.
    pub fn advance(&mut self) {
        let head = self.head();
        let (dx, dy) = self.direction.offset();
        let new_head = Tile::from_grid(head.tile_x() + dx, head.tile_y() + dy, self.tile_size);

        self.body.push_front(new_head);
        let _ = self.body.pop_back();
    }

    /// Appends one segment straight behind the tail, along the reverse of the
    /// current direction. The head does not move.
    pub fn grow(&mut self) {
        let tail = *self
            .body
            .back()
            .expect("snake body must always contain at least one segment");
        let (dx, dy) = self.direction.offset();
        let new_tail = Tile::from_grid(tail.tile_x() - dx, tail.tile_y() - dy, self.tile_size);
        self.body.push_back(new_tail);
    }

    /// Updates the heading unless `direction` would reverse it in place.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction == self.direction.opposite() {
            return;
        }
        self.direction = direction;
    }

    /// Returns true if the head occupies the same cell as any other segment.
    #[must_use]
    pub fn has_collided_with_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns true while a power-up deadline is pending.
    #[must_use]
    pub fn is_powered_up(&self) -> bool {
        self.power_up_expires_at.is_some()
    }

    /// Pending power-up deadline tick, if armed.
    #[must_use]
    pub fn power_up_deadline(&self) -> Option<u64> {
        self.power_up_expires_at
    }

    /// Arms the power-up until `expires_at_tick`.
    ///
    /// Re-triggering while already powered up replaces the pending deadline
    /// rather than stacking a second one.
    pub fn power_up(&mut self, expires_at_tick: u64) {
        self.power_up_expires_at = Some(expires_at_tick);
    }

    /// Clears the power-up immediately.
    pub fn clear_power_up(&mut self) {
        self.power_up_expires_at = None;
    }

    /// Clears the power-up once `now_tick` has reached its deadline.
    pub fn expire_power_up(&mut self, now_tick: u64) {
        if let Some(deadline) = self.power_up_expires_at {
            if now_tick >= deadline {
                self.power_up_expires_at = None;
            }
        }
    }
}
