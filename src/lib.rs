//! Tile-grid Snake: a fixed-interval simulation core plus a terminal
//! rendering layer.
//!
//! The simulation ([`game::GameSession`] and the modules under it) is plain
//! data driven by an external timer and takes an injected seedable RNG, so it
//! runs headless in tests. Rendering, input, and persistence live at the
//! edges and only consume state snapshots.

pub mod board;
pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod tile;
pub mod ui;
