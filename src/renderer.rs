use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::food::PelletColor;
use crate::game::GameSession;
use crate::tile::Tile;
use crate::ui::hud::render_hud;
use crate::ui::menu::render_game_over_menu;

const GLYPH_CELL: &str = "█";
const GLYPH_PELLET: &str = "●";

const COLOR_GOLD: Color = Color::Rgb(255, 215, 0);
const COLOR_SNAKE: Color = Color::Green;
const COLOR_SNAKE_HEAD: Color = Color::White;

/// Renders one full frame from immutable session state.
///
/// The bordered block stands in for the board's wall belt, so only interior
/// cells map into it: cell `(1, 1)` lands at the block's top-left inner
/// corner.
pub fn render(frame: &mut Frame<'_>, session: &GameSession) {
    let [hud_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

    render_hud(frame, hud_area, session);

    let border_style = if session.snake.is_powered_up() {
        Style::default().fg(COLOR_GOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::bordered().border_style(border_style);
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    if session.snake.is_powered_up() {
        render_power_halo(frame, inner, session);
    }
    render_pellets(frame, inner, session);
    render_snake(frame, inner, session);

    if session.is_game_over() {
        render_game_over_menu(
            frame,
            play_area,
            session.scores.current_score(),
            session.scores.high_score(),
        );
    }
}

/// Dim gold wash over the 5x5 eat window centered on the head.
fn render_power_halo(frame: &mut Frame<'_>, inner: Rect, session: &GameSession) {
    let head = session.snake.head();
    let buffer = frame.buffer_mut();

    for dy in -2..=2 {
        for dx in -2..=2 {
            let cell = Tile::from_grid(
                head.tile_x() + dx,
                head.tile_y() + dy,
                session.config().tile_size,
            );
            if let Some((x, y)) = cell_to_terminal(inner, session, cell) {
                buffer.set_string(x, y, GLYPH_CELL, Style::default().fg(Color::Rgb(96, 80, 0)));
            }
        }
    }
}

fn render_pellets(frame: &mut Frame<'_>, inner: Rect, session: &GameSession) {
    let buffer = frame.buffer_mut();
    for pellet in session.board.pellets() {
        let Some((x, y)) = cell_to_terminal(inner, session, pellet.tile()) else {
            continue;
        };
        buffer.set_string(
            x,
            y,
            GLYPH_PELLET,
            Style::default().fg(pellet_color(pellet.color())),
        );
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, session: &GameSession) {
    let head = session.snake.head();
    let buffer = frame.buffer_mut();

    for segment in session.snake.segments() {
        let Some((x, y)) = cell_to_terminal(inner, session, *segment) else {
            continue;
        };

        let style = if *segment == head {
            Style::default()
                .fg(COLOR_SNAKE_HEAD)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_SNAKE)
        };
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

fn pellet_color(color: PelletColor) -> Color {
    match color {
        PelletColor::Red => Color::Red,
        PelletColor::Orange => Color::Rgb(255, 165, 0),
        PelletColor::Yellow => Color::Yellow,
        PelletColor::Cyan => Color::Cyan,
        PelletColor::Blue => Color::Blue,
        PelletColor::Pink => Color::Rgb(255, 105, 180),
        PelletColor::Purple => Color::Rgb(160, 32, 240),
        PelletColor::White => Color::White,
        PelletColor::Gold => COLOR_GOLD,
    }
}

/// Maps an interior grid cell to a terminal coordinate inside `inner`.
///
/// Cells on or beyond the wall belt, or past the visible terminal area,
/// return `None` and are simply not drawn.
fn cell_to_terminal(inner: Rect, session: &GameSession, cell: Tile) -> Option<(u16, u16)> {
    if session.board.is_wall(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.tile_x() - 1).ok()?;
    let y_offset = u16::try_from(cell.tile_y() - 1).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
