use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::game::GameSession;

/// Renders the one-line score bar into `area`.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, session: &GameSession) {
    let mut spans = vec![
        Span::styled(
            format!(" Score: {}", session.scores.current_score()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   High: {}", session.scores.high_score()),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("   Length: {}", session.snake.len()),
            Style::default().fg(Color::Gray),
        ),
    ];

    if session.snake.is_powered_up() {
        let seconds_left =
            session.power_up_ticks_left() * session.config().tick_interval_ms / 1000;
        spans.push(Span::styled(
            format!("   POWER-UP {seconds_left}s"),
            Style::default()
                .fg(Color::Rgb(255, 215, 0))
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
