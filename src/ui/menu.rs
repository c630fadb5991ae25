use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

/// Draws the game-over screen as a centered popup over the play area.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, score: u32, high_score: u32) {
    let popup = centered_popup(area, 60, 45);
    frame.render_widget(Clear, popup);

    let is_new_high = score >= high_score && score > 0;
    let lines = vec![
        Line::styled(
            "GAME OVER",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!("High score: {}", high_score.max(score))),
        Line::from(if is_new_high { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("Press 'R' to restart"),
        Line::from("Press Esc to quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
