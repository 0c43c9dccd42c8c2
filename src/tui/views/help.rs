use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::super::layout::centered_rect;

/// Draw the modal help overlay describing navigation, views, and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let section = |text: &str| {
        Line::from(vec![Span::styled(
            text.to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "gitline - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Navigation:"),
        Line::from("  j/k or ↑/↓  Move selection"),
        Line::from("  g/G         Jump to first/last"),
        Line::from("  PgUp/PgDn   Move by 10 items"),
        Line::from("  Mouse       Scroll with wheel"),
        Line::from(""),
        section("Views:"),
        Line::from("  Tab         Next view (Timeline/Contributors/Commits/Stats)"),
        Line::from("  Shift+Tab   Previous view"),
        Line::from(""),
        section("Range brush:"),
        Line::from("  Drag        Grab a handle on the brush track"),
        Line::from("  [ / ]       Move the start edge left/right"),
        Line::from("  { / }       Move the end edge left/right"),
        Line::from("  r           Reset to the full range"),
        Line::from("  m           Toggle cumulative scope (history/window)"),
        Line::from(""),
        section("Actions:"),
        Line::from("  c / y       Copy full / short commit hash"),
        Line::from("  /           Filter buckets by key"),
        Line::from("  Esc         Cancel input / close help"),
        Line::from(""),
        section("General:"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
