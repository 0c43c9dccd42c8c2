use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::util::thousands;

use super::super::draw::{intensity_bar, intensity_color};
use super::super::state::TuiState;
use super::{header_cell, truncate};

/// Render the contributor leaderboard for the selected window.
pub fn draw_contributors_view(f: &mut Frame, area: Rect, state: &TuiState) {
    if state.contributors.is_empty() {
        let empty = Paragraph::new("No commits in the selected range")
            .block(Block::default().title("Top Contributors").borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let max_commits = state
        .contributors
        .iter()
        .map(|c| c.commit_count)
        .max()
        .unwrap_or(1);

    let rows: Vec<Row> = state
        .contributors
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            let rank_cell = Cell::from(format!("{:>2}", rank + 1)).style(Style::default().fg(Color::Gray));
            let name_cell = Cell::from(truncate(&entry.author, 28))
                .style(Style::default().fg(Color::Magenta));
            let bar = intensity_bar(entry.commit_count, max_commits);
            let commits_cell = Cell::from(format!("{:>5} {}", entry.commit_count, bar))
                .style(intensity_color(entry.commit_count, max_commits));
            let added_cell = Cell::from(format!("+{}", thousands(entry.lines_added as i64)))
                .style(Style::default().fg(Color::Green));
            let removed_cell = Cell::from(format!("-{}", thousands(entry.lines_removed as i64)))
                .style(Style::default().fg(Color::Red));
            Row::new(vec![rank_cell, name_cell, commits_cell, added_cell, removed_cell])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(30),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(Row::new([
        header_cell("#", Color::Yellow),
        header_cell("Author", Color::Yellow),
        header_cell("Commits", Color::Green),
        header_cell("Added", Color::Green),
        header_cell("Removed", Color::Red),
    ]))
    .block(Block::default().title("Top Contributors").borders(Borders::ALL));

    f.render_widget(table, area);
}
