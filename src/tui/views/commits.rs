use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::util::thousands;

use super::super::state::TuiState;
use super::{header_cell, truncate};

/// Render the largest-commits view: a selectable ranking plus details for
/// the highlighted commit.
pub fn draw_commits_view(f: &mut Frame, area: Rect, state: &TuiState) {
    if state.top_commits.is_empty() {
        let empty = Paragraph::new("No commits in the selected range")
            .block(Block::default().title("Largest Commits").borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let rows: Vec<Row> = state
        .top_commits
        .iter()
        .enumerate()
        .map(|(i, commit)| {
            let is_selected = i == state.commit_selected;
            let hash_cell = if is_selected {
                Cell::from(format!("{} ◄", commit.short_hash())).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Cell::from(commit.short_hash().to_string()).style(Style::default().fg(Color::Cyan))
            };
            let net = commit.net_lines();
            let net_cell = Cell::from(format!("{net:>+8}")).style(if net >= 0 {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            });
            let message_cell = Cell::from(truncate(&commit.message.replace('\n', " "), 44))
                .style(Style::default().fg(Color::White));
            Row::new(vec![hash_cell, net_cell, message_cell])
        })
        .collect();

    let mut table_state = TableState::default();
    table_state.select(Some(state.commit_selected));
    let table = Table::new(
        rows,
        [
            Constraint::Length(11),
            Constraint::Length(9),
            Constraint::Percentage(70),
        ],
    )
    .header(Row::new([
        header_cell("Hash", Color::Yellow),
        header_cell("Net", Color::Yellow),
        header_cell("Message", Color::Yellow),
    ]))
    .block(Block::default().title("Largest Commits").borders(Borders::ALL));
    f.render_stateful_widget(table, chunks[0], &mut table_state);

    if let Some(commit) = state.top_commits.get(state.commit_selected) {
        let details = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Hash: ", Style::default().fg(Color::White)),
                Span::styled(commit.short_hash().to_string(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(vec![
                Span::styled("Author: ", Style::default().fg(Color::White)),
                Span::styled(commit.author.clone(), Style::default().fg(Color::Magenta)),
            ]),
            Line::from(vec![
                Span::styled("Date: ", Style::default().fg(Color::White)),
                Span::styled(
                    commit.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                    Style::default().fg(Color::Green),
                ),
            ]),
            Line::from(vec![
                Span::styled("Changes: ", Style::default().fg(Color::White)),
                Span::styled(
                    format!("+{} -{}", thousands(commit.lines_added as i64), thousands(commit.lines_removed as i64)),
                    Style::default().fg(Color::Green),
                ),
            ]),
            Line::from(vec![
                Span::styled("Files touched: ", Style::default().fg(Color::White)),
                Span::styled(commit.files_touched.to_string(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "c/y copies the full/short hash",
                Style::default().fg(Color::Gray),
            )]),
        ];
        f.render_widget(
            Paragraph::new(details).block(Block::default().title("Info").borders(Borders::ALL)),
            chunks[1],
        );
    }
}
