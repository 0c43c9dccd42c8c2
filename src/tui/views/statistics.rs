use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Sparkline, Table};
use ratatui::Frame;

use crate::util::thousands;

use super::super::draw::{intensity_bar, intensity_color};
use super::super::layout::get_visible_buckets;
use super::super::state::TuiState;
use super::header_cell;

/// Render the per-bucket period table alongside aggregate statistics, with
/// an activity gauge and a commit trend sparkline.
pub fn draw_statistics_view(f: &mut Frame, area: Rect, state: &TuiState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_periods_table(f, columns[0], state);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(columns[1]);

    let buckets = &state.buckets;
    let total_commits: u64 = buckets.iter().map(|b| b.commit_count as u64).sum();
    let total_added: u64 = buckets.iter().map(|b| b.lines_added).sum();
    let total_removed: u64 = buckets.iter().map(|b| b.lines_removed).sum();
    let avg_commits = if buckets.is_empty() {
        0
    } else {
        total_commits / buckets.len() as u64
    };
    let max_commits = buckets.iter().map(|b| b.commit_count).max().unwrap_or(0);
    let min_commits = buckets.iter().map(|b| b.commit_count).min().unwrap_or(0);
    let net_change = total_added as i64 - total_removed as i64;

    let stats_text = vec![
        Line::from(vec![Span::styled(
            "Window Statistics",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Buckets: ", Style::default().fg(Color::White)),
            Span::styled(format!("{}", buckets.len()), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Total commits: ", Style::default().fg(Color::White)),
            Span::styled(thousands(total_commits as i64), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Lines added: ", Style::default().fg(Color::White)),
            Span::styled(format!("+{}", thousands(total_added as i64)), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Lines removed: ", Style::default().fg(Color::White)),
            Span::styled(format!("-{}", thousands(total_removed as i64)), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled("Net change: ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{net_change:+}"),
                if net_change >= 0 {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Red)
                },
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Average per bucket: ", Style::default().fg(Color::White)),
            Span::styled(format!("{avg_commits}"), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Busiest bucket: ", Style::default().fg(Color::White)),
            Span::styled(format!("{max_commits}"), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Quietest bucket: ", Style::default().fg(Color::White)),
            Span::styled(format!("{min_commits}"), Style::default().fg(Color::Blue)),
        ]),
    ];

    let stats_para = Paragraph::new(stats_text).block(
        Block::default()
            .title("Overall Statistics")
            .borders(Borders::ALL),
    );
    f.render_widget(stats_para, chunks[0]);

    if !buckets.is_empty() && state.selected < buckets.len() {
        let selected_bucket = &buckets[state.selected];
        let activity_ratio = if max_commits > 0 {
            (selected_bucket.commit_count as f64 / max_commits as f64) * 100.0
        } else {
            0.0
        };

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(format!("Bucket {}", selected_bucket.key))
                    .borders(Borders::ALL),
            )
            .gauge_style(Style::default().fg(Color::Green))
            .percent(activity_ratio as u16)
            .label(format!(
                "{}/{} commits ({}%)",
                selected_bucket.commit_count, max_commits, activity_ratio as u16
            ));
        f.render_widget(gauge, chunks[1]);
    }

    let trend_data: Vec<u64> = buckets.iter().map(|b| b.commit_count as u64).collect();
    if trend_data.len() > 1 {
        let sparkline = Sparkline::default()
            .block(Block::default().title("Commit Trend").borders(Borders::ALL))
            .data(&trend_data)
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(sparkline, chunks[2]);
    }
}

fn draw_periods_table(f: &mut Frame, area: Rect, state: &TuiState) {
    let visible = get_visible_buckets(&state.buckets, state, f.size().height as usize);
    let max_commits = state.buckets.iter().map(|b| b.commit_count).max().unwrap_or(1);

    let rows: Vec<Row> = visible
        .iter()
        .map(|(bucket, is_selected)| {
            let bar = intensity_bar(bucket.commit_count, max_commits);
            let key_label = if *is_selected {
                format!("{} ◄", bucket.key)
            } else {
                bucket.key.clone()
            };
            let key_cell = if *is_selected {
                Cell::from(key_label).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Cell::from(key_label).style(Style::default().fg(Color::White))
            };
            let commits_cell = Cell::from(format!("{:>3} {}", bucket.commit_count, bar))
                .style(intensity_color(bucket.commit_count, max_commits));
            let delta = bucket.lines_added as i64 - bucket.lines_removed as i64;
            let delta_style = if delta > 0 {
                Style::default().fg(Color::Green)
            } else if delta < 0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };
            let delta_cell = Cell::from(format!("{delta:+}")).style(delta_style);
            Row::new(vec![key_cell, commits_cell, delta_cell])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(13),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(Row::new([
        header_cell("Period", Color::Yellow),
        header_cell("Commits", Color::Green),
        header_cell("Δlines", Color::Cyan),
    ]))
    .block(Block::default().title("Periods").borders(Borders::ALL));
    f.render_widget(table, area);
}
