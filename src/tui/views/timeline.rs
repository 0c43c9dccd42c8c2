use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Sparkline};
use ratatui::Frame;

use crate::model::Bucket;
use crate::timeline::Granularity;
use crate::util::thousands;

use super::super::state::TuiState;

/// Render the main timeline view: window totals, the cumulative-lines chart,
/// and the full-history brush track with its two handles.
pub fn draw_timeline_view(f: &mut Frame, area: Rect, state: &mut TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(area);

    draw_totals(f, chunks[0], state);
    draw_chart(f, chunks[1], state);
    draw_brush(f, chunks[2], state);
}

fn draw_totals(f: &mut Frame, area: Rect, state: &TuiState) {
    let commits: u64 = state.buckets.iter().map(|b| b.commit_count as u64).sum();
    let added: u64 = state.buckets.iter().map(|b| b.lines_added).sum();
    let removed: u64 = state.buckets.iter().map(|b| b.lines_removed).sum();
    let net = added as i64 - removed as i64;

    let granularity = Granularity::for_range(state.selection.selected());
    let window = state.selection.selected();

    let lines = vec![
        Line::from(vec![
            Span::styled("Commits: ", Style::default().fg(Color::White)),
            Span::styled(thousands(commits as i64), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("Net lines: ", Style::default().fg(Color::White)),
            Span::styled(
                thousands(net),
                if net >= 0 {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                },
            ),
            Span::raw("   "),
            Span::styled(format!("+{}", thousands(added as i64)), Style::default().fg(Color::Green)),
            Span::raw(" "),
            Span::styled(format!("-{}", thousands(removed as i64)), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled("Window: ", Style::default().fg(Color::White)),
            Span::styled(
                format!(
                    "{} → {}",
                    window.start().format("%Y-%m-%d"),
                    window.end().format("%Y-%m-%d")
                ),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!("  ({} buckets)", granularity.label()),
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];

    let totals = Paragraph::new(lines).block(Block::default().title("Activity").borders(Borders::ALL));
    f.render_widget(totals, area);
}

fn draw_chart(f: &mut Frame, area: Rect, state: &TuiState) {
    let granularity = Granularity::for_range(state.selection.selected());
    let title = format!("Cumulative Lines ({} buckets)", granularity.label());

    if state.buckets.is_empty() {
        let empty = Paragraph::new("No commits in the selected range")
            .block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let points: Vec<(f64, f64)> = state
        .buckets
        .iter()
        .enumerate()
        .map(|(i, b)| (i as f64, b.cumulative_lines as f64))
        .collect();

    let y_min = state.buckets.iter().map(|b| b.cumulative_lines).min().unwrap_or(0);
    let y_max = state.buckets.iter().map(|b| b.cumulative_lines).max().unwrap_or(0);
    let (y_min, y_max) = if y_min == y_max {
        (y_min as f64 - 1.0, y_max as f64 + 1.0)
    } else {
        (y_min as f64, y_max as f64)
    };

    let x_max = (state.buckets.len() - 1).max(1) as f64;
    let first_key = state.buckets.first().map(|b| b.key.clone()).unwrap_or_default();
    let last_key = state.buckets.last().map(|b| b.key.clone()).unwrap_or_default();

    let datasets = vec![Dataset::default()
        .name("net lines")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first_key), Span::raw(last_key)])
                .style(Style::default().fg(Color::Gray)),
        )
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(thousands(y_min as i64)),
                    Span::raw(thousands(y_max as i64)),
                ])
                .style(Style::default().fg(Color::Gray)),
        );
    f.render_widget(chart, area);
}

fn draw_brush(f: &mut Frame, area: Rect, state: &mut TuiState) {
    let block = Block::default()
        .title("Brush (drag handles, or [ ] { } keys)")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 2 || inner.height == 0 {
        state.brush_area = None;
        return;
    }
    state.brush_area = Some(inner);

    let track = resample_track(&state.track, inner.width as usize);
    let sparkline = Sparkline::default()
        .data(&track)
        .style(Style::default().fg(Color::Blue));
    f.render_widget(sparkline, inner);

    let (left, right) = state.selection.offsets();
    let cols = (inner.width - 1) as f64;
    let start_col = inner.x + (left * cols).round() as u16;
    let end_col = inner.x + ((1.0 - right) * cols).round() as u16;

    for col in [start_col, end_col] {
        let handle_area = Rect { x: col.min(inner.right() - 1), y: inner.y, width: 1, height: inner.height };
        let glyph = std::iter::repeat("┃")
            .take(inner.height as usize)
            .collect::<Vec<_>>()
            .join("\n");
        let handle = Paragraph::new(glyph)
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        f.render_widget(handle, handle_area);
    }
}

/// Collapse the full-history buckets onto `width` columns of commit counts.
fn resample_track(track: &[Bucket], width: usize) -> Vec<u64> {
    let mut cols = vec![0u64; width];
    if track.is_empty() || width == 0 {
        return cols;
    }
    let n = track.len();
    for (i, bucket) in track.iter().enumerate() {
        let col = if n <= 1 { 0 } else { i * (width - 1) / (n - 1) };
        cols[col] += bucket.commit_count as u64;
    }
    cols
}
