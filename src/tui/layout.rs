use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::model::Bucket;

use super::state::TuiState;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Slice the filtered bucket rows down to a window around the selection that
/// fits the available height.
pub fn get_visible_buckets<'a>(
    buckets: &'a [Bucket],
    state: &TuiState,
    height: usize,
) -> Vec<(&'a Bucket, bool)> {
    let view_height = height.saturating_sub(8);
    let filtered: Vec<_> = state
        .filtered_indices
        .iter()
        .filter_map(|&i| buckets.get(i))
        .collect();

    if filtered.is_empty() {
        return Vec::new();
    }

    let selected_in_filtered = state
        .filtered_indices
        .iter()
        .position(|&i| i == state.selected)
        .unwrap_or(0);

    let start = selected_in_filtered
        .saturating_sub(view_height / 2)
        .min(filtered.len().saturating_sub(view_height));
    let end = (start + view_height).min(filtered.len());

    filtered[start..end]
        .iter()
        .enumerate()
        .map(|(i, &bucket)| {
            let global_idx = state.filtered_indices[start + i];
            (bucket, global_idx == state.selected)
        })
        .collect()
}
