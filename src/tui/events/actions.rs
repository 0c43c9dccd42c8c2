use crate::commits::largest_commits;
use crate::contributors::top_contributors;
use crate::model::CommitRecord;
use crate::timeline::{CumulativeMode, Timeline};

use super::super::input::{apply_search_filter, copy_to_clipboard};
use super::super::state::TuiState;

const CONTRIBUTOR_ROWS: usize = 15;
const COMMIT_ROWS: usize = 50;

/// Recompute everything derived from the selected window: visible buckets,
/// contributor rollup, and the ranked commit list.
pub(crate) fn refresh_window(state: &mut TuiState, timeline: &Timeline, records: &[CommitRecord]) {
    let window = *state.selection.selected();
    state.buckets = timeline.window_with(&window, state.cumulative);
    apply_search_filter(state);
    if state.selected >= state.buckets.len() {
        state.selected = state.buckets.len().saturating_sub(1);
    }

    state.contributors = top_contributors(records, &window, CONTRIBUTOR_ROWS);
    state.top_commits = largest_commits(records, &window, COMMIT_ROWS);
    if state.commit_selected >= state.top_commits.len() {
        state.commit_selected = state.top_commits.len().saturating_sub(1);
    }
}

/// Restore the brush to the full absolute range.
pub(super) fn reset_selection(state: &mut TuiState, timeline: &Timeline, records: &[CommitRecord]) {
    if state.selection.reset() {
        refresh_window(state, timeline, records);
        state.set_status("Selection reset to full range");
    }
}

/// Flip the running-total scope between full history and the visible window.
pub(super) fn toggle_cumulative(state: &mut TuiState, timeline: &Timeline, records: &[CommitRecord]) {
    state.cumulative = match state.cumulative {
        CumulativeMode::Full => CumulativeMode::Window,
        CumulativeMode::Window => CumulativeMode::Full,
    };
    refresh_window(state, timeline, records);
    let label = match state.cumulative {
        CumulativeMode::Full => "full history",
        CumulativeMode::Window => "visible window",
    };
    state.set_status(format!("Cumulative totals over {label}"));
}

/// Copy the full hash of the selected commit, surfacing clipboard errors in
/// the status line.
pub(super) fn copy_full_hash(state: &mut TuiState) {
    if let Some(commit) = state.top_commits.get(state.commit_selected) {
        match copy_to_clipboard(&commit.hash) {
            Ok(_) => state.set_status(format!("Copied: {}", commit.short_hash())),
            Err(err) => state.set_status(format!("Clipboard error: {err}")),
        }
    }
}

/// Copy the short hash of the selected commit.
pub(super) fn copy_short_hash(state: &mut TuiState) {
    if let Some(commit) = state.top_commits.get(state.commit_selected) {
        let short = commit.short_hash().to_string();
        match copy_to_clipboard(&short) {
            Ok(_) => state.set_status(format!("Copied: {short}")),
            Err(err) => state.set_status(format!("Clipboard error: {err}")),
        }
    }
}
