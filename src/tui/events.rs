use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::model::CommitRecord;
use crate::timeline::{DragState, Edge, Granularity, Timeline};

use super::state::{TuiState, ViewMode};

mod actions;
mod input_modes;

use actions::{copy_full_hash, copy_short_hash, reset_selection, toggle_cumulative};
use input_modes::*;

pub(crate) use actions::refresh_window;

/// Handle a keyboard event, mutating TUI state and returning `true` if the
/// loop should exit.
pub fn handle_key_events(
    key_event: KeyEvent,
    state: &mut TuiState,
    timeline: &Timeline,
    records: &[CommitRecord],
) -> io::Result<bool> {
    if key_event.kind != KeyEventKind::Press {
        return Ok(false);
    }

    if state.search_mode {
        handle_search_input(key_event.code, state);
        return Ok(false);
    }

    if state.show_help {
        if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::F(1) | KeyCode::Char('q')) {
            state.show_help = false;
        }
        return Ok(false);
    }

    match key_event.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Char('/') => {
            state.search_mode = true;
            state.search_query.clear();
        }
        KeyCode::Tab => state.tab_index = (state.tab_index + 1) % 4,
        KeyCode::BackTab => {
            state.tab_index = if state.tab_index == 0 { 3 } else { state.tab_index - 1 };
        }
        KeyCode::Char('[') => nudge_edge(state, timeline, records, Edge::Start, -1),
        KeyCode::Char(']') => nudge_edge(state, timeline, records, Edge::Start, 1),
        KeyCode::Char('{') => nudge_edge(state, timeline, records, Edge::End, -1),
        KeyCode::Char('}') => nudge_edge(state, timeline, records, Edge::End, 1),
        KeyCode::Char('r') => reset_selection(state, timeline, records),
        KeyCode::Char('m') => toggle_cumulative(state, timeline, records),
        KeyCode::Char('c') => copy_full_hash(state),
        KeyCode::Char('y') => copy_short_hash(state),
        KeyCode::Up | KeyCode::Char('k') => move_up(state),
        KeyCode::Down | KeyCode::Char('j') => move_down(state),
        KeyCode::Char('g') | KeyCode::Home => jump_first(state),
        KeyCode::Char('G') | KeyCode::End => jump_last(state),
        KeyCode::PageUp => move_by(state, -10),
        KeyCode::PageDown => move_by(state, 10),
        _ => {}
    }

    Ok(false)
}

/// Handle mouse interactions: wheel scrolling for lists and the pointer
/// down/move/up cycle that drives the range brush.
pub fn handle_mouse_event(
    mouse_event: MouseEvent,
    state: &mut TuiState,
    timeline: &Timeline,
    records: &[CommitRecord],
) -> io::Result<()> {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => move_up(state),
        MouseEventKind::ScrollDown => move_down(state),
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(area) = state.brush_area else {
                return Ok(());
            };
            if !hits_track(area, mouse_event.column, mouse_event.row) {
                return Ok(());
            }
            let fraction = track_fraction(area, mouse_event.column);
            if let Some(edge) = handle_under_pointer(state, area, mouse_event.column) {
                state.selection.pointer_down(edge);
                if state.selection.pointer_move(fraction) {
                    refresh_window(state, timeline, records);
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if state.selection.drag() == DragState::Idle {
                return Ok(());
            }
            let Some(area) = state.brush_area else {
                return Ok(());
            };
            let fraction = track_fraction(area, mouse_event.column);
            if state.selection.pointer_move(fraction) {
                refresh_window(state, timeline, records);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => state.selection.pointer_up(),
        _ => {}
    }
    Ok(())
}

fn hits_track(area: Rect, column: u16, row: u16) -> bool {
    area.width > 1
        && row >= area.y
        && row < area.y.saturating_add(area.height)
        && column >= area.x
        && column < area.x.saturating_add(area.width)
}

/// Pointer column as a fraction of the track width.
fn track_fraction(area: Rect, column: u16) -> f64 {
    if area.width <= 1 {
        return 0.0;
    }
    let offset = column.saturating_sub(area.x) as f64;
    (offset / (area.width - 1) as f64).clamp(0.0, 1.0)
}

/// The handle within grabbing distance of the pointer, if any.
fn handle_under_pointer(state: &TuiState, area: Rect, column: u16) -> Option<Edge> {
    const GRAB_DISTANCE: f64 = 1.5;

    let (left, right) = state.selection.offsets();
    let cols = (area.width - 1) as f64;
    let start_col = area.x as f64 + left * cols;
    let end_col = area.x as f64 + (1.0 - right) * cols;
    let col = column as f64;

    if (col - start_col).abs() > GRAB_DISTANCE && (col - end_col).abs() > GRAB_DISTANCE {
        return None;
    }
    Some(state.selection.nearest_edge(track_fraction(area, column)))
}

fn nudge_edge(
    state: &mut TuiState,
    timeline: &Timeline,
    records: &[CommitRecord],
    edge: Edge,
    direction: i64,
) {
    let step = Granularity::for_range(state.selection.selected()).step_days();
    if state.selection.nudge(edge, direction * step) {
        refresh_window(state, timeline, records);
    }
}

fn move_up(state: &mut TuiState) {
    move_by(state, -1);
}

fn move_down(state: &mut TuiState) {
    move_by(state, 1);
}

fn move_by(state: &mut TuiState, delta: i64) {
    match state.view_mode {
        ViewMode::Commits => {
            let len = state.top_commits.len();
            if len > 0 {
                let next = state.commit_selected as i64 + delta;
                state.commit_selected = next.clamp(0, len as i64 - 1) as usize;
            }
        }
        _ => {
            let len = state.buckets.len();
            if len > 0 {
                let next = state.selected as i64 + delta;
                state.selected = next.clamp(0, len as i64 - 1) as usize;
                crate::tui::input::ensure_selection_in_filtered(state);
            }
        }
    }
}

fn jump_first(state: &mut TuiState) {
    match state.view_mode {
        ViewMode::Commits => state.commit_selected = 0,
        _ => {
            state.selected = 0;
            crate::tui::input::ensure_selection_in_filtered(state);
        }
    }
}

fn jump_last(state: &mut TuiState) {
    match state.view_mode {
        ViewMode::Commits => state.commit_selected = state.top_commits.len().saturating_sub(1),
        _ => {
            state.selected = state.buckets.len().saturating_sub(1);
            crate::tui::input::ensure_selection_in_filtered(state);
        }
    }
}
