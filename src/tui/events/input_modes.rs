use crossterm::event::KeyCode;

use super::super::input::apply_search_filter;
use super::super::state::TuiState;

/// Handle bucket search keystrokes, applying the filter on every change.
pub(super) fn handle_search_input(code: KeyCode, state: &mut TuiState) {
    match code {
        KeyCode::Esc => {
            state.search_mode = false;
            state.search_query.clear();
            state.filtered_indices = (0..state.buckets.len()).collect();
        }
        KeyCode::Enter => {
            state.search_mode = false;
            apply_search_filter(state);
        }
        KeyCode::Backspace => {
            state.search_query.pop();
            apply_search_filter(state);
        }
        KeyCode::Char(c) => {
            state.search_query.push(c);
            apply_search_filter(state);
        }
        _ => {}
    }
}
