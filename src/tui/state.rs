use ratatui::layout::Rect;

use crate::model::{Bucket, CommitRecord, ContributorEntry};
use crate::timeline::{CumulativeMode, Selection};

#[derive(Clone, Copy, PartialEq)]
pub enum ViewMode {
    Timeline,
    Contributors,
    Commits,
    Statistics,
}

pub struct TuiState {
    pub selected: usize,
    pub view_mode: ViewMode,
    pub tab_index: usize,
    pub show_help: bool,
    pub search_query: String,
    pub search_mode: bool,
    pub filtered_indices: Vec<usize>,
    pub commit_selected: usize,
    pub status_message: Option<(String, std::time::Instant)>,
    /// Brush track position from the last draw, for pointer hit testing.
    pub brush_area: Option<Rect>,
    pub selection: Selection,
    pub cumulative: CumulativeMode,
    /// Buckets for the selected window, refreshed on every selection change.
    pub buckets: Vec<Bucket>,
    /// Full-history buckets backing the brush track; fixed per dataset.
    pub track: Vec<Bucket>,
    pub contributors: Vec<ContributorEntry>,
    pub top_commits: Vec<CommitRecord>,
}

impl TuiState {
    pub fn new(selection: Selection, cumulative: CumulativeMode) -> Self {
        Self {
            selected: 0,
            view_mode: ViewMode::Timeline,
            tab_index: 0,
            show_help: false,
            search_query: String::new(),
            search_mode: false,
            filtered_indices: Vec::new(),
            commit_selected: 0,
            status_message: None,
            brush_area: None,
            selection,
            cumulative,
            buckets: Vec::new(),
            track: Vec::new(),
            contributors: Vec::new(),
            top_commits: Vec::new(),
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), std::time::Instant::now()));
    }

    /// Drop a status message once it has been on screen a few seconds.
    pub fn expire_status(&mut self) {
        if let Some((_, shown_at)) = &self.status_message {
            if shown_at.elapsed().as_secs() >= 4 {
                self.status_message = None;
            }
        }
    }
}
