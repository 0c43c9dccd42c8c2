use chrono::{DateTime, Duration, Utc};

use crate::model::DateRange;

/// Which handle of the range brush an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// Input capture state for the brush. Pointer-down on a handle enters a
/// dragging state, pointer-move proposes range updates, pointer-up returns
/// to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingStart,
    DraggingEnd,
}

/// The user-adjustable window over a dataset's absolute date range.
///
/// The absolute range is fixed for the dataset's lifetime; the selected range
/// always lies within it.
#[derive(Debug, Clone)]
pub struct Selection {
    absolute: DateRange,
    selected: DateRange,
    drag: DragState,
}

impl Selection {
    pub fn new(absolute: DateRange) -> Self {
        Self { absolute, selected: absolute, drag: DragState::Idle }
    }

    /// Start from a pre-narrowed window (e.g. `--since`/`--until`), clamped
    /// into the absolute range by the caller.
    pub fn with_window(absolute: DateRange, selected: DateRange) -> Self {
        Self { absolute, selected, drag: DragState::Idle }
    }

    pub fn absolute(&self) -> &DateRange {
        &self.absolute
    }

    pub fn selected(&self) -> &DateRange {
        &self.selected
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Propose moving one edge. The moved start must stay strictly below the
    /// current end (and vice versa) or the update is rejected as a no-op;
    /// accepted proposals are clamped to the absolute bounds. Returns whether
    /// the selection changed.
    pub fn update(&mut self, edge: Edge, proposed: DateTime<Utc>) -> bool {
        let proposed = self.absolute.clamp(proposed);
        let (start, end) = match edge {
            Edge::Start if proposed < self.selected.end() => (proposed, self.selected.end()),
            Edge::End if proposed > self.selected.start() => (self.selected.start(), proposed),
            _ => return false,
        };
        match DateRange::new(start, end) {
            Ok(range) if range != self.selected => {
                self.selected = range;
                true
            }
            _ => false,
        }
    }

    /// Nudge one edge by a whole number of days (keyboard stepping).
    pub fn nudge(&mut self, edge: Edge, days: i64) -> bool {
        let from = match edge {
            Edge::Start => self.selected.start(),
            Edge::End => self.selected.end(),
        };
        self.update(edge, from + Duration::days(days))
    }

    /// Restore the selection to the full absolute range.
    pub fn reset(&mut self) -> bool {
        let changed = self.selected != self.absolute;
        self.selected = self.absolute;
        changed
    }

    /// Fractional positions of the two handles within the absolute span:
    /// start offset from the left edge and end offset from the right edge,
    /// both in `0.0..=1.0`. A zero-length absolute span pins both to zero.
    pub fn offsets(&self) -> (f64, f64) {
        let span = self.span_seconds();
        if span <= 0.0 {
            return (0.0, 0.0);
        }
        let left = (self.selected.start() - self.absolute.start()).num_seconds() as f64 / span;
        let right = (self.absolute.end() - self.selected.end()).num_seconds() as f64 / span;
        (left.clamp(0.0, 1.0), right.clamp(0.0, 1.0))
    }

    /// Map a pointer position (fraction of the absolute span, 0 at the left)
    /// back to an instant.
    pub fn instant_at(&self, fraction: f64) -> DateTime<Utc> {
        let span = self.span_seconds();
        if span <= 0.0 {
            return self.absolute.start();
        }
        let offset = (fraction.clamp(0.0, 1.0) * span).round() as i64;
        self.absolute.start() + Duration::seconds(offset)
    }

    /// Pointer-down on a handle: begin capturing moves for that edge.
    pub fn pointer_down(&mut self, edge: Edge) {
        self.drag = match edge {
            Edge::Start => DragState::DraggingStart,
            Edge::End => DragState::DraggingEnd,
        };
    }

    /// Pointer-move while captured: propose the instant under the pointer for
    /// the dragged edge. Ignored in `Idle`. Returns whether the selection
    /// changed.
    pub fn pointer_move(&mut self, fraction: f64) -> bool {
        let edge = match self.drag {
            DragState::Idle => return false,
            DragState::DraggingStart => Edge::Start,
            DragState::DraggingEnd => Edge::End,
        };
        let proposed = self.instant_at(fraction);
        self.update(edge, proposed)
    }

    /// Pointer-up or pointer-leave: release capture.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Handle nearest to `fraction`, for pointer-down hit testing.
    pub fn nearest_edge(&self, fraction: f64) -> Edge {
        let (left, right) = self.offsets();
        let start_pos = left;
        let end_pos = 1.0 - right;
        if (fraction - start_pos).abs() <= (fraction - end_pos).abs() {
            Edge::Start
        } else {
            Edge::End
        }
    }

    fn span_seconds(&self) -> f64 {
        (self.absolute.end() - self.absolute.start()).num_seconds() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn selection(start: &str, end: &str) -> Selection {
        Selection::new(
            DateRange::new(
                format!("{start}T00:00:00Z").parse().unwrap(),
                format!("{end}T00:00:00Z").parse().unwrap(),
            )
            .unwrap(),
        )
    }

    fn instant(s: &str) -> DateTime<Utc> {
        format!("{s}T00:00:00Z").parse().unwrap()
    }

    #[test]
    fn moving_end_before_start_is_rejected() {
        let mut sel = selection("2024-01-01", "2024-12-31");
        assert!(sel.update(Edge::Start, instant("2024-06-01")));
        let before = *sel.selected();

        // propose an end earlier than the current start
        assert!(!sel.update(Edge::End, instant("2024-03-01")));
        assert_eq!(*sel.selected(), before);
    }

    #[test]
    fn moving_start_to_end_is_rejected_at_equality() {
        let mut sel = selection("2024-01-01", "2024-12-31");
        assert!(!sel.update(Edge::Start, instant("2024-12-31")));
        assert_eq!(*sel.selected(), *sel.absolute());
    }

    #[test]
    fn updates_clamp_to_absolute_bounds() {
        let mut sel = selection("2024-01-01", "2024-12-31");
        assert!(sel.update(Edge::Start, instant("2024-03-01")));
        // a proposal before the absolute minimum clamps back to it
        assert!(sel.update(Edge::Start, instant("2019-01-01")));
        assert_eq!(sel.selected().start(), sel.absolute().start());
    }

    #[test]
    fn drag_machine_transitions() {
        let mut sel = selection("2024-01-01", "2024-12-31");
        assert_eq!(sel.drag(), DragState::Idle);
        assert!(!sel.pointer_move(0.5), "moves in Idle are ignored");

        sel.pointer_down(Edge::End);
        assert_eq!(sel.drag(), DragState::DraggingEnd);
        assert!(sel.pointer_move(0.5));
        assert!(sel.selected().end() < sel.absolute().end());

        sel.pointer_up();
        assert_eq!(sel.drag(), DragState::Idle);
        assert!(!sel.pointer_move(0.9));
    }

    #[test]
    fn dragging_an_edge_past_the_other_keeps_last_valid_range() {
        let mut sel = selection("2024-01-01", "2024-12-31");
        sel.update(Edge::Start, instant("2024-06-01"));
        sel.pointer_down(Edge::End);
        // drag the right handle all the way past the left one
        sel.pointer_move(0.2);
        assert!(sel.selected().end() > sel.selected().start());
        assert_eq!(sel.selected().start(), instant("2024-06-01"));
    }

    #[test]
    fn offsets_track_the_selected_window() {
        let mut sel = selection("2024-01-01", "2024-01-11");
        assert_eq!(sel.offsets(), (0.0, 0.0));
        sel.update(Edge::Start, instant("2024-01-03"));
        sel.update(Edge::End, instant("2024-01-09"));
        let (left, right) = sel.offsets();
        assert!((left - 0.2).abs() < 1e-9);
        assert!((right - 0.2).abs() < 1e-9);
    }

    #[test]
    fn zero_span_absolute_range_is_harmless() {
        let sel = Selection::new(DateRange::single(instant("2024-01-01")));
        assert_eq!(sel.offsets(), (0.0, 0.0));
        assert_eq!(sel.instant_at(0.7), instant("2024-01-01"));
    }

    #[test]
    fn nudge_steps_an_edge_by_days() {
        let mut sel = selection("2024-01-01", "2024-12-31");
        assert!(sel.nudge(Edge::Start, 10));
        assert_eq!(sel.selected().start(), instant("2024-01-11"));
        assert!(sel.nudge(Edge::Start, -30), "clamped back to the absolute start");
        assert_eq!(sel.selected().start(), instant("2024-01-01"));
    }
}
