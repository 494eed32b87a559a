//! The editing session: brush state and the one-snapshot-per-gesture rule.
//!
//! A paint gesture runs from pointer-down to pointer-up; every cell crossed
//! during the drag is painted with the active brush, but only the gesture's
//! first cell records an undo snapshot. Clearing the grid is likewise one
//! gesture. The session owns nothing but transient editing state — all
//! project data lives in the store.

use crate::history::SnapshotHistory;
use pg_core::{ColorId, ProjectStore};

/// Transient editing state layered above the store for one session.
pub struct EditSession {
    history: SnapshotHistory,
    brush: Option<ColorId>,
    erasing: bool,
    stroke_active: bool,
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            history: SnapshotHistory::default(),
            brush: None,
            erasing: false,
            stroke_active: false,
        }
    }

    // ─── Brush state ─────────────────────────────────────────────────────

    /// Pick a palette color to paint with. Leaves eraser mode.
    pub fn select_brush(&mut self, color_id: ColorId) {
        self.brush = Some(color_id);
        self.erasing = false;
    }

    /// Toggle eraser mode. Entering it drops the brush selection.
    pub fn toggle_eraser(&mut self) {
        self.erasing = !self.erasing;
        if self.erasing {
            self.brush = None;
        }
    }

    pub fn brush(&self) -> Option<ColorId> {
        self.brush
    }

    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    // ─── Paint gestures ──────────────────────────────────────────────────

    /// Pointer-down: record one snapshot for the whole gesture, then apply
    /// the brush to the first cell.
    pub fn begin_stroke(&mut self, store: &mut ProjectStore, row: u32, col: u32) {
        self.history.record(store);
        self.stroke_active = true;
        self.apply_brush(store, row, col);
    }

    /// Pointer-move: drag painting. Only applies while a stroke is active.
    pub fn continue_stroke(&mut self, store: &mut ProjectStore, row: u32, col: u32) {
        if !self.stroke_active {
            return;
        }
        self.apply_brush(store, row, col);
    }

    /// Pointer-up: close the gesture.
    pub fn end_stroke(&mut self) {
        self.stroke_active = false;
    }

    /// Clear every cell, as one undoable gesture.
    pub fn clear_grid(&mut self, store: &mut ProjectStore) {
        self.history.record(store);
        store.clear_grid();
    }

    fn apply_brush(&self, store: &mut ProjectStore, row: u32, col: u32) {
        let color = if self.erasing { None } else { self.brush };
        store.set_cell_color(row, col, color);
    }

    // ─── Undo / redo ─────────────────────────────────────────────────────

    pub fn undo(&mut self, store: &mut ProjectStore) -> bool {
        self.history.undo(store)
    }

    pub fn redo(&mut self, store: &mut ProjectStore) -> bool {
        self.history.redo(store)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pg_core::MemoryStorage;

    fn store_with_project() -> ProjectStore {
        let mut store = ProjectStore::load(Box::new(MemoryStorage::new()));
        store.create_project("Session");
        store
    }

    #[test]
    fn eraser_toggle_drops_brush() {
        let mut session = EditSession::new();
        session.select_brush(pg_core::ColorId::intern("color-1"));
        assert!(session.brush().is_some());

        session.toggle_eraser();
        assert!(session.is_erasing());
        assert!(session.brush().is_none());

        session.toggle_eraser();
        assert!(!session.is_erasing());
    }

    #[test]
    fn stroke_without_brush_erases_nothing_painted() {
        let mut store = store_with_project();
        let mut session = EditSession::new();

        // No brush selected: painting a cell sets it to unpainted
        session.begin_stroke(&mut store, 0, 0);
        session.end_stroke();
        assert!(store.current_cells().unwrap().is_empty());
    }

    #[test]
    fn moves_outside_a_stroke_do_not_paint() {
        let mut store = store_with_project();
        let mut session = EditSession::new();
        let red = store.add_color("#ff0000", "Red").unwrap();
        session.select_brush(red);

        session.continue_stroke(&mut store, 2, 2);
        assert!(store.current_cells().unwrap().is_empty());
    }
}
