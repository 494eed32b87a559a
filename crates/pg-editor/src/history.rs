//! Snapshot-based undo/redo over the current project's cell map.
//!
//! Each snapshot is a full copy of the sparse cell map taken *before* a
//! destructive edit — no diffing. Undo and redo replace the live map
//! wholesale, replaying through the store's own `set_cell_color` so every
//! step observes the normal mutation path (timestamp bump, write-through).
//!
//! History is scoped to one editing session and never persisted.

use log::debug;
use pg_core::{CellMap, ProjectStore};

/// Maximum retained snapshots. Oldest-first eviction past this depth.
pub const DEFAULT_DEPTH: usize = 50;

/// A bounded linear undo/redo stack of cell-map snapshots.
///
/// The cursor ranges over `[-1, len - 1]`: `-1` is the "no history" left
/// terminal, `len - 1` the "latest" right terminal. Recording truncates
/// everything right of the cursor, so any new edit invalidates redo.
pub struct SnapshotHistory {
    snapshots: Vec<CellMap>,
    cursor: isize,
    max_depth: usize,
}

impl SnapshotHistory {
    pub fn new(max_depth: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: -1,
            max_depth,
        }
    }

    /// Capture the current cell map before a destructive edit.
    ///
    /// One call per contiguous paint gesture (pointer-down to pointer-up),
    /// not one per cell — which is why this is a separate primitive instead
    /// of being bundled into `set_cell_color`.
    pub fn record(&mut self, store: &ProjectStore) {
        let Some(cells) = store.current_cells() else {
            return;
        };
        let snapshot = cells.clone();

        self.snapshots.truncate((self.cursor + 1) as usize);
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.max_depth {
            debug!("history at depth {}, evicting oldest snapshot", self.max_depth);
            self.snapshots.remove(0);
        }
        self.cursor = self.snapshots.len() as isize - 1;
    }

    /// Step back one snapshot. Returns `false` at the left terminal.
    pub fn undo(&mut self, store: &mut ProjectStore) -> bool {
        if self.cursor < 0 {
            return false;
        }
        let snapshot = self.snapshots[self.cursor as usize].clone();
        apply_snapshot(store, &snapshot);
        self.cursor -= 1;
        true
    }

    /// Step forward one snapshot. Returns `false` at the right terminal.
    pub fn redo(&mut self, store: &mut ProjectStore) -> bool {
        if self.cursor >= self.snapshots.len() as isize - 1 {
            return false;
        }
        self.cursor += 1;
        let snapshot = self.snapshots[self.cursor as usize].clone();
        apply_snapshot(store, &snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor >= 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.snapshots.len() as isize - 1
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

/// Wholesale replace: unpaint every currently painted cell, then repaint
/// every cell the snapshot records. A full diff-free swap, each step routed
/// through the store's documented operations.
fn apply_snapshot(store: &mut ProjectStore, snapshot: &CellMap) {
    let painted: Vec<_> = store
        .current_cells()
        .map(|cells| cells.keys().copied().collect())
        .unwrap_or_default();
    for key in painted {
        store.set_cell_color(key.row, key.col, None);
    }
    for (key, color) in snapshot {
        store.set_cell_color(key.row, key.col, Some(*color));
    }
}
