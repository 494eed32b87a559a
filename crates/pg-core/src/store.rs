//! The project store — single source of truth for all projects.
//!
//! An explicit state container owned by the application root and passed by
//! reference to every consumer; all mutation funnels through the operation
//! set below. Each successful mutation bumps the project's `updated_at` and
//! writes the whole store through the injected [`StorageBackend`].
//!
//! Soft-failure policy: mutators that need a current project silently no-op
//! without one, dimension inputs are clamped rather than rejected, and
//! storage failures degrade to "unsaved" with a warning. No operation here
//! returns an error.

use crate::id::{ColorId, ProjectId};
use crate::model::{
    CellKey, CellMap, MAX_CELL_SIZE, MAX_GRID_DIM, MIN_CELL_SIZE, MIN_GRID_DIM, PaletteColor,
    Project, now_millis,
};
use crate::storage::StorageBackend;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Partial update for a palette color. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ColorPatch {
    pub hex: Option<String>,
    pub name: Option<String>,
}

/// The persisted shape of the store: the active-project pointer plus the
/// project mapping. This struct serializes 1:1 as the durable record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreState {
    pub current_project_id: Option<ProjectId>,
    pub projects: HashMap<ProjectId, Project>,
}

/// All projects, the current-project pointer, and every mutating operation.
pub struct ProjectStore {
    state: StoreState,
    storage: Box<dyn StorageBackend>,
}

impl ProjectStore {
    /// Rehydrate the store from the backend. Any read or parse failure falls
    /// back to an empty store — a corrupt record must never crash startup.
    pub fn load(storage: Box<dyn StorageBackend>) -> Self {
        let state = match storage.load() {
            Ok(Some(raw)) => match serde_json::from_str::<StoreState>(&raw) {
                Ok(state) => state,
                Err(err) => {
                    warn!("discarding unreadable store record: {err}");
                    StoreState::default()
                }
            },
            Ok(None) => StoreState::default(),
            Err(err) => {
                warn!("storage unavailable, starting empty: {err}");
                StoreState::default()
            }
        };
        Self { state, storage }
    }

    // ─── Project lifecycle ───────────────────────────────────────────────

    /// Create a project with default dimensions and palette, make it
    /// current, and return its fresh id.
    pub fn create_project(&mut self, name: &str) -> ProjectId {
        let id = ProjectId::generate();
        let now = now_millis();
        self.state.projects.insert(id, Project::new(id, name.trim(), now));
        self.state.current_project_id = Some(id);
        self.persist();
        id
    }

    /// Remove a project. Error-free if absent; clears the current pointer if
    /// it referenced the deleted project.
    pub fn delete_project(&mut self, id: ProjectId) {
        self.state.projects.remove(&id);
        if self.state.current_project_id == Some(id) {
            self.state.current_project_id = None;
        }
        self.persist();
    }

    /// Reassign the current-project pointer. Not validated against existence:
    /// selecting an unknown id just yields "no current project" downstream.
    pub fn set_current_project(&mut self, id: Option<ProjectId>) {
        self.state.current_project_id = id;
        self.persist();
    }

    /// Rename the current project. No-op when the trimmed name is empty.
    pub fn rename_project(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.mutate_current(|project| {
            project.name = name.to_string();
            true
        });
    }

    // ─── Grid configuration ──────────────────────────────────────────────

    /// Resize the current project's grid. Each dimension is floored and
    /// clamped to `1..=64`.
    pub fn set_grid_size(&mut self, rows: f64, cols: f64) {
        let rows = clamp_to(rows, MIN_GRID_DIM, MAX_GRID_DIM);
        let cols = clamp_to(cols, MIN_GRID_DIM, MAX_GRID_DIM);
        self.mutate_current(|project| {
            project.rows = rows;
            project.cols = cols;
            true
        });
    }

    /// Set the current project's cell pixel size, floored and clamped to
    /// `8..=64`.
    pub fn set_cell_size(&mut self, size: f64) {
        let size = clamp_to(size, MIN_CELL_SIZE, MAX_CELL_SIZE);
        self.mutate_current(|project| {
            project.cell_size = size;
            true
        });
    }

    // ─── Color management ────────────────────────────────────────────────

    /// Append a color to the current project's palette. Returns the fresh id
    /// when a current project exists.
    pub fn add_color(&mut self, hex: &str, name: &str) -> Option<ColorId> {
        let id = ColorId::generate();
        self.mutate_current(|project| {
            project.colors.push(PaletteColor {
                id,
                hex: hex.to_string(),
                name: name.to_string(),
            });
            true
        })
        .then_some(id)
    }

    /// Remove a color from the palette and, atomically with it, unpaint every
    /// cell painted with it. Cells must never reference a color id that is
    /// not in the palette.
    pub fn remove_color(&mut self, color_id: ColorId) {
        self.mutate_current(|project| {
            project.colors.retain(|c| c.id != color_id);
            project.cells.retain(|_, painted| *painted != color_id);
            true
        });
    }

    /// Partially update an existing color. No-op if the id is not in the
    /// palette (no `updated_at` bump either).
    pub fn update_color(&mut self, color_id: ColorId, patch: ColorPatch) {
        self.mutate_current(|project| {
            let Some(color) = project.colors.iter_mut().find(|c| c.id == color_id) else {
                return false;
            };
            if let Some(hex) = patch.hex {
                color.hex = hex;
            }
            if let Some(name) = patch.name {
                color.name = name;
            }
            true
        });
    }

    // ─── Cell painting ───────────────────────────────────────────────────

    /// Paint or unpaint one cell. `None` removes the key. The color id is
    /// *not* validated against the palette; derivation and export render a
    /// dangling reference as unpainted instead of failing.
    pub fn set_cell_color(&mut self, row: u32, col: u32, color_id: Option<ColorId>) {
        self.mutate_current(|project| {
            let key = CellKey::new(row, col);
            match color_id {
                Some(id) => {
                    project.cells.insert(key, id);
                }
                None => {
                    project.cells.remove(&key);
                }
            }
            true
        });
    }

    /// Empty the current project's cell map.
    pub fn clear_grid(&mut self) {
        self.mutate_current(|project| {
            project.cells.clear();
            true
        });
    }

    // ─── Read views ──────────────────────────────────────────────────────

    pub fn current_project_id(&self) -> Option<ProjectId> {
        self.state.current_project_id
    }

    /// The current project, or `None` when the pointer is unset or dangling.
    pub fn current_project(&self) -> Option<&Project> {
        self.state
            .current_project_id
            .and_then(|id| self.state.projects.get(&id))
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.state.projects.get(&id)
    }

    /// All projects, order-agnostic. Callers impose their own sort.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.state.projects.values()
    }

    /// The current project's sparse cell map. Convenience for the history
    /// manager, which snapshots and replays it wholesale.
    pub fn current_cells(&self) -> Option<&CellMap> {
        self.current_project().map(|p| &p.cells)
    }

    // ─── Internals ───────────────────────────────────────────────────────

    /// Run `op` against the current project. When `op` reports that it
    /// applied, bump `updated_at` and write through. Returns whether the
    /// mutation applied.
    fn mutate_current(&mut self, op: impl FnOnce(&mut Project) -> bool) -> bool {
        let Some(id) = self.state.current_project_id else {
            return false;
        };
        let Some(project) = self.state.projects.get_mut(&id) else {
            return false;
        };
        if !op(project) {
            return false;
        }
        project.touch(now_millis());
        self.persist();
        true
    }

    /// Write the whole store through the backend. Failures are logged and
    /// swallowed: the in-memory state stays authoritative for the session.
    fn persist(&self) {
        let record = match serde_json::to_string(&self.state) {
            Ok(record) => record,
            Err(err) => {
                warn!("could not serialize store record: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.save(&record) {
            warn!("failed to persist project store: {err}");
        }
    }
}

/// Floor, then clamp to `lo..=hi`. NaN clamps to `lo`.
fn clamp_to(value: f64, lo: u32, hi: u32) -> u32 {
    let value = value.floor();
    if value.is_nan() {
        return lo;
    }
    value.clamp(f64::from(lo), f64::from(hi)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clamp_floors_then_bounds() {
        assert_eq!(clamp_to(12.9, 1, 64), 12);
        assert_eq!(clamp_to(0.0, 1, 64), 1);
        assert_eq!(clamp_to(-3.0, 1, 64), 1);
        assert_eq!(clamp_to(64.9, 1, 64), 64);
        assert_eq!(clamp_to(1000.0, 1, 64), 64);
        assert_eq!(clamp_to(f64::NAN, 1, 64), 1);
        assert_eq!(clamp_to(f64::INFINITY, 8, 64), 64);
        assert_eq!(clamp_to(f64::NEG_INFINITY, 8, 64), 8);
    }
}
