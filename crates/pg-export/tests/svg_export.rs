//! Integration tests: end-to-end SVG export through the store.

use pg_core::{ColorId, MemoryStorage, ProjectStore};
use pg_export::{export_current, export_filename};
use pretty_assertions::assert_eq;

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn export_without_current_project_is_empty() {
    let store = ProjectStore::load(Box::new(MemoryStorage::new()));
    assert_eq!(export_current(&store), "");
}

#[test]
fn four_by_four_export_end_to_end() {
    let mut store = ProjectStore::load(Box::new(MemoryStorage::new()));
    store.create_project("Checker");
    store.set_grid_size(4.0, 4.0);
    let red = store.add_color("#ff0000", "Red").unwrap();
    store.set_cell_color(0, 0, Some(red));
    store.set_cell_color(3, 3, Some(red));

    let svg = export_current(&store);

    // One rect per grid cell
    assert_eq!(count(&svg, "class=\"cell\""), 16);
    assert_eq!(count(&svg, "fill=\"#ff0000\""), 2);

    // Document dimensions follow the geometry formula:
    // cols * (cell + gap) + band + 2*padding - gap, with cell_size 24
    let expected = 4.0 * 24.0 + 20.0 + 2.0 * 10.0 - 2.0;
    assert!(svg.contains(&format!("width=\"{expected}\"")));
    assert!(svg.contains(&format!("height=\"{expected}\"")));
    assert!(svg.contains(&format!("viewBox=\"0 0 {expected} {expected}\"")));
}

#[test]
fn document_is_self_contained() {
    let mut store = ProjectStore::load(Box::new(MemoryStorage::new()));
    store.create_project("Standalone");

    let svg = export_current(&store);
    assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.contains("<style>"));
    // No external resource references
    assert!(!svg.contains("href"));
    assert!(!svg.contains("@import"));
}

#[test]
fn axis_labels_cover_both_edges() {
    let mut store = ProjectStore::load(Box::new(MemoryStorage::new()));
    store.create_project("Labels");
    store.set_grid_size(3.0, 28.0);

    let svg = export_current(&store);
    // 28 columns runs past Z into AA, AB
    assert!(svg.contains(">AA</text>"));
    assert!(svg.contains(">AB</text>"));
    assert!(!svg.contains(">AC</text>"));
    // Row labels are 1-based
    assert!(svg.contains(">3</text>"));
}

#[test]
fn painted_cells_pick_contrast_text() {
    let mut store = ProjectStore::load(Box::new(MemoryStorage::new()));
    store.create_project("Contrast");
    store.set_grid_size(1.0, 2.0);
    let black = store.add_color("#000000", "Ink").unwrap();
    store.set_cell_color(0, 0, Some(black));

    let svg = export_current(&store);
    // The black cell labels its coordinates in the light text pair
    assert_eq!(count(&svg, "fill=\"#ffffff\" font-size"), 1);
    assert_eq!(count(&svg, "fill=\"#e5e7eb\""), 1);
    // The unpainted cell falls back to the dark pair
    assert_eq!(count(&svg, "fill=\"#111827\""), 1);
    assert_eq!(count(&svg, "fill=\"#374151\""), 1);
}

#[test]
fn dangling_color_reference_renders_as_unpainted() {
    let mut store = ProjectStore::load(Box::new(MemoryStorage::new()));
    store.create_project("Dangling");
    store.set_grid_size(1.0, 1.0);
    store.set_cell_color(0, 0, Some(ColorId::intern("color-not-in-palette")));

    let svg = export_current(&store);
    assert!(!svg.contains("color-not-in-palette"));
    // Background + one white cell rect
    assert_eq!(count(&svg, "fill=\"#ffffff\""), 2);
    // White fill means dark coordinate text
    assert_eq!(count(&svg, "fill=\"#111827\""), 1);
}

#[test]
fn filename_matches_project_shape() {
    let mut store = ProjectStore::load(Box::new(MemoryStorage::new()));
    store.create_project("Tiny Rocket");
    store.set_grid_size(16.0, 9.0);

    let project = store.current_project().unwrap();
    assert_eq!(export_filename(project), "tiny-rocket-16x9.svg");
}
