//! Paint a small heart and write the labeled SVG next to the store record.
//!
//! Run with `cargo run -p pg-export --example export_demo [out_dir]`.

use pg_core::{JsonFileStorage, ProjectStore};
use pg_editor::EditSession;
use pg_export::{export_current, export_filename};
use std::env;
use std::fs;
use std::path::PathBuf;

const HEART: &[(u32, u32)] = &[
    (1, 2),
    (1, 3),
    (1, 5),
    (1, 6),
    (2, 1),
    (2, 4),
    (2, 7),
    (3, 1),
    (3, 7),
    (4, 2),
    (4, 6),
    (5, 3),
    (5, 5),
    (6, 4),
];

fn main() {
    env_logger::init();

    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(env::temp_dir);

    let mut store = ProjectStore::load(Box::new(JsonFileStorage::in_dir(&out_dir)));
    store.create_project("Demo Heart");
    store.set_grid_size(8.0, 9.0);
    store.set_cell_size(32.0);

    let red = store
        .add_color("#ef4444", "Heart Red")
        .expect("project is current");

    let mut session = EditSession::new();
    session.select_brush(red);
    let (first, rest) = HEART.split_first().unwrap();
    session.begin_stroke(&mut store, first.0, first.1);
    for &(row, col) in rest {
        session.continue_stroke(&mut store, row, col);
    }
    session.end_stroke();

    let svg = export_current(&store);
    let filename = export_filename(store.current_project().unwrap());
    let path = out_dir.join(&filename);
    match fs::write(&path, &svg) {
        Ok(()) => println!("wrote {}", path.display()),
        Err(err) => eprintln!("ERROR writing {}: {}", path.display(), err),
    }
}
