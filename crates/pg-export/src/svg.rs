//! SVG document assembly for the export view.
//!
//! The exported document mirrors the edit view's visual treatment (2-unit
//! gap, rounded cells) and adds spreadsheet-style coordinates: an axis label
//! band along the top and left edges, plus a stacked column-letter /
//! row-number pair centered inside every cell. The output is one
//! self-contained string with embedded styles and no external references, so
//! the file stays valid opened on its own.

use crate::contrast::contrast_colors;
use crate::label::{column_label, row_label};
use pg_core::{GridCell, Project, ProjectStore, dense_cells};
use std::fmt::Write;

/// Space between neighboring cells, in document units.
const CELL_GAP: f64 = 2.0;
/// Width of the axis label band on the top and left edges.
const LABEL_BAND: f64 = 20.0;
/// Outer document padding.
const PADDING: f64 = 10.0;

const UNPAINTED_FILL: &str = "#ffffff";

/// Resolved layout for one export: everything derived from `rows`, `cols`,
/// and `cell_size`.
struct Geometry {
    gap: f64,
    radius: f64,
    /// Rendered cell edge (`cell_size - gap`; the gap is part of the pitch).
    cell: f64,
    band: f64,
    padding: f64,
    width: f64,
    height: f64,
}

impl Geometry {
    fn of(project: &Project) -> Self {
        let gap = CELL_GAP;
        let cell_size = f64::from(project.cell_size);
        let radius = (cell_size * 0.12).floor().max(2.0);
        let cell = cell_size - gap;
        let band = LABEL_BAND;
        let padding = PADDING;
        let pitch = cell + gap;
        Self {
            gap,
            radius,
            cell,
            band,
            padding,
            width: f64::from(project.cols) * pitch + band + padding * 2.0 - gap,
            height: f64::from(project.rows) * pitch + band + padding * 2.0 - gap,
        }
    }

    /// Top-left corner of a cell's rect.
    fn cell_origin(&self, row: u32, col: u32) -> (f64, f64) {
        let pitch = self.cell + self.gap;
        (
            self.band + self.padding + f64::from(col) * pitch,
            self.band + self.padding + f64::from(row) * pitch,
        )
    }
}

/// Render a project's grid as a complete SVG document string.
pub fn render_svg(project: &Project) -> String {
    let geo = Geometry::of(project);
    let cells = dense_cells(project);

    let mut svg = String::with_capacity(cells.len() * 256);
    let _ = writeln!(svg, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = geo.width,
        h = geo.height
    );
    push_styles(&mut svg);

    let _ = writeln!(svg, "  <!-- Background -->");
    let _ = writeln!(
        svg,
        "  <rect width=\"{}\" height=\"{}\" fill=\"#ffffff\"/>",
        geo.width, geo.height
    );

    push_axis_labels(&mut svg, project, &geo);

    let _ = writeln!(svg, "\n  <!-- Grid cells -->");
    for cell in &cells {
        push_cell(&mut svg, project, &geo, cell);
    }

    svg.push_str("</svg>\n");
    svg
}

/// Export the current project, or an empty string when none is selected.
/// Callers disable the export action in that state; this never fails.
pub fn export_current(store: &ProjectStore) -> String {
    match store.current_project() {
        Some(project) => render_svg(project),
        None => String::new(),
    }
}

/// Download filename: `{slugified name}-{rows}x{cols}.svg`.
pub fn export_filename(project: &Project) -> String {
    let slug = project
        .name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("{slug}-{}x{}.svg", project.rows, project.cols)
}

// ─── Document pieces ─────────────────────────────────────────────────────

fn push_styles(out: &mut String) {
    out.push_str("  <style>\n");
    out.push_str("    :root {\n");
    out.push_str("      --coord-fill: #71717a;\n");
    out.push_str("      --cell-stroke: #e4e4e7;\n");
    out.push_str("    }\n");
    out.push_str("    .label { font-family: system-ui, sans-serif; fill: var(--coord-fill); }\n");
    out.push_str("    .cell { stroke: var(--cell-stroke); stroke-width: 1; }\n");
    out.push_str("    .coord-main { font-family: system-ui, sans-serif; }\n");
    out.push_str("    .coord-sub { font-family: system-ui, sans-serif; }\n");
    out.push_str("  </style>\n");
}

fn push_axis_labels(out: &mut String, project: &Project, geo: &Geometry) {
    let pitch = geo.cell + geo.gap;

    let _ = writeln!(out, "\n  <!-- Column labels -->");
    let y = geo.padding + (geo.band * 0.6).round().max(10.0);
    for c in 0..project.cols {
        let x = geo.band + geo.padding + f64::from(c) * pitch + geo.cell / 2.0;
        let _ = writeln!(
            out,
            "  <text x=\"{x}\" y=\"{y}\" class=\"label\" text-anchor=\"middle\">{}</text>",
            column_label(c as usize)
        );
    }

    let _ = writeln!(out, "\n  <!-- Row labels -->");
    let x = geo.padding + geo.band / 2.0;
    for r in 0..project.rows {
        let y = geo.band + geo.padding + f64::from(r) * pitch + geo.cell / 2.0
            + (geo.band * 0.16).round();
        let _ = writeln!(
            out,
            "  <text x=\"{x}\" y=\"{y}\" class=\"label\" text-anchor=\"middle\">{}</text>",
            row_label(r as usize)
        );
    }
}

fn push_cell(out: &mut String, project: &Project, geo: &Geometry, cell: &GridCell) {
    let (x, y) = geo.cell_origin(cell.row, cell.col);

    // Dangling color ids (palette entry since removed elsewhere) render as
    // unpainted rather than failing the export.
    let fill = cell
        .color
        .and_then(|id| project.color(id))
        .map(|c| c.hex.as_str())
        .unwrap_or(UNPAINTED_FILL);

    let _ = writeln!(
        out,
        "  <rect x=\"{x}\" y=\"{y}\" width=\"{c}\" height=\"{c}\" rx=\"{r}\" ry=\"{r}\" fill=\"{fill}\" class=\"cell\"/>",
        c = geo.cell,
        r = geo.radius,
        fill = escape_attr(fill)
    );

    // Stacked coordinates: column letter above, row number below, centered,
    // sized relative to the cell with legibility floors.
    let center_x = x + geo.cell / 2.0;
    let main_font = (geo.cell * 0.34).round().max(8.0);
    let sub_font = (geo.cell * 0.24).round().max(7.0);
    let main_y = y + geo.cell / 2.0 - (geo.cell * 0.12).round();
    let sub_y = y + geo.cell / 2.0 + (geo.cell * 0.18).round();
    let text = contrast_colors(fill);

    let _ = writeln!(
        out,
        "  <text x=\"{center_x}\" y=\"{main_y}\" text-anchor=\"middle\" class=\"coord-main\" fill=\"{}\" font-size=\"{main_font}px\">{}</text>",
        text.main,
        column_label(cell.col as usize)
    );
    let _ = writeln!(
        out,
        "  <text x=\"{center_x}\" y=\"{sub_y}\" text-anchor=\"middle\" class=\"coord-sub\" fill=\"{}\" font-size=\"{sub_font}px\">{}</text>",
        text.sub,
        row_label(cell.row as usize)
    );
}

/// Escape a user-supplied string for use inside an XML attribute value.
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
