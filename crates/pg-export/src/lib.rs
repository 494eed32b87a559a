pub mod contrast;
pub mod label;
pub mod svg;

pub use contrast::{TextColors, contrast_colors, relative_luminance};
pub use label::column_label;
pub use svg::{export_current, export_filename, render_svg};
