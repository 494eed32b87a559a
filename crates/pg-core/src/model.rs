//! Core data model for pixel-grid projects.
//!
//! A project is a grid configuration (rows × cols, cell pixel size), an
//! ordered color palette, and a sparse map of painted cells. The cell map
//! stores color *ids*, not hex values, so palette edits never invalidate
//! painted cells; absence of a key means the cell is unpainted.

use crate::id::{ColorId, ProjectId};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::{SmallVec, smallvec};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

// ─── Limits & defaults ───────────────────────────────────────────────────

pub const MIN_GRID_DIM: u32 = 1;
pub const MAX_GRID_DIM: u32 = 64;
pub const MIN_CELL_SIZE: u32 = 8;
pub const MAX_CELL_SIZE: u32 = 64;

pub const DEFAULT_ROWS: u32 = 12;
pub const DEFAULT_COLS: u32 = 12;
pub const DEFAULT_CELL_SIZE: u32 = 24;

/// Current time as epoch milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ─── Palette ─────────────────────────────────────────────────────────────

/// One entry in a project's palette. Identity is `id`; `hex` and `name` are
/// freely editable. A color belongs to exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub id: ColorId,
    pub hex: String,
    pub name: String,
}

/// The palette every new project starts with.
pub fn default_palette() -> SmallVec<[PaletteColor; 9]> {
    fn entry(id: &str, hex: &str, name: &str) -> PaletteColor {
        PaletteColor {
            id: ColorId::intern(id),
            hex: hex.into(),
            name: name.into(),
        }
    }
    smallvec![
        entry("color-1", "#ef4444", "Red"),
        entry("color-2", "#f97316", "Orange"),
        entry("color-3", "#eab308", "Yellow"),
        entry("color-4", "#22c55e", "Green"),
        entry("color-5", "#3b82f6", "Blue"),
        entry("color-6", "#8b5cf6", "Purple"),
        entry("color-7", "#ec4899", "Pink"),
        entry("color-8", "#ffffff", "White"),
        entry("color-9", "#000000", "Black"),
    ]
}

// ─── Cell keys ───────────────────────────────────────────────────────────

/// Address of one grid cell. Serialized as the string `"{row}-{col}"`, which
/// is the key shape of the sparse cell map in the persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub row: u32,
    pub col: u32,
}

impl CellKey {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl FromStr for CellKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s.split_once('-').ok_or(())?;
        Ok(Self {
            row: row.parse().map_err(|_| ())?,
            col: col.parse().map_err(|_| ())?,
        })
    }
}

impl Serialize for CellKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = CellKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a cell key of the form \"row-col\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<CellKey, E> {
                v.parse()
                    .map_err(|()| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(KeyVisitor)
    }
}

/// Sparse painted-cell map. Absent key = unpainted.
pub type CellMap = HashMap<CellKey, ColorId>;

// ─── Project ─────────────────────────────────────────────────────────────

/// A saved pixel-art grid configuration — the aggregate root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub rows: u32,
    pub cols: u32,
    /// Pixel size of one cell, `8..=64`.
    pub cell_size: u32,
    /// Palette in display order. `id` unique; hex/name are not deduplicated.
    pub colors: SmallVec<[PaletteColor; 9]>,
    pub cells: CellMap,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Project {
    /// A fresh project with default dimensions and the built-in palette.
    pub fn new(id: ProjectId, name: &str, now: u64) -> Self {
        Self {
            id,
            name: name.to_string(),
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cell_size: DEFAULT_CELL_SIZE,
            colors: default_palette(),
            cells: CellMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Look up a palette color by id.
    pub fn color(&self, id: ColorId) -> Option<&PaletteColor> {
        self.colors.iter().find(|c| c.id == id)
    }

    /// Bump `updated_at`, keeping it monotonically non-decreasing even when
    /// the wall clock steps backwards.
    pub(crate) fn touch(&mut self, now: u64) {
        self.updated_at = self.updated_at.max(now);
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// 8-bit RGB, parsed from palette hex strings for contrast computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Parse a hex color string: `#RGB` or `#RRGGBB`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            6 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                Some(Self { r, g, b })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cell_key_display_parse_roundtrip() {
        let key = CellKey::new(3, 11);
        assert_eq!(key.to_string(), "3-11");
        assert_eq!("3-11".parse::<CellKey>().unwrap(), key);
        assert!("3".parse::<CellKey>().is_err());
        assert!("a-b".parse::<CellKey>().is_err());
    }

    #[test]
    fn cell_map_serializes_with_string_keys() {
        let mut cells = CellMap::new();
        cells.insert(CellKey::new(0, 2), ColorId::intern("color-1"));
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"{"0-2":"color-1"}"#);

        let back: CellMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cells);
    }

    #[test]
    fn default_palette_has_nine_unique_ids() {
        let palette = default_palette();
        assert_eq!(palette.len(), 9);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
        assert_eq!(palette[0].hex, "#ef4444");
        assert_eq!(palette[8].name, "Black");
    }

    #[test]
    fn rgb_from_hex_forms() {
        assert_eq!(
            Rgb8::from_hex("#ff0000"),
            Some(Rgb8 { r: 255, g: 0, b: 0 })
        );
        assert_eq!(
            Rgb8::from_hex("3b82f6"),
            Some(Rgb8 {
                r: 0x3b,
                g: 0x82,
                b: 0xf6
            })
        );
        assert_eq!(
            Rgb8::from_hex("#fff"),
            Some(Rgb8 {
                r: 255,
                g: 255,
                b: 255
            })
        );
        assert_eq!(Rgb8::from_hex("#12345"), None);
        assert_eq!(Rgb8::from_hex("not-a-color"), None);
    }

    #[test]
    fn project_touch_is_monotonic() {
        let mut project = Project::new(ProjectId::intern("project-test"), "Test", 1_000);
        project.touch(2_000);
        assert_eq!(project.updated_at, 2_000);
        // Clock stepping backwards must not move updated_at back
        project.touch(500);
        assert_eq!(project.updated_at, 2_000);
    }
}
