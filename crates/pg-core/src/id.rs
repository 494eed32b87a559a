use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for project and color ids. Ids are opaque strings
/// in the persisted record but compared constantly in the cell map, so they
/// are interned once and carried around as 4-byte `Spur` indices.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Generate a fresh id string of the form `{prefix}-{millis}-{n}`.
///
/// The epoch-millis component keeps ids unique across process restarts
/// (persisted projects from an earlier session can never collide with new
/// ones), and the counter keeps them unique within a session.
fn fresh(prefix: &str) -> Spur {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let millis = crate::model::now_millis();
    INTERNER.get_or_intern(format!("{prefix}-{millis}-{n}"))
}

/// A lightweight, interned identifier for a project.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectId(Spur);

impl ProjectId {
    /// Intern an existing id string (rehydration path), or return it if
    /// already interned.
    pub fn intern(s: &str) -> Self {
        ProjectId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to the id string.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Allocate a new unique project id. Never reused.
    pub fn generate() -> Self {
        ProjectId(fresh("project"))
    }
}

/// A lightweight, interned identifier for a palette color.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorId(Spur);

impl ColorId {
    /// Intern an existing id string, or return it if already interned.
    pub fn intern(s: &str) -> Self {
        ColorId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to the id string.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Allocate a new unique color id.
    pub fn generate() -> Self {
        ColorId(fresh("color"))
    }
}

impl fmt::Debug for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ProjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ProjectId::intern(&s))
    }
}

impl Serialize for ColorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ColorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ColorId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = ColorId::intern("color-1");
        let b = ColorId::intern("color-1");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "color-1");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = ProjectId::generate();
        let b = ProjectId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("project-"));
    }

    #[test]
    fn project_and_color_ids_do_not_collide() {
        let a = ColorId::generate();
        let b = ColorId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("color-"));
    }
}
