//! Icon identifiers and their resolution to displayable glyphs.
//!
//! Rasterization is the host's concern; the screen core only resolves an
//! icon id through a registry with a fixed fallback, so a missing icon can
//! never surface as an error.

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

const FALLBACK_ICON_ID: &str = "category-generic";
const FALLBACK_GLYPH: &str = "▪";

/// Identifier of an icon as referenced by category metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconId(String);

impl IconId {
    /// Wrap a raw icon identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An icon resolved for display on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIcon {
    pub id: IconId,
    pub glyph: String,
}

impl RowIcon {
    /// Pair an icon id with the glyph a host should draw for it.
    #[must_use]
    pub fn new(id: impl Into<String>, glyph: impl Into<String>) -> Self {
        Self {
            id: IconId::new(id),
            glyph: glyph.into(),
        }
    }

    /// The generic category icon used when lookup fails.
    #[must_use]
    pub fn fallback_icon() -> Self {
        Self::new(FALLBACK_ICON_ID, FALLBACK_GLYPH)
    }
}

/// Maps icon ids to glyphs, falling back to a designated generic icon.
#[derive(Debug, Clone)]
pub struct IconRegistry {
    glyphs: HashMap<IconId, String>,
    fallback: RowIcon,
}

impl IconRegistry {
    /// Create a registry with no glyphs and the generic fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            glyphs: HashMap::new(),
            fallback: RowIcon::fallback_icon(),
        }
    }

    /// Registry preloaded with glyphs for the common category icons.
    #[must_use]
    pub fn with_builtin_glyphs() -> Self {
        let mut registry = Self::new();
        for (id, glyph) in [
            ("restaurants", "🍴"),
            ("cafes", "☕"),
            ("fuel", "⛽"),
            ("charging", "🔌"),
            ("hotels", "🛏"),
            ("parking", "🅿"),
            ("pharmacies", "✚"),
            ("atms", "🏧"),
        ] {
            registry.insert(IconId::new(id), glyph);
        }
        registry
    }

    /// Register or replace the glyph for an icon id.
    pub fn insert(&mut self, id: IconId, glyph: impl Into<String>) {
        self.glyphs.insert(id, glyph.into());
    }

    /// Replace the fallback icon used for unresolved ids.
    pub fn set_fallback(&mut self, fallback: RowIcon) {
        self.fallback = fallback;
    }

    /// Resolve an icon id, falling back to the generic icon when unknown.
    #[must_use]
    pub fn resolve(&self, id: &IconId) -> RowIcon {
        match self.glyphs.get(id) {
            Some(glyph) => RowIcon {
                id: id.clone(),
                glyph: glyph.clone(),
            },
            None => {
                warn!("icon '{id}' not registered; using fallback");
                self.fallback.clone()
            }
        }
    }

    /// The icon unresolved ids fall back to.
    #[must_use]
    pub fn fallback(&self) -> &RowIcon {
        &self.fallback
    }
}

impl Default for IconRegistry {
    fn default() -> Self {
        Self::with_builtin_glyphs()
    }
}
