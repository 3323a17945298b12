//! Layers and the entries that live in them.

use crate::models::key::{KeyDescriptor, ModifierFlags};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three character sets reachable from a single physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Unmodified keys
    Base,
    /// Keys pressed with Shift held
    Shifted,
    /// Keys pressed with AltGr held
    #[serde(rename = "altgr")]
    AltGr,
}

impl Layer {
    /// All layers in composition order.
    pub const ALL: [Self; 3] = [Self::Base, Self::Shifted, Self::AltGr];

    /// Modifiers every descriptor on this layer must carry.
    #[must_use]
    pub const fn modifiers(self) -> ModifierFlags {
        match self {
            Self::Base => ModifierFlags::empty(),
            Self::Shifted => ModifierFlags::SHIFT,
            Self::AltGr => ModifierFlags::ALTGR,
        }
    }

    /// Human-readable layer name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Shifted => "Shifted",
            Self::AltGr => "AltGr",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A primary symbol definition after composition.
///
/// # Validation
///
/// - Symbol must be non-empty and unique across all layers and aliases
/// - Descriptor modifiers must equal the layer's modifiers
/// - No two entries may share a descriptor
/// - Glyphs, when present, must be unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEntry {
    /// Symbol name (e.g., "Eszett", "Euro")
    pub symbol: String,
    /// Layer holding the primary definition
    pub layer: Layer,
    /// Composed descriptor
    pub descriptor: KeyDescriptor,
    /// Character produced by this entry, if it produces one directly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph: Option<char>,
    /// Character produced with Shift held (base letters and umlauts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shifted_glyph: Option<char>,
}

impl LayoutEntry {
    /// Creates an entry without glyphs.
    pub fn new(symbol: impl Into<String>, layer: Layer, descriptor: KeyDescriptor) -> Self {
        Self {
            symbol: symbol.into(),
            layer,
            descriptor,
            glyph: None,
            shifted_glyph: None,
        }
    }

    /// Sets the glyph for this entry.
    #[must_use]
    pub const fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = Some(glyph);
        self
    }

    /// Sets the shifted glyph for this entry.
    #[must_use]
    pub const fn with_shifted_glyph(mut self, glyph: char) -> Self {
        self.shifted_glyph = Some(glyph);
        self
    }

    /// Checks if the descriptor carries exactly the layer's modifiers.
    #[must_use]
    pub fn modifiers_match_layer(&self) -> bool {
        self.descriptor.modifiers == self.layer.modifiers()
    }
}

/// An alternate name for an already-defined symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alias {
    /// Alternate name (e.g., "Caret")
    pub alias: String,
    /// Symbol it stands for (e.g., "Circumflex"); may itself be an alias
    pub target: String,
}

impl Alias {
    /// Creates a new alias.
    pub fn new(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            target: target.into(),
        }
    }
}
