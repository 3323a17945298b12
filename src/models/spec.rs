//! Authored layout table.
//!
//! A `LayoutSpec` is the literal enumeration of symbols as written by the
//! layout author: base entries bound to physical keys, shifted and AltGr
//! entries composed from earlier symbols, and aliases. It is deserialized
//! from JSON and compiled into a `LayoutModel`.

use crate::models::key::PhysicalKey;
use crate::models::layer::{Alias, Layer};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Base-layer symbol bound directly to a physical key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseEntrySpec {
    /// Symbol name (e.g., "Eszett")
    pub symbol: String,
    /// Physical key position
    pub key: PhysicalKey,
    /// Character produced without modifiers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph: Option<char>,
    /// Character produced with Shift held
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shifted_glyph: Option<char>,
}

/// Shifted or AltGr symbol composed from a symbol on an earlier layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedEntrySpec {
    /// Symbol name (e.g., "QuestionMark")
    pub symbol: String,
    /// Source symbol whose key is reused (e.g., "Eszett")
    pub from: String,
    /// Character produced by this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph: Option<char>,
}

impl ComposedEntrySpec {
    /// Creates a composed entry without a glyph.
    pub fn new(symbol: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            from: from.into(),
            glyph: None,
        }
    }
}

/// The complete authored table for one locale layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Layout name (e.g., "German QWERTZ T1")
    pub name: String,
    /// Locale tag (e.g., "de-DE")
    #[serde(default)]
    pub locale: String,
    /// Base layer entries
    #[serde(default)]
    pub base: Vec<BaseEntrySpec>,
    /// Shifted layer entries
    #[serde(default)]
    pub shifted: Vec<ComposedEntrySpec>,
    /// AltGr layer entries
    #[serde(default)]
    pub altgr: Vec<ComposedEntrySpec>,
    /// Alias table
    #[serde(default)]
    pub aliases: Vec<Alias>,
}

impl LayoutSpec {
    /// Creates an empty spec with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses a spec from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse layout table JSON")
    }

    /// Serializes the layout spec to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize layout table")
    }

    /// Adds a base entry.
    pub fn base(mut self, symbol: impl Into<String>, key: PhysicalKey) -> Self {
        self.base.push(BaseEntrySpec {
            symbol: symbol.into(),
            key,
            glyph: None,
            shifted_glyph: None,
        });
        self
    }

    /// Adds a shifted entry.
    pub fn shifted(mut self, symbol: impl Into<String>, from: impl Into<String>) -> Self {
        self.shifted.push(ComposedEntrySpec::new(symbol, from));
        self
    }

    /// Adds an AltGr entry.
    pub fn alt_gr(mut self, symbol: impl Into<String>, from: impl Into<String>) -> Self {
        self.altgr.push(ComposedEntrySpec::new(symbol, from));
        self
    }

    /// Adds an alias.
    pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.push(Alias::new(alias, target));
        self
    }

    /// Number of primary entries across all layers.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.base.len() + self.shifted.len() + self.altgr.len()
    }

    /// Composed entries for a layer (empty for the base layer).
    #[must_use]
    pub fn composed_entries(&self, layer: Layer) -> &[ComposedEntrySpec] {
        match layer {
            Layer::Base => &[],
            Layer::Shifted => &self.shifted,
            Layer::AltGr => &self.altgr,
        }
    }
}
