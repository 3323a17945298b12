//! Compiled layout model with alias-aware lookup.
//!
//! This module provides access to the embedded German QWERTZ T1 table,
//! validation of authored tables, and symbol → keystroke lookup.

pub(crate) mod compiler;
pub mod text;
pub mod validator;

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::models::{Alias, KeyDescriptor, Layer, LayoutEntry, LayoutSpec};
use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, info};
use validator::{alias_map, chase_alias, SpecificationError};

/// Authored table compiled into the crate.
const EMBEDDED_TABLE: &str = include_str!("qwertz_t1.json");

/// A validated, immutable symbol → keystroke table.
///
/// Built once from a [`LayoutSpec`] and read-only afterwards, so a single
/// instance can be shared by any number of readers.
#[derive(Debug, Clone)]
pub struct LayoutModel {
    /// Layout name
    name: String,
    /// Locale tag
    locale: String,
    /// Primary entries in layer order
    entries: Vec<LayoutEntry>,
    /// Alias table as authored
    aliases: Vec<Alias>,
    /// Settings the table was validated with
    config: LayoutConfig,
    /// Fast lookup by symbol or alias
    lookup: HashMap<String, usize>,
    /// Reverse lookup by descriptor
    by_descriptor: HashMap<KeyDescriptor, usize>,
    /// Keystroke for each producible character
    glyphs: HashMap<char, KeyDescriptor>,
}

impl LayoutModel {
    /// Loads the embedded QWERTZ T1 table with default configuration.
    pub fn load() -> Result<Self> {
        Self::load_with_config(LayoutConfig::default())
    }

    /// Loads the embedded table, validating it with the given configuration.
    pub fn load_with_config(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        let spec = LayoutSpec::from_json_str(EMBEDDED_TABLE)
            .context("Failed to parse embedded qwertz_t1.json")?;
        let model = Self::from_spec(&spec, config).context("Embedded layout table is invalid")?;
        info!(
            layout = %model.name,
            entries = model.entries.len(),
            aliases = model.aliases.len(),
            "Loaded layout"
        );
        Ok(model)
    }

    /// Process-wide instance of the embedded table, built on first access.
    pub fn shared() -> Result<&'static Self> {
        static SHARED: OnceLock<std::result::Result<LayoutModel, String>> = OnceLock::new();
        SHARED
            .get_or_init(|| Self::load().map_err(|e| format!("{e:#}")))
            .as_ref()
            .map_err(|e| anyhow!("{e}"))
    }

    /// Compiles and validates a layout spec into a model.
    ///
    /// Construction either fully succeeds or reports every issue found.
    pub fn from_spec(spec: &LayoutSpec, config: LayoutConfig) -> Result<Self, SpecificationError> {
        let table = compiler::compile_checked(spec, &config)?;

        let mut lookup = HashMap::new();
        let mut by_descriptor = HashMap::new();
        let mut glyphs = HashMap::new();

        for (idx, entry) in table.entries.iter().enumerate() {
            lookup.insert(entry.symbol.clone(), idx);
            by_descriptor.insert(entry.descriptor, idx);
            if let Some(glyph) = entry.glyph {
                glyphs.insert(glyph, entry.descriptor);
            }
            if let Some(glyph) = entry.shifted_glyph {
                glyphs.insert(glyph, entry.descriptor.shifted());
            }
        }

        // Validation guarantees every alias resolves
        let links = alias_map(&table.aliases);
        for alias in &table.aliases {
            let target = chase_alias(
                &alias.alias,
                |s| lookup.contains_key(s),
                &links,
                config.validation.max_alias_hops,
            );
            if let Ok(target) = target {
                let idx = lookup[target];
                lookup.insert(alias.alias.clone(), idx);
            }
        }

        for layer in Layer::ALL {
            debug!(
                layout = %spec.name,
                %layer,
                entries = table.entries.iter().filter(|e| e.layer == layer).count(),
                "Compiled layer"
            );
        }

        Ok(Self {
            name: spec.name.clone(),
            locale: spec.locale.clone(),
            entries: table.entries,
            aliases: table.aliases,
            config,
            lookup,
            by_descriptor,
            glyphs,
        })
    }

    /// Parses a JSON layout spec and builds a model from it.
    pub fn from_json_str(json: &str, config: LayoutConfig) -> Result<Self> {
        let spec = LayoutSpec::from_json_str(json)?;
        Ok(Self::from_spec(&spec, config)?)
    }

    /// Re-checks the model's invariants.
    pub fn validate(&self) -> Result<(), SpecificationError> {
        let issues = validator::check(
            &self.entries,
            &self.aliases,
            self.config.validation.max_alias_hops,
        );
        if issues.is_empty() {
            Ok(())
        } else {
            Err(SpecificationError::new(issues))
        }
    }

    /// Resolves a symbol (through aliases) to its keystroke.
    ///
    /// # Examples
    ///
    /// ```
    /// use qwertz_t1::keymap::LayoutModel;
    /// use qwertz_t1::models::{KeyDescriptor, PhysicalKey};
    ///
    /// let layout = LayoutModel::load().unwrap();
    /// assert_eq!(
    ///     layout.lookup("QuestionMark").unwrap(),
    ///     KeyDescriptor::plain(PhysicalKey::Minus).shifted()
    /// );
    /// assert_eq!(layout.lookup("Hash").unwrap(), layout.lookup("Pound").unwrap());
    /// ```
    pub fn lookup(&self, symbol: &str) -> Result<KeyDescriptor, LayoutError> {
        self.entry(symbol).map(|entry| entry.descriptor)
    }

    /// Returns the layer holding a symbol's canonical definition.
    pub fn layer_of(&self, symbol: &str) -> Result<Layer, LayoutError> {
        self.entry(symbol).map(|entry| entry.layer)
    }

    /// Returns the canonical symbol name an alias stands for.
    ///
    /// Primary symbols resolve to themselves.
    pub fn resolve(&self, symbol: &str) -> Result<&str, LayoutError> {
        self.entry(symbol).map(|entry| entry.symbol.as_str())
    }

    /// Gets the primary entry for a symbol or alias.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&LayoutEntry> {
        let idx = self.lookup.get(symbol)?;
        self.entries.get(*idx)
    }

    /// Checks if a symbol or alias is known.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.lookup.contains_key(symbol)
    }

    /// Returns the primary symbol producing a keystroke.
    #[must_use]
    pub fn symbol_for(&self, descriptor: KeyDescriptor) -> Option<&str> {
        let idx = self.by_descriptor.get(&descriptor)?;
        self.entries.get(*idx).map(|entry| entry.symbol.as_str())
    }

    /// All primary entries, base layer first.
    #[must_use]
    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Primary entries on one layer.
    pub fn entries_in(&self, layer: Layer) -> impl Iterator<Item = &LayoutEntry> {
        self.entries.iter().filter(move |entry| entry.layer == layer)
    }

    /// The alias table.
    #[must_use]
    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    /// Layout name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Locale tag.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Configuration the model was validated with.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Number of primary entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of aliases.
    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    fn entry(&self, symbol: &str) -> Result<&LayoutEntry, LayoutError> {
        self.get(symbol)
            .ok_or_else(|| LayoutError::unknown_symbol(symbol))
    }
}
