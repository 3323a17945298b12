//! Compiles an authored `LayoutSpec` into layout entries.
//!
//! Base entries are bound to their physical keys; shifted and AltGr entries
//! reuse the key of their source symbol and add the layer's modifier.

use crate::config::LayoutConfig;
use crate::keymap::validator::{
    self, alias_map, chase_alias, ChaseFailure, IssueKind, SpecificationError, SpecificationIssue,
};
use crate::models::{Alias, KeyDescriptor, Layer, LayoutEntry, LayoutSpec};
use std::collections::HashMap;

/// Entries and aliases produced from a layout spec.
#[derive(Debug, Clone, Default)]
pub(crate) struct CompiledTable {
    pub entries: Vec<LayoutEntry>,
    pub aliases: Vec<Alias>,
}

/// Compiles a layout spec, returning the table and any issues found while composing.
///
/// Entries whose source cannot be resolved are left out of the table.
pub(crate) fn compile(
    spec: &LayoutSpec,
    config: &LayoutConfig,
) -> (CompiledTable, Vec<SpecificationIssue>) {
    let mut entries: Vec<LayoutEntry> = spec
        .base
        .iter()
        .map(|base| LayoutEntry {
            symbol: base.symbol.clone(),
            layer: Layer::Base,
            descriptor: KeyDescriptor::plain(base.key),
            glyph: base.glyph,
            shifted_glyph: base.shifted_glyph,
        })
        .collect();

    let aliases = alias_map(&spec.aliases);
    let mut issues = Vec::new();

    for layer in [Layer::Shifted, Layer::AltGr] {
        // Sources must come from earlier layers; entries added below are not visible yet
        let earlier: HashMap<&str, KeyDescriptor> = entries
            .iter()
            .map(|entry| (entry.symbol.as_str(), entry.descriptor))
            .collect();

        let mut composed = Vec::new();
        for item in spec.composed_entries(layer) {
            let source = chase_alias(
                &item.from,
                |s| earlier.contains_key(s),
                &aliases,
                config.validation.max_alias_hops,
            );

            match source {
                Ok(source) => {
                    let descriptor = earlier[source].with(layer.modifiers());
                    composed.push(LayoutEntry {
                        symbol: item.symbol.clone(),
                        layer,
                        descriptor,
                        glyph: item.glyph,
                        shifted_glyph: None,
                    });
                }
                Err(failure) => {
                    let reason = match failure {
                        ChaseFailure::Dangling(name) => {
                            format!("Source '{name}' is not defined on an earlier layer")
                        }
                        ChaseFailure::Cycle(members) => {
                            format!("Source alias is cyclic ({})", members.join(" -> "))
                        }
                        ChaseFailure::TooLong => format!(
                            "Source '{}' does not resolve within {} hops",
                            item.from, config.validation.max_alias_hops
                        ),
                    };
                    issues.push(
                        SpecificationIssue::new(IssueKind::UnresolvedSource, &item.symbol, reason)
                            .with_layer(layer),
                    );
                }
            }
        }
        entries.extend(composed);
    }

    (
        CompiledTable {
            entries,
            aliases: spec.aliases.clone(),
        },
        issues,
    )
}

/// Compiles and fully validates a layout spec.
pub(crate) fn compile_checked(
    spec: &LayoutSpec,
    config: &LayoutConfig,
) -> Result<CompiledTable, SpecificationError> {
    let (table, mut issues) = compile(spec, config);
    issues.extend(validator::check(
        &table.entries,
        &table.aliases,
        config.validation.max_alias_hops,
    ));

    if issues.is_empty() {
        Ok(table)
    } else {
        for issue in &issues {
            tracing::warn!("{}", issue);
        }
        Err(SpecificationError::new(issues))
    }
}

impl LayoutSpec {
    /// Validates the layout spec without building a model.
    ///
    /// Reports every issue, including composition sources that don't resolve.
    pub fn validate(&self, config: &LayoutConfig) -> Result<(), SpecificationError> {
        compile_checked(self, config).map(|_| ())
    }
}
