//! Shared test fixtures for layout integration tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use qwertz_t1::models::{LayoutSpec, PhysicalKey};
use qwertz_t1::LayoutModel;

/// Loads the embedded layout, panicking on failure.
pub fn embedded_layout() -> LayoutModel {
    LayoutModel::load().expect("Embedded layout should load")
}

/// A small valid layout spec covering all three layers and a two-hop alias.
pub fn spec_minimal() -> LayoutSpec {
    LayoutSpec::new("Fixture")
        .base("Eszett", PhysicalKey::Minus)
        .base("Plus", PhysicalKey::RightBracket)
        .base("Two", PhysicalKey::Digit2)
        .shifted("QuestionMark", "Eszett")
        .shifted("DoubleQuote", "Two")
        .alt_gr("Backslash", "Eszett")
        .alt_gr("Tilde", "Plus")
        .alias("Quote", "DoubleQuote")
        .alias("Quotes", "Quote")
}

/// The minimal layout spec with one symbol defined twice as a primary entry.
pub fn spec_with_duplicate_primary() -> LayoutSpec {
    spec_minimal().shifted("Plus", "Two")
}

/// The minimal layout spec with a three-alias cycle.
pub fn spec_with_alias_cycle() -> LayoutSpec {
    spec_minimal()
        .alias("Rock", "Paper")
        .alias("Paper", "Scissors")
        .alias("Scissors", "Rock")
}

/// The minimal layout spec with a six-alias cycle, longer than the default hop limit.
pub fn spec_with_long_alias_cycle() -> LayoutSpec {
    (1..=6).fold(spec_minimal(), |spec, i| {
        spec.alias(format!("C{i}"), format!("C{}", i % 6 + 1))
    })
}

/// The minimal layout spec with an alias pointing at nothing.
pub fn spec_with_dangling_alias() -> LayoutSpec {
    spec_minimal().alias("Hash", "Pound")
}

/// The minimal layout spec with two primaries producing the same keystroke.
pub fn spec_with_collision() -> LayoutSpec {
    spec_minimal().alt_gr("AlsoBackslash", "Eszett")
}

/// A JSON rendition of a small table, as an author would write it.
pub const MINIMAL_JSON: &str = r#"{
  "name": "Json Fixture",
  "locale": "de-DE",
  "base": [
    { "symbol": "E", "key": "E", "glyph": "e", "shifted_glyph": "E" },
    { "symbol": "Q", "key": "Q", "glyph": "q", "shifted_glyph": "Q" }
  ],
  "altgr": [
    { "symbol": "Euro", "from": "E", "glyph": "€" },
    { "symbol": "At", "from": "Q", "glyph": "@" }
  ],
  "aliases": [
    { "alias": "Currency", "target": "Euro" }
  ]
}"#;

/// A table whose base entry claims Shift+1 types 'x' while a shifted entry
/// on the same keystroke types '!'.
pub const SHIFTED_GLYPH_CONFLICT_JSON: &str = r#"{
  "name": "Conflicting Glyphs",
  "base": [
    { "symbol": "1", "key": "Digit1", "glyph": "1", "shifted_glyph": "x" }
  ],
  "shifted": [
    { "symbol": "ExclamationMark", "from": "1", "glyph": "!" }
  ]
}"#;
