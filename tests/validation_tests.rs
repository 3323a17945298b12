//! Integration tests for layout table validation and construction.

mod fixtures;

use fixtures::*;
use qwertz_t1::models::{KeyDescriptor, Layer, LayoutSpec, PhysicalKey};
use qwertz_t1::{IssueKind, LayoutConfig, LayoutModel};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_minimal_spec_builds() {
    let spec = spec_minimal();
    assert!(spec.validate(&LayoutConfig::default()).is_ok());

    let layout = LayoutModel::from_spec(&spec, LayoutConfig::default()).unwrap();
    assert_eq!(layout.entry_count(), 7);
    assert_eq!(layout.lookup("Quotes").unwrap(), layout.lookup("DoubleQuote").unwrap());
    assert_eq!(
        layout.lookup("Tilde").unwrap(),
        KeyDescriptor::plain(PhysicalKey::RightBracket).alt_gr()
    );
    assert!(layout.validate().is_ok());
}

#[test]
fn test_duplicate_primary_fails() {
    let spec = spec_with_duplicate_primary();

    let err = spec.validate(&LayoutConfig::default()).unwrap_err();
    assert!(err.has_kind(IssueKind::DuplicateSymbol));

    let issue = err.issues_of(IssueKind::DuplicateSymbol).next().unwrap();
    assert_eq!(issue.symbol, "Plus");
    assert_eq!(issue.layer, Some(Layer::Shifted));

    assert!(LayoutModel::from_spec(&spec, LayoutConfig::default()).is_err());
}

#[test]
fn test_alias_cycle_fails() {
    let spec = spec_with_alias_cycle();

    let err = LayoutModel::from_spec(&spec, LayoutConfig::default()).unwrap_err();
    assert!(err.has_kind(IssueKind::AliasCycle));
    // The cycle is reported once, not per member
    assert_eq!(err.issues_of(IssueKind::AliasCycle).count(), 1);
    assert!(err.to_string().contains("Rock -> Paper -> Scissors -> Rock"));
}

#[test]
fn test_alias_cycle_longer_than_hop_limit_is_a_cycle() {
    let err = spec_with_long_alias_cycle()
        .validate(&LayoutConfig::default())
        .unwrap_err();

    assert_eq!(err.issues_of(IssueKind::AliasCycle).count(), 1);
    assert!(!err.has_kind(IssueKind::AliasChainTooLong));
    assert!(err.to_string().contains("C1 -> C2 -> C3 -> C4 -> C5 -> C6 -> C1"));
}

#[test]
fn test_shifted_glyph_conflicting_with_shifted_entry_fails() {
    let spec = LayoutSpec::from_json_str(SHIFTED_GLYPH_CONFLICT_JSON).unwrap();
    let err = spec.validate(&LayoutConfig::default()).unwrap_err();

    let issue = err.issues_of(IssueKind::DescriptorCollision).next().unwrap();
    assert_eq!(issue.symbol, "ExclamationMark");
    assert_eq!(issue.layer, Some(Layer::Shifted));
    assert!(issue.message.contains("'1'"));
}

#[test]
fn test_dangling_alias_fails() {
    let err = spec_with_dangling_alias()
        .validate(&LayoutConfig::default())
        .unwrap_err();
    assert!(err.has_kind(IssueKind::UnresolvedAlias));
    assert!(err.to_string().contains("'Pound' is not defined"));
}

#[test]
fn test_descriptor_collision_fails() {
    let err = spec_with_collision()
        .validate(&LayoutConfig::default())
        .unwrap_err();
    let issue = err.issues_of(IssueKind::DescriptorCollision).next().unwrap();
    assert_eq!(issue.symbol, "AlsoBackslash");
    assert!(issue.message.contains("Backslash"));
}

#[test]
fn test_all_issues_are_reported_together() {
    let spec = spec_with_alias_cycle()
        .shifted("Plus", "Two")
        .alias("Hash", "Pound");

    let err = spec.validate(&LayoutConfig::default()).unwrap_err();
    assert!(err.has_kind(IssueKind::AliasCycle));
    assert!(err.has_kind(IssueKind::DuplicateSymbol));
    assert!(err.has_kind(IssueKind::UnresolvedAlias));
    assert!(err.format_message().starts_with(&format!(
        "{} layout specification errors",
        err.issues.len()
    )));
}

#[test]
fn test_alias_hop_limit_is_configurable() {
    let spec = spec_minimal();

    // "Quotes" -> "Quote" -> "DoubleQuote" needs two hops
    let strict = LayoutConfig::new().with_max_alias_hops(1);
    let err = spec.validate(&strict).unwrap_err();
    assert!(err.has_kind(IssueKind::AliasChainTooLong));

    let relaxed = LayoutConfig::new().with_max_alias_hops(2);
    assert!(spec.validate(&relaxed).is_ok());
}

#[test]
fn test_unresolved_composition_source_fails() {
    let spec = spec_minimal().alt_gr("Micro", "M");
    let err = spec.validate(&LayoutConfig::default()).unwrap_err();
    let issue = err.issues_of(IssueKind::UnresolvedSource).next().unwrap();
    assert_eq!(issue.symbol, "Micro");
    assert_eq!(issue.layer, Some(Layer::AltGr));
}

#[test]
fn test_model_from_json() {
    let layout = LayoutModel::from_json_str(MINIMAL_JSON, LayoutConfig::default()).unwrap();
    assert_eq!(layout.name(), "Json Fixture");
    assert_eq!(layout.lookup("Currency").unwrap(), layout.lookup("Euro").unwrap());
    assert_eq!(layout.lookup_glyph('@'), Some(KeyDescriptor::plain(PhysicalKey::Q).alt_gr()));
    assert_eq!(layout.lookup_glyph('E'), Some(KeyDescriptor::plain(PhysicalKey::E).shifted()));
}

#[test]
fn test_malformed_json_is_rejected() {
    assert!(LayoutModel::from_json_str("{ \"name\": ", LayoutConfig::default()).is_err());
    assert!(LayoutSpec::from_json_str("[]").is_err());
}

#[test]
fn test_embedded_layout_with_config_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("layout.toml");
    fs::write(&path, "[validation]\nmax_alias_hops = 1\n").unwrap();

    let config = LayoutConfig::load(&path).unwrap();
    // Every embedded alias is a single hop
    let layout = LayoutModel::load_with_config(config).unwrap();
    assert_eq!(layout.config().validation.max_alias_hops, 1);
    assert_eq!(layout.lookup("Hash").unwrap(), layout.lookup("Pound").unwrap());
}
