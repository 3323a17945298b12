//! Layout table validation.
//!
//! Checks the invariants a compiled table must hold before it can be used:
//! unique symbols, resolvable and acyclic aliases, one layer modifier per
//! descriptor, and no two symbols producing the same keystroke.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use crate::models::{Alias, KeyDescriptor, Layer, LayoutEntry};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// Types of specification issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Symbol or alias name is empty
    EmptySymbol,
    /// Symbol defined more than once (as primary or alias)
    DuplicateSymbol,
    /// Alias target does not resolve to a primary entry
    UnresolvedAlias,
    /// Composition source is missing or not on an earlier layer
    UnresolvedSource,
    /// Alias graph contains a cycle
    AliasCycle,
    /// Alias chain exceeds the configured hop limit
    AliasChainTooLong,
    /// Descriptor modifiers don't match the layer, or combine Shift and AltGr
    ModifierConflict,
    /// Two primary symbols produce the same descriptor
    DescriptorCollision,
    /// Character claimed by more than one entry
    DuplicateGlyph,
    /// Shifted glyph given on a non-base entry
    MisplacedGlyph,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySymbol => write!(f, "Empty Symbol"),
            Self::DuplicateSymbol => write!(f, "Duplicate Symbol"),
            Self::UnresolvedAlias => write!(f, "Unresolved Alias"),
            Self::UnresolvedSource => write!(f, "Unresolved Source"),
            Self::AliasCycle => write!(f, "Alias Cycle"),
            Self::AliasChainTooLong => write!(f, "Alias Chain Too Long"),
            Self::ModifierConflict => write!(f, "Modifier Conflict"),
            Self::DescriptorCollision => write!(f, "Descriptor Collision"),
            Self::DuplicateGlyph => write!(f, "Duplicate Glyph"),
            Self::MisplacedGlyph => write!(f, "Misplaced Glyph"),
        }
    }
}

/// A single problem found in the layout table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationIssue {
    /// Type of issue
    pub kind: IssueKind,
    /// Symbol the issue is reported against
    pub symbol: String,
    /// Layer of the offending entry, if it is a primary entry
    pub layer: Option<Layer>,
    /// Human-readable message
    pub message: String,
}

impl SpecificationIssue {
    /// Creates a new issue.
    pub fn new(kind: IssueKind, symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            symbol: symbol.into(),
            layer: None,
            message: message.into(),
        }
    }

    /// Sets the layer context.
    #[must_use]
    pub const fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = Some(layer);
        self
    }
}

impl fmt::Display for SpecificationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(layer) = self.layer {
            write!(f, "[{} '{}'] {}: {}", layer, self.symbol, self.kind, self.message)
        } else {
            write!(f, "['{}'] {}: {}", self.symbol, self.kind, self.message)
        }
    }
}

/// The layout table violates its invariants.
///
/// Carries every issue found, not only the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationError {
    /// All issues found
    pub issues: Vec<SpecificationIssue>,
}

impl SpecificationError {
    /// Wraps a non-empty list of issues.
    #[must_use]
    pub const fn new(issues: Vec<SpecificationIssue>) -> Self {
        Self { issues }
    }

    /// Returns true if any issue has the given kind.
    #[must_use]
    pub fn has_kind(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|issue| issue.kind == kind)
    }

    /// Issues of the given kind.
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &SpecificationIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    /// Formats all issues as a numbered list.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = format!("{} layout specification errors:\n", self.issues.len());
        for (idx, issue) in self.issues.iter().enumerate() {
            message.push_str(&format!("  {}. {}\n", idx + 1, issue));
        }
        message
    }
}

impl fmt::Display for SpecificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.as_slice() {
            [single] => write!(f, "Invalid layout specification: {single}"),
            _ => write!(f, "{}", self.format_message().trim_end()),
        }
    }
}

impl std::error::Error for SpecificationError {}

/// Why an alias chain failed to reach a primary symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChaseFailure {
    /// Chain ended at a name that is neither primary nor alias
    Dangling(String),
    /// Chain revisited a name; members of the cycle in visiting order
    Cycle(Vec<String>),
    /// More hops than allowed
    TooLong,
}

/// Follows alias links from `name` until a primary symbol is reached.
///
/// The walk always runs to its end, so a cycle or dangling link is reported
/// as such even when it lies beyond `max_hops`. `TooLong` is only returned
/// for chains that do reach a primary.
pub(crate) fn chase_alias<'a, P>(
    name: &'a str,
    is_primary: P,
    aliases: &HashMap<&'a str, &'a str>,
    max_hops: usize,
) -> Result<&'a str, ChaseFailure>
where
    P: Fn(&str) -> bool,
{
    let mut current = name;
    let mut visited = vec![name];

    loop {
        if is_primary(current) {
            // `visited` holds the start plus one name per hop
            if visited.len() - 1 > max_hops {
                return Err(ChaseFailure::TooLong);
            }
            return Ok(current);
        }

        let Some(&target) = aliases.get(current) else {
            return Err(ChaseFailure::Dangling(current.to_string()));
        };

        if let Some(start) = visited.iter().position(|seen| *seen == target) {
            return Err(ChaseFailure::Cycle(
                visited[start..].iter().map(ToString::to_string).collect(),
            ));
        }

        visited.push(target);
        current = target;
    }
}

/// Builds the alias-name → target map, keeping the first definition of each alias.
pub(crate) fn alias_map(aliases: &[Alias]) -> HashMap<&str, &str> {
    let mut map = HashMap::new();
    for alias in aliases {
        map.entry(alias.alias.as_str())
            .or_insert_with(|| alias.target.as_str());
    }
    map
}

/// Checks a compiled table against every layout invariant.
pub(crate) fn check(
    entries: &[LayoutEntry],
    aliases: &[Alias],
    max_alias_hops: usize,
) -> Vec<SpecificationIssue> {
    let mut issues = Vec::new();

    check_symbols(entries, aliases, &mut issues);
    check_aliases(entries, aliases, max_alias_hops, &mut issues);
    check_modifiers(entries, &mut issues);
    check_descriptors(entries, &mut issues);
    check_glyphs(entries, &mut issues);

    issues
}

fn check_symbols(entries: &[LayoutEntry], aliases: &[Alias], issues: &mut Vec<SpecificationIssue>) {
    let mut primaries: HashMap<&str, Layer> = HashMap::new();

    for entry in entries {
        if entry.symbol.trim().is_empty() {
            issues.push(
                SpecificationIssue::new(IssueKind::EmptySymbol, "", "Symbol name is empty")
                    .with_layer(entry.layer),
            );
            continue;
        }

        if let Some(first) = primaries.get(entry.symbol.as_str()) {
            issues.push(
                SpecificationIssue::new(
                    IssueKind::DuplicateSymbol,
                    &entry.symbol,
                    format!("Already defined on the {first} layer"),
                )
                .with_layer(entry.layer),
            );
        } else {
            primaries.insert(&entry.symbol, entry.layer);
        }
    }

    let mut seen_aliases = HashSet::new();
    for alias in aliases {
        if alias.alias.trim().is_empty() || alias.target.trim().is_empty() {
            issues.push(SpecificationIssue::new(
                IssueKind::EmptySymbol,
                &alias.alias,
                "Alias name and target must be non-empty",
            ));
            continue;
        }

        if let Some(layer) = primaries.get(alias.alias.as_str()) {
            issues.push(SpecificationIssue::new(
                IssueKind::DuplicateSymbol,
                &alias.alias,
                format!("Alias shadows a primary symbol on the {layer} layer"),
            ));
        } else if !seen_aliases.insert(alias.alias.as_str()) {
            issues.push(SpecificationIssue::new(
                IssueKind::DuplicateSymbol,
                &alias.alias,
                "Alias defined more than once",
            ));
        }
    }
}

fn check_aliases(
    entries: &[LayoutEntry],
    aliases: &[Alias],
    max_alias_hops: usize,
    issues: &mut Vec<SpecificationIssue>,
) {
    let primaries: HashSet<&str> = entries.iter().map(|e| e.symbol.as_str()).collect();
    let map = alias_map(aliases);
    let mut reported_cycles: HashSet<BTreeSet<String>> = HashSet::new();
    let mut checked = HashSet::new();

    for alias in aliases {
        let name = alias.alias.as_str();
        // Shadowing and duplicates are reported by check_symbols
        if primaries.contains(name) || !checked.insert(name) {
            continue;
        }

        match chase_alias(name, |s| primaries.contains(s), &map, max_alias_hops) {
            Ok(_) => {}
            Err(ChaseFailure::Dangling(missing)) => {
                issues.push(SpecificationIssue::new(
                    IssueKind::UnresolvedAlias,
                    name,
                    format!("Target '{missing}' is not defined"),
                ));
            }
            Err(ChaseFailure::Cycle(members)) => {
                let key: BTreeSet<String> = members.iter().cloned().collect();
                if reported_cycles.insert(key) {
                    issues.push(SpecificationIssue::new(
                        IssueKind::AliasCycle,
                        name,
                        format!("Cycle: {} -> {}", members.join(" -> "), members[0]),
                    ));
                }
            }
            Err(ChaseFailure::TooLong) => {
                issues.push(SpecificationIssue::new(
                    IssueKind::AliasChainTooLong,
                    name,
                    format!("Does not resolve within {max_alias_hops} hops"),
                ));
            }
        }
    }
}

fn check_modifiers(entries: &[LayoutEntry], issues: &mut Vec<SpecificationIssue>) {
    for entry in entries {
        let modifiers = entry.descriptor.modifiers;
        if modifiers.is_combination() {
            issues.push(
                SpecificationIssue::new(
                    IssueKind::ModifierConflict,
                    &entry.symbol,
                    format!("Descriptor combines modifiers ({modifiers})"),
                )
                .with_layer(entry.layer),
            );
        } else if !entry.modifiers_match_layer() {
            issues.push(
                SpecificationIssue::new(
                    IssueKind::ModifierConflict,
                    &entry.symbol,
                    format!(
                        "Descriptor holds {} but the layer requires {}",
                        modifiers,
                        entry.layer.modifiers()
                    ),
                )
                .with_layer(entry.layer),
            );
        }
    }
}

fn check_descriptors(entries: &[LayoutEntry], issues: &mut Vec<SpecificationIssue>) {
    let mut owners: HashMap<KeyDescriptor, &str> = HashMap::new();
    for entry in entries {
        if let Some(owner) = owners.get(&entry.descriptor) {
            issues.push(
                SpecificationIssue::new(
                    IssueKind::DescriptorCollision,
                    &entry.symbol,
                    format!("{} is already produced by '{}'", entry.descriptor, owner),
                )
                .with_layer(entry.layer),
            );
        } else {
            owners.insert(entry.descriptor, &entry.symbol);
        }
    }
}

fn check_glyphs(entries: &[LayoutEntry], issues: &mut Vec<SpecificationIssue>) {
    // A base shifted glyph claims the Shift keystroke of its key
    let shifted_keystrokes: HashMap<KeyDescriptor, (&str, char)> = entries
        .iter()
        .filter(|entry| entry.layer == Layer::Base)
        .filter_map(|entry| {
            entry
                .shifted_glyph
                .map(|glyph| (entry.descriptor.shifted(), (entry.symbol.as_str(), glyph)))
        })
        .collect();

    let mut owners: HashMap<char, &str> = HashMap::new();
    for entry in entries {
        if let (Some(glyph), Some((owner, claimed))) =
            (entry.glyph, shifted_keystrokes.get(&entry.descriptor))
        {
            if glyph != *claimed {
                issues.push(
                    SpecificationIssue::new(
                        IssueKind::DescriptorCollision,
                        &entry.symbol,
                        format!(
                            "{} types {glyph:?} but '{owner}' declares it types {claimed:?}",
                            entry.descriptor
                        ),
                    )
                    .with_layer(entry.layer),
                );
            }
        }

        if entry.shifted_glyph.is_some() && entry.layer != Layer::Base {
            issues.push(
                SpecificationIssue::new(
                    IssueKind::MisplacedGlyph,
                    &entry.symbol,
                    "Only base entries may declare a shifted glyph",
                )
                .with_layer(entry.layer),
            );
        }

        for glyph in entry.glyph.iter().chain(entry.shifted_glyph.iter()) {
            if let Some(owner) = owners.get(glyph) {
                issues.push(
                    SpecificationIssue::new(
                        IssueKind::DuplicateGlyph,
                        &entry.symbol,
                        format!("{glyph:?} is already produced by '{owner}'"),
                    )
                    .with_layer(entry.layer),
                );
            } else {
                owners.insert(*glyph, &entry.symbol);
            }
        }
    }
}
