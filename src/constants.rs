//! Crate-wide constants.
//!
//! Names and limits shared by the built-in layout table and its validation.

/// Display name of the built-in layout.
pub const LAYOUT_NAME: &str = "German QWERTZ T1";

/// Locale tag of the built-in layout.
pub const LAYOUT_LOCALE: &str = "de-DE";

/// Default number of alias hops followed before a chain is rejected.
pub const DEFAULT_MAX_ALIAS_HOPS: usize = 4;

/// Upper bound accepted for `max_alias_hops` in configuration.
pub const MAX_ALIAS_HOPS_LIMIT: usize = 32;
