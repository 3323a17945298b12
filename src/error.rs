//! Errors returned by layout lookups.

use crate::keymap::validator::SpecificationError;
use std::fmt;

/// Error from querying or building a layout model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Symbol is neither a primary entry nor an alias
    UnknownSymbol {
        /// Requested symbol name
        symbol: String,
    },
    /// Character has no keystroke in this layout
    UnmappedGlyph {
        /// Requested character
        glyph: char,
        /// Character index within the encoded text
        index: usize,
    },
    /// Layout table failed validation
    Specification(SpecificationError),
}

impl LayoutError {
    /// Creates an `UnknownSymbol` error.
    pub fn unknown_symbol(symbol: impl Into<String>) -> Self {
        Self::UnknownSymbol {
            symbol: symbol.into(),
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSymbol { symbol } => write!(f, "Unknown symbol: '{symbol}'"),
            Self::UnmappedGlyph { glyph, index } => {
                write!(f, "No keystroke for character {glyph:?} at position {index}")
            }
            Self::Specification(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Specification(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SpecificationError> for LayoutError {
    fn from(err: SpecificationError) -> Self {
        Self::Specification(err)
    }
}
