//! German QWERTZ T1 Layout Library
//!
//! This library provides a validated, read-only translation from named
//! logical symbols (letters, digits, punctuation, Shift and AltGr glyphs) to
//! physical keys plus modifier state, for keyboard firmware that emits HID
//! reports.
//!
//! ```
//! use qwertz_t1::keymap::LayoutModel;
//! use qwertz_t1::models::Layer;
//!
//! let layout = LayoutModel::load().unwrap();
//! assert_eq!(layout.layer_of("Euro").unwrap(), Layer::AltGr);
//! ```

// Module declarations
pub mod config;
pub mod constants;
pub mod error;
pub mod keymap;
pub mod models;

pub use config::LayoutConfig;
pub use error::LayoutError;
pub use keymap::validator::{IssueKind, SpecificationError, SpecificationIssue};
pub use keymap::LayoutModel;
pub use models::{KeyDescriptor, Layer, ModifierFlags, PhysicalKey};
