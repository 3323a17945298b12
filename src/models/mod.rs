//! Data models for physical keys, layers and the authored layout table.
//!
//! Models are independent of compilation and validation logic, which lives in
//! the `keymap` module.

pub mod key;
pub mod layer;
pub mod spec;

// Re-export all model types
pub use key::{HidKeystroke, KeyDescriptor, ModifierFlags, PhysicalKey, UsageTable};
pub use layer::{Alias, Layer, LayoutEntry};
pub use spec::{BaseEntrySpec, ComposedEntrySpec, LayoutSpec};
