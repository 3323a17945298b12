//! Physical keys, modifier flags and the descriptors built from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical key position, named after the reference (US) key at that position.
///
/// The layout model treats these as opaque tokens. Translating a position into a
/// HID usage code is the job of the host's [`UsageTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PhysicalKey {
    /// Reference key A
    A,
    /// Reference key B
    B,
    /// Reference key C
    C,
    /// Reference key D
    D,
    /// Reference key E
    E,
    /// Reference key F
    F,
    /// Reference key G
    G,
    /// Reference key H
    H,
    /// Reference key I
    I,
    /// Reference key J
    J,
    /// Reference key K
    K,
    /// Reference key L
    L,
    /// Reference key M
    M,
    /// Reference key N
    N,
    /// Reference key O
    O,
    /// Reference key P
    P,
    /// Reference key Q
    Q,
    /// Reference key R
    R,
    /// Reference key S
    S,
    /// Reference key T
    T,
    /// Reference key U
    U,
    /// Reference key V
    V,
    /// Reference key W
    W,
    /// Reference key X
    X,
    /// Reference key Y
    Y,
    /// Reference key Z
    Z,
    /// Reference key 1
    Digit1,
    /// Reference key 2
    Digit2,
    /// Reference key 3
    Digit3,
    /// Reference key 4
    Digit4,
    /// Reference key 5
    Digit5,
    /// Reference key 6
    Digit6,
    /// Reference key 7
    Digit7,
    /// Reference key 8
    Digit8,
    /// Reference key 9
    Digit9,
    /// Reference key 0
    Digit0,
    /// Minus and underscore
    Minus,
    /// Equals and plus
    Equal,
    /// Left bracket and left curly brace
    LeftBracket,
    /// Right bracket and right curly brace
    RightBracket,
    /// Backslash and pipe
    Backslash,
    /// ISO key between left shift and Z
    NonUsBackslash,
    /// Semicolon and colon
    Semicolon,
    /// Quote and double quote
    Quote,
    /// Grave accent and tilde
    Grave,
    /// Comma and less-than
    Comma,
    /// Period and greater-than
    Period,
    /// Slash and question mark
    Slash,
}

impl PhysicalKey {
    /// Letter keys in alphabetical order of their reference names.
    pub const LETTERS: [Self; 26] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::I,
        Self::J,
        Self::K,
        Self::L,
        Self::M,
        Self::N,
        Self::O,
        Self::P,
        Self::Q,
        Self::R,
        Self::S,
        Self::T,
        Self::U,
        Self::V,
        Self::W,
        Self::X,
        Self::Y,
        Self::Z,
    ];

    /// Digit keys indexed by their digit value (`DIGITS[0]` is the 0 key).
    pub const DIGITS: [Self; 10] = [
        Self::Digit0,
        Self::Digit1,
        Self::Digit2,
        Self::Digit3,
        Self::Digit4,
        Self::Digit5,
        Self::Digit6,
        Self::Digit7,
        Self::Digit8,
        Self::Digit9,
    ];

    /// Returns the reference key carrying the given letter (case-insensitive).
    #[must_use]
    pub fn letter(letter: char) -> Option<Self> {
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        let idx = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
        Self::LETTERS.get(idx).copied()
    }

    /// Returns the reference key carrying the given digit.
    #[must_use]
    pub fn digit(digit: u8) -> Option<Self> {
        Self::DIGITS.get(digit as usize).copied()
    }
}

impl fmt::Display for PhysicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

bitflags::bitflags! {
    /// Modifier keys held while pressing a physical key.
    ///
    /// A valid descriptor holds at most one of these.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ModifierFlags: u8 {
        /// Left shift
        const SHIFT = 1 << 0;
        /// AltGr (right alt)
        const ALTGR = 1 << 1;
    }
}

impl ModifierFlags {
    /// HID boot-protocol modifier bit for left shift.
    pub const HID_LEFT_SHIFT: u8 = 0x02;
    /// HID boot-protocol modifier bit for right alt.
    pub const HID_RIGHT_ALT: u8 = 0x40;

    /// Returns true if more than one layer modifier is held.
    #[must_use]
    pub const fn is_combination(self) -> bool {
        self.bits().count_ones() > 1
    }

    /// Converts to the modifier byte of a HID keyboard report.
    #[must_use]
    pub const fn hid_modifier_byte(self) -> u8 {
        let mut byte = 0;
        if self.contains(Self::SHIFT) {
            byte |= Self::HID_LEFT_SHIFT;
        }
        if self.contains(Self::ALTGR) {
            byte |= Self::HID_RIGHT_ALT;
        }
        byte
    }
}

impl fmt::Display for ModifierFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.contains(Self::SHIFT), self.contains(Self::ALTGR)) {
            (false, false) => write!(f, "none"),
            (true, false) => write!(f, "Shift"),
            (false, true) => write!(f, "AltGr"),
            (true, true) => write!(f, "Shift+AltGr"),
        }
    }
}

/// "Press this physical key while holding these modifiers."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyDescriptor {
    /// Physical key to press
    pub key: PhysicalKey,
    /// Modifiers to hold
    pub modifiers: ModifierFlags,
}

impl KeyDescriptor {
    /// Creates an unmodified descriptor for a physical key.
    #[must_use]
    pub const fn plain(key: PhysicalKey) -> Self {
        Self {
            key,
            modifiers: ModifierFlags::empty(),
        }
    }

    /// Adds modifiers to this descriptor.
    #[must_use]
    pub const fn with(self, modifiers: ModifierFlags) -> Self {
        Self {
            key: self.key,
            modifiers: self.modifiers.union(modifiers),
        }
    }

    /// Same key with Shift held.
    #[must_use]
    pub const fn shifted(self) -> Self {
        self.with(ModifierFlags::SHIFT)
    }

    /// Same key with AltGr held.
    #[must_use]
    pub const fn alt_gr(self) -> Self {
        self.with(ModifierFlags::ALTGR)
    }

    /// Translates this descriptor into a HID keystroke using the host's usage table.
    ///
    /// Returns `None` if the table has no usage code for the physical key.
    pub fn to_usage<T: UsageTable + ?Sized>(&self, table: &T) -> Option<HidKeystroke> {
        let usage = table.usage(self.key)?;
        Some(HidKeystroke {
            usage,
            modifiers: self.modifiers.hid_modifier_byte(),
        })
    }
}

impl From<PhysicalKey> for KeyDescriptor {
    fn from(key: PhysicalKey) -> Self {
        Self::plain(key)
    }
}

impl fmt::Display for KeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

/// A key usage plus modifier byte, ready for a HID keyboard report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HidKeystroke {
    /// HID usage code of the key
    pub usage: u16,
    /// HID modifier byte
    pub modifiers: u8,
}

/// Maps physical key positions to HID usage codes.
///
/// Supplied by the host firmware's device-layout layer.
pub trait UsageTable {
    /// Returns the HID usage code for a physical key, if the device has one.
    fn usage(&self, key: PhysicalKey) -> Option<u16>;
}

impl<F> UsageTable for F
where
    F: Fn(PhysicalKey) -> Option<u16>,
{
    fn usage(&self, key: PhysicalKey) -> Option<u16> {
        self(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_lookup() {
        assert_eq!(PhysicalKey::letter('a'), Some(PhysicalKey::A));
        assert_eq!(PhysicalKey::letter('Z'), Some(PhysicalKey::Z));
        assert_eq!(PhysicalKey::letter('ß'), None);
        assert_eq!(PhysicalKey::letter('1'), None);
    }

    #[test]
    fn test_digit_lookup() {
        assert_eq!(PhysicalKey::digit(0), Some(PhysicalKey::Digit0));
        assert_eq!(PhysicalKey::digit(7), Some(PhysicalKey::Digit7));
        assert_eq!(PhysicalKey::digit(10), None);
    }

    #[test]
    fn test_composition_helpers() {
        let base = KeyDescriptor::plain(PhysicalKey::Minus);
        assert!(base.modifiers.is_empty());
        assert_eq!(base.shifted().modifiers, ModifierFlags::SHIFT);
        assert_eq!(base.alt_gr().modifiers, ModifierFlags::ALTGR);
        assert_eq!(base.shifted().key, PhysicalKey::Minus);

        // Shifting twice is idempotent
        assert_eq!(base.shifted().shifted(), base.shifted());
    }

    #[test]
    fn test_modifier_combination() {
        assert!(!ModifierFlags::empty().is_combination());
        assert!(!ModifierFlags::SHIFT.is_combination());
        assert!((ModifierFlags::SHIFT | ModifierFlags::ALTGR).is_combination());
    }

    #[test]
    fn test_hid_modifier_byte() {
        assert_eq!(ModifierFlags::empty().hid_modifier_byte(), 0);
        assert_eq!(ModifierFlags::SHIFT.hid_modifier_byte(), 0x02);
        assert_eq!(ModifierFlags::ALTGR.hid_modifier_byte(), 0x40);
    }

    #[test]
    fn test_to_usage_with_closure_table() {
        let table = |key: PhysicalKey| -> Option<u16> {
            match key {
                PhysicalKey::E => Some(0x08),
                _ => None,
            }
        };

        let euro = KeyDescriptor::plain(PhysicalKey::E).alt_gr();
        assert_eq!(
            euro.to_usage(&table),
            Some(HidKeystroke {
                usage: 0x08,
                modifiers: 0x40
            })
        );
        assert_eq!(KeyDescriptor::plain(PhysicalKey::Q).to_usage(&table), None);
    }

    #[test]
    fn test_display() {
        let desc = KeyDescriptor::plain(PhysicalKey::Digit2).shifted();
        assert_eq!(desc.to_string(), "Shift+Digit2");
        assert_eq!(KeyDescriptor::plain(PhysicalKey::A).to_string(), "A");
    }
}
