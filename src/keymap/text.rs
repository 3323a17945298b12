//! Character-level access to the layout.
//!
//! Turns locale-aware text into the keystrokes that reproduce it. Dead keys
//! (circumflex, acute, grave) carry no glyph, so their characters can't be
//! typed directly.

use super::LayoutModel;
use crate::error::LayoutError;
use crate::models::{HidKeystroke, KeyDescriptor, UsageTable};

impl LayoutModel {
    /// Returns the keystroke producing a character, if the layout has one.
    #[must_use]
    pub fn lookup_glyph(&self, glyph: char) -> Option<KeyDescriptor> {
        self.glyphs.get(&glyph).copied()
    }

    /// Encodes text as a sequence of keystrokes, one per character.
    ///
    /// # Examples
    ///
    /// ```
    /// use qwertz_t1::keymap::LayoutModel;
    ///
    /// let layout = LayoutModel::load().unwrap();
    /// let keys = layout.encode_text("Größe?").unwrap();
    /// assert_eq!(keys.len(), 6);
    /// assert!(layout.encode_text("^").is_err());
    /// ```
    pub fn encode_text(&self, text: &str) -> Result<Vec<KeyDescriptor>, LayoutError> {
        text.chars()
            .enumerate()
            .map(|(index, glyph)| {
                self.lookup_glyph(glyph)
                    .ok_or(LayoutError::UnmappedGlyph { glyph, index })
            })
            .collect()
    }

    /// Encodes text straight into HID keystrokes using the host's usage table.
    ///
    /// Characters whose physical key has no usage code are reported as unmapped.
    pub fn encode_text_hid<T: UsageTable + ?Sized>(
        &self,
        text: &str,
        table: &T,
    ) -> Result<Vec<HidKeystroke>, LayoutError> {
        text.chars()
            .enumerate()
            .map(|(index, glyph)| {
                self.lookup_glyph(glyph)
                    .and_then(|descriptor| descriptor.to_usage(table))
                    .ok_or(LayoutError::UnmappedGlyph { glyph, index })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::LayoutError;
    use crate::keymap::LayoutModel;
    use crate::models::{KeyDescriptor, PhysicalKey};

    fn get_test_layout() -> LayoutModel {
        LayoutModel::load().expect("Failed to load embedded layout")
    }

    #[test]
    fn test_lookup_glyph_letters() {
        let layout = get_test_layout();
        assert_eq!(layout.lookup_glyph('z'), Some(KeyDescriptor::plain(PhysicalKey::Y)));
        assert_eq!(
            layout.lookup_glyph('Y'),
            Some(KeyDescriptor::plain(PhysicalKey::Z).shifted())
        );
        assert_eq!(
            layout.lookup_glyph('Ä'),
            Some(KeyDescriptor::plain(PhysicalKey::Quote).shifted())
        );
    }

    #[test]
    fn test_lookup_glyph_symbols() {
        let layout = get_test_layout();
        assert_eq!(layout.lookup_glyph('€'), Some(layout.lookup("Euro").unwrap()));
        assert_eq!(layout.lookup_glyph('#'), Some(layout.lookup("Hash").unwrap()));
        assert_eq!(layout.lookup_glyph('µ'), Some(layout.lookup("Micro").unwrap()));
        assert_eq!(layout.lookup_glyph('^'), None);
        assert_eq!(layout.lookup_glyph(' '), None);
    }

    #[test]
    fn test_encode_text() {
        let layout = get_test_layout();
        let keys = layout.encode_text("Zoë").unwrap_err();
        assert_eq!(keys, LayoutError::UnmappedGlyph { glyph: 'ë', index: 2 });

        let keys = layout.encode_text("Zß@").unwrap();
        assert_eq!(
            keys,
            vec![
                KeyDescriptor::plain(PhysicalKey::Y).shifted(),
                KeyDescriptor::plain(PhysicalKey::Minus),
                KeyDescriptor::plain(PhysicalKey::Q).alt_gr(),
            ]
        );
    }

    #[test]
    fn test_encode_empty_text() {
        assert!(get_test_layout().encode_text("").unwrap().is_empty());
    }

    #[test]
    fn test_encode_text_hid() {
        let layout = get_test_layout();
        // Standard HID usages for the keys used below
        let table = |key: PhysicalKey| -> Option<u16> {
            match key {
                PhysicalKey::Y => Some(0x1C),
                PhysicalKey::Digit2 => Some(0x1F),
                _ => None,
            }
        };

        let strokes = layout.encode_text_hid("z\"", &table).unwrap();
        assert_eq!(strokes[0].usage, 0x1C);
        assert_eq!(strokes[0].modifiers, 0);
        assert_eq!(strokes[1].usage, 0x1F);
        assert_eq!(strokes[1].modifiers, 0x02);

        let err = layout.encode_text_hid("za", &table).unwrap_err();
        assert_eq!(err, LayoutError::UnmappedGlyph { glyph: 'a', index: 1 });
    }
}
