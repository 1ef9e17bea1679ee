//! Mouse event payload.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys reported alongside a mouse event.
    ///
    /// Mouse reporting only carries Shift, Alt and Ctrl; the bit positions
    /// follow [`KeyModifiers`](crate::input::KeyModifiers) so the two can be
    /// compared after conversion.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseModifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Alt/Meta key.
        const ALT = 0b0000_0010;
        /// Control key.
        const CTRL = 0b0000_0100;
    }
}

impl From<MouseModifiers> for crate::input::KeyModifiers {
    fn from(mods: MouseModifiers) -> Self {
        Self::from_bits_truncate(mods.bits())
    }
}

/// Position and modifiers of a mouse event.
///
/// Which button and action happened is carried by the
/// [`Event`](crate::input::Event) variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    /// Modifier keys held.
    pub mods: MouseModifiers,
    /// Column, 1-based, as reported by the terminal.
    pub x: u16,
    /// Row, 1-based, as reported by the terminal.
    pub y: u16,
}

impl MouseEvent {
    /// Create a mouse event with no modifiers.
    #[must_use]
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            mods: MouseModifiers::empty(),
            x,
            y,
        }
    }

    /// Set modifier keys.
    #[must_use]
    pub fn with_mods(mut self, mods: MouseModifiers) -> Self {
        self.mods = mods;
        self
    }
}
