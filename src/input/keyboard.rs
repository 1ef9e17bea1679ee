//! Keyboard event types.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier flags.
    ///
    /// Bit order matches the wire encoding shared by xterm's modified keys
    /// and the kitty keyboard protocol: the transmitted value is `flags + 1`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Alt/Option key.
        const ALT = 0b0000_0010;
        /// Control key.
        const CTRL = 0b0000_0100;
        /// Super/Windows/Command key.
        const SUPER = 0b0000_1000;
        /// Hyper key.
        const HYPER = 0b0001_0000;
        /// Meta key (distinct from Alt under kitty).
        const META = 0b0010_0000;
        /// Caps Lock is active.
        const CAPS_LOCK = 0b0100_0000;
        /// Num Lock is active.
        const NUM_LOCK = 0b1000_0000;
    }
}

impl KeyModifiers {
    /// Decode a 1-based wire modifier value (`1` means no modifiers).
    ///
    /// Returns `None` for values that do not fit in eight flag bits.
    /// Zero is not sent by terminals and is read as "no modifiers".
    #[must_use]
    pub fn from_wire(raw: u32) -> Option<Self> {
        let flags = u8::try_from(raw.saturating_sub(1)).ok()?;
        Some(Self::from_bits_retain(flags))
    }
}

/// A key code representing a logical keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Escape key.
    Escape,
    /// Up arrow key.
    ArrowUp,
    /// Down arrow key.
    ArrowDown,
    /// Left arrow key.
    ArrowLeft,
    /// Right arrow key.
    ArrowRight,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Insert key.
    Insert,
    /// Delete key.
    Delete,
    /// Keypad Begin (keypad 5 without Num Lock).
    KeypadBegin,
    /// Menu key.
    Menu,
    /// Caps Lock key.
    CapsLock,
    /// Scroll Lock key.
    ScrollLock,
    /// Num Lock key.
    NumLock,
    /// Print Screen key.
    PrintScreen,
    /// Pause key.
    Pause,
    /// Function key, F1 through F35.
    F(u8),
    /// Any other Unicode scalar, including printable characters.
    Char(char),
}

// Kitty functional-key code points (private use area).
const KITTY_CAPS_LOCK: u32 = 57358;
const KITTY_SCROLL_LOCK: u32 = 57359;
const KITTY_NUM_LOCK: u32 = 57360;
const KITTY_PRINT_SCREEN: u32 = 57361;
const KITTY_PAUSE: u32 = 57362;
const KITTY_MENU: u32 = 57363;
const KITTY_F13: u32 = 57376;
const KITTY_F35: u32 = 57398;
pub(crate) const KITTY_KEYPAD_BEGIN: u32 = 57427;

impl KeyCode {
    /// Map a kitty key code point to a key.
    ///
    /// Named keys with a kitty code point get their own variant; every other
    /// valid scalar becomes [`KeyCode::Char`]. Surrogates and out-of-range
    /// values yield `None`.
    #[must_use]
    pub fn from_codepoint(cp: u32) -> Option<Self> {
        let code = match cp {
            9 => Self::Tab,
            13 => Self::Enter,
            27 => Self::Escape,
            127 => Self::Backspace,
            KITTY_CAPS_LOCK => Self::CapsLock,
            KITTY_SCROLL_LOCK => Self::ScrollLock,
            KITTY_NUM_LOCK => Self::NumLock,
            KITTY_PRINT_SCREEN => Self::PrintScreen,
            KITTY_PAUSE => Self::Pause,
            KITTY_MENU => Self::Menu,
            KITTY_F13..=KITTY_F35 => Self::F((cp - KITTY_F13) as u8 + 13),
            KITTY_KEYPAD_BEGIN => Self::KeypadBegin,
            _ => Self::Char(char::from_u32(cp)?),
        };
        Some(code)
    }

    /// The unshifted key on a US/ANSI layout that produces this code.
    ///
    /// `A` and `a` share the physical key `a`; `!` sits on `1`. Named keys
    /// and characters outside the US layout are their own physical key.
    #[must_use]
    pub fn physical(self) -> Self {
        match self {
            Self::Char(c) => Self::Char(unshifted(c)),
            other => other,
        }
    }

    /// Check if this is a function key.
    #[must_use]
    pub fn is_function_key(&self) -> bool {
        matches!(self, Self::F(_))
    }

    /// Check if this is a character key.
    #[must_use]
    pub fn is_char(&self) -> bool {
        matches!(self, Self::Char(_))
    }

    /// Check if this is a navigation key (arrows, home, end, page up/down).
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::ArrowLeft
                | Self::ArrowRight
                | Self::ArrowUp
                | Self::ArrowDown
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }

    /// Get the character if this is a character key.
    #[must_use]
    pub fn char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }
}

/// US/ANSI shifted symbols paired with the key that produces them unshifted.
const US_SHIFT_PAIRS: [(char, char); 21] = [
    ('!', '1'),
    ('@', '2'),
    ('#', '3'),
    ('$', '4'),
    ('%', '5'),
    ('^', '6'),
    ('&', '7'),
    ('*', '8'),
    ('(', '9'),
    (')', '0'),
    ('_', '-'),
    ('+', '='),
    ('{', '['),
    ('}', ']'),
    ('|', '\\'),
    (':', ';'),
    ('"', '\''),
    ('<', ','),
    ('>', '.'),
    ('?', '/'),
    ('~', '`'),
];

/// Whether `c` needs Shift on a US/ANSI layout.
pub(crate) fn is_shifted(c: char) -> bool {
    c.is_ascii_uppercase() || US_SHIFT_PAIRS.iter().any(|&(shifted, _)| shifted == c)
}

fn unshifted(c: char) -> char {
    if c.is_ascii_uppercase() {
        return c.to_ascii_lowercase();
    }
    US_SHIFT_PAIRS
        .iter()
        .find(|&&(shifted, _)| shifted == c)
        .map_or(c, |&(_, base)| base)
}

/// A keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The logical key, as typed.
    pub code: KeyCode,
    /// The unshifted US/ANSI key, for layout-independent bindings.
    pub physical_key: KeyCode,
    /// Modifier keys held.
    pub mods: KeyModifiers,
}

impl KeyEvent {
    /// Create a new key event; the physical key is derived from `code`.
    #[must_use]
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self {
            code,
            physical_key: code.physical(),
            mods,
        }
    }

    /// Create a key event with no modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Create a character key event with no modifiers.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// Return a copy with additional modifiers set.
    #[must_use]
    pub fn with_mods(mut self, mods: KeyModifiers) -> Self {
        self.mods |= mods;
        self
    }

    /// Check if Shift is held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.mods.contains(KeyModifiers::SHIFT)
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.mods.contains(KeyModifiers::CTRL)
    }

    /// Check if Alt is held.
    #[must_use]
    pub fn alt(&self) -> bool {
        self.mods.contains(KeyModifiers::ALT)
    }

    /// Check if this matches a specific key with exactly these modifiers.
    #[must_use]
    pub fn matches(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.code == code && self.mods == mods
    }

    /// Check if this is Ctrl+C.
    #[must_use]
    pub fn is_ctrl_c(&self) -> bool {
        self.matches(KeyCode::Char('c'), KeyModifiers::CTRL)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::key(code)
    }
}
