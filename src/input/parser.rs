//! Escape-sequence decoder for terminal input.
//!
//! Classifies the start of a byte run into exactly one [`Event`] and reports
//! how many bytes it occupied. Supports:
//! - Plain bytes, control codes and `ESC <byte>` Alt combinations
//! - SS3 keys (`ESC O <letter>`)
//! - Legacy and modified CSI cursor/function keys (`ESC [ 1 ; <mod> A`)
//! - Numbered CSI keys (`ESC [ <n> ; <mod> ~`)
//! - Kitty keyboard protocol (`ESC [ <code> ; <mod>:<type> u`)
//! - Legacy X10 and SGR (1006) mouse reporting
//!
//! The decoder is stateless. A result of `(Event::None, 0)` means the input
//! is a truncated prefix and the caller should wait for more bytes; any other
//! result consumes at least one byte, even when the sequence is not mapped.

// Decoder tables have many arms mapping to the same result
#![allow(clippy::match_same_arms)]

use crate::input::event::Event;
use crate::input::keyboard::{KITTY_KEYPAD_BEGIN, KeyCode, KeyEvent, KeyModifiers, is_shifted};
use crate::input::mouse::{MouseEvent, MouseModifiers};

/// A decoded event and the number of bytes it consumed.
pub type Decoded = (Event, usize);

const ESC: u8 = 0x1b;

/// Wait for more bytes.
const INCOMPLETE: Decoded = (Event::None, 0);

/// Decode the earliest sequence in `input`.
///
/// Returns `(Event::None, 0)` when `input` is empty or holds only the prefix
/// of a sequence whose end cannot be determined yet. A lone `ESC` is such a
/// prefix; see [`decode_timed_out`] for resolving it once no more bytes are
/// coming.
#[must_use]
pub fn decode(input: &[u8]) -> Decoded {
    let Some(&first) = input.first() else {
        return INCOMPLETE;
    };

    if first != ESC {
        return (plain_event(first), 1);
    }

    match input.get(1) {
        None => INCOMPLETE,
        Some(b'O') => decode_ss3(input),
        Some(b'[') => decode_csi(input),
        Some(&second) => (with_alt(plain_event(second)), 2),
    }
}

/// Decode `input` knowing that no further bytes will arrive for it.
///
/// Behaves like [`decode`], except that the escape prefixes `decode` has to
/// wait on are resolved as keys: a lone `ESC` becomes Escape, and `ESC O` or
/// `ESC [` become Alt+O and Alt+[. Longer incomplete sequences still return
/// `(Event::None, 0)`.
#[must_use]
pub fn decode_timed_out(input: &[u8]) -> Decoded {
    let decoded = decode(input);
    if decoded.1 > 0 {
        return decoded;
    }
    match *input {
        [ESC] => (plain_event(ESC), 1),
        [ESC, second] => (with_alt(plain_event(second)), 2),
        _ => INCOMPLETE,
    }
}

/// Decode a single byte outside any escape sequence.
///
/// Printable ASCII maps to itself, with Shift set for characters that need
/// it on a US layout. Control codes map back to the Ctrl combination that
/// produces them. Bytes above `0x7e` other than DEL have no mapping.
#[must_use]
pub fn decode_byte(byte: u8) -> Option<KeyEvent> {
    let event = match byte {
        0x00 => KeyEvent::new(KeyCode::Char('@'), KeyModifiers::CTRL),
        0x09 => KeyEvent::key(KeyCode::Tab),
        0x0d => KeyEvent::key(KeyCode::Enter),
        // Line feed is reported as Ctrl+J rather than Enter.
        0x0a => KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CTRL),
        0x01..=0x1a => KeyEvent::new(
            KeyCode::Char(char::from(byte - 1 + b'a')),
            KeyModifiers::CTRL,
        ),
        ESC => KeyEvent::key(KeyCode::Escape),
        0x1c..=0x1f => KeyEvent::new(KeyCode::Char(char::from(byte + 0x18)), KeyModifiers::CTRL),
        0x20..=0x7e => {
            let c = char::from(byte);
            let mods = if is_shifted(c) {
                KeyModifiers::SHIFT
            } else {
                KeyModifiers::empty()
            };
            KeyEvent::new(KeyCode::Char(c), mods)
        }
        0x7f => KeyEvent::key(KeyCode::Backspace),
        _ => return None,
    };
    Some(event)
}

fn plain_event(byte: u8) -> Event {
    decode_byte(byte).map_or(Event::None, Event::KeyPressed)
}

fn with_alt(event: Event) -> Event {
    match event {
        Event::KeyPressed(key) => Event::KeyPressed(key.with_mods(KeyModifiers::ALT)),
        other => other,
    }
}

/// SS3 sequences (`ESC O <letter>`), always three bytes.
fn decode_ss3(input: &[u8]) -> Decoded {
    let Some(&letter) = input.get(2) else {
        return INCOMPLETE;
    };

    let code = match letter {
        b'A' => KeyCode::ArrowUp,
        b'B' => KeyCode::ArrowDown,
        b'C' => KeyCode::ArrowRight,
        b'D' => KeyCode::ArrowLeft,
        b'E' => KeyCode::KeypadBegin,
        b'F' => KeyCode::End,
        b'H' => KeyCode::Home,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        _ => return (Event::None, 3),
    };

    (Event::KeyPressed(KeyEvent::key(code)), 3)
}

/// CSI sequences (`ESC [ ...`).
fn decode_csi(input: &[u8]) -> Decoded {
    // The terminator is the first byte at or above 0x40.
    let Some(offset) = input[2..].iter().position(|&b| b >= 0x40) else {
        return INCOMPLETE;
    };
    let end = 2 + offset;
    let consumed = end + 1;
    let params = &input[2..end];

    let event = match input[end] {
        b'M' | b'm' => return decode_mouse(input, end),
        letter @ (b'A' | b'B' | b'C' | b'D' | b'E' | b'F' | b'H' | b'P' | b'Q' | b'S') => {
            letter_key(params, letter)
        }
        b'~' => tilde_key(params),
        b'u' => kitty_key(params),
        // Device status, capability and window reports: swallowed.
        b'c' | b'n' | b'q' | b't' | b'y' => None,
        _ => None,
    };

    (event.unwrap_or(Event::None), consumed)
}

/// Press/repeat/release, from the `:<type>` sub-field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyAction {
    Press,
    Repeat,
    Release,
}

impl KeyAction {
    fn from_wire(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Press),
            2 => Some(Self::Repeat),
            3 => Some(Self::Release),
            _ => None,
        }
    }

    fn event(self, key: KeyEvent) -> Event {
        match self {
            Self::Press => Event::KeyPressed(key),
            Self::Repeat => Event::KeyRepeat(key),
            Self::Release => Event::KeyReleased(key),
        }
    }
}

/// `ESC [ <letter>` and `ESC [ 1 ; <mod>[:<type>] <letter>`.
fn letter_key(params: &[u8], letter: u8) -> Option<Event> {
    let code = match letter {
        b'A' => KeyCode::ArrowUp,
        b'B' => KeyCode::ArrowDown,
        b'C' => KeyCode::ArrowRight,
        b'D' => KeyCode::ArrowLeft,
        b'E' => KeyCode::KeypadBegin,
        b'F' => KeyCode::End,
        b'H' => KeyCode::Home,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'S' => KeyCode::F(4),
        _ => return None,
    };

    if params.is_empty() {
        return Some(Event::KeyPressed(KeyEvent::key(code)));
    }

    let mut fields = fields(params);
    if fields.next()? != b"1" {
        return None;
    }
    let (mods, action) = parse_modifiers(fields.next().unwrap_or_default())?;
    if fields.next().is_some() {
        return None;
    }
    Some(action.event(KeyEvent::new(code, mods)))
}

/// `ESC [ <number>[;<mod>[:<type>][;<text>]] ~`
fn tilde_key(params: &[u8]) -> Option<Event> {
    let mut fields = fields(params);
    let code = tilde_code(parse_number(fields.next()?)?)?;
    let (mods, action) = parse_modifiers(fields.next().unwrap_or_default())?;
    // A trailing text field is accepted and ignored.
    Some(action.event(KeyEvent::new(code, mods)))
}

fn tilde_code(number: u32) -> Option<KeyCode> {
    let code = match number {
        2 => KeyCode::Insert,
        3 => KeyCode::Delete,
        5 => KeyCode::PageUp,
        6 => KeyCode::PageDown,
        7 => KeyCode::Home,
        8 => KeyCode::End,
        11 => KeyCode::F(1),
        12 => KeyCode::F(2),
        13 => KeyCode::F(3),
        14 => KeyCode::F(4),
        15 => KeyCode::F(5),
        17 => KeyCode::F(6),
        18 => KeyCode::F(7),
        19 => KeyCode::F(8),
        20 => KeyCode::F(9),
        21 => KeyCode::F(10),
        23 => KeyCode::F(11),
        24 => KeyCode::F(12),
        29 => KeyCode::Menu,
        KITTY_KEYPAD_BEGIN => KeyCode::KeypadBegin,
        _ => return None,
    };
    Some(code)
}

/// `ESC [ <code>[:<alt>...][;<mod>[:<type>][;<text>]] u`
fn kitty_key(params: &[u8]) -> Option<Event> {
    let mut fields = fields(params);
    // Alternate key codes after ':' are accepted and ignored.
    let key_field = fields.next()?.split(|&b| b == b':').next()?;
    let code = KeyCode::from_codepoint(parse_number(key_field)?)?;
    let (mods, action) = parse_modifiers(fields.next().unwrap_or_default())?;
    Some(action.event(KeyEvent::new(code, mods)))
}

/// Decode `<mod>[:<type>]`; empty sub-fields default to 1.
fn parse_modifiers(field: &[u8]) -> Option<(KeyModifiers, KeyAction)> {
    let mut parts = field.split(|&b| b == b':');
    let mods = KeyModifiers::from_wire(parse_or_default(parts.next().unwrap_or_default(), 1)?)?;
    let action = KeyAction::from_wire(parse_or_default(parts.next().unwrap_or_default(), 1)?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((mods, action))
}

/// Which mouse encoding a report arrived in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MouseProtocol {
    X10,
    Sgr,
}

/// Mouse reports; `end` is the index of the `M`/`m` terminator.
fn decode_mouse(input: &[u8], end: usize) -> Decoded {
    let params = &input[2..end];

    // ESC [ M <cb> <cx> <cy>: three raw bytes follow the terminator.
    if params.is_empty() && input[end] == b'M' {
        let Some(raw) = input.get(end + 1..end + 4) else {
            return INCOMPLETE;
        };
        let button = raw[0].wrapping_sub(32);
        let position = MouseEvent::new(
            u16::from(raw[1].saturating_sub(32)),
            u16::from(raw[2].saturating_sub(32)),
        );
        let event = mouse_event(button, position, MouseProtocol::X10, false);
        return (event.unwrap_or(Event::None), end + 4);
    }

    let event = match params.split_first() {
        Some((b'<', sgr)) => sgr_mouse(sgr, input[end] == b'm'),
        _ => None,
    };
    (event.unwrap_or(Event::None), end + 1)
}

/// `ESC [ < <btn>;<x>;<y> M|m`
fn sgr_mouse(params: &[u8], release: bool) -> Option<Event> {
    let mut fields = fields(params);
    let button = u8::try_from(parse_number(fields.next()?)?).ok()?;
    let x = u16::try_from(parse_or_default(fields.next()?, 1)?).ok()?;
    let y = u16::try_from(parse_or_default(fields.next()?, 1)?).ok()?;
    if fields.next().is_some() {
        return None;
    }
    mouse_event(button, MouseEvent::new(x, y), MouseProtocol::Sgr, release)
}

const MOUSE_SHIFT: u8 = 0b0000_0100;
const MOUSE_ALT: u8 = 0b0000_1000;
const MOUSE_CTRL: u8 = 0b0001_0000;
const MOUSE_MOTION: u8 = 0b0010_0000;
const MOUSE_SCROLL: u8 = 0b0100_0000;
const MOUSE_EXTRA: u8 = 0b1000_0000;

/// Decode the button byte shared by both mouse encodings.
fn mouse_event(
    button: u8,
    position: MouseEvent,
    protocol: MouseProtocol,
    release: bool,
) -> Option<Event> {
    // Buttons 8 and up (back/forward) have no event.
    if button & MOUSE_EXTRA != 0 {
        return None;
    }

    let mut mods = MouseModifiers::empty();
    mods.set(MouseModifiers::SHIFT, button & MOUSE_SHIFT != 0);
    mods.set(MouseModifiers::ALT, button & MOUSE_ALT != 0);
    mods.set(MouseModifiers::CTRL, button & MOUSE_CTRL != 0);
    let m = position.with_mods(mods);

    let motion = button & MOUSE_MOTION != 0;
    let scroll = button & MOUSE_SCROLL != 0;
    let low = button & 0b11;

    let event = match (motion, scroll) {
        (true, true) => return None,
        (false, true) => {
            if low & 1 == 0 {
                Event::MouseScrollUp(m)
            } else {
                Event::MouseScrollDown(m)
            }
        }
        (true, false) => match low {
            0 => Event::MouseDragLeft(m),
            1 => Event::MouseDragMiddle(m),
            2 => Event::MouseDragRight(m),
            // X10 cannot report motion without a button.
            _ if protocol == MouseProtocol::Sgr => Event::MouseMove(m),
            _ => return None,
        },
        (false, false) => match (low, release) {
            (0, false) => Event::MouseLeftPressed(m),
            (0, true) => Event::MouseLeftReleased(m),
            (1, false) => Event::MouseMiddlePressed(m),
            (1, true) => Event::MouseMiddleReleased(m),
            (2, false) => Event::MouseRightPressed(m),
            (2, true) => Event::MouseRightReleased(m),
            // SGR names the button on release, so 3 is never valid there.
            _ if protocol == MouseProtocol::X10 => Event::MouseReleased(m),
            _ => return None,
        },
    };
    Some(event)
}

fn fields(params: &[u8]) -> impl Iterator<Item = &[u8]> {
    params.split(|&b| b == b';')
}

/// Parse a mandatory decimal field. Empty, non-digit or overflowing is `None`.
fn parse_number(field: &[u8]) -> Option<u32> {
    if field.is_empty() {
        return None;
    }
    field.iter().try_fold(0u32, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
    })
}

fn parse_or_default(field: &[u8], default: u32) -> Option<u32> {
    if field.is_empty() {
        Some(default)
    } else {
        parse_number(field)
    }
}

/// Iterator over the sequences in a complete byte run.
///
/// Yields every decoded `(event, consumed)` pair, including unmapped
/// sequences as [`Event::None`], and stops at the first incomplete prefix.
/// [`Sequences::remainder`] returns the bytes that were not decoded.
#[derive(Clone, Debug)]
pub struct Sequences<'a> {
    input: &'a [u8],
}

impl<'a> Sequences<'a> {
    /// Bytes not yet decoded.
    #[must_use]
    pub fn remainder(&self) -> &'a [u8] {
        self.input
    }
}

impl Iterator for Sequences<'_> {
    type Item = Decoded;

    fn next(&mut self) -> Option<Self::Item> {
        let (event, consumed) = decode(self.input);
        if consumed == 0 {
            return None;
        }
        self.input = &self.input[consumed..];
        Some((event, consumed))
    }
}

/// Decode `input` sequence by sequence.
#[must_use]
pub fn sequences(input: &[u8]) -> Sequences<'_> {
    Sequences { input }
}
