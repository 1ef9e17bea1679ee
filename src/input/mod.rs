//! Input decoding for terminal events.
//!
//! This module turns raw terminal bytes into structured key, mouse and
//! resize events. It understands legacy VT sequences as well as the SGR
//! mouse encoding and the kitty keyboard protocol.

mod event;
mod keyboard;
mod mouse;
mod parser;

pub use event::{Event, ResizeEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use mouse::{MouseEvent, MouseModifiers};
pub use parser::{Decoded, Sequences, decode, decode_byte, decode_timed_out, sequences};
