//! `gila_term` - terminal input for gila's interactive mode
//!
//! Decodes raw bytes from a terminal into key, mouse and resize events.
//! The [`input`] module holds the event model and a stateless decoder for
//! legacy VT, SGR mouse and kitty keyboard sequences; the [`terminal`]
//! module wraps a tty descriptor in a [`Session`] that reassembles
//! sequences split across reads and hands out bounded event batches.

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for libc FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional narrowing of wire values
#![allow(clippy::cast_sign_loss)] // read() results are checked before casting
#![allow(clippy::module_name_repetitions)] // Allow KeyEvent in input etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening

pub mod error;
pub mod input;
pub mod log;
pub mod terminal;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use log::{LogLevel, clear_log_callback, emit_log, set_log_callback};

// Re-export input types
pub use input::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseModifiers, ResizeEvent, decode,
};

// Re-export session types
pub use terminal::{EVENT_QUEUE_CAPACITY, InputSource, Session, SessionOptions, Tty, is_tty};
