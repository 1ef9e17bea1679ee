//! Shared helpers for integration tests.
//!
//! [`ScriptedSource`] stands in for a terminal: it replays a fixed script of
//! reads, timeouts and failures so session behavior is deterministic.

#![allow(dead_code)] // Shared test helpers; not every integration test uses every helper

use gila_term::input::{Event, KeyModifiers, MouseModifiers};
use gila_term::terminal::InputSource;
use gila_term::{LogLevel, set_log_callback};
use std::collections::VecDeque;
use std::io;
use std::sync::Once;
use std::time::Duration;

/// Install a test tracing subscriber and route library diagnostics into it.
pub fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        set_log_callback(forward_to_tracing);
    });
}

/// Log callback that re-emits library messages as tracing events.
pub fn forward_to_tracing(level: LogLevel, message: &str) {
    match level {
        LogLevel::Debug => tracing::debug!(target: "gila_term", "{message}"),
        LogLevel::Info => tracing::info!(target: "gila_term", "{message}"),
        LogLevel::Warn => tracing::warn!(target: "gila_term", "{message}"),
        LogLevel::Error => tracing::error!(target: "gila_term", "{message}"),
    }
}

/// One scripted interaction with the terminal.
#[derive(Clone, Debug)]
pub enum Step {
    /// The terminal becomes readable and delivers these bytes.
    Data(Vec<u8>),
    /// The wait for input times out.
    Timeout,
    /// The wait for input fails.
    WaitError(io::ErrorKind),
    /// A signal interrupts the wait for input.
    Interrupted,
    /// The wait succeeds but the read fails.
    ReadError(io::ErrorKind),
    /// The terminal hangs up.
    Eof,
}

/// A scripted [`InputSource`].
#[derive(Debug)]
pub struct ScriptedSource {
    size: (u16, u16),
    steps: VecDeque<Step>,
    /// Number of `wait_readable` calls made.
    pub waits: usize,
    /// Number of `read` calls made.
    pub reads: usize,
}

impl ScriptedSource {
    /// An 80x24 terminal with an empty script.
    pub fn new() -> Self {
        Self {
            size: (80, 24),
            steps: VecDeque::new(),
            waits: 0,
            reads: 0,
        }
    }

    /// Queue a chunk of bytes.
    pub fn data(mut self, bytes: &[u8]) -> Self {
        self.push(Step::Data(bytes.to_vec()));
        self
    }

    /// Queue a timeout.
    pub fn timeout(mut self) -> Self {
        self.push(Step::Timeout);
        self
    }

    /// Queue an arbitrary step.
    pub fn step(mut self, step: Step) -> Self {
        self.push(step);
        self
    }

    /// Append a step to a source already owned by a session.
    pub fn push(&mut self, step: Step) {
        self.steps.push_back(step);
    }

    /// Change the size reported from now on.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }

    /// Steps not consumed yet.
    pub fn remaining_steps(&self) -> usize {
        self.steps.len()
    }
}

impl InputSource for ScriptedSource {
    fn size(&mut self) -> io::Result<(u16, u16)> {
        Ok(self.size)
    }

    fn wait_readable(&mut self, _timeout: Duration) -> io::Result<bool> {
        self.waits += 1;
        match self.steps.front() {
            Some(Step::Data(_) | Step::ReadError(_) | Step::Eof) => Ok(true),
            Some(Step::Timeout) => {
                self.steps.pop_front();
                Ok(false)
            }
            Some(Step::WaitError(kind)) => {
                let kind = *kind;
                self.steps.pop_front();
                Err(io::Error::new(kind, "scripted wait failure"))
            }
            Some(Step::Interrupted) => {
                self.steps.pop_front();
                Err(io::Error::from(io::ErrorKind::Interrupted))
            }
            None => Ok(false),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        match self.steps.pop_front() {
            Some(Step::Data(mut bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                if n < bytes.len() {
                    self.steps.push_front(Step::Data(bytes.split_off(n)));
                }
                Ok(n)
            }
            Some(Step::ReadError(kind)) => Err(io::Error::new(kind, "scripted read failure")),
            Some(Step::Eof) | None => Ok(0),
            Some(other) => {
                self.steps.push_front(other);
                Err(io::Error::new(io::ErrorKind::WouldBlock, "not readable"))
            }
        }
    }
}

/// Render an event as a compact, stable line for trace comparisons.
pub fn describe(event: &Event) -> String {
    match event {
        Event::None => "none".to_string(),
        Event::KeyPressed(k) => format!("key_pressed {:?}{}", k.code, key_mods(k.mods)),
        Event::KeyReleased(k) => format!("key_released {:?}{}", k.code, key_mods(k.mods)),
        Event::KeyRepeat(k) => format!("key_repeat {:?}{}", k.code, key_mods(k.mods)),
        Event::Resize(r) => format!(
            "resize {}x{} -> {}x{}",
            r.old_width, r.old_height, r.width, r.height
        ),
        other => {
            let m = other.mouse().expect("remaining variants are mouse events");
            let name = match other {
                Event::MouseMove(_) => "mouse_move",
                Event::MouseDragLeft(_) => "mouse_drag_left",
                Event::MouseDragMiddle(_) => "mouse_drag_middle",
                Event::MouseDragRight(_) => "mouse_drag_right",
                Event::MouseScrollUp(_) => "mouse_scroll_up",
                Event::MouseScrollDown(_) => "mouse_scroll_down",
                Event::MouseLeftPressed(_) => "mouse_left_pressed",
                Event::MouseLeftReleased(_) => "mouse_left_released",
                Event::MouseMiddlePressed(_) => "mouse_middle_pressed",
                Event::MouseMiddleReleased(_) => "mouse_middle_released",
                Event::MouseRightPressed(_) => "mouse_right_pressed",
                Event::MouseRightReleased(_) => "mouse_right_released",
                _ => "mouse_released",
            };
            format!("{name} {},{}{}", m.x, m.y, mouse_mods(m.mods))
        }
    }
}

fn key_mods(mods: KeyModifiers) -> String {
    if mods.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = mods.iter_names().map(|(name, _)| name).collect();
    format!(" [{}]", names.join("+"))
}

fn mouse_mods(mods: MouseModifiers) -> String {
    if mods.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = mods.iter_names().map(|(name, _)| name).collect();
    format!(" [{}]", names.join("+"))
}
