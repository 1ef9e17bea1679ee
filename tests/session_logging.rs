//! Diagnostics emitted by a session through the log callback.
//!
//! The callback is process-wide, so every test here holds `LOCK` while a
//! capturing callback is installed.

mod common;

use common::{ScriptedSource, forward_to_tracing};
use gila_term::input::{Event, KeyEvent};
use gila_term::{LogLevel, Session, clear_log_callback, set_log_callback};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

static LOCK: Mutex<()> = Mutex::new(());

type Captured = Arc<Mutex<Vec<(LogLevel, String)>>>;

/// Install a callback recording every message (and echoing it to tracing).
fn capture() -> (MutexGuard<'static, ()>, Captured) {
    let guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let captured: Captured = Arc::default();
    let sink = Arc::clone(&captured);
    set_log_callback(move |level, message| {
        forward_to_tracing(level, message);
        sink.lock().unwrap().push((level, message.to_string()));
    });
    (guard, captured)
}

fn messages(captured: &Captured, level: LogLevel) -> Vec<String> {
    captured
        .lock()
        .unwrap()
        .iter()
        .filter(|(l, _)| *l == level)
        .map(|(_, m)| m.clone())
        .collect()
}

#[test]
fn ignored_sequence_is_logged_at_debug() {
    let (_guard, captured) = capture();
    let mut session = Session::new(ScriptedSource::new().data(b"\x1b[?1;2cx")).unwrap();
    let events = session.poll_events(10).unwrap().to_vec();
    clear_log_callback();

    assert_eq!(events, vec![Event::KeyPressed(KeyEvent::char('x'))]);
    assert_eq!(
        messages(&captured, LogLevel::Debug),
        vec!["ignored input sequence \"\\x1b[?1;2c\"".to_string()]
    );
}

#[test]
fn resize_is_logged_at_debug() {
    let (_guard, captured) = capture();
    let mut session = Session::new(ScriptedSource::new().timeout()).unwrap();
    session.source_mut().set_size(132, 43);
    session.poll_events(10).unwrap();
    clear_log_callback();

    assert_eq!(
        messages(&captured, LogLevel::Debug),
        vec!["terminal resized from 80x24 to 132x43".to_string()]
    );
}

#[test]
fn queue_overflow_is_logged_at_warn() {
    let (_guard, captured) = capture();
    let burst = vec![b'w'; 40];
    let mut session = Session::new(ScriptedSource::new().data(&burst)).unwrap();
    session.poll_events(10).unwrap();
    clear_log_callback();

    assert_eq!(
        messages(&captured, LogLevel::Warn),
        vec!["event queue full, carrying 8 bytes to the next poll".to_string()]
    );
}

#[test]
fn quiet_session_logs_nothing() {
    let (_guard, captured) = capture();
    let mut session = Session::new(ScriptedSource::new().data(b"\x1b[A")).unwrap();
    session.poll_events(10).unwrap();
    clear_log_callback();

    assert!(captured.lock().unwrap().is_empty());
}
