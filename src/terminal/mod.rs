//! Terminal input session.
//!
//! A [`Session`] owns the terminal descriptor, a fixed read buffer, the last
//! known window size and a bounded event queue. Each call to
//! [`Session::poll_events`] waits (at most the given timeout) for input,
//! reassembles escape sequences split across reads, and returns the batch of
//! events decoded in that cycle.

mod raw;

pub use raw::{Tty, is_tty, poll_readable, read_fd, window_size};

use std::io;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::input::{Event, ResizeEvent, decode, decode_timed_out};
use crate::log::{LogLevel, emit_log, log_enabled};

/// Maximum number of events returned by one [`Session::poll_events`] call.
pub const EVENT_QUEUE_CAPACITY: usize = 32;

/// Smallest read buffer a session will use; every sequence the decoder maps
/// fits comfortably.
const MIN_READ_BUFFER: usize = 64;

/// Where a session gets its bytes and window size from.
///
/// [`Tty`] is the real implementation; tests script their own.
pub trait InputSource {
    /// Current window size as `(columns, rows)`.
    fn size(&mut self) -> io::Result<(u16, u16)>;

    /// Wait up to `timeout` for input. `Ok(false)` means nothing arrived.
    ///
    /// A wait cut short by a signal should fail with
    /// [`io::ErrorKind::Interrupted`] rather than report a timeout.
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Read available bytes. `Ok(0)` means the terminal is gone.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<S: InputSource + ?Sized> InputSource for &mut S {
    fn size(&mut self) -> io::Result<(u16, u16)> {
        (**self).size()
    }

    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).wait_readable(timeout)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    /// Size of the read buffer in bytes (at least 64).
    pub read_buffer_size: usize,
    /// When no continuation arrives before the timeout, report a lone `ESC`
    /// as Escape and `ESC O` / `ESC [` as Alt+O / Alt+[. When off, the
    /// prefix is kept until more bytes arrive.
    pub resolve_stalled_escape: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            read_buffer_size: 4096,
            resolve_stalled_escape: true,
        }
    }
}

/// Outcome of decoding the buffered bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Drain {
    /// Every buffered byte was decoded.
    Empty,
    /// The remaining bytes are the prefix of an unfinished sequence.
    Incomplete,
    /// The queue filled up before the buffer was decoded.
    QueueFull,
}

/// Interactive terminal input session.
///
/// Single-threaded: the returned batch borrows the session and is replaced
/// by the next poll.
#[derive(Debug)]
pub struct Session<S: InputSource> {
    source: S,
    options: SessionOptions,
    buf: Box<[u8]>,
    /// Undecoded bytes are `buf[start..end]`.
    start: usize,
    end: usize,
    size: (u16, u16),
    queue: Vec<Event>,
}

impl Session<Tty<'static>> {
    /// Open a session on standard input.
    pub fn stdin() -> Result<Self> {
        Self::new(Tty::stdin())
    }
}

impl<S: InputSource> Session<S> {
    /// Create a session with default options.
    ///
    /// Queries the window size once; failure to get it is an error. A zero
    /// size (an unsized pty) is accepted and reported like any other.
    pub fn new(source: S) -> Result<Self> {
        Self::with_options(source, SessionOptions::default())
    }

    /// Create a session with custom options.
    pub fn with_options(mut source: S, options: SessionOptions) -> Result<Self> {
        let size = source.size()?;
        let buf_len = options.read_buffer_size.max(MIN_READ_BUFFER);
        Ok(Self {
            source,
            options,
            buf: vec![0; buf_len].into_boxed_slice(),
            start: 0,
            end: 0,
            size,
            queue: Vec::with_capacity(EVENT_QUEUE_CAPACITY),
        })
    }

    /// Poll for input events, waiting at most `timeout_ms` milliseconds.
    ///
    /// A resize since the previous call is reported first. Returns an empty
    /// slice on timeout. Bytes that could not be decoded yet (a partial
    /// sequence, or input beyond a full queue) are kept for the next call.
    ///
    /// A signal interrupting the wait or the read ends the cycle early with
    /// whatever is queued; a pending escape prefix is left for the next call.
    pub fn poll_events(&mut self, timeout_ms: u64) -> Result<&[Event]> {
        self.queue.clear();
        let deadline = Instant::now().checked_add(Duration::from_millis(timeout_ms));

        self.check_resize()?;
        let queued_before_input = self.queue.len();
        let mut read_any = false;

        loop {
            match self.drain() {
                Drain::QueueFull => break,
                Drain::Empty if read_any || self.queue.len() > queued_before_input => break,
                Drain::Empty | Drain::Incomplete => {}
            }

            let remaining = deadline.map_or(Duration::MAX, |d| {
                d.saturating_duration_since(Instant::now())
            });
            match self.source.wait_readable(remaining) {
                Ok(true) => {}
                Ok(false) => {
                    self.resolve_stalled();
                    break;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => break,
                Err(e) => return Err(e.into()),
            }
            if !self.fill()? {
                break;
            }
            read_any = true;
        }

        Ok(&self.queue)
    }

    /// Last known window size as `(columns, rows)`.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Number of received bytes not yet decoded.
    #[must_use]
    pub fn pending_bytes(&self) -> usize {
        self.end - self.start
    }

    /// Session options.
    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// The input source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the input source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consume the session, returning the input source.
    pub fn into_source(self) -> S {
        self.source
    }

    fn check_resize(&mut self) -> Result<()> {
        let size = self.source.size()?;
        if size != self.size {
            if log_enabled() {
                emit_log(
                    LogLevel::Debug,
                    &format!(
                        "terminal resized from {}x{} to {}x{}",
                        self.size.0, self.size.1, size.0, size.1
                    ),
                );
            }
            self.queue.push(ResizeEvent::new(self.size, size).into());
            self.size = size;
        }
        Ok(())
    }

    /// Decode buffered bytes into the queue.
    fn drain(&mut self) -> Drain {
        while self.start < self.end {
            if self.queue.len() == EVENT_QUEUE_CAPACITY {
                if log_enabled() {
                    emit_log(
                        LogLevel::Warn,
                        &format!(
                            "event queue full, carrying {} bytes to the next poll",
                            self.pending_bytes()
                        ),
                    );
                }
                return Drain::QueueFull;
            }

            let (event, consumed) = decode(&self.buf[self.start..self.end]);
            if consumed == 0 {
                return Drain::Incomplete;
            }
            if event.is_none() {
                if log_enabled() {
                    let bytes = &self.buf[self.start..self.start + consumed];
                    emit_log(
                        LogLevel::Debug,
                        &format!("ignored input sequence \"{}\"", escape_bytes(bytes)),
                    );
                }
            } else {
                self.queue.push(event);
            }
            self.start += consumed;
        }
        Drain::Empty
    }

    /// Read more bytes after the undecoded tail.
    ///
    /// Returns `Ok(false)` when the read was interrupted and nothing arrived.
    fn fill(&mut self) -> Result<bool> {
        self.compact();
        if self.end == self.buf.len() {
            // A sequence that never terminates cannot be decoded; drop it.
            if log_enabled() {
                emit_log(
                    LogLevel::Warn,
                    &format!(
                        "discarding {} bytes of unterminated input \"{}\"",
                        self.end,
                        escape_bytes(&self.buf[..self.end.min(16)])
                    ),
                );
            }
            self.end = 0;
        }

        match self.source.read(&mut self.buf[self.end..]) {
            Ok(0) => Err(Error::Disconnected),
            Ok(n) => {
                self.end += n;
                Ok(true)
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
                ) =>
            {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Move the undecoded tail to the front of the buffer.
    fn compact(&mut self) {
        if self.start > 0 {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
    }

    /// No more bytes arrived in time: settle an escape prefix.
    fn resolve_stalled(&mut self) {
        if !self.options.resolve_stalled_escape
            || self.start == self.end
            || self.queue.len() == EVENT_QUEUE_CAPACITY
        {
            return;
        }

        let (event, consumed) = decode_timed_out(&self.buf[self.start..self.end]);
        if consumed == 0 {
            return;
        }
        if log_enabled() {
            emit_log(
                LogLevel::Debug,
                &format!("resolved stalled escape prefix as {event:?}"),
            );
        }
        if !event.is_none() {
            self.queue.push(event);
        }
        self.start += consumed;
        self.drain();
    }
}

fn escape_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|&b| std::ascii::escape_default(b))
        .map(char::from)
        .collect()
}
