//! Terminal descriptor access.
//!
//! Thin wrappers over `poll`, `read` and `ioctl(TIOCGWINSZ)` for a tty file
//! descriptor. Mode setup (raw mode, alternate screen, mouse reporting) is
//! the caller's business; this module only reads.
//!
//! # Safety
//! This module uses unsafe code for FFI calls to libc. These are necessary
//! for low-level terminal access and cannot be avoided.

#![allow(unsafe_code)]

use std::io;
use std::os::unix::io::{AsFd, AsRawFd, BorrowedFd, RawFd};
use std::time::Duration;

use crate::terminal::InputSource;

/// A terminal input descriptor.
///
/// Borrows the file descriptor for `'fd`: the descriptor cannot be closed
/// while a `Tty` (or a session built on one) is alive, and dropping a `Tty`
/// does not close it.
///
/// ```compile_fail
/// use gila_term::{Session, Tty};
///
/// let file = std::fs::File::open("/dev/tty").unwrap();
/// let session = Session::new(Tty::new(&file));
/// drop(file);
/// let _ = session;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Tty<'fd> {
    fd: BorrowedFd<'fd>,
}

impl<'fd> Tty<'fd> {
    /// Read from the given descriptor.
    pub fn new<F: AsFd>(fd: &'fd F) -> Self {
        Self { fd: fd.as_fd() }
    }

    /// The underlying descriptor.
    #[must_use]
    pub fn fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl Tty<'static> {
    /// Read from standard input.
    #[must_use]
    pub fn stdin() -> Self {
        // SAFETY: fd 0 stays open for the life of the process, as std's own
        // `AsFd for Stdin` assumes.
        let fd = unsafe { BorrowedFd::borrow_raw(libc::STDIN_FILENO) };
        Self { fd }
    }
}

impl AsFd for Tty<'_> {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd
    }
}

impl AsRawFd for Tty<'_> {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl InputSource for Tty<'_> {
    fn size(&mut self) -> io::Result<(u16, u16)> {
        window_size(self.fd())
    }

    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool> {
        poll_readable(self.fd(), timeout)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        read_fd(self.fd(), buf)
    }
}

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Get the window size of the terminal behind `fd` as `(columns, rows)`.
pub fn window_size(fd: RawFd) -> io::Result<(u16, u16)> {
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ is safe when passed a valid winsize struct
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

/// Wait until `fd` has bytes to read, or `timeout` passes.
///
/// Returns `Ok(false)` on timeout. A signal arriving during the wait is
/// reported as an [`io::ErrorKind::Interrupted`] error, not as a timeout.
/// Hang-up and error conditions count as readable so the following read
/// reports them.
pub fn poll_readable(fd: RawFd, timeout: Duration) -> io::Result<bool> {
    let mut pfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };

    // SAFETY: pfd is a valid pollfd and nfds is 1
    let result = unsafe { libc::poll(&mut pfd, 1, poll_timeout_ms(timeout)) };

    if result == -1 {
        return Err(io::Error::last_os_error());
    }
    if result > 0 && pfd.revents & libc::POLLNVAL != 0 {
        return Err(io::Error::from_raw_os_error(libc::EBADF));
    }
    Ok(result > 0)
}

/// Read available bytes from `fd` into `buf`.
pub fn read_fd(fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
    // SAFETY: buf is valid for writes of buf.len() bytes
    let result = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };

    if result < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(result as usize)
    }
}

/// Convert a timeout to poll's milliseconds, rounding up so short waits
/// do not collapse into a busy poll.
fn poll_timeout_ms(timeout: Duration) -> libc::c_int {
    let mut ms = timeout.as_millis();
    if timeout.subsec_nanos() % 1_000_000 != 0 {
        ms += 1;
    }
    libc::c_int::try_from(ms).unwrap_or(libc::c_int::MAX)
}
