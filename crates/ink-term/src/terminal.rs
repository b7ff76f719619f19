// SPDX-License-Identifier: MIT
//
// Terminal size queries.
//
// Safety: the ioctl provider uses `unsafe` for `ioctl(TIOCGWINSZ)`. That is
// the standard POSIX interface for asking the kernel about the window size
// and there is no safe alternative in std. The unsafe block is minimal.
#![allow(unsafe_code)]
//
// Sizes are never cached. Every call goes back to the environment, because
// the window can be resized between two writes and a stale height would
// make the bounded flush either truncate too early or scroll content away.
//
// A failed query is an ordinary value (`Err(SizeError)`), not a crash.
// Callers decide what "unknown" means for them: the coordinate resolver
// refuses percentages, the screen buffer skips its height bound.

use std::io;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Why the terminal size could not be determined.
#[derive(Debug, Error)]
pub enum SizeError {
    #[error("output is not attached to a terminal")]
    NotATerminal,

    #[error("failed to run size command: {0}")]
    Spawn(#[from] io::Error),

    #[error("size command exited with {0}")]
    Exit(ExitStatus),

    #[error("unexpected size output: {0:?}")]
    Malformed(String),

    #[error("non-numeric size field: {0:?}")]
    NonNumeric(String),
}

// ─── Providers ──────────────────────────────────────────────────────────────

/// Anything that can report the current terminal size.
///
/// Implementations must query on every call; ink relies on that to pick up
/// resizes without any notification plumbing.
pub trait SizeProvider {
    /// Query the current size.
    ///
    /// # Errors
    ///
    /// Returns a [`SizeError`] when the size cannot be determined.
    fn query_size(&self) -> Result<Size, SizeError>;
}

impl<P: SizeProvider + ?Sized> SizeProvider for &P {
    fn query_size(&self) -> Result<Size, SizeError> {
        (**self).query_size()
    }
}

impl<P: SizeProvider + ?Sized> SizeProvider for Box<P> {
    fn query_size(&self) -> Result<Size, SizeError> {
        (**self).query_size()
    }
}

/// Ask the kernel via `ioctl(TIOCGWINSZ)` on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ioctl;

impl SizeProvider for Ioctl {
    #[cfg(unix)]
    fn query_size(&self) -> Result<Size, SizeError> {
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

        if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
            Ok(Size::new(ws.ws_col, ws.ws_row))
        } else {
            tracing::debug!("TIOCGWINSZ failed or reported a zero size");
            Err(SizeError::NotATerminal)
        }
    }

    #[cfg(not(unix))]
    fn query_size(&self) -> Result<Size, SizeError> {
        Err(SizeError::NotATerminal)
    }
}

/// Run `stty size` with the process's stdin and parse its output.
///
/// `stty` prints `"<rows> <cols>"`. Anything else is a failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stty;

impl SizeProvider for Stty {
    fn query_size(&self) -> Result<Size, SizeError> {
        let output = Command::new("stty")
            .arg("size")
            .stdin(Stdio::inherit())
            .stderr(Stdio::null())
            .output()?;

        if !output.status.success() {
            tracing::debug!(status = %output.status, "stty size failed");
            return Err(SizeError::Exit(output.status));
        }

        parse_stty_size(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse `stty size` output (`"<rows> <cols>\n"`).
///
/// # Errors
///
/// [`SizeError::Malformed`] unless there are exactly two fields,
/// [`SizeError::NonNumeric`] if either field is not a `u16`.
pub fn parse_stty_size(out: &str) -> Result<Size, SizeError> {
    let fields: Vec<&str> = out.split_whitespace().collect();
    let [rows, cols] = fields.as_slice() else {
        return Err(SizeError::Malformed(out.to_owned()));
    };

    let number = |field: &str| {
        field
            .parse::<u16>()
            .map_err(|_| SizeError::NonNumeric(field.to_owned()))
    };

    Ok(Size::new(number(cols)?, number(rows)?))
}

/// A provider that always reports the same size.
#[derive(Debug, Clone, Copy)]
pub struct Fixed(pub Size);

impl SizeProvider for Fixed {
    fn query_size(&self) -> Result<Size, SizeError> {
        Ok(self.0)
    }
}

/// A provider that always fails, as in a piped or headless environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl SizeProvider for Unavailable {
    fn query_size(&self) -> Result<Size, SizeError> {
        Err(SizeError::NotATerminal)
    }
}

/// Check whether stdout is connected to a terminal.
#[cfg(unix)]
#[must_use]
pub fn stdout_is_tty() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn stdout_is_tty() -> bool {
    false
}

// ─── Tests ───────────────────────────────────────────────────────────────────
