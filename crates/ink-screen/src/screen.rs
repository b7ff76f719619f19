// SPDX-License-Identifier: MIT
//
// Screen — an in-memory, line-structured output buffer.
//
// Everything a program prints goes into the screen's buffer first: plain
// text, rendered markup, cursor moves, screen clears. Nothing reaches the
// terminal until `flush`, which writes the buffered lines to the sink and
// empties the buffer.
//
// Lifecycle:
//
//   accumulating ──flush──▶ (emit lines, flush sink) ──▶ accumulating, empty
//
// There is no partial flush. Whatever `flush` does not emit is discarded,
// and the buffer is empty afterwards even if the sink fails mid-write.
//
// Bounded flush: when the terminal height is known (non-zero rows), at most
// that many lines are emitted and the rest are dropped, so one oversized
// flush cannot scroll earlier output off the screen. An unknown height
// (failed query, zero rows) disables the bound and everything is emitted.
//
// The height (`current_height`) is always derived from the buffer by
// counting line breaks. The screen has no internal locking; a program that
// prints from several threads must give the screen a single owner.

use std::fmt::{self, Display};
use std::io::{self, BufWriter, Stdout, Write};

use ink_markup::TagProcessor;
use ink_term::ansi;
use ink_term::terminal::{Ioctl, SizeProvider};
use thiserror::Error;

use crate::config::ScreenConfig;
use crate::coord::{self, Coord, ResolveError, Row};

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("failed to write to output: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// What a [`Screen::flush`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushReport {
    /// Lines written to the sink.
    pub emitted: usize,
    /// Lines discarded because the terminal was full.
    pub dropped: usize,
}

/// A line-oriented output buffer over a size provider and a byte sink.
pub struct Screen<P = Ioctl, W = BufWriter<Stdout>> {
    buf: String,
    sink: W,
    size: P,
    tags: TagProcessor,
    bounded: bool,
}

impl Screen {
    /// A screen over the real stdout, sized by `ioctl`.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Ioctl, BufWriter::new(io::stdout()))
    }
}

impl Screen<Box<dyn SizeProvider>, BufWriter<Stdout>> {
    /// A screen over the real stdout, set up from `config`.
    #[must_use]
    pub fn from_config(config: &ScreenConfig) -> Self {
        Self::new(config.size_source.provider(), BufWriter::new(io::stdout()))
            .with_processor(config.processor())
            .bounded(config.bounded_flush)
    }
}

impl<P: SizeProvider, W: Write> Screen<P, W> {
    /// An empty, bounded screen using the standard tag vocabulary.
    pub fn new(size: P, sink: W) -> Self {
        Self {
            buf: String::new(),
            sink,
            size,
            tags: TagProcessor::standard(),
            bounded: true,
        }
    }

    /// Render markup with `tags` instead of the standard processor.
    #[must_use]
    pub fn with_processor(mut self, tags: TagProcessor) -> Self {
        self.tags = tags;
        self
    }

    /// Enable or disable the terminal-height bound on flush.
    #[must_use]
    pub fn bounded(mut self, bounded: bool) -> Self {
        self.bounded = bounded;
        self
    }

    // ── Accumulating ────────────────────────────────────────────────────

    /// Append raw text.
    pub fn write(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Append raw text and a line break.
    pub fn write_line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Render `template` with `args` and append the result.
    pub fn write_tagged(&mut self, template: &str, args: &[&dyn Display]) {
        let rendered = self.tags.render(template, args);
        self.buf.push_str(&rendered);
    }

    /// Append a clear-screen sequence.
    pub fn clear(&mut self) {
        self.buf.push_str(ansi::CLEAR_SCREEN);
    }

    /// Append a cursor move to `(x, y)`.
    ///
    /// The move happens when the buffer is flushed, not now.
    ///
    /// # Errors
    ///
    /// [`ScreenError::Resolve`] if a percentage cannot be resolved; the
    /// buffer is left untouched.
    pub fn move_cursor_to(
        &mut self,
        x: impl Into<Coord>,
        y: impl Into<Row>,
    ) -> Result<(), ScreenError> {
        let (x, y) = self.resolve(x.into(), y.into())?;
        self.buf.push_str(&ansi::cursor_position_escape(x, y));
        Ok(())
    }

    /// Append `text` with each of its lines positioned at column `x`,
    /// starting at row `y` and going down one row per line.
    ///
    /// No line breaks are added, so positioned text does not count toward
    /// [`current_height`](Self::current_height).
    ///
    /// # Errors
    ///
    /// [`ScreenError::Resolve`] if a percentage cannot be resolved; the
    /// buffer is left untouched.
    pub fn move_to(
        &mut self,
        text: &str,
        x: impl Into<Coord>,
        y: impl Into<Row>,
    ) -> Result<(), ScreenError> {
        let (x, y) = self.resolve(x.into(), y.into())?;
        for (row, line) in (y..).zip(text.split('\n')) {
            self.buf.push_str(&ansi::cursor_position_escape(x, row));
            self.buf.push_str(line);
        }
        Ok(())
    }

    fn resolve(&self, x: Coord, y: Row) -> Result<(i32, i32), ResolveError> {
        coord::resolve(&self.size, x, y, self.current_height())
    }

    // ── Inspection ──────────────────────────────────────────────────────

    /// Number of line breaks currently buffered.
    #[must_use]
    pub fn current_height(&self) -> usize {
        self.buf.matches('\n').count()
    }

    /// The buffered content.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The sink (for tests and inspection).
    pub const fn sink(&self) -> &W {
        &self.sink
    }

    // ── Flushing ────────────────────────────────────────────────────────

    /// Emit buffered lines to the sink, flush it, and empty the buffer.
    ///
    /// Lines are `\n`-terminated pieces of the buffer written verbatim; an
    /// unterminated tail counts as a line. When bounded and the terminal
    /// height is known, lines past the height are dropped.
    ///
    /// # Errors
    ///
    /// [`ScreenError::Io`] if the sink fails. The buffer is emptied anyway.
    pub fn flush(&mut self) -> Result<FlushReport, ScreenError> {
        let content = std::mem::take(&mut self.buf);
        if content.is_empty() {
            self.sink.flush()?;
            return Ok(FlushReport::default());
        }

        let limit = if self.bounded { self.height_limit() } else { None };
        let mut report = FlushReport::default();

        for line in content.split_inclusive('\n') {
            if limit.is_some_and(|max| report.emitted >= max) {
                report.dropped += 1;
                continue;
            }
            self.sink.write_all(line.as_bytes())?;
            report.emitted += 1;
        }

        self.sink.flush()?;

        if report.dropped > 0 {
            tracing::debug!(
                emitted = report.emitted,
                dropped = report.dropped,
                "flush truncated at terminal height"
            );
        }
        Ok(report)
    }

    /// The terminal height when it is known and non-zero.
    fn height_limit(&self) -> Option<usize> {
        match self.size.query_size() {
            Ok(size) if size.rows > 0 => Some(usize::from(size.rows)),
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(error = %err, "terminal height unknown, flushing without bound");
                None
            }
        }
    }

    /// Flush one last time and hand back the sink.
    ///
    /// # Errors
    ///
    /// Same as [`flush`](Self::flush).
    pub fn finish(mut self) -> Result<W, ScreenError> {
        self.flush()?;
        Ok(self.sink)
    }
}

impl<P: SizeProvider, W: Write> fmt::Write for Screen<P, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

impl<P, W> fmt::Debug for Screen<P, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("buffered", &self.buf.len())
            .field("bounded", &self.bounded)
            .field("plain", &self.tags.is_plain())
            .finish_non_exhaustive()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
