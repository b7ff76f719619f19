// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that encode ink's styles and control actions. No state,
// no decisions about when to emit — the markup layer and the screen buffer
// make those. This module just knows the byte-level encoding.
//
// Only the fixed 8-color SGR palette is supported (30–37 foreground,
// 40–47 background). Capability detection is someone else's problem.
//
// Every escape has two forms: a writer form that appends to any
// `impl Write` (used by the screen buffer) and a `String` form (used when
// building tag tables and painting strings). Both produce identical bytes.
//
// Cursor coordinates here are raw terminal coordinates: 1-based, already
// resolved, never clamped. Callers that resolve percentages hand us the
// final numbers and we print them as-is.

use std::fmt;
use std::io::{self, Write};

/// Carriage return followed by erase-to-end-of-line.
///
/// Prefixing a line with this redraws it in place, which is how progress
/// lines overwrite themselves.
pub const LINE_RESET: &str = "\r\x1b[K";

/// SGR 0 — reset every attribute and color.
pub const RESET: &str = "\x1b[0m";

/// ED 2 — clear the entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

// ─── Color ──────────────────────────────────────────────────────────────────

/// One of the eight standard terminal colors.
///
/// The discriminant is the palette index used in SGR 3x / 4x codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl Color {
    /// All eight colors in palette order.
    pub const ALL: [Self; 8] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// Palette index, 0–7.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Look up a color by palette index. `None` outside 0–7.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Lowercase English name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }
}

// ─── SGR parameters ─────────────────────────────────────────────────────────

/// Non-color SGR parameters ink knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Sgr {
    Reset = 0,
    Bold = 1,
    Faint = 2,
    Italic = 3,
    Underline = 4,
}

impl Sgr {
    /// Numeric SGR code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

bitflags::bitflags! {
    /// Text attributes carried by a [`Style`].
    ///
    /// ```
    /// use ink_term::ansi::Attr;
    ///
    /// let attrs = Attr::BOLD | Attr::UNDERLINE;
    /// assert!(attrs.contains(Attr::BOLD));
    /// assert!(!attrs.contains(Attr::ITALIC));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1.
        const BOLD      = 1 << 0;
        /// SGR 2.
        const FAINT     = 1 << 1;
        /// SGR 3.
        const ITALIC    = 1 << 2;
        /// SGR 4.
        const UNDERLINE = 1 << 3;
    }
}

impl Attr {
    /// The SGR parameters for the set attributes, in ascending code order.
    pub fn params(self) -> impl Iterator<Item = Sgr> {
        [
            (Self::BOLD, Sgr::Bold),
            (Self::FAINT, Sgr::Faint),
            (Self::ITALIC, Sgr::Italic),
            (Self::UNDERLINE, Sgr::Underline),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, sgr)| sgr)
    }
}

// ─── Style ──────────────────────────────────────────────────────────────────

/// A combination of attributes, foreground and background.
///
/// Encodes as one SGR sequence per attribute (ascending code order), then
/// the foreground, then the background. An empty style encodes to nothing.
/// Styles never reset what came before them; that is what [`Sgr::Reset`]
/// is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: Attr,
}

impl Style {
    /// A style that emits nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: Attr::empty(),
        }
    }

    /// Foreground color only.
    #[must_use]
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Self::new()
        }
    }

    /// Background color only.
    #[must_use]
    pub const fn bg(color: Color) -> Self {
        Self {
            bg: Some(color),
            ..Self::new()
        }
    }

    /// Attributes only.
    #[must_use]
    pub const fn attrs(attrs: Attr) -> Self {
        Self {
            attrs,
            ..Self::new()
        }
    }

    /// Add attributes to this style.
    #[must_use]
    pub const fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = self.attrs.union(attrs);
        self
    }

    /// Shorthand for `with_attrs(Attr::BOLD)`.
    #[must_use]
    pub const fn bold(self) -> Self {
        self.with_attrs(Attr::BOLD)
    }

    /// Whether this style encodes to an empty string.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }

    /// Write the encoded style.
    pub fn write_to(&self, w: &mut impl Write) -> io::Result<()> {
        write!(w, "{self}")
    }

    /// The encoded style as a string.
    #[must_use]
    pub fn escape(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sgr in self.attrs.params() {
            write!(f, "\x1b[{}m", sgr.code())?;
        }
        if let Some(color) = self.fg {
            write!(f, "\x1b[3{}m", color.index())?;
        }
        if let Some(color) = self.bg {
            write!(f, "\x1b[4{}m", color.index())?;
        }
        Ok(())
    }
}

// ─── Colors and parameters ──────────────────────────────────────────────────

/// Set the foreground color (SGR 30–37).
#[inline]
pub fn fg(w: &mut impl Write, color: Color) -> io::Result<()> {
    write!(w, "\x1b[3{}m", color.index())
}

/// Set the background color (SGR 40–47).
#[inline]
pub fn bg(w: &mut impl Write, color: Color) -> io::Result<()> {
    write!(w, "\x1b[4{}m", color.index())
}

/// Emit a single SGR parameter.
#[inline]
pub fn param(w: &mut impl Write, sgr: Sgr) -> io::Result<()> {
    write!(w, "\x1b[{}m", sgr.code())
}

/// Foreground escape as a string.
#[must_use]
pub fn color_escape(color: Color) -> String {
    format!("\x1b[3{}m", color.index())
}

/// Background escape as a string.
#[must_use]
pub fn background_escape(color: Color) -> String {
    format!("\x1b[4{}m", color.index())
}

/// SGR parameter escape as a string.
#[must_use]
pub fn param_escape(sgr: Sgr) -> String {
    format!("\x1b[{}m", sgr.code())
}

// ─── Cursor and screen ──────────────────────────────────────────────────────

/// Move the cursor with CUP, row first as the terminal expects.
///
/// `x` and `y` are raw 1-based terminal coordinates and are written
/// unchanged, even when out of range.
#[inline]
pub fn cursor_position(w: &mut impl Write, x: i32, y: i32) -> io::Result<()> {
    write!(w, "\x1b[{y};{x}H")
}

/// CUP escape as a string, same encoding as [`cursor_position`].
#[must_use]
pub fn cursor_position_escape(x: i32, y: i32) -> String {
    format!("\x1b[{y};{x}H")
}

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(CLEAR_SCREEN.as_bytes())
}

/// Reset all SGR attributes (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(RESET.as_bytes())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: run an ANSI function and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Color ───────────────────────────────────────────────────────────

    #[test]
    fn color_indices_follow_palette_order() {
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(usize::from(color.index()), i);
        }
    }

    #[test]
    fn from_index_round_trips_in_range() {
        assert_eq!(Color::from_index(1), Some(Color::Red));
        assert_eq!(Color::from_index(7), Some(Color::White));
        assert_eq!(Color::from_index(8), None);
    }

    #[test]
    fn fg_sequences() {
        assert_eq!(emit(|w| fg(w, Color::Black)), "\x1b[30m");
        assert_eq!(emit(|w| fg(w, Color::Red)), "\x1b[31m");
        assert_eq!(emit(|w| fg(w, Color::White)), "\x1b[37m");
    }

    #[test]
    fn bg_sequences() {
        assert_eq!(emit(|w| bg(w, Color::Black)), "\x1b[40m");
        assert_eq!(emit(|w| bg(w, Color::Cyan)), "\x1b[46m");
    }

    #[test]
    fn param_sequences() {
        assert_eq!(emit(|w| param(w, Sgr::Reset)), "\x1b[0m");
        assert_eq!(emit(|w| param(w, Sgr::Bold)), "\x1b[1m");
        assert_eq!(emit(|w| param(w, Sgr::Faint)), "\x1b[2m");
        assert_eq!(emit(|w| param(w, Sgr::Italic)), "\x1b[3m");
        assert_eq!(emit(|w| param(w, Sgr::Underline)), "\x1b[4m");
    }

    #[test]
    fn string_forms_match_writer_forms() {
        for color in Color::ALL {
            assert_eq!(color_escape(color), emit(|w| fg(w, color)));
            assert_eq!(background_escape(color), emit(|w| bg(w, color)));
        }
        assert_eq!(param_escape(Sgr::Underline), emit(|w| param(w, Sgr::Underline)));
    }

    // ── Style ───────────────────────────────────────────────────────────

    #[test]
    fn empty_style_encodes_to_nothing() {
        assert!(Style::new().is_empty());
        assert_eq!(Style::new().escape(), "");
    }

    #[test]
    fn bold_foreground_puts_attrs_first() {
        let style = Style::fg(Color::Red).bold();
        assert_eq!(style.escape(), "\x1b[1m\x1b[31m");
    }

    #[test]
    fn full_style_order() {
        let style = Style {
            fg: Some(Color::Green),
            bg: Some(Color::Blue),
            attrs: Attr::UNDERLINE | Attr::BOLD,
        };
        assert_eq!(style.escape(), "\x1b[1m\x1b[4m\x1b[32m\x1b[44m");
    }

    #[test]
    fn style_write_to_matches_escape() {
        let style = Style::bg(Color::Yellow).with_attrs(Attr::ITALIC);
        assert_eq!(emit(|w| style.write_to(w)), style.escape());
    }

    #[test]
    fn attr_params_ascending() {
        let all = Attr::all().params().collect::<Vec<_>>();
        assert_eq!(all, vec![Sgr::Bold, Sgr::Faint, Sgr::Italic, Sgr::Underline]);
    }

    // ── Cursor and screen ───────────────────────────────────────────────

    #[test]
    fn cursor_position_is_row_then_column() {
        assert_eq!(emit(|w| cursor_position(w, 10, 3)), "\x1b[3;10H");
    }

    #[test]
    fn cursor_position_is_unclamped() {
        assert_eq!(emit(|w| cursor_position(w, 5000, -1)), "\x1b[-1;5000H");
    }

    #[test]
    fn cursor_position_string_form() {
        assert_eq!(cursor_position_escape(7, 2), emit(|w| cursor_position(w, 7, 2)));
    }

    #[test]
    fn clear_and_reset_sequences() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J");
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    #[test]
    fn line_reset_sequence() {
        assert_eq!(LINE_RESET, "\r\x1b[K");
    }
}
