// SPDX-License-Identifier: MIT
//
// ink-term — the byte-level bottom of the ink stack.
//
// Two small pieces live here. `ansi` knows how every style and control
// sequence ink emits is encoded: the fixed 8-color SGR palette, the handful
// of text attributes, cursor positioning and screen clearing. `terminal`
// answers the only question ink ever asks the environment: how big is the
// terminal right now?
//
// Nothing in this crate keeps state between calls. Sizes are queried fresh
// every time because the user can resize the window between two writes.

pub mod ansi;
pub mod terminal;

pub use ansi::{Attr, Color, Sgr, Style};
pub use terminal::{Size, SizeError, SizeProvider};
