// SPDX-License-Identifier: MIT
//
// ink-screen — buffered, positioned terminal output.
//
//   coord  → absolute / percentage coordinates and their resolution
//   screen → the line-oriented buffer and its bounded flush
//   config → environment-driven settings for the above
//
// Data flow:
//
//   template ─▶ TagProcessor ─▶ Screen buffer ─▶ flush ─▶ stdout
//                                    ▲
//                 coord::resolve ────┘ (cursor moves)

pub mod config;
pub mod coord;
pub mod screen;

pub use config::{ColorMode, ConfigError, ScreenConfig, SizeSource};
pub use coord::{Coord, ParseCoordError, ResolveError, Row};
pub use screen::{FlushReport, Screen, ScreenError};
