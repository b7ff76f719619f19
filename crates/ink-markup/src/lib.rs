// SPDX-License-Identifier: MIT
//
// ink-markup — inline style tags for terminal output.
//
// Callers write `"{Rerror:{0 %v"` and get bold red "error:" followed by
// the substituted argument. The pieces:
//
//   table  → the validated tag vocabulary, built once per process
//   args   → `%`-directive substitution
//   render → TagProcessor, the two-pass renderer, and the `tagged!` macro
//   paint  → helpers that style whole strings without markup

pub mod args;
pub mod paint;
pub mod render;
pub mod table;

pub use render::TagProcessor;
pub use table::{Tag, TagAction, TagTable, TagTableBuilder, TagTableError};
