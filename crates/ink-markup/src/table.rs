// SPDX-License-Identifier: MIT
//
// The tag table — which markers exist and what each one expands to.
//
// A table is built once, validated, and then only read. Replacement text is
// computed at build time so rendering is a lookup plus a copy.
//
// Validation rules (enforced by `TagTableBuilder::build`):
//
//   - every key starts with the table's prefix character and has at least
//     one code character after it
//   - no two entries share a key
//   - no key is a proper prefix of another key, so `{r` can never swallow
//     the start of a longer marker
//   - no key occurs inside any replacement text, so expanding one tag can
//     never manufacture another
//
// The standard vocabulary:
//
//   {a {r {g {y {b {m {c {w      foreground black … white
//   {A {R {G {Y {B {M {C {W      bold + foreground
//   {_a … {_w                    background
//   {_A … {_W                    bold + background
//   {i  {u                       italic, underline
//   {0                           reset everything
//   {s                           clear screen

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use ink_term::ansi::{self, Attr, Color, Sgr, Style};
use thiserror::Error;

/// Prefix character of the standard vocabulary.
pub const TAG_PREFIX: char = '{';

/// Marker between the prefix and the letter of background tags.
const BACKGROUND_MARK: char = '_';

// ─── Actions ────────────────────────────────────────────────────────────────

/// What a tag does when expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    /// Apply a style (attributes, then foreground, then background).
    Style(Style),
    /// Reset every attribute and color (SGR 0).
    Reset,
    /// Clear the screen (ED 2).
    ClearScreen,
}

impl TagAction {
    /// The escape sequence this action expands to.
    #[must_use]
    pub fn escape(&self) -> String {
        match self {
            Self::Style(style) => style.escape(),
            Self::Reset => ansi::param_escape(Sgr::Reset),
            Self::ClearScreen => ansi::CLEAR_SCREEN.to_owned(),
        }
    }
}

// ─── Tag ────────────────────────────────────────────────────────────────────

/// One entry of a [`TagTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    key: String,
    action: TagAction,
    replacement: String,
}

impl Tag {
    /// The literal marker, prefix included (e.g. `"{R"`).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn action(&self) -> TagAction {
        self.action
    }

    /// The precomputed escape sequence.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

// ─── Errors ─────────────────────────────────────────────────────────────────

/// A tag table that would make expansion ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagTableError {
    #[error("tag key {0:?} has no code after the prefix")]
    EmptyKey(String),

    #[error("tag key {key:?} does not start with the prefix {prefix:?}")]
    MissingPrefix { key: String, prefix: char },

    #[error("tag key {0:?} is defined twice")]
    Duplicate(String),

    #[error("tag key {short:?} is a prefix of {long:?}")]
    PrefixOverlap { short: String, long: String },

    #[error("tag key {key:?} occurs in the expansion of {host:?}")]
    KeyInReplacement { key: String, host: String },
}

// ─── Builder ────────────────────────────────────────────────────────────────

/// Collects entries and validates them into a [`TagTable`].
///
/// ```
/// use ink_markup::table::{TagAction, TagTableBuilder};
/// use ink_term::ansi::{Color, Style};
///
/// let table = TagTableBuilder::new('<')
///     .insert("<err", TagAction::Style(Style::fg(Color::Red).bold()))
///     .insert("<end", TagAction::Reset)
///     .build()
///     .unwrap();
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TagTableBuilder {
    prefix: char,
    entries: Vec<(String, TagAction)>,
}

impl TagTableBuilder {
    /// An empty builder for keys starting with `prefix`.
    #[must_use]
    pub const fn new(prefix: char) -> Self {
        Self {
            prefix,
            entries: Vec::new(),
        }
    }

    /// The standard `{` vocabulary, ready to extend or build.
    #[must_use]
    pub fn standard() -> Self {
        let mut b = Self::new(TAG_PREFIX);

        for color in Color::ALL {
            let lower = color_letter(color);
            let upper = lower.to_ascii_uppercase();

            b = b
                .insert(format!("{TAG_PREFIX}{lower}"), TagAction::Style(Style::fg(color)))
                .insert(
                    format!("{TAG_PREFIX}{upper}"),
                    TagAction::Style(Style::fg(color).bold()),
                )
                .insert(
                    format!("{TAG_PREFIX}{BACKGROUND_MARK}{lower}"),
                    TagAction::Style(Style::bg(color)),
                )
                .insert(
                    format!("{TAG_PREFIX}{BACKGROUND_MARK}{upper}"),
                    TagAction::Style(Style::bg(color).bold()),
                );
        }

        b.insert(format!("{TAG_PREFIX}i"), TagAction::Style(Style::attrs(Attr::ITALIC)))
            .insert(format!("{TAG_PREFIX}u"), TagAction::Style(Style::attrs(Attr::UNDERLINE)))
            .insert(format!("{TAG_PREFIX}0"), TagAction::Reset)
            .insert(format!("{TAG_PREFIX}s"), TagAction::ClearScreen)
    }

    /// Add an entry. Problems are reported by [`build`](Self::build).
    #[must_use]
    pub fn insert(mut self, key: impl Into<String>, action: TagAction) -> Self {
        self.entries.push((key.into(), action));
        self
    }

    /// Validate the entries and freeze them into a table.
    ///
    /// # Errors
    ///
    /// Returns the first [`TagTableError`] found.
    pub fn build(self) -> Result<TagTable, TagTableError> {
        let table = self.assemble();
        table.validate()?;
        tracing::debug!(tags = table.len(), prefix = %table.prefix, "tag table built");
        Ok(table)
    }

    /// Compute replacements and index the keys, without validation.
    fn assemble(self) -> TagTable {
        let mut tags = Vec::with_capacity(self.entries.len());
        let mut index = HashMap::with_capacity(self.entries.len());
        let mut max_key_len = 0;

        for (key, action) in self.entries {
            max_key_len = max_key_len.max(key.len());
            index.entry(key.clone()).or_insert(tags.len());
            tags.push(Tag {
                replacement: action.escape(),
                key,
                action,
            });
        }

        TagTable {
            prefix: self.prefix,
            tags,
            index,
            max_key_len,
        }
    }
}

/// Letter used for `color` in the standard vocabulary. Black is `a`
/// because `b` is taken by blue.
#[must_use]
pub const fn color_letter(color: Color) -> char {
    match color {
        Color::Black => 'a',
        Color::Red => 'r',
        Color::Green => 'g',
        Color::Yellow => 'y',
        Color::Blue => 'b',
        Color::Magenta => 'm',
        Color::Cyan => 'c',
        Color::White => 'w',
    }
}

// ─── Table ──────────────────────────────────────────────────────────────────

/// An immutable, validated set of tags.
#[derive(Debug, Clone)]
pub struct TagTable {
    prefix: char,
    tags: Vec<Tag>,
    index: HashMap<String, usize>,
    max_key_len: usize,
}

// Validity of the fixed vocabulary is covered by the
// `standard_vocabulary_passes_validation` test.
static STANDARD: LazyLock<Arc<TagTable>> =
    LazyLock::new(|| Arc::new(TagTableBuilder::standard().assemble()));

impl TagTable {
    /// The process-wide standard table, built on first use.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// A shared handle to the standard table.
    pub(crate) fn standard_shared() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    #[must_use]
    pub const fn prefix(&self) -> char {
        self.prefix
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Look up a tag by its exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.index.get(key).map(|&i| &self.tags[i])
    }

    /// Tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// The longest tag whose key starts `text`, if any.
    ///
    /// Candidates are tried from the longest key length down, so a longer
    /// marker always wins over a shorter one sharing its start.
    #[must_use]
    pub fn match_at(&self, text: &str) -> Option<&Tag> {
        if !text.starts_with(self.prefix) {
            return None;
        }
        let min = self.prefix.len_utf8() + 1;
        (min..=self.max_key_len.min(text.len()))
            .rev()
            .filter_map(|len| text.get(..len))
            .find_map(|candidate| self.get(candidate))
    }

    fn validate(&self) -> Result<(), TagTableError> {
        for tag in &self.tags {
            let Some(code) = tag.key.strip_prefix(self.prefix) else {
                return Err(TagTableError::MissingPrefix {
                    key: tag.key.clone(),
                    prefix: self.prefix,
                });
            };
            if code.is_empty() {
                return Err(TagTableError::EmptyKey(tag.key.clone()));
            }
        }

        for (i, short) in self.tags.iter().enumerate() {
            for (j, other) in self.tags.iter().enumerate() {
                if i != j && short.key == other.key {
                    return Err(TagTableError::Duplicate(short.key.clone()));
                }
                if short.key != other.key && other.key.starts_with(&short.key) {
                    return Err(TagTableError::PrefixOverlap {
                        short: short.key.clone(),
                        long: other.key.clone(),
                    });
                }
                if other.replacement.contains(&short.key) {
                    return Err(TagTableError::KeyInReplacement {
                        key: short.key.clone(),
                        host: other.key.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
