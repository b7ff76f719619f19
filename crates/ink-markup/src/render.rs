// SPDX-License-Identifier: MIT
//
// TagProcessor — templates in, escape-laden strings out.
//
// Rendering is two passes over disjoint syntaxes:
//
//   1. `%`-directives are replaced by the positional arguments (see `args`).
//   2. `{`-tags are replaced by their escape sequences.
//
// Because arguments are substituted first, an argument that contains a tag
// marker is expanded like the template's own tags. Callers printing
// untrusted text should pass it through `strip` or render it separately.
//
// Tags are matched left to right, longest key first at each prefix
// character. Anything that looks like a tag but is not in the table is
// copied through unchanged. Styles are never closed implicitly: a template
// that opens `{R` without a closing `{0` leaks bold red into whatever is
// printed next.

use std::fmt::Display;
use std::sync::Arc;

use crate::args;
use crate::table::{Tag, TagTable};

/// Expands tag markup using a [`TagTable`].
#[derive(Debug, Clone)]
pub struct TagProcessor {
    table: Arc<TagTable>,
    plain: bool,
}

impl Default for TagProcessor {
    fn default() -> Self {
        Self::standard()
    }
}

impl TagProcessor {
    /// A processor over the standard `{` vocabulary.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(TagTable::standard_shared())
    }

    /// A processor over a custom table, owned or shared.
    #[must_use]
    pub fn new(table: impl Into<Arc<TagTable>>) -> Self {
        Self {
            table: table.into(),
            plain: false,
        }
    }

    /// In plain mode recognized tags are removed instead of expanded.
    #[must_use]
    pub const fn plain(mut self, plain: bool) -> Self {
        self.plain = plain;
        self
    }

    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.plain
    }

    #[must_use]
    pub fn table(&self) -> &TagTable {
        &self.table
    }

    /// Substitute `args` into `template`, then expand its tags.
    ///
    /// ```
    /// use ink_markup::TagProcessor;
    ///
    /// let p = TagProcessor::standard();
    /// assert_eq!(p.render("{R%v{0", &[&"hi"]), "\x1b[1m\x1b[31mhi\x1b[0m");
    /// ```
    #[must_use]
    pub fn render(&self, template: &str, args: &[&dyn Display]) -> String {
        let substituted = args::substitute(template, args);
        self.expand(&substituted)
    }

    /// Expand tags only; `%` is left alone.
    #[must_use]
    pub fn expand(&self, text: &str) -> String {
        if self.plain {
            self.replace(text, |_| "")
        } else {
            self.replace(text, Tag::replacement)
        }
    }

    /// Remove every recognized tag, regardless of mode.
    #[must_use]
    pub fn strip(&self, text: &str) -> String {
        self.replace(text, |_| "")
    }

    fn replace<'t>(&'t self, text: &str, with: impl Fn(&'t Tag) -> &'t str) -> String {
        let prefix = self.table.prefix();
        let mut out = String::with_capacity(text.len() + text.len() / 2);
        let mut rest = text;

        while let Some(pos) = rest.find(prefix) {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if let Some(tag) = self.table.match_at(tail) {
                out.push_str(with(tag));
                rest = &tail[tag.key().len()..];
            } else {
                let step = prefix.len_utf8();
                out.push_str(&tail[..step]);
                rest = &tail[step..];
            }
        }

        out.push_str(rest);
        out
    }
}

/// Render with the standard processor: `tagged!("{G%v{0", name)`.
#[macro_export]
macro_rules! tagged {
    ($template:expr $(,)?) => {
        $crate::TagProcessor::standard().render($template, &[])
    };
    ($template:expr, $($arg:expr),+ $(,)?) => {
        $crate::TagProcessor::standard()
            .render($template, &[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{TagAction, TagTableBuilder};
    use ink_term::ansi::{Color, Style};
    use pretty_assertions::assert_eq;

    fn expand(text: &str) -> String {
        TagProcessor::standard().expand(text)
    }

    #[test]
    fn every_standard_tag_expands_to_its_replacement() {
        for tag in TagTable::standard().iter() {
            let text = format!("before {} after", tag.key());
            let want = format!("before {} after", tag.replacement());
            assert_eq!(expand(&text), want, "tag {:?}", tag.key());
        }
    }

    #[test]
    fn every_occurrence_is_replaced() {
        assert_eq!(expand("{ra{rb{r"), "\x1b[31ma\x1b[31mb\x1b[31m");
    }

    #[test]
    fn text_without_tags_is_unchanged() {
        assert_eq!(expand("nothing to see here"), "nothing to see here");
        assert_eq!(expand(""), "");
    }

    #[test]
    fn unknown_tags_pass_through() {
        assert_eq!(expand("{x {_z {} {"), "{x {_z {} {");
    }

    #[test]
    fn doubled_prefix_keeps_first_brace() {
        assert_eq!(expand("{{r"), "{\x1b[31m");
    }

    #[test]
    fn background_is_not_mistaken_for_foreground() {
        assert_eq!(expand("{_r"), "\x1b[41m");
        assert_eq!(expand("{_R"), "\x1b[1m\x1b[41m");
        assert_eq!(expand("{r_"), "\x1b[31m_");
    }

    #[test]
    fn reset_is_never_implied() {
        assert_eq!(expand("{gok"), "\x1b[32mok");
    }

    #[test]
    fn explicit_reset() {
        assert_eq!(expand("{Gok{0 done"), "\x1b[1m\x1b[32mok\x1b[0m done");
    }

    #[test]
    fn multibyte_text_around_tags() {
        assert_eq!(expand("→{c中{0←"), "→\x1b[36m中\x1b[0m←");
    }

    #[test]
    fn render_without_tags_equals_substitution() {
        let p = TagProcessor::standard();
        assert_eq!(p.render("%v + %v = %d", &[&1, &2, &3]), "1 + 2 = 3");
    }

    #[test]
    fn render_substitutes_then_expands() {
        let p = TagProcessor::standard();
        assert_eq!(p.render("{y%v{0", &[&"warn"]), "\x1b[33mwarn\x1b[0m");
    }

    #[test]
    fn arguments_containing_tags_are_expanded() {
        let p = TagProcessor::standard();
        assert_eq!(p.render("%v", &[&"{b"]), "\x1b[34m");
    }

    #[test]
    fn percent_in_tags_is_not_a_directive() {
        let p = TagProcessor::standard();
        assert_eq!(p.render("{u100%%{0", &[]), "\x1b[4m100%\x1b[0m");
    }

    #[test]
    fn plain_mode_removes_tags() {
        let p = TagProcessor::standard().plain(true);
        assert!(p.is_plain());
        assert_eq!(p.render("{R%v{0 and {q", &[&"x"]), "x and {q");
    }

    #[test]
    fn strip_ignores_mode() {
        let p = TagProcessor::standard();
        assert_eq!(p.strip("{_Bblue{0"), "blue");
    }

    #[test]
    fn custom_table() {
        let table = TagTableBuilder::new('<')
            .insert("<ok", TagAction::Style(Style::fg(Color::Green)))
            .insert("<end", TagAction::Reset)
            .build()
            .unwrap();
        let p = TagProcessor::new(table);
        assert_eq!(p.expand("<ok>yes<end <no"), "\x1b[32m>yes\x1b[0m <no");
    }

    #[test]
    fn processors_share_one_table() {
        let table = Arc::new(
            TagTableBuilder::new('<')
                .insert("<hi", TagAction::Style(Style::new().bold()))
                .build()
                .unwrap(),
        );
        let colored = TagProcessor::new(Arc::clone(&table));
        let plain = TagProcessor::new(Arc::clone(&table)).plain(true);
        assert_eq!(colored.expand("<hix"), "\x1b[1mx");
        assert_eq!(plain.expand("<hix"), "x");
        assert_eq!(Arc::strong_count(&table), 3);
    }

    #[test]
    fn standard_processors_use_the_global_table() {
        let p = TagProcessor::standard();
        assert!(std::ptr::eq(p.table(), TagTable::standard()));
    }

    #[test]
    fn tagged_macro() {
        assert_eq!(crate::tagged!("{M%v{0", "hi"), "\x1b[1m\x1b[35mhi\x1b[0m");
        assert_eq!(crate::tagged!("{s"), "\x1b[2J");
        assert_eq!(crate::tagged!("%v/%v", 1, 2,), "1/2");
    }
}
