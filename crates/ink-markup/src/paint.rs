// SPDX-License-Identifier: MIT
//
// String painters — style a whole string without writing any markup.
//
// Each painter works line by line: every `\n`-separated line is wrapped in
// its own style + reset, so a styled block never bleeds into the next line
// when lines are later positioned independently.

use ink_term::ansi::{self, Color, RESET, Style};
use unicode_segmentation::UnicodeSegmentation;

/// Apply `f` to every line of `text`, keeping the line breaks.
fn per_line(text: &str, f: impl Fn(&str) -> String) -> String {
    text.split('\n').map(f).collect::<Vec<_>>().join("\n")
}

/// Wrap every line of `text` in `style` and a trailing reset.
#[must_use]
pub fn styled(text: &str, style: Style) -> String {
    let open = style.escape();
    per_line(text, |line| format!("{open}{line}{RESET}"))
}

/// Foreground color for every line.
#[must_use]
pub fn color(text: &str, color: Color) -> String {
    styled(text, Style::fg(color))
}

/// Background color for every line.
#[must_use]
pub fn background(text: &str, color: Color) -> String {
    styled(text, Style::bg(color))
}

/// Bold every line.
#[must_use]
pub fn bold(text: &str) -> String {
    styled(text, Style::new().bold())
}

/// Color every occurrence of `needle` inside `text`.
///
/// ```
/// use ink_markup::paint::highlight;
/// use ink_term::ansi::Color;
///
/// assert_eq!(
///     highlight("a-b-a", "a", Color::Red),
///     "\x1b[31ma\x1b[0m-b-\x1b[31ma\x1b[0m",
/// );
/// ```
#[must_use]
pub fn highlight(text: &str, needle: &str, with: Color) -> String {
    if needle.is_empty() {
        return text.to_owned();
    }
    text.replace(needle, &color(needle, with))
}

/// Color the grapheme clusters `from..to` of `text`.
///
/// Indices count user-perceived characters, not bytes. Bounds past the end
/// are clamped; an empty or inverted range leaves the text unchanged.
#[must_use]
pub fn highlight_region(text: &str, from: usize, to: usize, with: Color) -> String {
    let offsets: Vec<usize> = text
        .grapheme_indices(true)
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    let last = offsets.len() - 1;
    let (from, to) = (from.min(last), to.min(last));
    if from >= to {
        return text.to_owned();
    }

    let (start, end) = (offsets[from], offsets[to]);
    format!(
        "{}{}{}",
        &text[..start],
        color(&text[start..end], with),
        &text[end..]
    )
}

/// Prefix every line with a carriage return and erase-to-end-of-line, so
/// each line overwrites whatever the cursor's row held before.
#[must_use]
pub fn reset_line(text: &str) -> String {
    per_line(text, |line| format!("{}{line}", ansi::LINE_RESET))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
