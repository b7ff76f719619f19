// SPDX-License-Identifier: MIT
//
// Positional `%` argument substitution.
//
// Templates use `%`-directives for arguments and `{`-tags for styles. The
// two syntaxes never overlap, so substitution runs as its own pass before
// tag expansion and neither pass can misread the other's markers.
//
// Directive grammar:
//
//   %[-][0][width]verb
//
//   verb  v | s | d   next argument, formatted with `Display`
//         %           a literal percent sign (consumes nothing)
//
//   -     pad on the right instead of the left
//   0     pad with zeros (after any sign) instead of spaces
//   width minimum display width in terminal columns
//
// Mistakes are rendered inline, never reported as errors:
//
//   %!v(MISSING)     more directives than arguments
//   %!q(value)       unknown verb (the argument is still consumed)
//   %!(EXTRA a, b)   arguments left over at the end
//   %!(NOVERB)       template ends right after a `%`

use std::fmt::Display;
use std::iter::Peekable;
use std::str::Chars;

use unicode_width::UnicodeWidthStr;

/// Substitute `args` into the `%`-directives of `template`.
///
/// ```
/// use ink_markup::args::substitute;
///
/// assert_eq!(substitute("%v of %d", &[&"3", &7]), "3 of 7");
/// assert_eq!(substitute("[%-4v]", &[&"ab"]), "[ab  ]");
/// assert_eq!(substitute("100%%", &[]), "100%");
/// ```
#[must_use]
pub fn substitute(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }

        let directive = Directive::parse(&mut chars);
        match directive.verb {
            None => out.push_str("%!(NOVERB)"),
            Some('%') => out.push('%'),
            Some(verb @ ('v' | 's' | 'd')) => match next.next() {
                Some(arg) => directive.pad_into(&mut out, &arg.to_string()),
                None => out.push_str(&format!("%!{verb}(MISSING)")),
            },
            Some(verb) => match next.next() {
                Some(arg) => out.push_str(&format!("%!{verb}({arg})")),
                None => out.push_str(&format!("%!{verb}(MISSING)")),
            },
        }
    }

    let extra: Vec<String> = next.map(ToString::to_string).collect();
    if !extra.is_empty() {
        out.push_str(&format!("%!(EXTRA {})", extra.join(", ")));
    }

    out
}

/// A parsed directive: flags, width and verb.
#[derive(Debug, Default, PartialEq, Eq)]
struct Directive {
    left: bool,
    zero: bool,
    width: usize,
    verb: Option<char>,
}

impl Directive {
    /// Parse everything after the `%`, leaving the iterator past the verb.
    fn parse(chars: &mut Peekable<Chars<'_>>) -> Self {
        let mut directive = Self::default();

        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => directive.left = true,
                '0' => directive.zero = true,
                _ => break,
            }
            chars.next();
        }

        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            directive.width = directive.width.saturating_mul(10).saturating_add(digit as usize);
            chars.next();
        }

        directive.verb = chars.next();
        directive
    }

    /// Append `value` padded to the requested display width.
    fn pad_into(&self, out: &mut String, value: &str) {
        let fill = self.width.saturating_sub(value.width());
        if fill == 0 {
            out.push_str(value);
            return;
        }

        if self.left {
            out.push_str(value);
            push_repeat(out, ' ', fill);
        } else if self.zero {
            let (sign, digits) = match value.chars().next() {
                Some(c @ ('-' | '+')) => (Some(c), &value[1..]),
                _ => (None, value),
            };
            if let Some(sign) = sign {
                out.push(sign);
            }
            push_repeat(out, '0', fill);
            out.push_str(digits);
        } else {
            push_repeat(out, ' ', fill);
            out.push_str(value);
        }
    }
}

fn push_repeat(out: &mut String, ch: char, n: usize) {
    out.extend(std::iter::repeat_n(ch, n));
}

// ─── Tests ───────────────────────────────────────────────────────────────────
