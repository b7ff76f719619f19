// SPDX-License-Identifier: MIT
//
// Coordinates — absolute cells or a percentage of the terminal.
//
// A coordinate component is either an absolute 1-based cell index or a
// percentage of the terminal's extent on that axis. Rows have one extra
// choice: `Below`, meaning the first row after everything currently
// buffered.
//
// Percentages are resolved at the moment of use with a fresh size query:
//
//   resolved = floor(value × extent / 100)
//
// Percent values are a `u8`, so 0–255 is accepted even though only 0–100
// makes sense. Nothing is clamped: a resolved coordinate may lie past the
// terminal edge and the terminal gets to clip or wrap it.
//
// If the size query fails, percentage resolution is refused with
// `ResolveError::UnknownExtent`. Absolute and `Below` components never
// need the size and never fail.

use std::fmt;
use std::str::FromStr;

use ink_term::terminal::{SizeError, SizeProvider};
use thiserror::Error;

/// One coordinate component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coord {
    /// A 1-based cell index, used as-is.
    Absolute(i32),
    /// A percentage of the terminal extent on this axis.
    Percent(u8),
}

impl Coord {
    /// Shorthand for [`Coord::Percent`].
    #[must_use]
    pub const fn pct(value: u8) -> Self {
        Self::Percent(value)
    }

    const fn is_percent(self) -> bool {
        matches!(self, Self::Percent(_))
    }

    /// Resolve against `extent`, which is ignored for absolute values.
    fn resolve(self, extent: u16) -> i32 {
        match self {
            Self::Absolute(v) => v,
            Self::Percent(p) => i32::from(p) * i32::from(extent) / 100,
        }
    }
}

impl From<i32> for Coord {
    fn from(value: i32) -> Self {
        Self::Absolute(value)
    }
}

/// A row component: a coordinate or "just below the buffered content".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    At(Coord),
    /// The row after the last buffered line break.
    Below,
}

impl From<Coord> for Row {
    fn from(coord: Coord) -> Self {
        Self::At(coord)
    }
}

impl From<i32> for Row {
    fn from(value: i32) -> Self {
        Self::At(Coord::Absolute(value))
    }
}

/// Text that is neither `N`, `N%` nor (for rows) `below`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid coordinate {0:?} (expected `N`, `N%` with N in 0–255, or `below` for rows)")]
pub struct ParseCoordError(String);

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// `"12"` is absolute, `"50%"` is a percentage.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ParseCoordError(s.to_owned());
        match s.strip_suffix('%') {
            Some(pct) => pct.trim().parse().map(Self::Percent).map_err(|_| invalid()),
            None => s.parse().map(Self::Absolute).map_err(|_| invalid()),
        }
    }
}

impl FromStr for Row {
    type Err = ParseCoordError;

    /// Like [`Coord`], plus `"below"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("below") {
            Ok(Self::Below)
        } else {
            s.parse().map(Self::At)
        }
    }
}

/// Which axis a percentage belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "column",
            Self::Y => "row",
        })
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot resolve {axis} percentage: terminal size unknown ({source})")]
    UnknownExtent {
        axis: Axis,
        #[source]
        source: SizeError,
    },
}

/// Resolve `(x, y)` to absolute 1-based cell coordinates.
///
/// `current_height` is the number of line breaks already buffered; it
/// only matters for [`Row::Below`], which resolves to `current_height + 1`.
/// The size provider is queried once, and only if a percentage is present.
///
/// # Errors
///
/// [`ResolveError::UnknownExtent`] if a percentage is present and the
/// terminal size cannot be determined.
pub fn resolve(
    size: &impl SizeProvider,
    x: Coord,
    y: Row,
    current_height: usize,
) -> Result<(i32, i32), ResolveError> {
    let y_percent = matches!(y, Row::At(c) if c.is_percent());

    let (cols, rows) = if x.is_percent() || y_percent {
        match size.query_size() {
            Ok(s) => (s.cols, s.rows),
            Err(source) => {
                let axis = if x.is_percent() { Axis::X } else { Axis::Y };
                tracing::debug!(%axis, error = %source, "terminal size unknown, percentage refused");
                return Err(ResolveError::UnknownExtent { axis, source });
            }
        }
    } else {
        (0, 0)
    };

    let abs_y = match y {
        Row::At(c) => c.resolve(rows),
        Row::Below => i32::try_from(current_height)
            .unwrap_or(i32::MAX)
            .saturating_add(1),
    };

    Ok((x.resolve(cols), abs_y))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ink_term::terminal::{Fixed, Size, Unavailable};

    const TERM: Fixed = Fixed(Size::new(100, 40));

    #[test]
    fn absolute_passes_through() {
        assert_eq!(resolve(&TERM, Coord::Absolute(3), Row::from(7), 0).unwrap(), (3, 7));
    }

    #[test]
    fn absolute_is_not_clamped() {
        assert_eq!(
            resolve(&TERM, Coord::Absolute(5000), Row::from(-2), 0).unwrap(),
            (5000, -2)
        );
    }

    #[test]
    fn absolute_never_queries_size() {
        assert_eq!(resolve(&Unavailable, Coord::Absolute(1), Row::from(2), 0).unwrap(), (1, 2));
    }

    #[test]
    fn percent_of_width() {
        let (x, _) = resolve(&TERM, Coord::pct(50), Row::from(1), 0).unwrap();
        assert_eq!(x, 50);
    }

    #[test]
    fn percent_of_height() {
        let (_, y) = resolve(&TERM, Coord::Absolute(1), Coord::pct(25).into(), 0).unwrap();
        assert_eq!(y, 10);
    }

    #[test]
    fn percent_floors() {
        let term = Fixed(Size::new(33, 7));
        assert_eq!(
            resolve(&term, Coord::pct(50), Coord::pct(50).into(), 0).unwrap(),
            (16, 3)
        );
    }

    #[test]
    fn percent_above_hundred_is_not_clamped() {
        let (x, _) = resolve(&TERM, Coord::pct(255), Row::from(1), 0).unwrap();
        assert_eq!(x, 255);
    }

    #[test]
    fn below_is_height_plus_one() {
        assert_eq!(resolve(&TERM, Coord::Absolute(1), Row::Below, 3).unwrap(), (1, 4));
        assert_eq!(resolve(&TERM, Coord::Absolute(1), Row::Below, 0).unwrap(), (1, 1));
    }

    #[test]
    fn below_works_without_size() {
        assert_eq!(resolve(&Unavailable, Coord::Absolute(2), Row::Below, 9).unwrap(), (2, 10));
    }

    #[test]
    fn percent_without_size_is_refused() {
        let err = resolve(&Unavailable, Coord::pct(50), Row::from(1), 0).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownExtent { axis: Axis::X, .. }));

        let err = resolve(&Unavailable, Coord::Absolute(1), Coord::pct(50).into(), 0).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownExtent { axis: Axis::Y, .. }));
    }

    #[test]
    fn parse_coordinates() {
        assert_eq!("12".parse::<Coord>().unwrap(), Coord::Absolute(12));
        assert_eq!("-3".parse::<Coord>().unwrap(), Coord::Absolute(-3));
        assert_eq!("50%".parse::<Coord>().unwrap(), Coord::Percent(50));
        assert_eq!(" 255% ".parse::<Coord>().unwrap(), Coord::Percent(255));
        assert!("256%".parse::<Coord>().is_err());
        assert!("below".parse::<Coord>().is_err());
        assert!("".parse::<Coord>().is_err());
    }

    #[test]
    fn parse_rows() {
        assert_eq!("below".parse::<Row>().unwrap(), Row::Below);
        assert_eq!("Below".parse::<Row>().unwrap(), Row::Below);
        assert_eq!("10%".parse::<Row>().unwrap(), Row::At(Coord::Percent(10)));
        assert_eq!("4".parse::<Row>().unwrap(), Row::At(Coord::Absolute(4)));
        assert!("above".parse::<Row>().is_err());
    }

    #[test]
    fn error_message_names_the_axis() {
        let err = resolve(&Unavailable, Coord::Absolute(1), Coord::pct(10).into(), 0).unwrap_err();
        assert!(err.to_string().contains("row percentage"));
    }
}
