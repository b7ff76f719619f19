// SPDX-License-Identifier: MIT
//
// Screen configuration.
//
// | Variable              | Values                  | Default |
// |-----------------------|-------------------------|---------|
// | `INK_SIZE_SOURCE`     | `ioctl`, `stty`         | `ioctl` |
// | `INK_UNBOUNDED_FLUSH` | set and not `0`/`false` | unset   |
// | `NO_COLOR`            | any non-empty value     | unset   |
//
// `NO_COLOR` follows https://no-color.org: when present, tags are stripped
// instead of expanded. Command-line flags in the `ink` binary override the
// environment.

use std::fmt;
use std::str::FromStr;

use ink_markup::TagProcessor;
use ink_term::terminal::{self, Ioctl, SizeProvider, Stty};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown size source {0:?} (expected `ioctl` or `stty`)")]
    UnknownSizeSource(String),

    #[error("unknown color mode {0:?} (expected `auto`, `always` or `never`)")]
    UnknownColorMode(String),
}

// ─── Size source ────────────────────────────────────────────────────────────

/// How the terminal size is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeSource {
    /// `ioctl(TIOCGWINSZ)` on stdout.
    #[default]
    Ioctl,
    /// The external `stty size` command.
    Stty,
}

impl SizeSource {
    #[must_use]
    pub fn provider(self) -> Box<dyn SizeProvider> {
        match self {
            Self::Ioctl => Box::new(Ioctl),
            Self::Stty => Box::new(Stty),
        }
    }
}

impl FromStr for SizeSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ioctl" => Ok(Self::Ioctl),
            "stty" => Ok(Self::Stty),
            _ => Err(ConfigError::UnknownSizeSource(s.to_owned())),
        }
    }
}

impl fmt::Display for SizeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ioctl => "ioctl",
            Self::Stty => "stty",
        })
    }
}

// ─── Color mode ─────────────────────────────────────────────────────────────

/// Whether tags expand to escapes or are stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Expand when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Whether output should be plain, given whether stdout is a terminal.
    #[must_use]
    pub const fn is_plain(self, stdout_is_tty: bool) -> bool {
        match self {
            Self::Auto => !stdout_is_tty,
            Self::Always => false,
            Self::Never => true,
        }
    }
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err(ConfigError::UnknownColorMode(s.to_owned())),
        }
    }
}

// ─── ScreenConfig ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    pub size_source: SizeSource,
    /// Stop flushing once the terminal height is reached.
    pub bounded_flush: bool,
    pub color: ColorMode,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            size_source: SizeSource::Ioctl,
            bounded_flush: true,
            color: ColorMode::Auto,
        }
    }
}

impl ScreenConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable holds an unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable holds an unknown value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(source) = lookup("INK_SIZE_SOURCE") {
            config.size_source = source.parse()?;
        }
        if let Some(flag) = lookup("INK_UNBOUNDED_FLUSH") {
            config.bounded_flush = matches!(flag.trim(), "" | "0" | "false");
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.color = ColorMode::Never;
        }

        tracing::trace!(?config, "screen config loaded");
        Ok(config)
    }

    /// A tag processor matching the color mode and the real stdout.
    #[must_use]
    pub fn processor(&self) -> TagProcessor {
        TagProcessor::standard().plain(self.color.is_plain(terminal::stdout_is_tty()))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
