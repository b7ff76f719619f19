// SPDX-License-Identifier: MIT
//
// ink — render tag markup and place text on the terminal from the shell.
//
// This binary wires the crates together:
//
//   ink-term   → escape encoding, terminal size
//   ink-markup → `{`-tag expansion and `%` argument substitution
//   ink-screen → screen buffer, coordinates, configuration
//
// Every command writes through a single `Screen`, so output obeys the same
// bounded flush as any program built on ink.
//
// Examples:
//
//   ink render '{Rerror:{0 %v not found' config.toml
//   ink strip '{Gok{0'
//   ink place 'centered' --x 50% --y 50%
//   ink tags

use std::fmt::Display;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ink_markup::{TagAction, TagProcessor, TagTable};
use ink_screen::{ColorMode, Coord, Row, Screen, ScreenConfig, SizeSource};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ink", version, about = "Tag-based terminal styling")]
struct Cli {
    /// When to emit escape sequences.
    #[arg(long, global = true, value_name = "auto|always|never")]
    color: Option<ColorMode>,

    /// How to query the terminal size.
    #[arg(long, global = true, value_name = "ioctl|stty")]
    size_source: Option<SizeSource>,

    /// Emit every buffered line, even past the terminal height.
    #[arg(long, global = true)]
    unbounded: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Substitute arguments into a template and expand its tags.
    Render {
        template: String,
        args: Vec<String>,
    },
    /// Print a template with its tags removed.
    Strip { template: String },
    /// Print text at a position (`N`, `N%`, or `below` for --y).
    Place {
        text: String,
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        x: Coord,
        #[arg(long, default_value = "below", allow_hyphen_values = true)]
        y: Row,
    },
    /// List every tag with a sample.
    Tags,
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ink: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by `INK_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("INK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ScreenConfig::from_env().context("invalid environment")?;
    if let Some(color) = cli.color {
        config.color = color;
    }
    if let Some(source) = cli.size_source {
        config.size_source = source;
    }
    if cli.unbounded {
        config.bounded_flush = false;
    }
    tracing::debug!(?config, "starting");

    let tags = config.processor();
    let mut screen = Screen::from_config(&config);

    match cli.command {
        Command::Render { template, args } => {
            let args: Vec<&dyn Display> = args.iter().map(|a| a as &dyn Display).collect();
            screen.write_tagged(&template, &args);
            screen.write_line("");
        }
        Command::Strip { template } => {
            screen.write_line(&tags.strip(&template));
        }
        Command::Place { text, x, y } => {
            screen
                .move_to(&tags.expand(&text), x, y)
                .context("cannot place text")?;
            screen.write_line("");
        }
        Command::Tags => list_tags(&mut screen, tags),
    }

    let report = screen.flush().context("writing output")?;
    if report.dropped > 0 {
        tracing::warn!(dropped = report.dropped, "output truncated at terminal height");
    }
    Ok(())
}

fn list_tags<P, W>(screen: &mut Screen<P, W>, tags: TagProcessor)
where
    P: ink_term::SizeProvider,
    W: std::io::Write,
{
    let reset = tags.expand("{0");
    for tag in TagTable::standard().iter() {
        let sample = match tag.action() {
            // Expanding the sample would wipe the listing.
            TagAction::ClearScreen => "(clears the screen)".to_owned(),
            _ => format!("{}sample{reset}", tags.expand(tag.key())),
        };
        screen.write_line(&format!("{:<4} {sample}", tag.key()));
    }
}
