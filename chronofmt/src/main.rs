//! chronofmt - render timestamps as human-friendly display strings
//!
//! Reads timestamps from arguments (or stdin, one per line) and prints each
//! in the requested format.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Logs: $XDG_STATE_HOME/chronofmt/chronofmt.log.YYYY-MM-DD (rotated daily)
//! - Config: $XDG_CONFIG_HOME/chronofmt/config.toml (~/.config/chronofmt/config.toml)

use anyhow::{Context, Result};
use chronofmt_core::{Config, FixedClock, FormatKind, Formatter, RawTime, Zone};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "chronofmt")]
#[command(about = "Render timestamps as relative, calendar-aware display strings")]
#[command(version)]
struct Args {
    /// Timestamps to format (RFC 3339, naive ISO-8601, or YYYY-MM-DD).
    /// Reads one per line from stdin when omitted
    times: Vec<String>,

    /// Display format (relative, relative-day, short-date, short-date-with-time,
    /// time-only, short-date-with-weekday-relative, long-date)
    #[arg(short, long, default_value = "relative")]
    format: FormatKind,

    /// Render every format for each timestamp
    #[arg(long, conflicts_with = "format")]
    all: bool,

    /// Pretend the current time is this timestamp
    #[arg(long)]
    now: Option<String>,

    /// Viewer timezone: local, utc, or an offset like +05:30 (overrides config)
    #[arg(long)]
    tz: Option<Zone>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Output::Text)]
    output: Output,

    /// Re-render every N seconds until Ctrl+C
    #[arg(short, long)]
    watch: Option<u64>,

    /// Stop watch mode after this many renders
    #[arg(long, requires = "watch")]
    ticks: Option<u64>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    Text,
    Json,
}

#[derive(Serialize)]
struct Rendered<'a> {
    input: &'a str,
    format: FormatKind,
    display: String,
}

#[derive(Serialize)]
struct RenderedAll<'a> {
    input: &'a str,
    formats: BTreeMap<&'static str, String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging
    let _log_guard =
        chronofmt_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("chronofmt starting");

    let formatter = build_formatter(&config, &args)?;

    let times = if args.times.is_empty() {
        read_stdin().context("failed to read timestamps from stdin")?
    } else {
        args.times.clone()
    };

    match args.watch {
        Some(secs) => run_watch_mode(&formatter, &args, &times, secs),
        None => render(&formatter, &args, &times),
    }
}

fn build_formatter(config: &Config, args: &Args) -> Result<Formatter> {
    let mut formatter = Formatter::from_config(config).context("invalid configuration")?;

    if let Some(zone) = args.tz {
        formatter = formatter.with_zone(zone);
    }

    if let Some(ref now) = args.now {
        let pinned = formatter
            .parse(&RawTime::from(now))
            .with_context(|| format!("--now is not a valid timestamp: {:?}", now))?;
        formatter = formatter.with_clock(FixedClock(pinned));
    }

    tracing::debug!(formatter = ?formatter, "formatter ready");
    Ok(formatter)
}

fn read_stdin() -> Result<Vec<String>> {
    let mut times = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            times.push(trimmed.to_string());
        }
    }
    Ok(times)
}

fn render(formatter: &Formatter, args: &Args, times: &[String]) -> Result<()> {
    for input in times {
        match (args.all, args.output) {
            (false, Output::Text) => println!("{}", formatter.format(input, args.format)),
            (false, Output::Json) => {
                let rendered = Rendered {
                    input,
                    format: args.format,
                    display: formatter.format(input, args.format),
                };
                println!("{}", serde_json::to_string(&rendered)?);
            }
            (true, Output::Text) => {
                println!("{}", input);
                for (kind, display) in formatter.format_all(input) {
                    println!("  {:<34} {}", kind.as_str(), display);
                }
            }
            (true, Output::Json) => {
                let rendered = RenderedAll {
                    input,
                    formats: formatter
                        .format_all(input)
                        .into_iter()
                        .map(|(kind, display)| (kind.as_str(), display))
                        .collect(),
                };
                println!("{}", serde_json::to_string(&rendered)?);
            }
        }
    }
    Ok(())
}

/// Run continuous watch mode
fn run_watch_mode(formatter: &Formatter, args: &Args, times: &[String], secs: u64) -> Result<()> {
    // Set up signal handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        eprintln!("\nShutting down...");
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    let interval = Duration::from_secs(secs.max(1));
    let mut iteration = 0u64;

    while running.load(Ordering::SeqCst) {
        iteration += 1;
        render(formatter, args, times)?;
        tracing::debug!(iteration, "watch render");

        if args.ticks.is_some_and(|limit| iteration >= limit) {
            break;
        }
        thread::sleep(interval);
    }

    tracing::info!(iteration, "chronofmt watch mode stopped");
    Ok(())
}
