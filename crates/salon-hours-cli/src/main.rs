//! `hours` CLI — parse, check and enumerate business hours from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Convert legacy schedule text to JSON (stdin → stdout)
//! echo 'Sunday: Closed' | hours parse
//!
//! # List skipped lines while converting
//! hours parse -i hours.txt --report
//!
//! # Write a JSON schedule back out as Arabic legacy text
//! hours format -i schedule.json --locale ar
//!
//! # Reject inverted hours and overlapping breaks
//! hours validate -i schedule.json
//!
//! # Is the salon open at this moment?
//! hours check -i schedule.json --at 2026-03-16T09:30
//! hours check -i schedule.json --at 2026-03-16T06:30:00Z --timezone Asia/Riyadh
//!
//! # Does a 45-minute appointment fit?
//! hours fits -i schedule.json --start 2026-03-17T11:30 --duration 45
//!
//! # Bookable start times for a day
//! hours slots -i schedule.json --date 2026-03-16 --duration 45 --step 15
//! ```
//!
//! Schedules may be JSON or legacy text; text starting with `{` is JSON.

mod config;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::{Args, Parser, Subcommand};
use salon_hours::{
    available_slots_with, fits_interval, format_legacy, is_available_at, parse_legacy_report,
    to_business_time, try_available_slots, try_fits_interval, try_is_available_at, Locale,
    ScheduleSource, SlotOptions, WeekSchedule,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::{Config, LOG_ENV};

#[derive(Parser)]
#[command(
    name = "hours",
    version,
    about = "Business hours, appointment fit and bookable slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./hours.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct InputArgs {
    /// Schedule file, JSON or legacy text (reads stdin if omitted)
    #[arg(short, long, visible_alias = "schedule")]
    input: Option<PathBuf>,
}

#[derive(Args)]
struct CheckArgs {
    #[command(flatten)]
    input: InputArgs,
    /// IANA timezone for RFC 3339 datetimes (e.g., "Asia/Riyadh")
    #[arg(long)]
    timezone: Option<String>,
    /// Report schedule errors instead of treating the time as available
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert legacy schedule text to JSON
    Parse {
        #[command(flatten)]
        input: InputArgs,
        /// List skipped lines on stderr
        #[arg(long)]
        report: bool,
    },
    /// Write a schedule as legacy text
    Format {
        #[command(flatten)]
        input: InputArgs,
        /// Output language: en or ar
        #[arg(long, default_value = "en")]
        locale: Locale,
    },
    /// Check a schedule for malformed or inconsistent hours
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Check whether the business is open at a given time
    Check {
        #[command(flatten)]
        args: CheckArgs,
        /// Local datetime (YYYY-MM-DDTHH:MM) or RFC 3339 with offset
        #[arg(long)]
        at: String,
    },
    /// Check whether an appointment fits within opening hours
    Fits {
        #[command(flatten)]
        args: CheckArgs,
        /// Appointment start, same formats as `check --at`
        #[arg(long)]
        start: String,
        /// Appointment length in minutes
        #[arg(long)]
        duration: u32,
    },
    /// List bookable start times for a day
    Slots {
        #[command(flatten)]
        args: CheckArgs,
        /// Day to enumerate (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Appointment length in minutes (defaults to the config's slot_minutes)
        #[arg(long)]
        duration: Option<u32>,
        /// Grid step in minutes (defaults to the duration)
        #[arg(long)]
        step: Option<u32>,
        /// Print full datetimes as a JSON array
        #[arg(long)]
        json: bool,
    },
}

/// A schedule as read from input, before any parsing of legacy text.
enum LoadedSchedule {
    Structured(WeekSchedule),
    Legacy(String),
}

impl LoadedSchedule {
    fn source(&self) -> ScheduleSource<'_> {
        match self {
            LoadedSchedule::Structured(schedule) => ScheduleSource::Structured(schedule),
            LoadedSchedule::Legacy(text) => ScheduleSource::Legacy(text),
        }
    }

    /// The structured form, parsing legacy text strictly.
    fn into_structured(self) -> Result<WeekSchedule> {
        match self {
            LoadedSchedule::Structured(schedule) => Ok(schedule),
            LoadedSchedule::Legacy(text) => Ok(parse_legacy_report(&text)
                .context("Failed to parse legacy schedule text")?
                .schedule),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config)?;

    match cli.command {
        Commands::Parse { input, report } => {
            let text = read_input(input.input.as_deref(), &config)?;
            let parsed = parse_legacy_report(&text).context("Failed to parse legacy schedule text")?;
            if report {
                for skipped in &parsed.skipped {
                    eprintln!("line {}: {}: {}", skipped.line, skipped.reason, skipped.content);
                }
            }
            println!("{}", serde_json::to_string_pretty(&parsed.schedule)?);
        }
        Commands::Format { input, locale } => {
            let schedule = load_schedule(input.input.as_deref(), &config)?.into_structured()?;
            println!("{}", format_legacy(&schedule, locale));
        }
        Commands::Validate { input } => {
            let schedule = load_schedule(input.input.as_deref(), &config)?.into_structured()?;
            schedule.validate().context("Schedule is invalid")?;
            println!("valid");
        }
        Commands::Check { args, at } => {
            let at = parse_datetime(&at, timezone(&args, &config))?;
            let loaded = load_schedule(args.input.input.as_deref(), &config)?;
            let available = if args.strict {
                try_is_available_at(at, &loaded.into_structured()?)?
            } else {
                is_available_at(at, loaded.source())
            };
            println!("{}", if available { "available" } else { "unavailable" });
        }
        Commands::Fits {
            args,
            start,
            duration,
        } => {
            let start = parse_datetime(&start, timezone(&args, &config))?;
            let loaded = load_schedule(args.input.input.as_deref(), &config)?;
            let fits = if args.strict {
                try_fits_interval(start, duration, &loaded.into_structured()?)?
            } else {
                fits_interval(start, duration, loaded.source())
            };
            println!("{}", if fits { "fits" } else { "does not fit" });
        }
        Commands::Slots {
            args,
            date,
            duration,
            step,
            json,
        } => {
            let duration_minutes = duration.unwrap_or_else(|| config.slot_minutes());
            let options = SlotOptions {
                duration_minutes,
                step_minutes: step.unwrap_or(duration_minutes),
            };
            let loaded = load_schedule(args.input.input.as_deref(), &config)?;
            let slots = if args.strict {
                try_available_slots(date, &options, &loaded.into_structured()?)?
            } else {
                available_slots_with(date, options, loaded.source())
            };

            if json {
                let stamps: Vec<String> = slots
                    .iter()
                    .map(|s| s.format("%Y-%m-%dT%H:%M:%S").to_string())
                    .collect();
                println!("{}", serde_json::to_string_pretty(&stamps)?);
            } else {
                for slot in &slots {
                    println!("{}", slot.format("%H:%M"));
                }
            }
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `HOURS_LOG`, then the config's `log`.
fn init_logging(config: &Config) -> Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.log_filter())
            .with_context(|| format!("Invalid log filter: {}", config.log_filter()))?,
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to set up logging")?;
    Ok(())
}

fn timezone<'a>(args: &'a CheckArgs, config: &'a Config) -> Option<&'a str> {
    args.timezone.as_deref().or(config.timezone.as_deref())
}

/// Parse a business-local datetime, or an RFC 3339 instant converted into
/// the business's timezone.
fn parse_datetime(s: &str, timezone: Option<&str>) -> Result<NaiveDateTime> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        let Some(timezone) = timezone else {
            bail!("'{}' has a UTC offset; pass --timezone to convert it to business time", s);
        };
        return Ok(to_business_time(instant.with_timezone(&Utc), timezone)?);
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .with_context(|| format!("Invalid datetime '{}': expected YYYY-MM-DDTHH:MM", s))
}

fn load_schedule(path: Option<&Path>, config: &Config) -> Result<LoadedSchedule> {
    let text = read_input(path, config)?;
    if text.trim_start().starts_with('{') {
        debug!("reading schedule as JSON");
        let schedule = serde_json::from_str(&text).context("Invalid schedule JSON")?;
        Ok(LoadedSchedule::Structured(schedule))
    } else {
        debug!("reading schedule as legacy text");
        Ok(LoadedSchedule::Legacy(text))
    }
}

fn read_input(path: Option<&Path>, config: &Config) -> Result<String> {
    match path.or(config.schedule.as_deref()) {
        Some(path) => {
            info!(path = %path.display(), "reading schedule file");
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
