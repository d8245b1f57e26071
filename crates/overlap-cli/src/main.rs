//! `overlap` CLI — compute shared free-time windows from availability exports.
//!
//! ## Usage
//!
//! ```sh
//! # Windows everyone who submitted slots can make (stdin → stdout)
//! cat availability.json | overlap windows
//!
//! # Only participants with a going/maybe RSVP, reject inverted slots
//! overlap windows -i availability.json --rsvps rsvps.json --strict
//!
//! # Who is free when, across the whole timeline
//! overlap coverage -i availability.json --min-participants 2
//!
//! # Top three proposals of at least 45 minutes
//! overlap recommend -i availability.json --coverage --min-minutes 45 --limit 3
//! ```

mod logger;

use std::collections::HashSet;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use overlap_engine::json::{eligible_from_json, parse_availabilities, windows_to_json};
use overlap_engine::{
    compute_coverage_windows, compute_free_windows_with, full_overlap, recommend, CoverageOptions,
    FreeTimeWindow, Identity, IntersectOptions, ParticipantAvailability, RecommendOptions,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "overlap",
    version,
    about = "Shared free-time windows from participant availability"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct InputArgs {
    /// Availability rows as JSON (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// RSVP rows as JSON; only going/maybe participants contribute
    #[arg(long)]
    rsvps: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Fail on slots that do not end after they start instead of skipping them
    #[arg(long)]
    strict: bool,
    /// Gap in seconds still treated as contiguous when merging windows
    #[arg(long, default_value_t = overlap_engine::options::DEFAULT_MERGE_TOLERANCE_SECS)]
    tolerance_secs: i64,
}

impl InputArgs {
    fn intersect_options(&self) -> IntersectOptions {
        let options = if self.strict {
            IntersectOptions::strict()
        } else {
            IntersectOptions::default()
        };
        options.with_tolerance_secs(self.tolerance_secs)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Windows shared by every participant who submitted slots
    Windows {
        #[command(flatten)]
        args: InputArgs,
        /// Keep only windows every eligible participant can make, including
        /// those who submitted no slots
        #[arg(long)]
        everyone: bool,
    },
    /// Every timeline segment with the exact set of free participants
    Coverage {
        #[command(flatten)]
        args: InputArgs,
        /// Drop segments with fewer free participants
        #[arg(long, default_value_t = 1)]
        min_participants: usize,
    },
    /// Rank candidate windows for proposal
    Recommend {
        #[command(flatten)]
        args: InputArgs,
        /// Rank coverage segments (partial attendance) instead of shared windows
        #[arg(long)]
        coverage: bool,
        /// Drop windows shorter than this many minutes
        #[arg(long, default_value_t = 0)]
        min_minutes: i64,
        /// Keep at most this many windows
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Parsed inputs shared by every subcommand.
struct Loaded {
    availabilities: Vec<ParticipantAvailability>,
    eligible: Option<HashSet<Identity>>,
}

impl Loaded {
    fn load(args: &InputArgs) -> Result<Self> {
        let raw = read_input(args.input.as_deref())?;
        let availabilities =
            parse_availabilities(&raw).context("Failed to parse availability rows")?;

        let rsvps = args
            .rsvps
            .as_deref()
            .map(|path| read_input(Some(path)))
            .transpose()?;
        let eligible =
            eligible_from_json(rsvps.as_deref()).context("Failed to parse RSVP rows")?;

        info!(
            rows = availabilities.len(),
            eligible = ?eligible.as_ref().map(HashSet::len),
            "loaded availability"
        );
        Ok(Self {
            availabilities,
            eligible,
        })
    }

    /// Participants expected to attend: the eligible set when RSVPs were
    /// given, otherwise every distinct identity in the availability rows.
    fn expected_participants(&self) -> usize {
        match &self.eligible {
            Some(eligible) => eligible.len(),
            None => self
                .availabilities
                .iter()
                .map(|a| &a.participant)
                .collect::<HashSet<_>>()
                .len(),
        }
    }

    fn free_windows(&self, options: &IntersectOptions) -> Result<Vec<FreeTimeWindow>> {
        compute_free_windows_with(&self.availabilities, self.eligible.as_ref(), options)
            .context("Failed to compute free windows")
    }

    fn coverage_windows(&self, options: &CoverageOptions) -> Result<Vec<FreeTimeWindow>> {
        compute_coverage_windows(&self.availabilities, self.eligible.as_ref(), options)
            .context("Failed to compute coverage windows")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    match cli.command {
        Commands::Windows { args, everyone } => {
            let loaded = Loaded::load(&args)?;
            let mut windows = loaded.free_windows(&args.intersect_options())?;
            if everyone {
                windows = full_overlap(&windows, loaded.expected_participants());
            }
            emit(args.output.as_deref(), &windows)?;
        }
        Commands::Coverage {
            args,
            min_participants,
        } => {
            let loaded = Loaded::load(&args)?;
            let options = CoverageOptions {
                min_participants,
                intersect: args.intersect_options(),
            };
            let windows = loaded.coverage_windows(&options)?;
            emit(args.output.as_deref(), &windows)?;
        }
        Commands::Recommend {
            args,
            coverage,
            min_minutes,
            limit,
        } => {
            let loaded = Loaded::load(&args)?;
            let candidates = if coverage {
                loaded.coverage_windows(&CoverageOptions {
                    min_participants: 1,
                    intersect: args.intersect_options(),
                })?
            } else {
                loaded.free_windows(&args.intersect_options())?
            };
            let ranked = recommend(
                &candidates,
                &RecommendOptions {
                    min_duration_minutes: min_minutes,
                    limit,
                },
            );
            emit(args.output.as_deref(), &ranked)?;
        }
    }

    Ok(())
}

fn emit(path: Option<&str>, windows: &[FreeTimeWindow]) -> Result<()> {
    info!(windows = windows.len(), "computed");
    let json = windows_to_json(windows).context("Failed to serialize windows")?;
    write_output(path, &json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
