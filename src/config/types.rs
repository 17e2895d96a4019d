//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DB_PATH, DEFAULT_BATCH_SIZE, DEFAULT_LARGE_BATCH_SIZE, DEFAULT_MAX_CONCURRENT_BATCHES,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::coordinator::RunMode;
use crate::summary::ResultSummary;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Exit code policy for the `check` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Always exit 0 once the run completes
    Never,
    /// Exit 2 if any URL is inaccessible
    AnyFailure,
    /// Exit 2 if the inaccessible share exceeds `--fail-pct`
    PctGreaterThan,
}

/// Run mode selection as exposed on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Optimized above 10,000 URLs, standard otherwise
    Auto,
    /// One batch at a time
    Standard,
    /// Windows of concurrent batches
    Optimized,
}

impl ModeArg {
    /// The forced mode, or `None` when the mode follows the list size.
    pub fn fixed(self) -> Option<RunMode> {
        match self {
            ModeArg::Auto => None,
            ModeArg::Standard => Some(RunMode::Standard),
            ModeArg::Optimized => Some(RunMode::Optimized),
        }
    }
}

impl FailOn {
    /// Exit code for a finished run: 2 if the policy is triggered, 0 otherwise.
    ///
    /// `fail_pct` is only read by `PctGreaterThan`, which compares the share of
    /// inaccessible URLs (in percent) against it.
    pub fn exit_code(self, fail_pct: u8, summary: &ResultSummary) -> i32 {
        let triggered = match self {
            FailOn::Never => false,
            FailOn::AnyFailure => summary.inaccessible > 0,
            FailOn::PctGreaterThan => {
                if summary.total == 0 {
                    false
                } else {
                    let failure_pct = summary.inaccessible as f64 / summary.total as f64 * 100.0;
                    failure_pct > f64::from(fail_pct)
                }
            }
        };
        if triggered {
            2
        } else {
            0
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// Drives [`crate::run_check`]: where URLs come from, how they are probed and
/// where the finished batch is stored.
///
/// # Examples
///
/// ```no_run
/// use reach_check::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("urls.txt"),
///     primary_dns: Some("1.1.1.1".to_string()),
///     timeout_seconds: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// File to read URLs from (`-` reads stdin)
    pub file: PathBuf,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Persist the finished batch to the database
    pub save: bool,

    /// IPv4 address every probed host is resolved to
    pub primary_dns: Option<String>,

    /// Secondary DNS, validated and stored but never used for probing
    pub secondary_dns: Option<String>,

    /// Per-probe timeout in seconds
    pub timeout_seconds: u64,

    /// Preferred batch size for lists up to 10,000 URLs
    pub batch_size: usize,

    /// Preferred batch size for lists above 10,000 URLs
    pub large_batch_size: usize,

    /// Batches in flight at once in optimized mode
    pub max_concurrent_batches: usize,

    /// Run mode selection
    pub mode: ModeArg,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("urls.txt"),
            db_path: PathBuf::from(DB_PATH),
            save: true,
            primary_dns: None,
            secondary_dns: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            batch_size: DEFAULT_BATCH_SIZE,
            large_batch_size: DEFAULT_LARGE_BATCH_SIZE,
            max_concurrent_batches: DEFAULT_MAX_CONCURRENT_BATCHES,
            mode: ModeArg::Auto,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Probe a list with defaults and store the batch
/// reach_check check urls.txt
///
/// # Force every host to resolve to 10.0.0.53 with a 10s timeout
/// reach_check check urls.txt --primary-dns 10.0.0.53 --timeout-seconds 10
///
/// # Review stored batches
/// reach_check history --limit 5
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "reach_check",
    version,
    about = "Checks reachability of URL lists with batched HEAD probes."
)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Database path (SQLite file)
    #[arg(long, global = true, env = "REACH_CHECK_DB_PATH", default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the CLI.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Probe every URL in a file (one per line, `-` for stdin)
    Check {
        /// File to read
        file: PathBuf,

        /// IPv4 address every probed host is resolved to
        #[arg(long, env = "REACH_CHECK_PRIMARY_DNS")]
        primary_dns: Option<String>,

        /// Secondary DNS (stored with the batch, not used for probing)
        #[arg(long, env = "REACH_CHECK_SECONDARY_DNS")]
        secondary_dns: Option<String>,

        /// Per-probe timeout in seconds
        #[arg(long, env = "REACH_CHECK_TIMEOUT_SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_seconds: u64,

        /// Preferred batch size for lists up to 10,000 URLs
        #[arg(long, env = "REACH_CHECK_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Preferred batch size for lists above 10,000 URLs
        #[arg(long, env = "REACH_CHECK_LARGE_BATCH_SIZE", default_value_t = DEFAULT_LARGE_BATCH_SIZE)]
        large_batch_size: usize,

        /// Batches in flight at once in optimized mode
        #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT_BATCHES)]
        max_concurrent_batches: usize,

        /// Run mode: auto|standard|optimized
        #[arg(long, value_enum, default_value_t = ModeArg::Auto)]
        mode: ModeArg,

        /// HTTP User-Agent header value
        #[arg(long, default_value = DEFAULT_USER_AGENT)]
        user_agent: String,

        /// Do not store the batch in the database
        #[arg(long)]
        no_save: bool,

        /// Print every result as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Exit code policy: never|any-failure|pct-greater-than
        #[arg(long, value_enum, default_value_t = FailOn::Never)]
        fail_on: FailOn,

        /// Threshold for `--fail-on pct-greater-than` (0-100)
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(0..=100))]
        fail_pct: u8,
    },

    /// List stored batches, most recent first
    History {
        /// Maximum number of batches to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the stored results of one batch
    Show {
        /// Batch identifier as printed by `check` or `history`
        batch_id: i64,
    },

    /// Print the DNS servers configured on this host
    DetectDns,

    /// Flush the operating system's DNS cache
    FlushDns,
}
