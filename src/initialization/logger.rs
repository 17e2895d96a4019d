//! Logger initialization.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

/// Dependency log targets capped below the requested level.
const QUIET_TARGETS: &[(&str, LevelFilter)] = &[
    ("sqlx", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    ("hickory_proto", LevelFilter::Error),
];

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first; `level` then overrides it for this crate and as
/// the global default. Noisy dependencies stay capped by `QUIET_TARGETS`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug reach_check check urls.txt
/// reach_check --log-format json check urls.txt
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (target, cap) in QUIET_TARGETS {
        builder.filter_module(target, level.min(*cap));
    }
    builder.filter_module("reach_check", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = json_line(
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    &record.args().to_string(),
                );
                writeln!(buf, "{line}")
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let line = plain_line(record.level(), record.target(), &record.args().to_string());
                writeln!(buf, "{line}")
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// One log record as a single-line JSON object.
fn json_line(ts_ms: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_ms,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

/// One log record as `<marker> <target> [<LEVEL>] <msg>`, colored by level.
fn plain_line(level: Level, target: &str, msg: &str) -> String {
    let (marker, colored_level) = match level {
        Level::Error => ("❌", level.as_str().red()),
        Level::Warn => ("⚠️", level.as_str().yellow()),
        Level::Info => ("✔️", level.as_str().green()),
        Level::Debug => ("🔍", level.as_str().blue()),
        Level::Trace => ("🔬", level.as_str().purple()),
    };
    format!("{marker} {} [{colored_level}] {msg}", target.cyan())
}
