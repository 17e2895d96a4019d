//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `reach_check` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting and exit codes
//!
//! All core functionality is implemented in the library crate.

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use colored::Colorize;

use reach_check::config::{Command, Opt};
use reach_check::dns::{detect_system_dns, flush_system_dns_cache};
use reach_check::initialization::init_logger_with;
use reach_check::{
    init_db_pool_with_path, query_batch, query_batch_history, query_batch_results, run_check,
    run_migrations, Config, ProbeResult, StoredResult,
};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    match run(opt).await {
        Ok(0) => Ok(()),
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("reach_check error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Dispatches a subcommand and returns the process exit code.
async fn run(opt: Opt) -> Result<i32> {
    match opt.command {
        Command::Check {
            file,
            primary_dns,
            secondary_dns,
            timeout_seconds,
            batch_size,
            large_batch_size,
            max_concurrent_batches,
            mode,
            user_agent,
            no_save,
            json,
            fail_on,
            fail_pct,
        } => {
            let config = Config {
                file,
                db_path: opt.db_path,
                save: !no_save,
                primary_dns,
                secondary_dns,
                timeout_seconds,
                batch_size,
                large_batch_size,
                max_concurrent_batches,
                mode,
                user_agent,
            };
            let report = run_check(config).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report.check)?);
            } else {
                for result in &report.check.results {
                    print_probe_result(result);
                }
                println!(
                    "{} of {} URLs accessible ({}%) in {:.1}s",
                    report.check.summary.accessible,
                    report.check.summary.total,
                    report.check.success_rate,
                    report.check.elapsed_seconds
                );
                if let Some(batch_id) = report.batch_id {
                    println!(
                        "Batch {} saved in {}",
                        batch_id,
                        report.db_path.display()
                    );
                }
            }

            Ok(fail_on.exit_code(fail_pct, &report.check.summary))
        }
        Command::History { limit } => {
            let pool = open_database(&opt.db_path).await?;
            let batches = query_batch_history(&pool, limit).await?;
            if batches.is_empty() {
                println!("No stored batches in {}", opt.db_path.display());
            }
            for batch in batches {
                println!(
                    "#{:<5} {}  {:>6} URLs  {:>3}% accessible  {:<9}  {:.1}s  dns={}",
                    batch.batch_id,
                    format_timestamp(batch.started_at_ms),
                    batch.total_urls,
                    batch.success_rate,
                    batch.mode,
                    batch.elapsed_seconds,
                    batch.primary_dns.as_deref().unwrap_or("system")
                );
            }
            pool.close().await;
            Ok(0)
        }
        Command::Show { batch_id } => {
            let pool = open_database(&opt.db_path).await?;
            let Some(batch) = query_batch(&pool, batch_id).await? else {
                anyhow::bail!("No batch {} in {}", batch_id, opt.db_path.display());
            };
            println!(
                "Batch {} from {}: {} URLs, {}% accessible",
                batch.batch_id,
                format_timestamp(batch.started_at_ms),
                batch.total_urls,
                batch.success_rate
            );
            for result in query_batch_results(&pool, batch_id).await? {
                print_stored_result(&result);
            }
            pool.close().await;
            Ok(0)
        }
        Command::DetectDns => {
            let detected = detect_system_dns();
            println!(
                "primary:   {}",
                detected.primary.as_deref().unwrap_or("(none)")
            );
            println!(
                "secondary: {}",
                detected.secondary.as_deref().unwrap_or("(none)")
            );
            Ok(0)
        }
        Command::FlushDns => {
            let command = flush_system_dns_cache().await?;
            println!("DNS cache flushed ({command})");
            Ok(0)
        }
    }
}

async fn open_database(db_path: &Path) -> Result<std::sync::Arc<sqlx::SqlitePool>> {
    let pool = init_db_pool_with_path(db_path)
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(pool)
}

fn print_probe_result(result: &ProbeResult) {
    print_line(
        &result.url,
        result.http_status,
        result.accessible,
        result.elapsed_ms,
        result.error_message.as_deref(),
    );
}

fn print_stored_result(result: &StoredResult) {
    print_line(
        &result.url,
        result.http_status,
        result.accessible,
        result.elapsed_ms,
        result.error_message.as_deref(),
    );
}

fn print_line(url: &str, status: u16, accessible: bool, elapsed_ms: f64, error: Option<&str>) {
    let mark = if accessible {
        "✔".green()
    } else {
        "✘".red()
    };
    let status = if status == 0 {
        "---".dimmed()
    } else if accessible {
        status.to_string().green()
    } else {
        status.to_string().yellow()
    };
    match error {
        Some(error) => println!("{mark} {status} {elapsed_ms:>9.2}ms  {url}  {}", error.dimmed()),
        None => println!("{mark} {status} {elapsed_ms:>9.2}ms  {url}"),
    }
}

fn format_timestamp(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}
