//! Tests for CLI subcommand parsing.

use std::path::PathBuf;

use clap::Parser;
use reach_check::config::{Command, ModeArg, Opt};
use reach_check::FailOn;

#[test]
fn test_check_defaults() {
    let opt = Opt::try_parse_from(["reach_check", "check", "-"]).expect("should parse");
    assert_eq!(opt.db_path, PathBuf::from("./reach_check.db"));
    match opt.command {
        Command::Check {
            file,
            timeout_seconds,
            batch_size,
            large_batch_size,
            max_concurrent_batches,
            mode,
            no_save,
            json,
            fail_on,
            fail_pct,
            ..
        } => {
            assert_eq!(file, PathBuf::from("-"));
            assert_eq!(timeout_seconds, 30);
            assert_eq!(batch_size, 100);
            assert_eq!(large_batch_size, 1000);
            assert_eq!(max_concurrent_batches, 3);
            assert_eq!(mode, ModeArg::Auto);
            assert!(!no_save);
            assert!(!json);
            assert_eq!(fail_on, FailOn::Never);
            assert_eq!(fail_pct, 10);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let opt = Opt::try_parse_from([
        "reach_check",
        "history",
        "--db-path",
        "/tmp/other.db",
        "--log-level",
        "debug",
    ])
    .expect("should parse");
    assert_eq!(opt.db_path, PathBuf::from("/tmp/other.db"));
    assert!(matches!(opt.command, Command::History { limit: None }));
}

#[test]
fn test_dns_subcommands() {
    let opt = Opt::try_parse_from(["reach_check", "detect-dns"]).expect("should parse");
    assert!(matches!(opt.command, Command::DetectDns));
    let opt = Opt::try_parse_from(["reach_check", "flush-dns"]).expect("should parse");
    assert!(matches!(opt.command, Command::FlushDns));
}

#[test]
fn test_invalid_mode_rejected() {
    let result = Opt::try_parse_from(["reach_check", "check", "urls.txt", "--mode", "turbo"]);
    assert!(result.is_err());
}

#[test]
fn test_missing_subcommand_rejected() {
    assert!(Opt::try_parse_from(["reach_check"]).is_err());
}
