//! CLI tests for `launch-agent run` and `launch-agent loop`.
//!
//! Spawns the binary with `HOME` pointed at a temp directory and checks the
//! log file, stdout, and exit codes.
#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use launch_agent::exit_codes;
use launch_agent::io::destination::{AGENT_IDENTIFIER, AGENT_NAME, LogDestination};
use launch_agent::looping::{START_MESSAGE, STOP_MESSAGE};
use launch_agent::run::RUN_MESSAGE;
use launch_agent::test_support::{read_to_string, write_config};

fn agent(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_launch-agent"))
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("spawn launch-agent")
}

fn destination(home: &Path) -> LogDestination {
    LogDestination::for_agent(home, AGENT_IDENTIFIER, AGENT_NAME)
}

#[test]
fn run_in_fresh_home_creates_log_and_exits_ok() {
    let home = tempfile::tempdir().expect("tempdir");
    let dest = destination(home.path());
    assert!(!dest.dir().exists());

    let out = agent(home.path(), &["run"]);

    assert_eq!(out.status.code(), Some(exit_codes::OK));
    assert!(dest.dir().is_dir());
    let expected = format!("{RUN_MESSAGE}\n");
    assert_eq!(read_to_string(dest.file_path()), expected);
    assert_eq!(String::from_utf8_lossy(&out.stdout), expected);
}

#[test]
fn repeated_runs_append_to_the_same_file() {
    let home = tempfile::tempdir().expect("tempdir");

    for _ in 0..2 {
        let out = agent(home.path(), &["run"]);
        assert_eq!(out.status.code(), Some(exit_codes::OK));
    }

    let log = read_to_string(destination(home.path()).file_path());
    assert_eq!(log, format!("{RUN_MESSAGE}\n{RUN_MESSAGE}\n"));
}

#[test]
fn oversized_log_rotates_at_startup() {
    let home = tempfile::tempdir().expect("tempdir");
    let dest = destination(home.path());
    fs::create_dir_all(dest.dir()).expect("create log dir");
    fs::write(dest.file_path(), "x".repeat(64)).expect("seed log");
    fs::write(dest.backup_path(), "old backup").expect("seed backup");
    let cfg = write_config(home.path(), r#"{ "max_log_size": 32 }"#);

    let out = agent(
        home.path(),
        &["--config", cfg.to_str().expect("utf8 path"), "run"],
    );

    assert_eq!(out.status.code(), Some(exit_codes::OK));
    assert_eq!(read_to_string(&dest.backup_path()), "x".repeat(64));
    assert_eq!(read_to_string(dest.file_path()), format!("{RUN_MESSAGE}\n"));
}

#[test]
fn loop_honours_iteration_cap_from_config() {
    let home = tempfile::tempdir().expect("tempdir");
    let cfg = write_config(
        home.path(),
        r#"{ "loop": { "interval_ms": 10, "max_iterations": 2 } }"#,
    );

    let out = agent(
        home.path(),
        &["loop", "--config", cfg.to_str().expect("utf8 path")],
    );

    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let log = read_to_string(destination(home.path()).file_path());
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(
        lines,
        vec![
            START_MESSAGE,
            "Looping every 10ms",
            "Looping every 10ms",
            STOP_MESSAGE
        ]
    );
}

#[test]
fn missing_explicit_config_exits_with_configuration_code() {
    let home = tempfile::tempdir().expect("tempdir");
    let missing = home.path().join("absent.json");

    let out = agent(
        home.path(),
        &["--config", missing.to_str().expect("utf8 path"), "run"],
    );

    assert_eq!(out.status.code(), Some(exit_codes::CONFIGURATION_ERROR));
    assert!(String::from_utf8_lossy(&out.stderr).contains("load configuration"));
    assert!(!destination(home.path()).dir().exists());
}

#[test]
fn unwritable_log_location_exits_with_io_code() {
    let home = tempfile::tempdir().expect("tempdir");
    // A file where the cache directory should be blocks directory creation.
    fs::create_dir_all(home.path().join("Library")).expect("create Library");
    fs::write(home.path().join("Library/Caches"), "not a directory").expect("write blocker");

    let out = agent(home.path(), &["run"]);

    assert_eq!(out.status.code(), Some(exit_codes::IO_ERROR));
    assert!(String::from_utf8_lossy(&out.stderr).contains("create log directory"));
}
