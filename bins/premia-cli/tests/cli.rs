//! Process-level tests for the premia-cli binary.

use std::io::Write;
use std::process::{Command, Stdio};

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_premia-cli"));
    cmd.env_remove("RUST_LOG")
        .env_remove("PREMIA_DECAY_PERCENT")
        .env_remove("PREMIA_PERIOD_SECS")
        .env_remove("PREMIA_SAMPLES_PER_UNIT");
    cmd
}

#[test]
fn price_prints_units() {
    let out = cli()
        .args([
            "price",
            "--start-premium",
            "1000000000000000000000",
            "--elapsed",
            "43200",
            "--policy",
            "clamp",
        ])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap().trim(), "707.106781186547515392");
}

#[test]
fn chart_reads_answers_from_stdin() {
    let mut child = cli()
        .args(["chart", "--policy", "clamp", "--format", "csv"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"100\n3\n10\n1\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().next(), Some("elapsed,price"));
    assert_eq!(stdout.lines().count(), 112);

    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("start premium"), "stderr: {stderr}");
}

#[test]
fn environment_changes_decay_rate() {
    let out = cli()
        .env("PREMIA_DECAY_PERCENT", "75")
        .args([
            "price",
            "--start-premium",
            "1000000000000000000000",
            "--elapsed",
            "86400",
            "--policy",
            "clamp",
        ])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap().trim(), "250");
}

#[test]
fn missing_subcommand_is_usage_error() {
    let out = cli().output().unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8(out.stderr).unwrap().contains("Usage"));
}
