// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Full invocations through argument parsing, planning and local processes.

#![cfg(unix)]

use clap::Parser;
use hostfan::app::{build_plan, run_plan};
use hostfan::{Cli, Config};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

async fn invoke(argv: &[&str]) -> (String, hostfan::BatchSummary) {
    let cli = Cli::parse_from(argv);
    let plan = build_plan(&cli, &Config::default()).unwrap();
    let mut out = Vec::new();
    let summary = run_plan(plan, &mut out, false).await.unwrap();
    (String::from_utf8(out).unwrap(), summary)
}

#[tokio::test]
async fn test_local_command_runs_once_per_host() {
    let (out, summary) = invoke(&["hostfan", "-s", "--cmd", "echo probe", "h2", "h1", "h3"]).await;

    assert_eq!(summary.hosts, 3);
    assert_eq!(summary.errors, 0);
    assert_eq!(
        out,
        "h1:\nprobe h1\nh2:\nprobe h2\nh3:\nprobe h3\nhosts = 3, errors = 0\n"
    );
}

#[tokio::test]
async fn test_failing_local_command_is_an_error() {
    let (out, summary) = invoke(&["hostfan", "-q", "-s", "--cmd", "false", "a", "b"]).await;
    assert_eq!(summary.errors, 2);
    assert_eq!(out, "a\t[ERROR]\nb\t[ERROR]\nhosts = 2, errors = 2\n");
}

#[tokio::test]
async fn test_missing_program_is_reported_per_host() {
    let (out, summary) = invoke(&[
        "hostfan",
        "-1",
        "--cmd",
        "hostfan-no-such-program-xyz",
        "solo",
    ])
    .await;
    assert_eq!(summary.errors, 1);
    assert!(out.starts_with("solo: hostfan-no-such-program-xyz: "));
    assert!(!out.contains("hosts ="));
}

#[tokio::test]
async fn test_hosts_file_feeds_targets() {
    let mut hosts = NamedTempFile::new().unwrap();
    writeln!(hosts, "# rack 1").unwrap();
    writeln!(hosts, "alpha").unwrap();
    writeln!(hosts).unwrap();
    writeln!(hosts, "  beta  ").unwrap();
    hosts.flush().unwrap();

    let path = hosts.path().to_str().unwrap();
    let (out, summary) = invoke(&["hostfan", "-q", "-s", "-h", path, "--cmd", "true"]).await;
    assert_eq!(summary.hosts, 2);
    assert_eq!(out, "alpha\t[OK]\nbeta\t[OK]\nhosts = 2, errors = 0\n");
}

#[tokio::test]
async fn test_repeated_runs_append_log_sections() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("fanout.log");
    let log_arg = log.to_str().unwrap();

    invoke(&["hostfan", "-o", log_arg, "--cmd", "echo first", "x"]).await;
    invoke(&["hostfan", "-o", log_arg, "--cmd", "echo second", "x"]).await;

    let content = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[0].starts_with("------ START: "));
    assert_eq!(&lines[1..3], ["x:", "first x"]);
    assert!(lines[3].starts_with("------   END: "));
    assert!(lines[4].starts_with("------ START: "));
    assert_eq!(&lines[5..7], ["x:", "second x"]);
    assert!(lines[7].starts_with("------   END: "));
}

#[tokio::test]
async fn test_unwritable_log_aborts_before_dispatch() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("missing").join("fanout.log");
    let cli = Cli::parse_from(["hostfan", "-o", log.to_str().unwrap(), "--cmd", "true", "x"]);
    let plan = build_plan(&cli, &Config::default()).unwrap();

    let mut out = Vec::new();
    assert!(run_plan(plan, &mut out, false).await.is_err());
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_parallel_limit_of_one_still_finishes() {
    let (out, summary) = invoke(&[
        "hostfan",
        "-q",
        "-s",
        "--parallel",
        "1",
        "--cmd",
        "true",
        "n1",
        "n2",
        "n3",
    ])
    .await;
    assert_eq!(summary.hosts, 3);
    assert_eq!(out.lines().count(), 4);
}

#[tokio::test]
async fn test_deadline_cuts_off_slow_hosts() {
    let (out, summary) = invoke(&[
        "hostfan",
        "-1",
        "--deadline",
        "1",
        "--cmd",
        "sleep",
        "30",
    ])
    .await;
    assert_eq!(summary.errors, 1);
    assert!(out.starts_with("30: deadline of "));
}

#[tokio::test]
async fn test_huge_deadline_runs_the_batch() {
    let (out, summary) = invoke(&[
        "hostfan",
        "-q",
        "--deadline",
        "18446744073709551615",
        "--cmd",
        "true",
        "x",
    ])
    .await;
    assert_eq!(summary.errors, 0);
    assert_eq!(out, "x\t[OK]\nhosts = 1, errors = 0\n");
}
