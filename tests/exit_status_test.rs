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

//! Exit status and stream separation of the built binary.

#![cfg(unix)]

use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary with an empty home so no user config is picked up.
fn hostfan(args: &[&str]) -> Output {
    let home = TempDir::new().unwrap();
    Command::new(env!("CARGO_BIN_EXE_hostfan"))
        .args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run hostfan")
}

#[test]
fn test_host_failures_still_exit_zero() {
    let output = hostfan(&["--cmd", "false", "a"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.starts_with("a: "));
    assert!(stdout.ends_with("hosts = 1, errors = 1\n"));
}

#[test]
fn test_successful_batch_exits_zero() {
    let output = hostfan(&["-q", "--cmd", "true", "a", "b"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).ends_with("hosts = 2, errors = 0\n"));
}

#[test]
fn test_bare_invocation_prints_usage() {
    let output = hostfan(&[]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.starts_with("usage: "));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_hosts_prints_usage() {
    let output = hostfan(&["uptime"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("no target hosts given"));
    assert!(stderr.contains("usage: "));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_command_prints_usage() {
    let output = hostfan(&["--cmd"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("usage: "));
}

#[test]
fn test_unreadable_hosts_file_fails_before_dispatch() {
    let output = hostfan(&["-h", "/nonexistent/hostfan-hosts", "--cmd", "true"]);
    assert_ne!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}
