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

//! Applies an [`OutputPolicy`] to a stream of results.

use anyhow::{Context, Result};
use std::fmt;
use std::fs::File;
use std::io::Write;

use super::policy::OutputPolicy;
use super::render::{quiet_line, render_full};
use super::run_log::RunLog;
use crate::executor::{ExecutionResult, ResultSink};

/// Final tally of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub hosts: usize,
    pub errors: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hosts = {}, errors = {}", self.hosts, self.errors)
    }
}

/// Renders results to stdout (`W`) and, optionally, a run log (`L`).
///
/// Call [`begin`](Self::begin) before dispatch, [`accept`](ResultSink::accept)
/// for each result in arrival order and [`finish`](Self::finish) once the
/// batch is complete.
pub struct Presenter<W: Write, L: Write = File> {
    policy: OutputPolicy,
    out: W,
    log: Option<RunLog<L>>,
    colors: bool,
    summary: BatchSummary,
    // Sorted mode only; slots are indexed by target position.
    full_slots: Vec<Option<String>>,
    quiet_slots: Vec<Option<(String, bool)>>,
}

impl<W: Write> Presenter<W, File> {
    /// Create a presenter, opening the policy's log file if it names one.
    pub fn open(policy: OutputPolicy, out: W) -> Result<Self> {
        let log = policy
            .log_file
            .as_deref()
            .map(RunLog::<File>::open_append)
            .transpose()?;
        Ok(Self::with_log(policy, out, log))
    }
}

impl<W: Write, L: Write> Presenter<W, L> {
    pub fn with_log(policy: OutputPolicy, out: W, log: Option<RunLog<L>>) -> Self {
        Self {
            policy,
            out,
            log,
            colors: false,
            summary: BatchSummary::default(),
            full_slots: Vec::new(),
            quiet_slots: Vec::new(),
        }
    }

    /// Color the quiet status tags. Sorting always uses the plain text.
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn policy(&self) -> &OutputPolicy {
        &self.policy
    }

    /// Write the log START line. Must happen before any target is dispatched.
    pub fn begin(&mut self) -> Result<()> {
        if let Some(log) = self.log.as_mut() {
            log.start().context("Failed to write log START line")?;
        }
        Ok(())
    }

    /// Emit buffered output, the summary line and the log END line.
    pub fn finish(&mut self) -> Result<BatchSummary> {
        if self.policy.sorted {
            let mut full: Vec<String> = std::mem::take(&mut self.full_slots)
                .into_iter()
                .flatten()
                .collect();
            full.sort();

            if let Some(log) = self.log.as_mut() {
                for entry in &full {
                    log.write_entry(entry).context("Failed to write log entry")?;
                }
            }

            if self.policy.quiet {
                let mut quiet: Vec<(String, bool)> = std::mem::take(&mut self.quiet_slots)
                    .into_iter()
                    .flatten()
                    .collect();
                quiet.sort_by_cached_key(|(host, success)| quiet_line(host, *success, false));
                for (host, success) in &quiet {
                    self.emit_quiet(host, *success)?;
                }
            } else {
                for entry in &full {
                    self.emit(entry)?;
                }
            }
        }

        if self.policy.shows_summary() {
            writeln!(self.out, "{}", self.summary)?;
        }
        self.out.flush()?;

        if let Some(log) = self.log.as_mut() {
            log.end().context("Failed to write log END line")?;
        }

        tracing::debug!("Batch finished: {}", self.summary);
        Ok(self.summary)
    }

    pub fn summary(&self) -> BatchSummary {
        self.summary
    }

    pub fn into_parts(self) -> (W, Option<L>) {
        (self.out, self.log.map(RunLog::into_inner))
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")
    }

    fn emit_quiet(&mut self, host: &str, success: bool) -> Result<()> {
        let line = quiet_line(host, success, self.colors);
        self.emit(&line)
    }

    fn store<T: Clone>(slots: &mut Vec<Option<T>>, index: usize, entry: T) {
        if slots.len() <= index {
            slots.resize(index + 1, None);
        }
        slots[index] = Some(entry);
    }
}

impl<W: Write, L: Write> ResultSink for Presenter<W, L> {
    fn accept(&mut self, result: ExecutionResult) -> Result<()> {
        let success = result.is_success();
        self.summary.hosts += 1;
        if !success {
            self.summary.errors += 1;
        }

        if !self.policy.is_visible(success) {
            return Ok(());
        }

        let full = render_full(&result, self.policy.one_line);

        if self.policy.sorted {
            let index = result.target.index;
            if self.policy.quiet {
                Self::store(
                    &mut self.quiet_slots,
                    index,
                    (result.target.host.clone(), success),
                );
            }
            Self::store(&mut self.full_slots, index, full);
            return Ok(());
        }

        if let Some(log) = self.log.as_mut() {
            log.write_entry(&full).context("Failed to write log entry")?;
        }

        if self.policy.quiet {
            self.emit_quiet(&result.target.host, success)
        } else {
            self.emit(&full)
        }
    }
}
