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

//! Append-only run log framed by START/END timestamp lines.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// `02-Jan-2006 15:04:05` style timestamps.
pub const TIMESTAMP_FORMAT: &str = "%d-%b-%Y %H:%M:%S";

pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn start_line(timestamp: &str) -> String {
    format!("------ START: {timestamp} ------\n")
}

pub fn end_line(timestamp: &str) -> String {
    format!("------   END: {timestamp} ------\n")
}

/// Mirror of full result text for one invocation.
///
/// Only the single collector path writes to it, so there is no locking.
/// Two invocations appending to the same path at the same time may
/// interleave their bodies.
#[derive(Debug)]
pub struct RunLog<L: Write = File> {
    writer: L,
}

impl RunLog<File> {
    /// Open `path` for appending, creating it if needed.
    pub fn open_append(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {path:?}"))?;
        Ok(Self::new(file))
    }
}

impl<L: Write> RunLog<L> {
    pub fn new(writer: L) -> Self {
        Self { writer }
    }

    pub fn start(&mut self) -> io::Result<()> {
        self.writer.write_all(start_line(&timestamp()).as_bytes())?;
        self.writer.flush()
    }

    pub fn write_entry(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    pub fn end(&mut self) -> io::Result<()> {
        self.writer.write_all(end_line(&timestamp()).as_bytes())?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> L {
        self.writer
    }
}
