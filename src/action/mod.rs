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

//! Per-target actions.
//!
//! An [`Action`] is the opaque unit of work run against one target: it takes
//! a target, does whatever it does (usually by spawning `ssh`, `scp` or a
//! local diagnostic tool) and hands back the raw output together with an
//! explicit success flag. The executor never looks inside the output to
//! decide whether the target failed.

mod command;
mod download;
mod operation;

use async_trait::async_trait;
use std::path::PathBuf;

use crate::target::Target;

pub use command::CommandAction;
pub use download::prepare_host_dir;
pub use operation::{Diagnostic, Invocation, Operation};

/// Default connect timeout handed to ssh/scp, in seconds.
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 4;

/// Default SSH port.
pub const DEFAULT_PORT: u16 = 22;

/// Raw outcome of one action invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutput {
    /// Everything the action printed; may hold partial output on failure.
    pub output: Vec<u8>,
    pub success: bool,
}

impl ActionOutput {
    pub fn success(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            success: true,
        }
    }

    pub fn failure(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            success: false,
        }
    }
}

/// Run one operation against one target.
///
/// Implementations must not panic on per-target failures; a failed remote
/// command, an unreachable host or a missing binary are all reported as an
/// [`ActionOutput`] with `success == false`.
#[async_trait]
pub trait Action: Send + Sync {
    async fn invoke(&self, target: &Target) -> ActionOutput;
}

/// Connection settings shared by every invocation of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConfig {
    pub identity: PathBuf,
    pub login: Option<String>,
    pub port: u16,
    /// Passed to ssh/scp as `ConnectTimeout`; the only per-target bound.
    pub connect_timeout: u64,
    /// 0..=3, mapped to `-v`, `-vv`, `-vvv` on ssh/scp.
    pub verbosity: u8,
    /// Force pseudo-tty allocation for remote commands.
    pub tty: bool,
}

impl ActionConfig {
    pub fn default_identity() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_default();
        PathBuf::from(home).join(".ssh").join("id_rsa")
    }
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            identity: Self::default_identity(),
            login: None,
            port: DEFAULT_PORT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            verbosity: 0,
            tty: false,
        }
    }
}
