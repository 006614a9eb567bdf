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

//! Resolve CLI arguments and configuration into a [`RunPlan`].
//!
//! Everything that can fail because of user input fails here, before a
//! single target is dispatched.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::action::{ActionConfig, Operation, DEFAULT_CONNECT_TIMEOUT, DEFAULT_PORT};
use crate::cli::{Cli, Mode};
use crate::config::{expand_tilde, Config, ConfigError};
use crate::hostlist::{parse_hostfile, read_script, HostlistError};
use crate::output::OutputPolicy;
use crate::target::Target;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("no command given")]
    MissingCommand,

    #[error("no target hosts given")]
    NoTargets,

    #[error(transparent)]
    Hostlist(#[from] HostlistError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl InputError {
    /// Errors answered by printing the usage synopsis.
    pub fn is_usage(&self) -> bool {
        matches!(self, InputError::MissingCommand | InputError::NoTargets)
    }
}

/// Everything fixed at invocation start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub operation: Operation,
    pub action_config: ActionConfig,
    pub targets: Vec<Target>,
    pub policy: OutputPolicy,
    pub max_parallel: Option<usize>,
    pub deadline: Option<Duration>,
}

pub fn build_plan(cli: &Cli, config: &Config) -> Result<RunPlan, InputError> {
    let mode = cli.mode();

    let (command, host_args) = if mode.takes_command_argument() {
        match cli.args.split_first() {
            Some((command, hosts)) if !command.trim().is_empty() => {
                (Some(command.clone()), hosts)
            }
            _ => return Err(InputError::MissingCommand),
        }
    } else {
        (None, cli.args.as_slice())
    };

    let targets = Target::from_hosts(collect_hosts(cli, config, host_args)?);
    if targets.is_empty() {
        return Err(InputError::NoTargets);
    }

    let operation = match mode {
        Mode::Upload => Operation::Upload {
            source: cli.copy.clone().unwrap_or_default(),
            destination: cli.path.clone(),
            recursive: cli.recursive,
        },
        Mode::Download => Operation::Download {
            source: cli.download.clone().unwrap_or_default(),
            destination: PathBuf::from(&cli.path),
            recursive: cli.recursive,
            per_host_dirs: targets.len() > 1,
        },
        Mode::Diagnostic(diagnostic) => Operation::Diagnostic(diagnostic),
        Mode::LocalCommand => Operation::LocalCommand {
            command: command.unwrap_or_default(),
        },
        Mode::Script => {
            let path = cli.script.as_deref().map(expand_tilde).unwrap_or_default();
            let body = read_script(&path)?;
            let command = if cli.tty {
                format!("sudo sh <<'EOF'\n{body}EOF")
            } else {
                body
            };
            Operation::Exec { command }
        }
        Mode::Exec => Operation::Exec {
            command: command.unwrap_or_default(),
        },
    };

    let defaults = &config.defaults;
    let action_config = ActionConfig {
        identity: cli
            .identity
            .clone()
            .or_else(|| defaults.identity.as_ref().map(PathBuf::from))
            .map(|path| expand_tilde(&path))
            .unwrap_or_else(ActionConfig::default_identity),
        login: cli.login.clone().or_else(|| defaults.login.clone()),
        port: cli.port.or(defaults.port).unwrap_or(DEFAULT_PORT),
        connect_timeout: cli
            .timeout
            .or(defaults.timeout)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT),
        verbosity: cli.verbose,
        tty: cli.tty,
    };

    let policy = OutputPolicy {
        sorted: cli.sorted,
        quiet: cli.quiet,
        errors_only: cli.errors_only,
        one_line: cli.one_line,
        log_file: cli
            .output
            .clone()
            .or_else(|| defaults.log_file.as_ref().map(PathBuf::from))
            .map(|path| expand_tilde(&path)),
    };

    let max_parallel = cli.parallel.or(defaults.parallel).filter(|n| *n > 0);
    let deadline = cli
        .deadline
        .or(defaults.deadline)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    tracing::debug!(
        "Plan: {} on {} targets, policy {:?}",
        operation.name(),
        targets.len(),
        policy
    );

    Ok(RunPlan {
        operation,
        action_config,
        targets,
        policy,
        max_parallel,
        deadline,
    })
}

/// Positional hosts, then the hosts file, then the config group, in that order.
fn collect_hosts(
    cli: &Cli,
    config: &Config,
    host_args: &[String],
) -> Result<Vec<String>, InputError> {
    let mut hosts: Vec<String> = host_args.to_vec();

    if let Some(path) = &cli.hosts_file {
        hosts.extend(parse_hostfile(&expand_tilde(path))?);
    }

    if let Some(group) = &cli.group {
        hosts.extend(config.group(group)?.iter().cloned());
    }

    Ok(hosts)
}
