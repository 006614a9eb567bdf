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

//! Action backed by an external process.

use async_trait::async_trait;
use std::process::Stdio;

use super::download::prepare_host_dir;
use super::{Action, ActionConfig, ActionOutput, Operation};
use crate::target::Target;

/// Runs an [`Operation`] by spawning the program it expands to.
///
/// Output is stdout followed by stderr. The target succeeds only if the
/// process started and exited with status 0. The child is killed if the
/// task driving it is dropped, so an aborted task does not leave an ssh
/// process behind.
#[derive(Debug, Clone)]
pub struct CommandAction {
    operation: Operation,
    config: ActionConfig,
}

impl CommandAction {
    pub fn new(operation: Operation, config: ActionConfig) -> Self {
        Self { operation, config }
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn config(&self) -> &ActionConfig {
        &self.config
    }
}

#[async_trait]
impl Action for CommandAction {
    async fn invoke(&self, target: &Target) -> ActionOutput {
        let local_dir = match &self.operation {
            Operation::Download {
                destination,
                per_host_dirs: true,
                ..
            } => Some(prepare_host_dir(destination, target.hostname()).await),
            _ => None,
        };

        let invocation = self
            .operation
            .invocation(&self.config, &target.host, local_dir.as_deref());

        tracing::debug!(
            "[{}] {} {}",
            target.host,
            invocation.program,
            invocation.args.join(" ")
        );

        let mut command = invocation.to_command();
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match command.output().await {
            Ok(output) => {
                let mut bytes = output.stdout;
                bytes.extend_from_slice(&output.stderr);
                if !output.status.success() {
                    tracing::debug!("[{}] exited with {}", target.host, output.status);
                }
                ActionOutput {
                    output: bytes,
                    success: output.status.success(),
                }
            }
            Err(e) => {
                tracing::debug!("[{}] failed to spawn {}: {}", target.host, invocation.program, e);
                ActionOutput::failure(format!("{}: {e}\n", invocation.program))
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_command_success() {
        let action = CommandAction::new(
            Operation::LocalCommand {
                command: "echo hello".to_string(),
            },
            ActionConfig::default(),
        );
        let out = action.invoke(&Target::new("web1", 0)).await;
        assert!(out.success);
        assert_eq!(out.output, b"hello web1\n");
    }

    #[tokio::test]
    async fn test_local_command_nonzero_exit_is_failure() {
        let action = CommandAction::new(
            Operation::LocalCommand {
                command: "false".to_string(),
            },
            ActionConfig::default(),
        );
        let out = action.invoke(&Target::new("web1", 0)).await;
        assert!(!out.success);
    }

    #[tokio::test]
    async fn test_missing_program_is_failure_output() {
        let action = CommandAction::new(
            Operation::LocalCommand {
                command: "hostfan-no-such-program".to_string(),
            },
            ActionConfig::default(),
        );
        let out = action.invoke(&Target::new("web1", 0)).await;
        assert!(!out.success);
        let text = String::from_utf8_lossy(&out.output);
        assert!(text.starts_with("hostfan-no-such-program: "));
        assert!(text.ends_with('\n'));
    }
}
