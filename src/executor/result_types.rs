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

//! Result types for parallel execution.

use std::borrow::Cow;

use crate::action::ActionOutput;
use crate::target::Target;

/// Binary classification of one target's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Result of running the action against a single target.
///
/// The outcome is fixed when the result is built and is never re-derived
/// from the output text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub target: Target,
    pub output: Vec<u8>,
    pub outcome: Outcome,
}

impl ExecutionResult {
    pub fn from_action(target: Target, action_output: ActionOutput) -> Self {
        let outcome = if action_output.success {
            Outcome::Success
        } else {
            Outcome::Failure
        };
        Self {
            target,
            output: action_output.output,
            outcome,
        }
    }

    /// A failure that did not come from the action itself (deadline, lost task).
    pub fn synthesized_failure(target: Target, reason: &str) -> Self {
        Self {
            target,
            output: format!("{reason}\n").into_bytes(),
            outcome: Outcome::Failure,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    pub fn output_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }
}
