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

use std::path::PathBuf;

/// Output toggles selected once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPolicy {
    /// Buffer the batch and emit it sorted by rendered text.
    pub sorted: bool,
    /// Reduce stdout lines to host and status tag.
    pub quiet: bool,
    /// Suppress successful results from every output surface.
    pub errors_only: bool,
    /// Render every result as `host: output` and skip the summary.
    pub one_line: bool,
    /// Append full results to this file, framed by START/END lines.
    pub log_file: Option<PathBuf>,
}

impl OutputPolicy {
    pub fn shows_summary(&self) -> bool {
        !self.one_line
    }

    /// Whether a result with this classification reaches any output surface.
    pub fn is_visible(&self, success: bool) -> bool {
        !(self.errors_only && success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_streams_everything() {
        let policy = OutputPolicy::default();
        assert!(!policy.sorted);
        assert!(policy.shows_summary());
        assert!(policy.is_visible(true));
        assert!(policy.is_visible(false));
    }

    #[test]
    fn test_errors_only_visibility() {
        let policy = OutputPolicy {
            errors_only: true,
            ..Default::default()
        };
        assert!(!policy.is_visible(true));
        assert!(policy.is_visible(false));
    }
}
