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

//! Pure text renderings of a single result.

use owo_colors::OwoColorize;

use crate::executor::ExecutionResult;

pub const OK_TAG: &str = "[OK]";
pub const ERROR_TAG: &str = "[ERROR]";

/// Full rendering: `host:\n<output>` for a success, `host: <output>` for a
/// failure or when `one_line` is set. Always ends with a newline.
pub fn render_full(result: &ExecutionResult, one_line: bool) -> String {
    let output = result.output_text();
    let mut text = if result.is_success() && !one_line {
        format!("{}:\n{output}", result.target.host)
    } else {
        format!("{}: {output}", result.target.host)
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Quiet rendering: `host\t[OK]` or `host\t[ERROR]`, with a newline.
///
/// Depends only on the target and its classification.
pub fn render_quiet(result: &ExecutionResult) -> String {
    quiet_line(&result.target.host, result.is_success(), false)
}

/// Quiet line for `host`, with the status tag painted when `colors` is set.
pub fn quiet_line(host: &str, success: bool, colors: bool) -> String {
    match (success, colors) {
        (true, false) => format!("{host}\t{OK_TAG}\n"),
        (false, false) => format!("{host}\t{ERROR_TAG}\n"),
        (true, true) => format!("{host}\t{}\n", OK_TAG.green()),
        (false, true) => format!("{host}\t{}\n", ERROR_TAG.red()),
    }
}
