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

//! Presentation pipeline.
//!
//! Turns collected results into the live stdout stream, the optional
//! mirrored log file and the final `hosts = N, errors = E` line. The
//! toggles in [`OutputPolicy`] are independent and compose:
//!
//! - streaming (default): each result is printed as it arrives
//! - sorted: the whole batch is buffered and emitted sorted by rendered text
//! - quiet: stdout shows `host\t[OK]` / `host\t[ERROR]`; the log keeps full text
//! - errors-only: successes are dropped from stdout and the log, not from the count
//! - one-line: `host: output` for every result and no summary line

mod policy;
mod presenter;
mod render;
mod run_log;
mod terminal;

pub use policy::OutputPolicy;
pub use presenter::{BatchSummary, Presenter};
pub use render::{quiet_line, render_full, render_quiet, ERROR_TAG, OK_TAG};
pub use run_log::{end_line, start_line, timestamp, RunLog, TIMESTAMP_FORMAT};
pub use terminal::{is_tty, should_use_colors};
