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

//! Host-list and script file readers.
//!
//! Both readers run before anything is dispatched, so any error here aborts
//! the invocation without starting a single task.

mod error;
mod parser;

pub use error::HostlistError;
pub use parser::{parse_hostfile, read_script, MAX_INPUT_FILE_SIZE};
