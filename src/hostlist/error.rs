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

//! Error types for host-list and script file reading

use thiserror::Error;

/// Errors that can occur while reading host-list or script files
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostlistError {
    /// File does not exist
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// File exists but could not be read
    #[error("failed to read '{path}': {reason}")]
    FileReadError { path: String, reason: String },

    /// File is larger than we are willing to load
    #[error("'{path}' is {size} bytes, exceeding the limit of {limit} bytes")]
    FileTooLarge { path: String, size: u64, limit: u64 },
}
