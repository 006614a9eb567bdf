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

//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    /// Named host lists, selectable with `-g`.
    #[serde(default)]
    pub groups: HashMap<String, Vec<String>>,
}

/// Global default settings.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub identity: Option<String>,
    pub login: Option<String>,
    pub port: Option<u16>,
    /// Connect timeout handed to ssh/scp, in seconds.
    pub timeout: Option<u64>,
    /// Maximum concurrently running actions. 0 or unset is unbounded.
    pub parallel: Option<usize>,
    /// Overall deadline for a batch, in seconds.
    pub deadline: Option<u64>,
    pub log_file: Option<String>,
}
