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

use std::fmt;

/// One destination an operation is fanned out to.
///
/// `index` is the target's position in the submitted ordering and is the
/// only ordering information that exists before dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub host: String,
    pub index: usize,
}

impl Target {
    pub fn new(host: impl Into<String>, index: usize) -> Self {
        Self {
            host: host.into(),
            index,
        }
    }

    /// Build an ordered target set from raw host strings.
    ///
    /// Entries are trimmed of surrounding whitespace (file-sourced lists
    /// often carry trailing newlines) and empty entries are dropped before
    /// positions are assigned.
    pub fn from_hosts<I, S>(hosts: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        hosts
            .into_iter()
            .filter_map(|host| {
                let host = host.as_ref().trim();
                (!host.is_empty()).then(|| host.to_string())
            })
            .enumerate()
            .map(|(index, host)| Self { host, index })
            .collect()
    }

    /// Host portion of the identifier, without any `user@` prefix.
    pub fn hostname(&self) -> &str {
        match self.host.rfind('@') {
            Some(at_pos) => &self.host[at_pos + 1..],
            None => &self.host,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)
    }
}
