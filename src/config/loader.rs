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

//! Configuration loading.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::error::ConfigError;
use super::types::Config;
use super::utils::expand_tilde;

impl Config {
    /// `$XDG_CONFIG_HOME/hostfan/config.yaml` (or the platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "hostfan").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    pub fn from_yaml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from a file that must exist.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let path = expand_tilde(path);

        let content = fs::read_to_string(&path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound { path: path.clone() }
            } else {
                ConfigError::Read {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let config = Self::from_yaml(&content, &path)?;
        tracing::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load the explicit file if given, otherwise the default file if present.
    ///
    /// A missing default file is not an error; a missing explicit one is.
    pub async fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path).await;
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path).await,
            Some(path) => {
                tracing::debug!("No config file at {:?}, using defaults", path);
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Hosts of a named group, in file order.
    pub fn group(&self, name: &str) -> Result<&[String], ConfigError> {
        self.groups
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ConfigError::UnknownGroup {
                name: name.to_string(),
            })
    }
}
