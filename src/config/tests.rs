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

//! Configuration tests.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::types::Config;
use super::utils::expand_tilde;

#[test]
fn test_expand_tilde_leaves_plain_paths() {
    assert_eq!(
        expand_tilde(Path::new("/etc/hostfan.yaml")),
        PathBuf::from("/etc/hostfan.yaml")
    );
    assert_eq!(expand_tilde(Path::new("a/~/b")), PathBuf::from("a/~/b"));
}

#[test]
fn test_expand_tilde_uses_home() {
    if let Ok(home) = std::env::var("HOME") {
        let expanded = expand_tilde(Path::new("~/.ssh/id_rsa"));
        assert_eq!(expanded, PathBuf::from(home).join(".ssh/id_rsa"));
    }
}

#[test]
fn test_config_parsing() {
    let yaml = r#"
defaults:
  login: admin
  port: 2222
  identity: ~/.ssh/id_ed25519
  timeout: 10
  parallel: 32
  deadline: 120
  log_file: /var/log/hostfan.log

groups:
  web:
    - web1.example.com
    - web2.example.com
  db:
    - db1.example.com
"#;

    let config = Config::from_yaml(yaml, Path::new("config.yaml")).unwrap();
    assert_eq!(config.defaults.login.as_deref(), Some("admin"));
    assert_eq!(config.defaults.port, Some(2222));
    assert_eq!(config.defaults.timeout, Some(10));
    assert_eq!(config.defaults.parallel, Some(32));
    assert_eq!(config.defaults.deadline, Some(120));
    assert_eq!(
        config.group("web").unwrap(),
        &["web1.example.com", "web2.example.com"]
    );
    assert_eq!(config.group("db").unwrap().len(), 1);
}

#[test]
fn test_empty_config_is_default() {
    let config = Config::from_yaml("{}", Path::new("config.yaml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_yaml() {
    let err = Config::from_yaml("defaults: [unclosed", Path::new("bad.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_unknown_group() {
    let err = Config::default().group("nope").unwrap_err();
    assert_eq!(err.to_string(), "unknown host group 'nope'");
}

#[tokio::test]
async fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "defaults:\n  port: 2200").unwrap();
    let config = Config::load(file.path()).await.unwrap();
    assert_eq!(config.defaults.port, Some(2200));
}

#[tokio::test]
async fn test_explicit_missing_file_is_error() {
    let err = Config::load_or_default(Some(Path::new("/nonexistent/hostfan.yaml")))
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
}
