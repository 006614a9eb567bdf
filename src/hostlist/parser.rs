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

//! Line-oriented parsing of host-list and script files

use std::path::Path;

use super::error::HostlistError;

/// Maximum size of a host-list or script file (1 MiB)
pub const MAX_INPUT_FILE_SIZE: u64 = 1024 * 1024;

fn read_limited(path: &Path) -> Result<String, HostlistError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HostlistError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            HostlistError::FileReadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(HostlistError::FileTooLarge {
            path: path.display().to_string(),
            size: metadata.len(),
            limit: MAX_INPUT_FILE_SIZE,
        });
    }

    std::fs::read_to_string(path).map_err(|e| HostlistError::FileReadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Read hosts from a file, one per line.
///
/// Lines starting with `#` and blank lines are skipped; surrounding
/// whitespace is trimmed. Order is preserved.
pub fn parse_hostfile(path: &Path) -> Result<Vec<String>, HostlistError> {
    let content = read_limited(path)?;

    let hosts: Vec<String> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect();

    tracing::debug!("Read {} hosts from {}", hosts.len(), path.display());
    Ok(hosts)
}

/// Read a script body to be run remotely.
///
/// Lines starting with `#` (the shebang included) are dropped. Every other
/// line keeps its newline, so the body can be fed to a heredoc as-is.
pub fn read_script(path: &Path) -> Result<String, HostlistError> {
    let content = read_limited(path)?;

    let mut script = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        if line.starts_with('#') {
            continue;
        }
        script.push_str(line);
    }
    if !script.is_empty() && !script.ends_with('\n') {
        script.push('\n');
    }

    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_hostfile_skips_comments_and_blanks() {
        let file = write_temp("# production web tier\nweb1\n\n  web2  \n#web3\ndb1\n");
        let hosts = parse_hostfile(file.path()).unwrap();
        assert_eq!(hosts, vec!["web1", "web2", "db1"]);
    }

    #[test]
    fn test_parse_hostfile_without_trailing_newline() {
        let file = write_temp("a\nb");
        assert_eq!(parse_hostfile(file.path()).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_hostfile_missing() {
        let err = parse_hostfile(Path::new("/nonexistent/hostfan/hosts")).unwrap_err();
        assert!(matches!(err, HostlistError::FileNotFound { .. }));
    }

    #[test]
    fn test_parse_hostfile_too_large() {
        let big = "h\n".repeat((MAX_INPUT_FILE_SIZE as usize) / 2 + 1);
        let file = write_temp(&big);
        let err = parse_hostfile(file.path()).unwrap_err();
        assert!(matches!(err, HostlistError::FileTooLarge { .. }));
    }

    #[test]
    fn test_read_script_drops_comment_lines() {
        let file = write_temp("#!/bin/sh\n# setup\nuptime\n\ndf -h\n");
        let script = read_script(file.path()).unwrap();
        assert_eq!(script, "uptime\n\ndf -h\n");
    }

    #[test]
    fn test_read_script_adds_final_newline() {
        let file = write_temp("hostname");
        assert_eq!(read_script(file.path()).unwrap(), "hostname\n");
    }
}
