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

//! Terminal detection for colored output.

use std::io::IsTerminal;

/// Check if stdout is a TTY outside of a CI environment.
pub fn is_tty() -> bool {
    let is_terminal = std::io::stdout().is_terminal();

    let is_ci = std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("JENKINS_URL").is_ok();

    is_terminal && !is_ci
}

/// Colors are used only on a TTY, without `NO_COLOR`, and when TERM is not "dumb".
pub fn should_use_colors() -> bool {
    if !is_tty() {
        return false;
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    !matches!(std::env::var("TERM").as_deref(), Ok("dumb"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_env<F: FnOnce()>(key: &str, value: &str, f: F) {
        let saved = std::env::var(key).ok();
        std::env::set_var(key, value);
        f();
        match saved {
            Some(old) => std::env::set_var(key, old),
            None => std::env::remove_var(key),
        }
    }

    #[test]
    #[serial]
    fn test_no_color_disables_colors() {
        with_env("NO_COLOR", "1", || assert!(!should_use_colors()));
    }

    #[test]
    #[serial]
    fn test_dumb_terminal_disables_colors() {
        with_env("TERM", "dumb", || assert!(!should_use_colors()));
    }

    #[test]
    #[serial]
    fn test_ci_is_never_a_tty() {
        with_env("CI", "true", || assert!(!is_tty()));
    }
}
