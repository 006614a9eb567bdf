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

use std::path::{Path, PathBuf};
use tokio::fs;

/// Pick (and create) the directory a multi-host download writes into.
///
/// Each host gets `<base>/<host>`. When something that is not a directory
/// already sits at that path, `<base>/<host>.host` is used instead. Creation
/// errors are only logged: scp reports the real failure for the target.
pub async fn prepare_host_dir(base: &Path, host: &str) -> PathBuf {
    let dir = base.join(host);

    let dir = match fs::metadata(&dir).await {
        Ok(metadata) if metadata.is_dir() => return dir,
        Ok(_) => base.join(format!("{host}.host")),
        Err(_) => dir,
    };

    if let Err(e) = fs::create_dir(&dir).await {
        if e.kind() != std::io::ErrorKind::AlreadyExists {
            tracing::warn!("Failed to create download directory {:?}: {}", dir, e);
        }
    }

    dir
}
