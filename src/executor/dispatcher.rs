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

//! Dispatcher: start one task per target and return at once.

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use super::result_types::ExecutionResult;
use super::runner::run_target;
use crate::action::Action;
use crate::target::Target;

/// Handles of the tasks started for one batch.
#[derive(Debug)]
pub struct Dispatch {
    handles: Vec<JoinHandle<()>>,
}

impl Dispatch {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Abort every task that is still running. Finished tasks are unaffected.
    pub fn abort_all(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

/// Spawn one runner per target.
///
/// With `max_parallel == None` every target is in flight at once. With
/// `Some(n)` all tasks are still spawned immediately but at most `n` of them
/// run their action concurrently; the result channel contract is the same
/// either way. Must be called from within a tokio runtime.
pub fn dispatch(
    targets: &[Target],
    action: Arc<dyn Action>,
    max_parallel: Option<usize>,
    tx: UnboundedSender<ExecutionResult>,
) -> Dispatch {
    let semaphore = max_parallel
        .filter(|limit| *limit > 0)
        .map(|limit| Arc::new(Semaphore::new(limit)));

    tracing::debug!(
        "Dispatching {} targets (parallel limit: {})",
        targets.len(),
        semaphore
            .as_ref()
            .map_or_else(|| "none".to_string(), |s| s.available_permits().to_string())
    );

    let handles = targets
        .iter()
        .map(|target| {
            tokio::spawn(run_target(
                target.clone(),
                Arc::clone(&action),
                semaphore.clone(),
                tx.clone(),
            ))
        })
        .collect();

    Dispatch { handles }
}
