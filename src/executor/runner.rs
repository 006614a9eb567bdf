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

//! Task runner: one action invocation per target.

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Semaphore;

use super::result_types::ExecutionResult;
use crate::action::Action;
use crate::target::Target;

/// Invoke the action once for `target` and report exactly one result.
///
/// When a semaphore is supplied the invocation waits for a permit first.
/// Per-target failures are data; this function has no error path.
pub(crate) async fn run_target(
    target: Target,
    action: Arc<dyn Action>,
    semaphore: Option<Arc<Semaphore>>,
    tx: UnboundedSender<ExecutionResult>,
) {
    let _permit = match semaphore {
        Some(semaphore) => match semaphore.acquire_owned().await {
            Ok(permit) => Some(permit),
            Err(e) => {
                let reason = format!("semaphore acquisition failed: {e}");
                report(&tx, ExecutionResult::synthesized_failure(target, &reason));
                return;
            }
        },
        None => None,
    };

    tracing::trace!("[{}] invoking action", target.host);
    let output = action.invoke(&target).await;
    report(&tx, ExecutionResult::from_action(target, output));
}

fn report(tx: &UnboundedSender<ExecutionResult>, result: ExecutionResult) {
    if let Err(e) = tx.send(result) {
        tracing::debug!("[{}] result dropped, collector gone", e.0.target.host);
    }
}
