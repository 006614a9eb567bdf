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

//! Collector: drain exactly one result per target.

use anyhow::Result;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;

use super::dispatcher::Dispatch;
use super::result_types::ExecutionResult;
use crate::target::Target;
use crate::utils::format_duration;

/// Consumer of collected results, fed in arrival order.
pub trait ResultSink {
    fn accept(&mut self, result: ExecutionResult) -> Result<()>;
}

impl ResultSink for Vec<ExecutionResult> {
    fn accept(&mut self, result: ExecutionResult) -> Result<()> {
        self.push(result);
        Ok(())
    }
}

/// Counters for one collected batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Results that came from the runners.
    pub received: usize,
    /// Failures produced by the collector for targets that never reported.
    pub synthesized: usize,
}

/// Receive one result per target and hand each to `sink` as it arrives.
///
/// Without a deadline this waits as long as the slowest action. With one,
/// every target still outstanding when it passes gets a synthesized failure
/// and its task is aborted. Targets whose task ended without reporting (the
/// channel closed early) are filled in the same way, so the sink always
/// sees exactly `targets.len()` results.
pub async fn collect<S: ResultSink + ?Sized>(
    rx: &mut UnboundedReceiver<ExecutionResult>,
    targets: &[Target],
    deadline: Option<Duration>,
    dispatch: &Dispatch,
    sink: &mut S,
) -> Result<CollectStats> {
    let mut pending: BTreeMap<usize, Target> =
        targets.iter().map(|t| (t.index, t.clone())).collect();
    let deadline_at = deadline.and_then(|d| {
        let at = Instant::now().checked_add(d);
        if at.is_none() {
            tracing::warn!(
                "Deadline of {} is out of range, waiting without one",
                format_duration(d)
            );
        }
        at
    });
    let mut stats = CollectStats::default();
    let mut expired = false;

    while !pending.is_empty() {
        let next = match deadline_at {
            Some(at) => match tokio::time::timeout_at(at, rx.recv()).await {
                Ok(next) => next,
                Err(_) => {
                    expired = true;
                    break;
                }
            },
            None => rx.recv().await,
        };

        let Some(result) = next else {
            tracing::warn!(
                "Result channel closed with {} targets outstanding",
                pending.len()
            );
            break;
        };

        if pending.remove(&result.target.index).is_none() {
            tracing::warn!(
                "[{}] ignoring unexpected or duplicate result",
                result.target.host
            );
            continue;
        }

        stats.received += 1;
        if let Err(e) = sink.accept(result) {
            dispatch.abort_all();
            return Err(e);
        }
    }

    if pending.is_empty() {
        return Ok(stats);
    }

    dispatch.abort_all();
    let reason = match deadline {
        Some(d) if expired => format!("deadline of {} exceeded", format_duration(d)),
        _ => "task ended without reporting a result".to_string(),
    };
    tracing::warn!("{} targets unfinished: {}", pending.len(), reason);

    for target in pending.into_values() {
        stats.synthesized += 1;
        sink.accept(ExecutionResult::synthesized_failure(target, &reason))?;
    }

    Ok(stats)
}
