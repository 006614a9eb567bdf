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

//! Core parallel executor implementation.

use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use super::collector::{collect, CollectStats, ResultSink};
use super::dispatcher::dispatch;
use super::result_types::ExecutionResult;
use crate::action::Action;
use crate::output::{BatchSummary, Presenter};
use crate::target::Target;

/// Fans one action out to every target and collects the results.
pub struct ParallelExecutor {
    pub(crate) targets: Vec<Target>,
    pub(crate) action: Arc<dyn Action>,
    pub(crate) max_parallel: Option<usize>,
    pub(crate) deadline: Option<Duration>,
}

impl ParallelExecutor {
    /// Create an executor with unbounded concurrency and no deadline.
    pub fn new(targets: Vec<Target>, action: Arc<dyn Action>) -> Self {
        Self {
            targets,
            action,
            max_parallel: None,
            deadline: None,
        }
    }

    /// Bound the number of actions running at once. `None` or `Some(0)` is unbounded.
    pub fn with_max_parallel(mut self, max_parallel: Option<usize>) -> Self {
        self.max_parallel = max_parallel.filter(|n| *n > 0);
        self
    }

    /// Give up on targets still running after `deadline` and report them as failed.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Run the batch into `sink`, returning once every target has a result.
    pub async fn run_into<S: ResultSink + ?Sized>(&self, sink: &mut S) -> Result<CollectStats> {
        let (tx, mut rx) = mpsc::unbounded_channel::<ExecutionResult>();
        let dispatch = dispatch(&self.targets, Arc::clone(&self.action), self.max_parallel, tx);

        tracing::info!("Started {} tasks", dispatch.len());
        let stats = collect(&mut rx, &self.targets, self.deadline, &dispatch, sink).await?;
        tracing::info!(
            "Collected {} results ({} synthesized)",
            stats.received + stats.synthesized,
            stats.synthesized
        );
        Ok(stats)
    }

    /// Run the batch and return the results in arrival order.
    pub async fn execute(&self) -> Result<Vec<ExecutionResult>> {
        let mut results = Vec::with_capacity(self.targets.len());
        self.run_into(&mut results).await?;
        Ok(results)
    }

    /// Run the batch through a presenter: log START, results, summary, log END.
    pub async fn run<W: Write, L: Write>(
        &self,
        presenter: &mut Presenter<W, L>,
    ) -> Result<BatchSummary> {
        presenter.begin()?;
        self.run_into(presenter).await?;
        presenter.finish()
    }
}
