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

use anyhow::Result;
use std::io::Write;
use std::sync::Arc;

use super::initialization::RunPlan;
use crate::action::{Action, CommandAction};
use crate::executor::ParallelExecutor;
use crate::output::{BatchSummary, Presenter};

/// Run a plan with the process-backed action, writing results to `out`.
///
/// `colors` paints the quiet status tags; pass
/// [`should_use_colors`](crate::output::should_use_colors) when
/// `out` is the real stdout.
///
/// The log file is opened before anything is dispatched, so an unwritable
/// log path aborts the run up front.
pub async fn run_plan<W: Write>(plan: RunPlan, out: W, colors: bool) -> Result<BatchSummary> {
    let mut presenter = Presenter::open(plan.policy, out)?.with_colors(colors);

    tracing::info!(
        "Running {} on {} hosts",
        plan.operation.name(),
        plan.targets.len()
    );

    let action: Arc<dyn Action> = Arc::new(CommandAction::new(plan.operation, plan.action_config));
    let executor = ParallelExecutor::new(plan.targets, action)
        .with_max_parallel(plan.max_parallel)
        .with_deadline(plan.deadline);

    executor.run(&mut presenter).await
}
