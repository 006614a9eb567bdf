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
use clap::Parser;
use std::time::Instant;

use hostfan::{
    app::{build_plan, run_plan},
    cli::{Cli, USAGE},
    config::Config,
    output::should_use_colors,
    utils::{format_duration, init_logging},
};

/// Show the usage synopsis on stderr
fn show_usage() {
    eprintln!("usage: {USAGE}");
    eprintln!();
    eprintln!("For more information, try 'hostfan --help'");
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args_os().len() == 1 {
        show_usage();
        std::process::exit(1);
    }

    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load_or_default(cli.config.as_deref()).await?;

    let plan = match build_plan(&cli, &config) {
        Ok(plan) => plan,
        Err(e) if e.is_usage() => {
            eprintln!("hostfan: {e}");
            show_usage();
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let started = Instant::now();
    let summary = run_plan(plan, std::io::stdout(), should_use_colors()).await?;
    tracing::info!("{} in {}", summary, format_duration(started.elapsed()));

    // Per-host failures are reported in the output, not through the exit status
    Ok(())
}
