pub mod action;
pub mod app;
pub mod cli;
pub mod config;
pub mod executor;
pub mod hostlist;
pub mod output;
pub mod target;
pub mod utils;

pub use action::{Action, ActionConfig, ActionOutput, CommandAction, Operation};
pub use cli::Cli;
pub use config::Config;
pub use executor::{ExecutionResult, Outcome, ParallelExecutor};
pub use output::{BatchSummary, OutputPolicy, Presenter};
pub use target::Target;
