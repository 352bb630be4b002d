//! # run 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use clap::Args;
use std::path::PathBuf;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the simulation plan JSON file
    #[arg(long)]
    pub plan: PathBuf,

    /// Root directory for per-simulation output directories
    #[arg(long, default_value = "simulations")]
    pub output: PathBuf,

    /// Number of parallel jobs (0 = number of CPUs)
    #[arg(long, default_value_t = 0)]
    pub jobs: usize,

    /// Where to save the resulting project file
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Validate and export checks only, without running simulations
    #[arg(long)]
    pub dry_run: bool,
}
