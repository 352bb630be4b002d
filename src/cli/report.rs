//! # report 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/report.rs`

use clap::Args;
use std::path::PathBuf;

/// report 子命令参数
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Path to the project JSON file
    #[arg(long)]
    pub project: PathBuf,

    /// Also write the full table to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
