//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `run`: 展开模拟计划并本地执行
//! - `validate`: 校验模拟计划
//! - `report`: 汇报项目结果（强度 / k 比率）
//! - `programs`: 列出已注册的模拟后端
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: report, run, validate

pub mod report;
pub mod run;
pub mod validate;

use clap::{Parser, Subcommand};

/// Epmakit - 电子探针 Monte Carlo 模拟统一工具箱
#[derive(Parser)]
#[command(name = "epmakit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "A unified electron microprobe Monte Carlo simulation toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Expand a simulation plan and run it with the local runner
    Run(run::RunArgs),

    /// Validate every options expanded from a simulation plan
    Validate(validate::ValidateArgs),

    /// Report photon intensities and k-ratios from a project file
    Report(report::ReportArgs),

    /// List registered simulation programs
    Programs,
}
