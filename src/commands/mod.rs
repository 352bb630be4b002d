//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `models/`, `backend/`, `runner/`, `utils/`
//! - 子模块: programs, report, run, validate

pub mod programs;
pub mod report;
pub mod run;
pub mod validate;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Run(args) => run::execute(args),
        Commands::Validate(args) => validate::execute(args),
        Commands::Report(args) => report::execute(args),
        Commands::Programs => programs::execute(),
    }
}
