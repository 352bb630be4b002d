//! # Epmakit - 电子探针 Monte Carlo 模拟统一工具箱
//!
//! 把一份声明式的模拟计划展开为去重后的模拟作业集合
//! （含 k 比率分析合成的标样模拟），交给可互换的 Monte Carlo
//! 后端执行，再把多个模拟的结果组合为带不确定度的派生量。
//!
//! ## 子命令
//! - `run`      - 展开计划、本地并行执行、重算派生结果
//! - `validate` - 校验计划展开出的每份选项
//! - `report`   - 汇报项目的强度与 k 比率结果
//! - `programs` - 列出已注册的模拟后端
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── models/   (选项数据模型)
//!   │     ├── results/  (结果模型与构建器)
//!   │     ├── project   (模拟与项目)
//!   │     ├── backend/  (后端契约与注册表)
//!   │     └── runner/   (本地并行执行)
//!   ├── xray/       (元素与谱线参考数据)
//!   ├── settings.rs (用户偏好)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod backend;
mod cli;
mod commands;
mod error;
mod models;
mod project;
mod results;
mod runner;
mod settings;
mod utils;
mod xray;

use clap::Parser;
use cli::Cli;

fn main() {
    env_logger::init();

    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
