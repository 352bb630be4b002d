//! # programs 命令实现
//!
//! 列出已注册的模拟后端。
//!
//! ## 依赖关系
//! - 使用 `backend/` 的进程级注册表
//! - 使用 `utils/output.rs`

use crate::backend;
use crate::error::Result;
use crate::utils::output;

/// 执行 programs 命令
pub fn execute() -> Result<()> {
    let registry = backend::global_registry();
    let identifiers = registry.identifiers();

    if identifiers.is_empty() {
        output::print_warning("No simulation programs registered.");
        return Ok(());
    }

    output::print_header("Registered Simulation Programs");
    for identifier in identifiers {
        println!("  {}", identifier);
    }

    Ok(())
}
