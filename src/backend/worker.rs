//! # 执行契约
//!
//! 工作器驱动一次外部程序运行：导出输入、启动程序、在安全点
//! 轮询取消令牌并更新进度、把导入的结果追加到模拟。
//! 外部程序异常退出产生 `Worker` 错误；令牌被取消产生
//! `Cancelled`，二者区分"意外失败"与"按请求停止"。
//!
//! ## 依赖关系
//! - 被 `backend/mock.rs`, `runner/local.rs` 使用
//! - 使用 `project.rs`, `runner/token.rs`

use std::path::Path;

use crate::error::Result;
use crate::project::Simulation;
use crate::runner::token::TaskToken;

/// 后端工作器
pub trait Worker: Send + Sync {
    /// 运行模拟：结果追加到 `simulation.results`。
    /// 令牌取消时尽快以 `Cancelled` 返回。
    fn run(&self, token: &TaskToken, simulation: &mut Simulation, output_dir: &Path)
        -> Result<()>;
}
