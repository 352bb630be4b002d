//! # 导出契约
//!
//! 导出器把一份选项转成后端程序的输入文件。实现者对选项的
//! 每个子对象运行对应的导出例程，遇到不支持的种类或非法取值
//! 不中断，而是写入错误累积器；一次 `export()` 要么静默成功，
//! 要么以单个聚合导出错误汇报全部问题。`dry_run` 只校验不落盘。
//!
//! ## 依赖关系
//! - 被 `backend/mock.rs`, `backend/worker.rs`, `commands/` 使用
//! - 使用 `utils/accumulator.rs`

use std::path::Path;

use crate::error::Result;
use crate::models::options::Options;

/// 后端导出器
pub trait Exporter: Send + Sync {
    /// 把选项导出到输出目录；校验失败时返回聚合导出错误。
    /// `dry_run` 为真时执行全部检查但不写任何文件。
    fn export(&self, options: &Options, dirpath: &Path, dry_run: bool) -> Result<()>;
}
