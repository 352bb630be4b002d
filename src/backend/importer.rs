//! # 导入契约
//!
//! 导入器解析后端程序的输出目录，把选项中每个分析映射到
//! 对应的解析例程；没有例程的分析种类写入错误累积器，
//! 一次 `import()` 以单个聚合导入错误汇报全部问题。
//!
//! ## 依赖关系
//! - 被 `backend/mock.rs`, `backend/worker.rs` 使用
//! - 使用 `results/`, `utils/accumulator.rs`

use std::path::Path;

use crate::error::Result;
use crate::models::options::Options;
use crate::results::SimulationResult;

/// 后端导入器
pub trait Importer: Send + Sync {
    /// 从输出目录解析全部结果
    fn import(&self, options: &Options, dirpath: &Path) -> Result<Vec<SimulationResult>>;
}
