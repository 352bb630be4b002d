//! # 错误累积器
//!
//! 在一批检查中收集错误与警告，结束时一次性汇报：
//! 有错误则返回携带全部原因的单个聚合错误，只有警告则通过
//! `log::warn` 输出。校验、导出、导入都依赖这一模式，
//! 保证一次调用暴露全部配置问题。
//!
//! ## 依赖关系
//! - 被 `backend/validator.rs`, `backend/exporter.rs`, `backend/importer.rs` 使用
//! - 使用 `error.rs` 的 `ErrorBundle`

use crate::error::{EpmakitError, ErrorBundle, Result};

/// 聚合错误的种类，决定结束时抛出的错误变体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorKind {
    Validation,
    Export,
    Import,
}

/// 错误累积器
#[derive(Debug, Default)]
pub struct ErrorAccumulator {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ErrorAccumulator {
    pub fn new() -> Self {
        ErrorAccumulator::default()
    }

    /// 记录一个错误；不中断后续检查
    pub fn add_error(&mut self, cause: impl Into<String>) {
        self.errors.push(cause.into());
    }

    /// 记录一个警告
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// 结束累积：有错误则返回一个携带全部原因的聚合错误，
    /// 警告统一经 `log::warn` 输出后丢弃
    pub fn finish(self, kind: AccumulatorKind) -> Result<()> {
        for warning in &self.warnings {
            log::warn!("{}", warning);
        }

        if self.errors.is_empty() {
            return Ok(());
        }

        let bundle = ErrorBundle::new(self.errors);
        Err(match kind {
            AccumulatorKind::Validation => EpmakitError::Validation(bundle),
            AccumulatorKind::Export => EpmakitError::Export(bundle),
            AccumulatorKind::Import => EpmakitError::Import(bundle),
        })
    }
}
