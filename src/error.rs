//! # 统一错误处理模块
//!
//! 定义 Epmakit 的所有错误类型，使用 `thiserror` 派生。
//! 校验/导出/导入类错误携带 `ErrorBundle`，一次性汇报全部问题，
//! 而不是在第一个错误处中断。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use std::fmt;

use thiserror::Error;

/// 聚合错误包：一次校验/导出/导入过程收集到的全部原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBundle {
    causes: Vec<String>,
}

impl ErrorBundle {
    pub fn new(causes: Vec<String>) -> Self {
        ErrorBundle { causes }
    }

    /// 原因数量
    pub fn len(&self) -> usize {
        self.causes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }

    /// 全部原因
    pub fn causes(&self) -> &[String] {
        &self.causes
    }
}

impl fmt::Display for ErrorBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} problem(s)", self.causes.len())?;
        for cause in &self.causes {
            write!(f, "\n  - {}", cause)?;
        }
        Ok(())
    }
}

/// Epmakit 统一错误类型
#[derive(Error, Debug)]
pub enum EpmakitError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 数据模型错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid chemical formula: {0}")]
    InvalidFormula(String),

    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("Unknown X-ray line: {0}")]
    UnknownXrayLine(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 聚合错误（一次调用汇报全部原因）
    // ─────────────────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(ErrorBundle),

    #[error("Export failed: {0}")]
    Export(ErrorBundle),

    #[error("Import failed: {0}")]
    Import(ErrorBundle),

    // ─────────────────────────────────────────────────────────────
    // 执行层错误
    // ─────────────────────────────────────────────────────────────
    #[error("Program not found: {0}")]
    ProgramNotFound(String),

    #[error("Worker for program '{program}' failed: {reason}")]
    Worker { program: String, reason: String },

    #[error("Simulation cancelled")]
    Cancelled,

    // ─────────────────────────────────────────────────────────────
    // 序列化错误
    // ─────────────────────────────────────────────────────────────
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, EpmakitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_bundle_display() {
        let bundle = ErrorBundle::new(vec!["first".to_string(), "second".to_string()]);
        let text = format!("{}", bundle);

        assert!(text.contains("2 problem(s)"));
        assert!(text.contains("first"));
        assert!(text.contains("second"));
    }

    #[test]
    fn test_validation_error_carries_all_causes() {
        let err = EpmakitError::Validation(ErrorBundle::new(vec![
            "bad name".to_string(),
            "bad density".to_string(),
        ]));

        match err {
            EpmakitError::Validation(bundle) => assert_eq!(2, bundle.len()),
            _ => panic!("expected validation error"),
        }
    }
}
