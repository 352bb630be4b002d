//! # 执行层模块
//!
//! 本地并行提交模拟作业，协作式取消。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 子模块: local, token

pub mod local;
pub mod token;
