//! # 程序数据模型
//!
//! `Program` 是纯值对象：后端标识符、轨迹数与分析展开策略。
//! 行为（校验/导出/执行/导入）由 `backend/` 的注册表按标识符
//! 解析，值对象本身不携带行为，保证 Options 可以按值比较。
//!
//! ## 依赖关系
//! - 被 `models/options.rs`, `backend/` 使用
//! - 无外部模块依赖

use std::fmt;

use serde::{Deserialize, Serialize};

/// 分析组合展开策略（见 `backend/expander.rs`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpandPolicy {
    /// 每次模拟只允许一个探测器：按探测器分组
    SingleDetector,
    /// 每次模拟每种分析至多一个：按种类分组后取笛卡尔积
    SingleKind,
}

impl Default for ExpandPolicy {
    fn default() -> Self {
        ExpandPolicy::SingleDetector
    }
}

/// 模拟程序（后端）配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// 后端标识符，作为注册表键
    pub identifier: String,

    /// 模拟轨迹（簇射）数
    pub number_trajectories: u32,

    /// 分析组合展开策略
    #[serde(default)]
    pub expand: ExpandPolicy,
}

impl Program {
    pub fn new(identifier: impl Into<String>) -> Self {
        Program {
            identifier: identifier.into(),
            number_trajectories: 10_000,
            expand: ExpandPolicy::default(),
        }
    }

    pub fn with_number_trajectories(mut self, number_trajectories: u32) -> Self {
        self.number_trajectories = number_trajectories;
        self
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_equality() {
        let a = Program::new("mock").with_number_trajectories(100);
        let b = Program::new("mock").with_number_trajectories(100);
        let c = Program::new("mock").with_number_trajectories(200);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_default_expand_policy() {
        assert_eq!(ExpandPolicy::SingleDetector, Program::new("mock").expand);
    }
}
