//! # 模拟选项数据模型
//!
//! 定义一次模拟请求的全部值对象：材料、束流、样品、探测器、
//! 程序、分析与 `Options` 本体。所有类型按值比较（浮点取近似
//! 相等，分析/标签取多重集合语义），去重与幂等性依赖这一点。
//!
//! ## 依赖关系
//! - 被 `results/`, `project.rs`, `backend/`, `commands/` 使用
//! - 使用 `xray/`, `utils/compare.rs`
//! - 子模块: analysis, beam, detector, material, options, program, sample

pub mod analysis;
pub mod beam;
pub mod detector;
pub mod material;
pub mod options;
pub mod program;
pub mod sample;
