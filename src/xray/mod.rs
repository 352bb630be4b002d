//! # X 射线参考数据模块
//!
//! 元素属性表与 X 射线跃迁/谱线标识。
//!
//! ## 依赖关系
//! - 被 `models/`, `results/` 模块使用
//! - 子模块: element, transition

pub mod element;
pub mod transition;
