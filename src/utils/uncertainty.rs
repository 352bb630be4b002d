//! # 不确定度运算
//!
//! `UncertainValue` 表示 (标称值, 标准差) 对，实现独立量的
//! 标准误差传播：加法方差相加，除法相对误差平方相加。
//!
//! ## 依赖关系
//! - 被 `results/` 模块使用
//! - 无外部模块依赖

use std::fmt;
use std::ops::{Add, Div};

use serde::{Deserialize, Serialize};

use crate::utils::compare::isclose;

/// 带不确定度的量
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UncertainValue {
    /// 标称值
    pub nominal: f64,
    /// 标准差 (1σ)
    pub std_dev: f64,
}

impl UncertainValue {
    pub fn new(nominal: f64, std_dev: f64) -> Self {
        UncertainValue {
            nominal,
            std_dev: std_dev.abs(),
        }
    }

    /// 无不确定度的精确值
    pub fn exact(nominal: f64) -> Self {
        UncertainValue {
            nominal,
            std_dev: 0.0,
        }
    }

    /// 相对标准差；标称值为零时返回 0
    pub fn relative_std_dev(&self) -> f64 {
        if self.nominal == 0.0 {
            0.0
        } else {
            self.std_dev / self.nominal.abs()
        }
    }
}

impl Add for UncertainValue {
    type Output = UncertainValue;

    /// 独立量相加：方差相加
    fn add(self, rhs: UncertainValue) -> UncertainValue {
        UncertainValue {
            nominal: self.nominal + rhs.nominal,
            std_dev: (self.std_dev.powi(2) + rhs.std_dev.powi(2)).sqrt(),
        }
    }
}

impl Div for UncertainValue {
    type Output = UncertainValue;

    /// 独立量相除：相对误差平方相加
    fn div(self, rhs: UncertainValue) -> UncertainValue {
        let nominal = self.nominal / rhs.nominal;
        let rel = (self.relative_std_dev().powi(2) + rhs.relative_std_dev().powi(2)).sqrt();
        UncertainValue {
            nominal,
            std_dev: (nominal * rel).abs(),
        }
    }
}

impl PartialEq for UncertainValue {
    fn eq(&self, other: &Self) -> bool {
        isclose(self.nominal, other.nominal) && isclose(self.std_dev, other.std_dev)
    }
}

impl fmt::Display for UncertainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} ± {:.6}", self.nominal, self.std_dev)
    }
}
