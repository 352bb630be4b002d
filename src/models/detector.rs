//! # 探测器数据模型
//!
//! 光子探测器：名称 + 仰角/方位角。分析按探测器分组，
//! 名称参与值相等比较。
//!
//! ## 依赖关系
//! - 被 `models/analysis.rs`, `models/options.rs` 使用
//! - 使用 `utils/compare.rs`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::compare::isclose;

/// 光子探测器
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotonDetector {
    /// 名称（同一 Options 内区分多探测器）
    pub name: String,
    /// 仰角 (rad)，取 [-π/2, π/2]
    pub elevation_rad: f64,
    /// 方位角 (rad)，取 [0, 2π)
    pub azimuth_rad: f64,
}

impl PhotonDetector {
    pub fn new(name: impl Into<String>, elevation_rad: f64) -> Self {
        PhotonDetector {
            name: name.into(),
            elevation_rad,
            azimuth_rad: 0.0,
        }
    }

    pub fn with_azimuth(mut self, azimuth_rad: f64) -> Self {
        self.azimuth_rad = azimuth_rad;
        self
    }
}

impl PartialEq for PhotonDetector {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && isclose(self.elevation_rad, other.elevation_rad)
            && isclose(self.azimuth_rad, other.azimuth_rad)
    }
}

impl fmt::Display for PhotonDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality() {
        let a = PhotonDetector::new("xray", 0.7);
        let b = PhotonDetector::new("xray", 0.7);
        let c = PhotonDetector::new("xray2", 0.7);
        let d = PhotonDetector::new("xray", 0.8);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
