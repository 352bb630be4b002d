//! # 模拟结果模块
//!
//! 结果是按谱线键 (`XrayLine`) 索引的带不确定度映射。
//! 构建器在 `build()` 时一次性合成线系/组合线聚合条目，
//! 之后结果视为不可变。
//!
//! ## 依赖关系
//! - 被 `project.rs`, `models/analysis.rs`, `backend/` 使用
//! - 子模块: kratio, photon

pub mod kratio;
pub mod photon;

use serde::{Deserialize, Serialize};

use crate::results::kratio::KRatioResult;
use crate::results::photon::PhotonIntensityResult;

/// 一次模拟累积的单个结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationResult {
    PhotonIntensity(PhotonIntensityResult),
    KRatio(KRatioResult),
}

impl SimulationResult {
    /// 种类名，用于报告与导入例程分派
    pub fn kind(&self) -> &'static str {
        match self {
            SimulationResult::PhotonIntensity(result) => match result.emission {
                photon::PhotonEmission::Generated => "generated-photon-intensity",
                photon::PhotonEmission::Emitted => "emitted-photon-intensity",
            },
            SimulationResult::KRatio(_) => "kratio",
        }
    }

    /// 条目数
    pub fn len(&self) -> usize {
        match self {
            SimulationResult::PhotonIntensity(result) => result.len(),
            SimulationResult::KRatio(result) => result.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
