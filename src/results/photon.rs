//! # 光子强度结果
//!
//! 按谱线键索引的强度映射，单位 counts/(sr·electron)。
//! 构建器在 `build()` 时把逐跃迁强度合成为线系/组合线聚合条目
//! （K, L, M, N, Ka, La, Ll+n, Ma, Mz）：
//! 显式给出的条目永不被覆盖，独立贡献的方差相加，
//! 元素不存在的谱线静默跳过。合成只在 `build()` 执行一次。
//!
//! ## 依赖关系
//! - 被 `results/kratio.rs`, `models/analysis.rs` 使用
//! - 使用 `xray/transition.rs`, `utils/uncertainty.rs`

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{EpmakitError, Result};
use crate::models::analysis::PhotonIntensityAnalysis;
use crate::utils::uncertainty::UncertainValue;
use crate::xray::transition::{Transition, TransitionGroup, XrayLine, XrayTransition};

/// 强度是否计入样品内吸收
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhotonEmission {
    /// 产生强度（不含吸收）
    Generated,
    /// 出射强度（含吸收）
    Emitted,
}

/// 光子强度结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotonIntensityResult {
    /// 产生此结果的分析
    pub analysis: PhotonIntensityAnalysis,
    pub emission: PhotonEmission,
    intensities: BTreeMap<XrayLine, UncertainValue>,
}

impl PhotonIntensityResult {
    pub fn len(&self) -> usize {
        self.intensities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intensities.is_empty()
    }

    pub fn get(&self, line: &XrayLine) -> Option<&UncertainValue> {
        self.intensities.get(line)
    }

    pub fn contains(&self, line: &XrayLine) -> bool {
        self.intensities.contains_key(line)
    }

    pub fn keys(&self) -> impl Iterator<Item = &XrayLine> {
        self.intensities.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&XrayLine, &UncertainValue)> {
        self.intensities.iter()
    }
}

/// 光子强度结果构建器
#[derive(Debug, Clone)]
pub struct PhotonIntensityResultBuilder {
    analysis: PhotonIntensityAnalysis,
    emission: PhotonEmission,
    data: BTreeMap<XrayLine, UncertainValue>,
}

impl PhotonIntensityResultBuilder {
    pub fn new(analysis: PhotonIntensityAnalysis, emission: PhotonEmission) -> Self {
        PhotonIntensityResultBuilder {
            analysis,
            emission,
            data: BTreeMap::new(),
        }
    }

    /// 出射强度结果构建器
    pub fn emitted(analysis: PhotonIntensityAnalysis) -> Self {
        PhotonIntensityResultBuilder::new(analysis, PhotonEmission::Emitted)
    }

    /// 产生强度结果构建器
    pub fn generated(analysis: PhotonIntensityAnalysis) -> Self {
        PhotonIntensityResultBuilder::new(analysis, PhotonEmission::Generated)
    }

    /// 记录一条强度；负值拒绝
    pub fn add_intensity(&mut self, line: XrayLine, value: f64, error: f64) -> Result<()> {
        if value < 0.0 {
            return Err(EpmakitError::InvalidArgument(format!(
                "intensity for {} must not be negative",
                line
            )));
        }
        self.data.insert(line, UncertainValue::new(value, error));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 构建结果，附加线系/组合线聚合条目
    pub fn build(self) -> PhotonIntensityResult {
        let mut intensities = self.data;
        let extras = synthesize_group_entries(&intensities);
        for (line, value) in extras {
            // 原始条目优先，永不覆盖
            intensities.entry(line).or_insert(value);
        }

        PhotonIntensityResult {
            analysis: self.analysis,
            emission: self.emission,
            intensities,
        }
    }
}

/// 由逐跃迁条目合成线系/组合线聚合条目。
/// 纯加性：相同输入两次合成产生相同输出。
pub(crate) fn synthesize_group_entries(
    data: &BTreeMap<XrayLine, UncertainValue>,
) -> BTreeMap<XrayLine, UncertainValue> {
    let mut extras: BTreeMap<XrayLine, UncertainValue> = BTreeMap::new();

    let elements: BTreeSet<u8> = data.keys().map(|line| line.z).collect();

    for z in elements {
        // 该元素实际给出的具体跃迁
        let present: Vec<Transition> = data
            .keys()
            .filter(|line| line.z == z)
            .filter_map(|line| match line.transition {
                XrayTransition::Single(t) => Some(t),
                XrayTransition::Group(_) => None,
            })
            .collect();

        for group in TransitionGroup::ALL {
            let key = XrayLine::group(z, group);

            // 显式给出的组合线不重新推导
            if data.contains_key(&key) {
                continue;
            }

            // 元素不存在该谱线：静默跳过
            if !group.exists(z) {
                log::debug!("No valid {} line for Z={}", group.notation(), z);
                continue;
            }

            let members = group.members();
            let matching: Vec<Transition> = present
                .iter()
                .copied()
                .filter(|t| members.contains(t))
                .collect();
            if matching.is_empty() {
                continue;
            }

            let mut total = UncertainValue::exact(0.0);
            for transition in matching {
                total = total + data[&XrayLine::single(z, transition)];
            }
            extras.insert(key, total);
        }
    }

    extras
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::detector::PhotonDetector;

    fn basic_analysis() -> PhotonIntensityAnalysis {
        PhotonIntensityAnalysis::new(PhotonDetector::new("det", 40.0_f64.to_radians()))
    }

    #[test]
    fn test_build_sums_ka_family() {
        let mut builder = PhotonIntensityResultBuilder::emitted(basic_analysis());
        builder
            .add_intensity(XrayLine::single(29, Transition::Ka1), 100.0, 3.0)
            .unwrap();
        builder
            .add_intensity(XrayLine::single(29, Transition::Ka2), 50.0, 4.0)
            .unwrap();

        let result = builder.build();

        let ka = result.get(&XrayLine::group(29, TransitionGroup::Ka)).unwrap();
        assert!((ka.nominal - 150.0).abs() < 1e-9);
        // sqrt(3^2 + 4^2) = 5
        assert!((ka.std_dev - 5.0).abs() < 1e-9);

        // K 线系同样被合成（仅 Ka1+Ka2 存在）
        let k = result.get(&XrayLine::group(29, TransitionGroup::K)).unwrap();
        assert!((k.nominal - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_build_does_not_override_explicit_group() {
        let mut builder = PhotonIntensityResultBuilder::emitted(basic_analysis());
        builder
            .add_intensity(XrayLine::single(29, Transition::Ka1), 100.0, 3.0)
            .unwrap();
        builder
            .add_intensity(XrayLine::single(29, Transition::Ka2), 50.0, 4.0)
            .unwrap();
        builder
            .add_intensity(XrayLine::group(29, TransitionGroup::Ka), 999.0, 1.0)
            .unwrap();

        let result = builder.build();

        let ka = result.get(&XrayLine::group(29, TransitionGroup::Ka)).unwrap();
        assert!((ka.nominal - 999.0).abs() < 1e-9);
    }

    #[test]
    fn test_build_skips_nonexistent_lines() {
        // 碳没有 L/M 线；只有 K 系条目被合成
        let mut builder = PhotonIntensityResultBuilder::emitted(basic_analysis());
        builder
            .add_intensity(XrayLine::single(6, Transition::Ka1), 10.0, 1.0)
            .unwrap();

        let result = builder.build();

        assert!(result.contains(&XrayLine::group(6, TransitionGroup::K)));
        assert!(result.contains(&XrayLine::group(6, TransitionGroup::Ka)));
        assert!(!result.contains(&XrayLine::group(6, TransitionGroup::L)));
        assert!(!result.contains(&XrayLine::group(6, TransitionGroup::Ma)));
    }

    #[test]
    fn test_build_group_only_input_adds_nothing() {
        // 原始数据只有组合线键时无可合成
        let mut builder = PhotonIntensityResultBuilder::emitted(basic_analysis());
        builder
            .add_intensity(XrayLine::group(20, TransitionGroup::Ka), 300.0, 17.0)
            .unwrap();

        let result = builder.build();
        assert_eq!(1, result.len());
    }

    #[test]
    fn test_mixed_families_synthesized_separately() {
        let mut builder = PhotonIntensityResultBuilder::emitted(basic_analysis());
        builder
            .add_intensity(XrayLine::single(79, Transition::La1), 40.0, 2.0)
            .unwrap();
        builder
            .add_intensity(XrayLine::single(79, Transition::Lb1), 25.0, 1.5)
            .unwrap();
        builder
            .add_intensity(XrayLine::single(79, Transition::Ma1), 12.0, 1.0)
            .unwrap();

        let result = builder.build();

        let la = result.get(&XrayLine::group(79, TransitionGroup::La)).unwrap();
        assert!((la.nominal - 40.0).abs() < 1e-9);

        let l = result.get(&XrayLine::group(79, TransitionGroup::L)).unwrap();
        assert!((l.nominal - 65.0).abs() < 1e-9);

        let ma = result.get(&XrayLine::group(79, TransitionGroup::Ma)).unwrap();
        assert!((ma.nominal - 12.0).abs() < 1e-9);

        // Lb1 不属于 La 组
        assert!((la.std_dev - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_intensity_rejected() {
        let mut builder = PhotonIntensityResultBuilder::emitted(basic_analysis());
        let result = builder.add_intensity(XrayLine::single(29, Transition::Ka1), -1.0, 0.1);
        assert!(result.is_err());
    }
}
