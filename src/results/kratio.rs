//! # k 比率结果
//!
//! 未知样强度 / 标样强度的无量纲比值，按谱线键索引。
//! 除法按独立量误差传播（相对误差平方相加）；构建器与光子
//! 强度结果共用组合线合成逻辑。
//!
//! ## 依赖关系
//! - 被 `models/analysis.rs` 使用
//! - 使用 `results/photon.rs` 的合成函数

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::analysis::KRatioAnalysis;
use crate::results::photon::synthesize_group_entries;
use crate::utils::uncertainty::UncertainValue;
use crate::xray::transition::XrayLine;

/// k 比率结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KRatioResult {
    /// 产生此结果的 k 比率分析；幂等性守卫按它比较
    pub analysis: KRatioAnalysis,
    ratios: BTreeMap<XrayLine, UncertainValue>,
}

impl KRatioResult {
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    pub fn get(&self, line: &XrayLine) -> Option<&UncertainValue> {
        self.ratios.get(line)
    }

    pub fn keys(&self) -> impl Iterator<Item = &XrayLine> {
        self.ratios.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&XrayLine, &UncertainValue)> {
        self.ratios.iter()
    }
}

/// k 比率结果构建器
#[derive(Debug, Clone)]
pub struct KRatioResultBuilder {
    analysis: KRatioAnalysis,
    data: BTreeMap<XrayLine, UncertainValue>,
}

impl KRatioResultBuilder {
    pub fn new(analysis: KRatioAnalysis) -> Self {
        KRatioResultBuilder {
            analysis,
            data: BTreeMap::new(),
        }
    }

    /// 记录一条 k 比率：unknown / standard，误差按除法传播
    pub fn add_kratio(
        &mut self,
        line: XrayLine,
        unknown: UncertainValue,
        standard: UncertainValue,
    ) {
        self.data.insert(line, unknown / standard);
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn build(self) -> KRatioResult {
        let mut ratios = self.data;
        let extras = synthesize_group_entries(&ratios);
        for (line, value) in extras {
            ratios.entry(line).or_insert(value);
        }

        KRatioResult {
            analysis: self.analysis,
            ratios,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::detector::PhotonDetector;
    use crate::xray::transition::TransitionGroup;

    fn basic_analysis() -> KRatioAnalysis {
        KRatioAnalysis::new(PhotonDetector::new("det", 40.0_f64.to_radians()))
    }

    #[test]
    fn test_add_kratio_divides_with_propagation() {
        let mut builder = KRatioResultBuilder::new(basic_analysis());

        let unknown = UncertainValue::new(303.2537, 303.2537_f64.sqrt());
        let standard = UncertainValue::new(1000.0, 1000.0_f64.sqrt());
        builder.add_kratio(XrayLine::group(20, TransitionGroup::Ka), unknown, standard);

        let result = builder.build();
        let q = result
            .get(&XrayLine::group(20, TransitionGroup::Ka))
            .unwrap();

        assert!((q.nominal - 0.3033).abs() < 1e-4);
        assert!((q.std_dev - 0.0199).abs() < 1e-4);
    }

    #[test]
    fn test_empty_builder() {
        let builder = KRatioResultBuilder::new(basic_analysis());
        assert!(builder.is_empty());
        assert!(builder.build().is_empty());
    }
}
