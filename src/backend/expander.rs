//! # 分析组合展开
//!
//! 把注册在构建器上的异构分析归并为后端能力允许的组合：
//! - `expand_to_single`：按种类分组后取笛卡尔积，用于每次运行
//!   每种对象至多一个的后端；
//! - `expand_analyses_to_single_detector`：按探测器分组，用于
//!   每次运行只复现单个探测器的后端。
//!
//! ## 依赖关系
//! - 被 `models/options.rs` 使用
//! - 使用 `models/analysis.rs`, `models/program.rs`

use crate::models::analysis::Analysis;
use crate::models::detector::PhotonDetector;
use crate::models::program::ExpandPolicy;

/// 按策略展开分析组合。空输入产生单个空组合，
/// 使不带分析的构建仍产出选项。
pub fn expand_analyses(analyses: &[Analysis], policy: ExpandPolicy) -> Vec<Vec<Analysis>> {
    if analyses.is_empty() {
        return vec![Vec::new()];
    }

    match policy {
        ExpandPolicy::SingleDetector => expand_analyses_to_single_detector(analyses),
        ExpandPolicy::SingleKind => expand_to_single(analyses, |analysis| analysis.kind()),
    }
}

/// 按种类分组，返回各组的笛卡尔积：每个组合包含每种对象恰好
/// 一个。`[A, A, B]` 产生 2 个组合，各含一个 A 与唯一的 B。
pub fn expand_to_single<T, K>(items: &[T], kind: impl Fn(&T) -> K) -> Vec<Vec<T>>
where
    T: Clone,
    K: PartialEq,
{
    // 保序分组
    let mut groups: Vec<(K, Vec<&T>)> = Vec::new();
    for item in items {
        let key = kind(item);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.push(item),
            None => groups.push((key, vec![item])),
        }
    }

    // 各组笛卡尔积
    let mut combinations: Vec<Vec<T>> = vec![Vec::new()];
    for (_, group) in groups {
        let mut next = Vec::with_capacity(combinations.len() * group.len());
        for combination in &combinations {
            for item in &group {
                let mut extended = combination.clone();
                extended.push((*item).clone());
                next.push(extended);
            }
        }
        combinations = next;
    }

    combinations
}

/// 按（可能共享的）探测器分组：每个不同的探测器产生一个组合，
/// 包含该探测器的全部分析。
pub fn expand_analyses_to_single_detector(analyses: &[Analysis]) -> Vec<Vec<Analysis>> {
    let mut groups: Vec<(&PhotonDetector, Vec<Analysis>)> = Vec::new();

    for analysis in analyses {
        let detector = analysis.photon_detector();
        match groups.iter_mut().find(|(d, _)| *d == detector) {
            Some((_, group)) => group.push(analysis.clone()),
            None => groups.push((detector, vec![analysis.clone()])),
        }
    }

    groups.into_iter().map(|(_, group)| group).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{KRatioAnalysis, PhotonIntensityAnalysis};

    fn detector(name: &str) -> PhotonDetector {
        PhotonDetector::new(name, 40.0_f64.to_radians())
    }

    #[test]
    fn test_expand_to_single_two_of_one_kind() {
        // [A, A, B] -> 2 个组合，各含一个 A 和唯一的 B
        let a1 = Analysis::KRatio(KRatioAnalysis::new(detector("d1")));
        let a2 = Analysis::KRatio(KRatioAnalysis::new(detector("d2")));
        let b = Analysis::PhotonIntensity(PhotonIntensityAnalysis::new(detector("d1")));

        let combinations = expand_to_single(&[a1.clone(), a2.clone(), b.clone()], |a| a.kind());

        assert_eq!(2, combinations.len());
        for combination in &combinations {
            assert_eq!(2, combination.len());
            assert_eq!(1, combination.iter().filter(|a| a.kind() == "kratio").count());
            assert!(combination.contains(&b));
        }
    }

    #[test]
    fn test_expand_single_detector_shared() {
        let shared = detector("d");
        let a = Analysis::KRatio(KRatioAnalysis::new(shared.clone()));
        let b = Analysis::PhotonIntensity(PhotonIntensityAnalysis::new(shared));

        let combinations = expand_analyses_to_single_detector(&[a, b]);

        assert_eq!(1, combinations.len());
        assert_eq!(2, combinations[0].len());
    }

    #[test]
    fn test_expand_single_detector_distinct() {
        let a = Analysis::KRatio(KRatioAnalysis::new(detector("d1")));
        let b = Analysis::KRatio(KRatioAnalysis::new(detector("d2")));

        let combinations = expand_analyses_to_single_detector(&[a.clone(), b.clone()]);

        assert_eq!(2, combinations.len());
        assert_eq!(vec![a], combinations[0]);
        assert_eq!(vec![b], combinations[1]);
    }

    #[test]
    fn test_expand_empty_analyses() {
        let combinations = expand_analyses(&[], ExpandPolicy::SingleDetector);
        assert_eq!(vec![Vec::<Analysis>::new()], combinations);
    }
}
