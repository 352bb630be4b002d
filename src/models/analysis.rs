//! # 分析数据模型
//!
//! 分析是附着在 Options 上的派生规格：它可以在构建期合成
//! 额外的模拟选项（`apply`，如 k 比率需要的标样模拟），并在
//! 模拟完成后对照全部模拟池计算派生结果（`calculate`）。
//!
//! k 比率计算协议：
//! 1. 幂等性守卫：该分析的 `KRatioResult` 已存在则直接返回 None；
//! 2. 找到未知样中匹配本探测器的出射光子强度结果；
//! 3. 用与 `apply` 相同的逻辑重新生成期望的标样选项集；
//! 4. 在模拟池中按选项值相等筛出标样模拟；
//! 5. 按元素缓存标样结果，首个匹配者胜出；缺失的元素记录
//!    debug 日志后静默跳过，不报错、不产生条目；
//! 6. 对未知样中每条谱线计算 unknown/standard，误差按除法传播；
//! 7. 至少有一条比率才产生新结果。
//!
//! ## 依赖关系
//! - 被 `models/options.rs`, `project.rs`, `backend/` 使用
//! - 使用 `results/`, `xray/`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::beam::{Beam, GaussianBeam};
use crate::models::detector::PhotonDetector;
use crate::models::material::Material;
use crate::models::options::{Options, OptionsBuilder, STANDARD_TAG};
use crate::models::sample::Sample;
use crate::project::Simulation;
use crate::results::kratio::KRatioResultBuilder;
use crate::results::photon::{PhotonEmission, PhotonIntensityResult};
use crate::results::SimulationResult;

/// 光子强度分析：报告每条谱线的出射/产生强度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotonIntensityAnalysis {
    pub photon_detector: PhotonDetector,
}

impl PhotonIntensityAnalysis {
    pub fn new(photon_detector: PhotonDetector) -> Self {
        PhotonIntensityAnalysis { photon_detector }
    }
}

/// k 比率分析：未知样强度对标样强度归一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KRatioAnalysis {
    pub photon_detector: PhotonDetector,

    /// 用户指定的标样材料（按原子序数覆盖默认表）
    #[serde(default)]
    pub standard_materials: BTreeMap<u8, Material>,
}

impl KRatioAnalysis {
    pub fn new(photon_detector: PhotonDetector) -> Self {
        KRatioAnalysis {
            photon_detector,
            standard_materials: BTreeMap::new(),
        }
    }

    /// 指定元素的标样材料
    pub fn add_standard_material(&mut self, z: u8, material: Material) {
        self.standard_materials.insert(z, material);
    }

    /// 元素的标样材料：用户覆盖 > 默认化合物标样 > 纯元素
    pub fn standard_material(&self, z: u8) -> Result<Material> {
        if let Some(material) = self.standard_materials.get(&z) {
            return Ok(material.clone());
        }

        if let Some(material) = default_nonpure_standard(z)? {
            return Ok(material);
        }

        Material::pure(z)
    }

    /// 由未知样选项构造标样选项：同程序、零直径高斯束（能量与
    /// 粒子取自未知样）、每个组成元素一个标样基底、单一光子
    /// 强度分析；全部打上 "standard" 标签
    fn create_standard_options(&self, options: &Options) -> Result<Vec<Options>> {
        let mut builder = OptionsBuilder::new();

        builder.add_program(options.program.clone());

        let beam = GaussianBeam::new(options.beam.energy_ev(), 0.0)
            .with_particle(options.beam.particle());
        builder.add_beam(Beam::Gaussian(beam));

        for material in options.sample.materials() {
            for z in material.composition.keys() {
                let standard = self.standard_material(*z)?;
                builder.add_sample(Sample::substrate(standard));
            }
        }

        builder.add_analysis(Analysis::PhotonIntensity(PhotonIntensityAnalysis::new(
            self.photon_detector.clone(),
        )));

        let mut list_options = builder.build()?;
        for standard_options in &mut list_options {
            standard_options.tags.push(STANDARD_TAG.to_string());
        }

        Ok(list_options)
    }

    fn apply(&self, options: &mut Options) -> Result<Vec<Options>> {
        // 未知样缺少同探测器的光子强度分析时补上
        let companion = Analysis::PhotonIntensity(PhotonIntensityAnalysis::new(
            self.photon_detector.clone(),
        ));
        if !options.analyses.contains(&companion) {
            options.analyses.push(companion);
        }

        self.create_standard_options(options)
    }

    fn calculate(
        &self,
        simulation: &Simulation,
        simulations: &[Simulation],
    ) -> Result<Option<SimulationResult>> {
        // 幂等性守卫：本分析至多计算一次
        let already_computed = simulation
            .kratio_results()
            .any(|result| result.analysis == *self);
        if already_computed {
            log::debug!("KRatioResult already calculated");
            return Ok(None);
        }

        // 未知样的出射光子强度
        let unknown_result = match self.find_emitted_result(simulation) {
            Some(result) => result,
            None => return Ok(None),
        };

        // 重新生成期望的标样选项并筛出标样模拟
        let standard_options = self.create_standard_options(&simulation.options)?;
        let standard_simulations: Vec<&Simulation> = simulations
            .iter()
            .filter(|s| standard_options.contains(&s.options))
            .collect();

        // 按元素缓存标样结果；首个匹配者胜出（继承自池迭代顺序
        // 的任意决策，不是刻意设计）
        let mut cache: BTreeMap<u8, Option<&PhotonIntensityResult>> = BTreeMap::new();
        for line in unknown_result.keys() {
            let z = line.atomic_number();
            if cache.contains_key(&z) {
                continue;
            }

            let standard_material = self.standard_material(z)?;
            let standard_simulation = standard_simulations.iter().find(|s| {
                matches!(&s.options.sample, Sample::Substrate(substrate)
                    if substrate.material == standard_material)
            });
            let standard_simulation = match standard_simulation {
                Some(simulation) => simulation,
                None => {
                    log::debug!("No standard simulation found for Z={}", z);
                    cache.insert(z, None);
                    continue;
                }
            };

            match self.find_emitted_result(standard_simulation) {
                Some(result) => {
                    cache.insert(z, Some(result));
                }
                None => {
                    log::debug!("No standard result found for Z={}", z);
                    cache.insert(z, None);
                }
            }
        }

        // 逐谱线计算比率
        let mut builder = KRatioResultBuilder::new(self.clone());
        for (line, unknown_intensity) in unknown_result.iter() {
            let standard_result = match cache.get(&line.z) {
                Some(Some(result)) => result,
                _ => continue,
            };

            let standard_intensity = match standard_result.get(line) {
                Some(intensity) => intensity,
                None => {
                    log::debug!("No standard intensity for {}", line);
                    continue;
                }
            };

            builder.add_kratio(*line, *unknown_intensity, *standard_intensity);
        }

        if builder.is_empty() {
            Ok(None)
        } else {
            Ok(Some(SimulationResult::KRatio(builder.build())))
        }
    }

    /// 模拟中匹配本探测器的首个出射光子强度结果
    fn find_emitted_result<'a>(&self, simulation: &'a Simulation) -> Option<&'a PhotonIntensityResult> {
        simulation
            .photon_intensity_results()
            .find(|result| {
                result.emission == PhotonEmission::Emitted
                    && result.analysis.photon_detector == self.photon_detector
            })
    }
}

/// 默认化合物标样表：不适合用纯元素标样的元素
fn default_nonpure_standard(z: u8) -> Result<Option<Material>> {
    Ok(match z {
        7 => Some(Material::from_formula("BN", 2.1e3)?),
        8 => Some(Material::from_formula("Al2O3", 3.95e3)?),
        9 => Some(Material::from_formula("BaF2", 4.89e3)?),
        17 => Some(Material::from_formula("KCl", 1.98e3)?),
        36 => Some(Material::from_formula("KBr", 2.75e3)?),
        80 => Some(Material::from_formula("HgTe", 8.1e3)?),
        _ => None,
    })
}

/// 分析
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Analysis {
    PhotonIntensity(PhotonIntensityAnalysis),
    KRatio(KRatioAnalysis),
}

impl Analysis {
    /// 分析使用的光子探测器
    pub fn photon_detector(&self) -> &PhotonDetector {
        match self {
            Analysis::PhotonIntensity(analysis) => &analysis.photon_detector,
            Analysis::KRatio(analysis) => &analysis.photon_detector,
        }
    }

    /// 种类名，用于展开策略与能力校验
    pub fn kind(&self) -> &'static str {
        match self {
            Analysis::PhotonIntensity(_) => "photon-intensity",
            Analysis::KRatio(_) => "kratio",
        }
    }

    /// 构建期副作用：可能修改刚产生的选项，并返回计算本分析
    /// 结果所需的附加选项（零个或多个）
    pub fn apply(&self, options: &mut Options) -> Result<Vec<Options>> {
        match self {
            Analysis::PhotonIntensity(_) => Ok(Vec::new()),
            Analysis::KRatio(analysis) => analysis.apply(options),
        }
    }

    /// 对照模拟池计算派生结果；无新结果时返回 None。
    /// 调用方（`Project::recalculate`）负责把结果追加到模拟。
    pub fn calculate(
        &self,
        simulation: &Simulation,
        simulations: &[Simulation],
    ) -> Result<Option<SimulationResult>> {
        match self {
            Analysis::PhotonIntensity(_) => Ok(None),
            Analysis::KRatio(analysis) => analysis.calculate(simulation, simulations),
        }
    }
}
