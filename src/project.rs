//! # 模拟与项目
//!
//! `Simulation` 把一份选项和其累积的结果配成一对；`results`
//! 是全模型中唯一可变的集合：导入器先填充，之后分析的
//! `calculate()` 通过 `Project::recalculate` 继续追加派生结果。
//!
//! `Project` 持有多个模拟（按模拟值相等去重），`recalculate()`
//! 对每个模拟调用其全部分析的 `calculate()`，模拟之间检查取消
//! 令牌。重算取 `&mut self`，同一项目同时至多一次重算由借用
//! 检查保证。
//!
//! ## 依赖关系
//! - 被 `models/analysis.rs`, `runner/`, `commands/` 使用
//! - 使用 `models/options.rs`, `results/`, `runner/token.rs`

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{EpmakitError, Result};
use crate::models::options::Options;
use crate::results::kratio::KRatioResult;
use crate::results::photon::PhotonIntensityResult;
use crate::results::SimulationResult;
use crate::runner::token::TaskToken;

static IDENTIFIER_COUNTER: AtomicU64 = AtomicU64::new(0);

/// 进程内唯一的模拟标识符（时间戳 + 序号）
fn generate_identifier() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let sequence = IDENTIFIER_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:016x}-{:04x}", nanos, sequence & 0xffff)
}

/// 一次模拟：选项 + 结果日志
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    /// 构造时生成的唯一标识符
    pub identifier: String,
    pub options: Options,
    /// 追加式结果日志
    pub results: Vec<SimulationResult>,
}

impl Simulation {
    pub fn new(options: Options) -> Self {
        Simulation {
            identifier: generate_identifier(),
            options,
            results: Vec::new(),
        }
    }

    pub fn with_results(options: Options, results: Vec<SimulationResult>) -> Self {
        let mut simulation = Simulation::new(options);
        simulation.results = results;
        simulation
    }

    /// 全部光子强度结果
    pub fn photon_intensity_results(&self) -> impl Iterator<Item = &PhotonIntensityResult> {
        self.results.iter().filter_map(|result| match result {
            SimulationResult::PhotonIntensity(r) => Some(r),
            _ => None,
        })
    }

    /// 全部 k 比率结果
    pub fn kratio_results(&self) -> impl Iterator<Item = &KRatioResult> {
        self.results.iter().filter_map(|result| match result {
            SimulationResult::KRatio(r) => Some(r),
            _ => None,
        })
    }
}

/// 模拟相等即选项相等；标识符与结果不参与比较
impl PartialEq for Simulation {
    fn eq(&self, other: &Self) -> bool {
        self.options == other.options
    }
}

/// 项目：一组模拟与可选的存盘路径
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(skip)]
    pub filepath: Option<PathBuf>,
    pub simulations: Vec<Simulation>,
}

impl Project {
    pub fn new() -> Self {
        Project::default()
    }

    /// 加入模拟；与已有模拟值相等（选项相等）则忽略
    pub fn add_simulation(&mut self, simulation: Simulation) {
        if !self.simulations.contains(&simulation) {
            self.simulations.push(simulation);
        }
    }

    /// 对每个模拟执行其全部分析的 `calculate()`，把新结果追加
    /// 到模拟的结果日志。模拟之间检查取消令牌；返回新增结果数。
    pub fn recalculate(&mut self, token: &TaskToken) -> Result<usize> {
        let mut new_count = 0;
        let total = self.simulations.len();

        for index in 0..total {
            if token.cancelled() {
                return Err(EpmakitError::Cancelled);
            }

            token.update(
                index as f64 / total.max(1) as f64,
                format!("Calculating simulation {}/{}", index + 1, total),
            );

            let analyses = self.simulations[index].options.analyses.clone();
            for analysis in analyses {
                let new_result =
                    analysis.calculate(&self.simulations[index], &self.simulations)?;
                if let Some(result) = new_result {
                    self.simulations[index].results.push(result);
                    new_count += 1;
                }
            }
        }

        token.update(1.0, "Done".to_string());
        Ok(new_count)
    }

    /// 从 JSON 文件读入项目
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| EpmakitError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut project: Project = serde_json::from_str(&text)?;
        project.filepath = Some(path.to_path_buf());
        Ok(project)
    }

    /// 把项目写到 JSON 文件并记住路径
    pub fn write(&mut self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| EpmakitError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;

        self.filepath = Some(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{Analysis, KRatioAnalysis, PhotonIntensityAnalysis};
    use crate::models::beam::{Beam, GaussianBeam};
    use crate::models::detector::PhotonDetector;
    use crate::models::material::Material;
    use crate::models::program::Program;
    use crate::models::sample::Sample;
    use crate::results::photon::PhotonIntensityResultBuilder;
    use crate::xray::transition::{TransitionGroup, XrayLine};

    fn basic_detector() -> PhotonDetector {
        PhotonDetector::new("det", 40.0_f64.to_radians())
    }

    fn basic_options() -> Options {
        Options::new(
            Program::new("mock").with_number_trajectories(100),
            Beam::Gaussian(GaussianBeam::new(15e3, 10e-9)),
            Sample::substrate(Material::pure(29).unwrap()),
            vec![Analysis::PhotonIntensity(PhotonIntensityAnalysis::new(
                basic_detector(),
            ))],
        )
    }

    fn simulation_with_intensity(options: &Options) -> Simulation {
        let mut builder =
            PhotonIntensityResultBuilder::emitted(PhotonIntensityAnalysis::new(basic_detector()));

        if let Sample::Substrate(substrate) = &options.sample {
            for (z, wf) in &substrate.material.composition {
                builder
                    .add_intensity(
                        XrayLine::group(*z, TransitionGroup::Ka),
                        wf * 1e3,
                        (wf * 1e3).sqrt(),
                    )
                    .unwrap();
            }
        }

        Simulation::with_results(
            options.clone(),
            vec![SimulationResult::PhotonIntensity(builder.build())],
        )
    }

    #[test]
    fn test_identifiers_unique() {
        let a = Simulation::new(basic_options());
        let b = Simulation::new(basic_options());

        assert_ne!(a.identifier, b.identifier);
        // 标识符不参与相等比较
        assert_eq!(a, b);
    }

    #[test]
    fn test_add_simulation_deduplicates() {
        let mut project = Project::new();
        project.add_simulation(Simulation::new(basic_options()));
        project.add_simulation(Simulation::new(basic_options()));

        assert_eq!(1, project.simulations.len());
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        // k 比率场景：重算两次，第二次不再新增结果
        let analysis = KRatioAnalysis::new(basic_detector());
        let sample = Sample::substrate(Material::from_formula("CaSiO4", 2.9e3).unwrap());
        let mut unknown_options = Options::new(
            Program::new("mock").with_number_trajectories(100),
            Beam::Gaussian(GaussianBeam::new(20e3, 10e-9)),
            sample,
            vec![Analysis::KRatio(analysis.clone())],
        );

        let standard_options = Analysis::KRatio(analysis)
            .apply(&mut unknown_options)
            .unwrap();

        let mut project = Project::new();
        for options in &standard_options {
            project.add_simulation(simulation_with_intensity(options));
        }
        project.add_simulation(simulation_with_intensity(&unknown_options));

        let token = TaskToken::new();
        let first = project.recalculate(&token).unwrap();
        assert_eq!(1, first);

        let result_counts: Vec<usize> = project
            .simulations
            .iter()
            .map(|s| s.results.len())
            .collect();

        let second = project.recalculate(&token).unwrap();
        assert_eq!(0, second);

        let result_counts_after: Vec<usize> = project
            .simulations
            .iter()
            .map(|s| s.results.len())
            .collect();
        assert_eq!(result_counts, result_counts_after);
    }

    #[test]
    fn test_recalculate_cancelled() {
        let mut project = Project::new();
        project.add_simulation(Simulation::new(basic_options()));

        let token = TaskToken::new();
        token.cancel();

        assert!(matches!(
            project.recalculate(&token),
            Err(EpmakitError::Cancelled)
        ));
    }

    #[test]
    fn test_project_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");

        let mut project = Project::new();
        project.add_simulation(simulation_with_intensity(&basic_options()));
        project.write(&path).unwrap();

        let loaded = Project::read(&path).unwrap();
        assert_eq!(1, loaded.simulations.len());
        assert_eq!(project.simulations[0], loaded.simulations[0]);
        assert_eq!(1, loaded.simulations[0].results.len());
    }
}
