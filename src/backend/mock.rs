//! # mock 后端
//!
//! 不调用任何外部程序的内置后端：导出器把选项写成 `sim.json`，
//! 工作器分步轮询取消令牌并模拟运行耗时，导入器读回作业文件
//! 但不产生结果。用于单元测试与端到端演练。
//!
//! ## 依赖关系
//! - 被 `backend/mod.rs` 注册
//! - 实现 `validator`, `exporter`, `worker`, `importer` 四个契约

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use serde_json::json;

use crate::backend::exporter::Exporter;
use crate::backend::importer::Importer;
use crate::backend::validator::Validator;
use crate::backend::worker::Worker;
use crate::backend::ProgramAdapter;
use crate::error::{EpmakitError, Result};
use crate::models::beam::Beam;
use crate::models::options::Options;
use crate::project::Simulation;
use crate::results::SimulationResult;
use crate::runner::token::TaskToken;
use crate::utils::accumulator::{AccumulatorKind, ErrorAccumulator};

/// 作业文件名
pub const JOB_FILENAME: &str = "sim.json";

/// mock 后端适配器
#[derive(Debug, Default)]
pub struct MockAdapter;

impl MockAdapter {
    pub fn new() -> Self {
        MockAdapter
    }
}

impl ProgramAdapter for MockAdapter {
    fn identifier(&self) -> &str {
        "mock"
    }

    fn create_validator(&self) -> Box<dyn Validator> {
        Box::new(MockValidator)
    }

    fn create_exporter(&self) -> Box<dyn Exporter> {
        Box::new(MockExporter)
    }

    fn create_worker(&self) -> Box<dyn Worker> {
        Box::new(MockWorker)
    }

    fn create_importer(&self) -> Box<dyn Importer> {
        Box::new(MockImporter)
    }
}

/// mock 校验器：只接受高斯束
pub struct MockValidator;

impl Validator for MockValidator {
    fn supported_beams(&self) -> &[&'static str] {
        &["gaussian"]
    }

    fn supported_samples(&self) -> &[&'static str] {
        &["substrate", "inclusion", "horizontal-layers"]
    }

    fn supported_analyses(&self) -> &[&'static str] {
        &["photon-intensity", "kratio"]
    }
}

/// mock 导出器：选项写成 JSON 作业文件
pub struct MockExporter;

impl Exporter for MockExporter {
    fn export(&self, options: &Options, dirpath: &Path, dry_run: bool) -> Result<()> {
        let mut accumulator = ErrorAccumulator::new();

        let beam = match &options.beam {
            Beam::Gaussian(beam) => json!({
                "kind": "gaussian",
                "energy_ev": beam.energy_ev,
                "diameter_m": beam.diameter_m,
            }),
            other => {
                accumulator.add_error(format!("Beam ({}) is not supported", other.kind()));
                json!(null)
            }
        };

        let materials: Vec<_> = options
            .sample
            .materials()
            .iter()
            .map(|m| {
                json!({
                    "name": m.name,
                    "composition": m.composition,
                    "density_kg_m3": m.density_kg_m3,
                })
            })
            .collect();

        let analyses: Vec<_> = options
            .analyses
            .iter()
            .map(|a| {
                json!({
                    "kind": a.kind(),
                    "detector": a.photon_detector().name,
                })
            })
            .collect();

        let job = json!({
            "program": {
                "identifier": options.program.identifier,
                "number_trajectories": options.program.number_trajectories,
            },
            "beam": beam,
            "sample": {
                "kind": options.sample.kind(),
                "materials": materials,
            },
            "analyses": analyses,
            "tags": options.tags,
        });

        accumulator.finish(AccumulatorKind::Export)?;

        if dry_run {
            return Ok(());
        }

        let filepath = dirpath.join(JOB_FILENAME);
        let text = serde_json::to_string_pretty(&job)?;
        fs::write(&filepath, text).map_err(|e| EpmakitError::FileWriteError {
            path: filepath.display().to_string(),
            source: e,
        })?;

        Ok(())
    }
}

/// mock 工作器：导出后分步睡眠，每步轮询取消令牌
pub struct MockWorker;

impl Worker for MockWorker {
    fn run(
        &self,
        token: &TaskToken,
        simulation: &mut Simulation,
        output_dir: &Path,
    ) -> Result<()> {
        token.update(0.0, "Started");

        MockExporter.export(&simulation.options, output_dir, false)?;

        for step in 0..10 {
            if token.cancelled() {
                return Err(EpmakitError::Cancelled);
            }
            token.update(step as f64 / 10.0, format!("Running step {}/10", step + 1));
            thread::sleep(Duration::from_millis(10));
        }

        let results = MockImporter.import(&simulation.options, output_dir)?;
        simulation.results.extend(results);

        token.update(1.0, "Done");
        Ok(())
    }
}

/// mock 导入器：确认作业文件存在，不产生结果
pub struct MockImporter;

impl Importer for MockImporter {
    fn import(&self, _options: &Options, dirpath: &Path) -> Result<Vec<SimulationResult>> {
        let mut accumulator = ErrorAccumulator::new();

        let filepath = dirpath.join(JOB_FILENAME);
        if !filepath.is_file() {
            accumulator.add_error(format!("Job file not found: {}", filepath.display()));
        }

        accumulator.finish(AccumulatorKind::Import)?;
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{Analysis, PhotonIntensityAnalysis};
    use crate::models::beam::{CylindricalBeam, GaussianBeam};
    use crate::models::detector::PhotonDetector;
    use crate::models::material::Material;
    use crate::models::program::Program;
    use crate::models::sample::Sample;

    fn basic_options() -> Options {
        Options::new(
            Program::new("mock").with_number_trajectories(100),
            Beam::Gaussian(GaussianBeam::new(15e3, 10e-9)),
            Sample::substrate(Material::pure(29).unwrap()),
            vec![Analysis::PhotonIntensity(PhotonIntensityAnalysis::new(
                PhotonDetector::new("det", 0.7),
            ))],
        )
    }

    #[test]
    fn test_export_writes_job_file() {
        let dir = tempfile::tempdir().unwrap();
        MockExporter.export(&basic_options(), dir.path(), false).unwrap();

        let text = fs::read_to_string(dir.path().join(JOB_FILENAME)).unwrap();
        assert!(text.contains("gaussian"));
        assert!(text.contains("photon-intensity"));
    }

    #[test]
    fn test_export_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        MockExporter.export(&basic_options(), dir.path(), true).unwrap();

        assert!(!dir.path().join(JOB_FILENAME).exists());
    }

    #[test]
    fn test_export_unsupported_beam() {
        let mut options = basic_options();
        options.beam = Beam::Cylindrical(CylindricalBeam::new(15e3, 10e-9));

        let dir = tempfile::tempdir().unwrap();
        let result = MockExporter.export(&options, dir.path(), false);

        assert!(matches!(result, Err(EpmakitError::Export(_))));
        assert!(!dir.path().join(JOB_FILENAME).exists());
    }

    #[test]
    fn test_worker_runs_and_imports() {
        let dir = tempfile::tempdir().unwrap();
        let token = TaskToken::new();
        let mut simulation = Simulation::new(basic_options());

        MockWorker.run(&token, &mut simulation, dir.path()).unwrap();

        assert!((token.snapshot().0 - 1.0).abs() < 1e-12);
        assert!(dir.path().join(JOB_FILENAME).exists());
    }

    #[test]
    fn test_worker_honours_cancellation() {
        let dir = tempfile::tempdir().unwrap();
        let token = TaskToken::new();
        token.cancel();

        let mut simulation = Simulation::new(basic_options());
        let result = MockWorker.run(&token, &mut simulation, dir.path());

        assert!(matches!(result, Err(EpmakitError::Cancelled)));
    }

    #[test]
    fn test_importer_requires_job_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = MockImporter.import(&basic_options(), dir.path());

        assert!(matches!(result, Err(EpmakitError::Import(_))));
    }
}
