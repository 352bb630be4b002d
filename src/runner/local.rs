//! # 本地模拟执行器
//!
//! 基于 rayon 线程池并行提交模拟作业：每份选项独立创建模拟与
//! 输出目录，由对应后端的工作器执行。单个作业失败不影响其他
//! 作业；取消令牌对整批生效，被取消与失败分开计数。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `backend/`, `project.rs`, `utils/progress.rs`
//! - 使用 `rayon` 进行并行执行

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::backend::ProgramRegistry;
use crate::error::{EpmakitError, Result};
use crate::models::options::Options;
use crate::project::Simulation;
use crate::runner::token::TaskToken;
use crate::utils::progress;

/// 单个作业结果
#[derive(Debug)]
enum JobOutcome {
    /// 成功完成的模拟
    Success(Box<Simulation>),
    /// 取消
    Cancelled,
    /// 失败（标识符, 错误信息）
    Failed(String, String),
}

/// 批量提交结果统计
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 成功完成的模拟
    pub simulations: Vec<Simulation>,
    /// 取消数量
    pub cancelled: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchReport {
    fn merge(&mut self, outcome: JobOutcome) {
        match outcome {
            JobOutcome::Success(simulation) => self.simulations.push(*simulation),
            JobOutcome::Cancelled => self.cancelled += 1,
            JobOutcome::Failed(identifier, reason) => self.failures.push((identifier, reason)),
        }
    }

    pub fn success_count(&self) -> usize {
        self.simulations.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// 总作业数量
    pub fn total(&self) -> usize {
        self.simulations.len() + self.cancelled + self.failures.len()
    }
}

/// 本地模拟执行器
pub struct LocalSimulationRunner<'a> {
    registry: &'a ProgramRegistry,
    output_root: PathBuf,
    /// 并行作业数；0 表示使用 CPU 核数
    jobs: usize,
}

impl<'a> LocalSimulationRunner<'a> {
    pub fn new(registry: &'a ProgramRegistry, output_root: impl Into<PathBuf>) -> Self {
        LocalSimulationRunner {
            registry,
            output_root: output_root.into(),
            jobs: 0,
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// 并行执行全部选项，返回逐作业统计
    pub fn submit(&self, list_options: &[Options], token: &TaskToken) -> Result<BatchReport> {
        let total = list_options.len();
        let pb = progress::create_progress_bar(total as u64, "Simulating");

        let jobs = if self.jobs == 0 {
            num_cpus::get()
        } else {
            self.jobs
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| EpmakitError::Other(e.to_string()))?;

        let outcomes: Vec<JobOutcome> = pool.install(|| {
            list_options
                .par_iter()
                .map(|options| {
                    let outcome = self.run_one(options, token);
                    pb.inc(1);
                    outcome
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut report = BatchReport::default();
        for outcome in outcomes {
            report.merge(outcome);
        }
        Ok(report)
    }

    fn run_one(&self, options: &Options, token: &TaskToken) -> JobOutcome {
        if token.cancelled() {
            return JobOutcome::Cancelled;
        }

        let mut simulation = Simulation::new(options.clone());
        let identifier = simulation.identifier.clone();

        let adapter = match self.registry.get(&options.program.identifier) {
            Ok(adapter) => adapter,
            Err(e) => return JobOutcome::Failed(identifier, e.to_string()),
        };

        let output_dir = self.output_root.join(&identifier);
        if let Err(e) = fs::create_dir_all(&output_dir) {
            return JobOutcome::Failed(identifier, e.to_string());
        }

        match adapter.create_worker().run(token, &mut simulation, &output_dir) {
            Ok(()) => JobOutcome::Success(Box::new(simulation)),
            Err(EpmakitError::Cancelled) => JobOutcome::Cancelled,
            Err(e) => JobOutcome::Failed(identifier, e.to_string()),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{Analysis, PhotonIntensityAnalysis};
    use crate::models::beam::{Beam, GaussianBeam};
    use crate::models::detector::PhotonDetector;
    use crate::models::material::Material;
    use crate::models::options::OptionsBuilder;
    use crate::models::program::Program;
    use crate::models::sample::Sample;

    fn build_options(program: Program) -> Vec<Options> {
        let mut builder = OptionsBuilder::new();
        builder.add_program(program);
        builder.add_beam(Beam::Gaussian(GaussianBeam::new(15e3, 10e-9)));
        builder.add_sample(Sample::substrate(Material::pure(29).unwrap()));
        builder.add_analysis(Analysis::PhotonIntensity(PhotonIntensityAnalysis::new(
            PhotonDetector::new("det", 0.7),
        )));
        builder.build().unwrap()
    }

    #[test]
    fn test_submit_success() {
        let registry = ProgramRegistry::with_builtins();
        let dir = tempfile::tempdir().unwrap();
        let runner = LocalSimulationRunner::new(&registry, dir.path()).with_jobs(2);

        let list_options = build_options(Program::new("mock").with_number_trajectories(10));
        let token = TaskToken::new();
        let report = runner.submit(&list_options, &token).unwrap();

        assert_eq!(1, report.success_count());
        assert_eq!(0, report.failed_count());
        assert_eq!(0, report.cancelled);
    }

    #[test]
    fn test_submit_unknown_program_fails_per_job() {
        let registry = ProgramRegistry::with_builtins();
        let dir = tempfile::tempdir().unwrap();
        let runner = LocalSimulationRunner::new(&registry, dir.path()).with_jobs(2);

        let mut list_options = build_options(Program::new("mock").with_number_trajectories(10));
        list_options.extend(build_options(
            Program::new("no-such-program").with_number_trajectories(10),
        ));

        let token = TaskToken::new();
        let report = runner.submit(&list_options, &token).unwrap();

        // 一个失败不阻塞另一个
        assert_eq!(1, report.success_count());
        assert_eq!(1, report.failed_count());
        assert_eq!(2, report.total());
    }

    #[test]
    fn test_submit_cancelled_before_start() {
        let registry = ProgramRegistry::with_builtins();
        let dir = tempfile::tempdir().unwrap();
        let runner = LocalSimulationRunner::new(&registry, dir.path()).with_jobs(1);

        let list_options = build_options(Program::new("mock").with_number_trajectories(10));
        let token = TaskToken::new();
        token.cancel();

        let report = runner.submit(&list_options, &token).unwrap();
        assert_eq!(0, report.success_count());
        assert_eq!(1, report.cancelled);
    }
}
