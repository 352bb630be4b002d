//! # 模拟选项与选项构建器
//!
//! `Options` 是一次模拟请求的完整声明：程序、束流、样品、分析
//! 与标签。比较采用值相等：程序/束流/样品逐字段近似比较，
//! 分析与标签按"相似序列"（顺序无关的多重集合）比较。
//!
//! `OptionsBuilder` 接受重复注册（按值去重），`build()` 对每个
//! 程序先用其展开策略把分析归并为组合，再对 (束流, 样品, 组合)
//! 取笛卡尔积；每个新产生的 Options 立即执行其全部分析的
//! `apply()` 副作用（如 k 比率合成标样选项），产生的附加选项
//! 同样参与全局去重。
//!
//! ## 依赖关系
//! - 被 `models/analysis.rs`, `project.rs`, `commands/` 使用
//! - 使用 `backend/expander.rs` 的展开策略

use serde::{Deserialize, Serialize};

use crate::backend::expander::expand_analyses;
use crate::error::Result;
use crate::models::analysis::Analysis;
use crate::models::beam::Beam;
use crate::models::detector::PhotonDetector;
use crate::models::program::Program;
use crate::models::sample::Sample;
use crate::utils::compare::are_sequences_similar;

/// 标样选项携带的标签
pub const STANDARD_TAG: &str = "standard";

/// 一次模拟请求的完整声明
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Options {
    pub program: Program,
    pub beam: Beam,
    pub sample: Sample,
    pub analyses: Vec<Analysis>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Options {
    pub fn new(program: Program, beam: Beam, sample: Sample, analyses: Vec<Analysis>) -> Self {
        Options {
            program,
            beam,
            sample,
            analyses,
            tags: Vec::new(),
        }
    }

    /// 派生投影：分析引用的探测器，保序去重
    pub fn detectors(&self) -> Vec<&PhotonDetector> {
        let mut detectors: Vec<&PhotonDetector> = Vec::new();
        for analysis in &self.analyses {
            let detector = analysis.photon_detector();
            if !detectors.iter().any(|d| *d == detector) {
                detectors.push(detector);
            }
        }
        detectors
    }

    /// 是否为标样选项（由分析 `apply()` 合成）
    pub fn is_standard(&self) -> bool {
        self.tags.iter().any(|t| t == STANDARD_TAG)
    }
}

impl PartialEq for Options {
    fn eq(&self, other: &Self) -> bool {
        self.program == other.program
            && self.beam == other.beam
            && self.sample == other.sample
            && are_sequences_similar(&self.analyses, &other.analyses)
            && are_sequences_similar(&self.tags, &other.tags)
    }
}

/// 选项构建器
#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    programs: Vec<Program>,
    beams: Vec<Beam>,
    samples: Vec<Sample>,
    analyses: Vec<Analysis>,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        OptionsBuilder::default()
    }

    /// 注册程序；与已注册者值相等则忽略
    pub fn add_program(&mut self, program: Program) {
        if !self.programs.contains(&program) {
            self.programs.push(program);
        }
    }

    pub fn add_beam(&mut self, beam: Beam) {
        if !self.beams.contains(&beam) {
            self.beams.push(beam);
        }
    }

    pub fn add_sample(&mut self, sample: Sample) {
        if !self.samples.contains(&sample) {
            self.samples.push(sample);
        }
    }

    pub fn add_analysis(&mut self, analysis: Analysis) {
        if !self.analyses.contains(&analysis) {
            self.analyses.push(analysis);
        }
    }

    /// 不执行 `apply()` 副作用的笛卡尔组合数
    pub fn len(&self) -> usize {
        self.combinations().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按程序展开策略归并分析，取 (束流, 样品, 组合) 笛卡尔积，
    /// 全局去重，不执行分析副作用
    fn combinations(&self) -> Vec<Options> {
        let mut produced: Vec<Options> = Vec::new();

        for program in &self.programs {
            let analysis_combinations = expand_analyses(&self.analyses, program.expand);

            for analyses in &analysis_combinations {
                for beam in &self.beams {
                    for sample in &self.samples {
                        let options = Options::new(
                            program.clone(),
                            beam.clone(),
                            sample.clone(),
                            analyses.clone(),
                        );
                        if !produced.contains(&options) {
                            produced.push(options);
                        }
                    }
                }
            }
        }

        produced
    }

    /// 构建全部选项，含分析 `apply()` 合成的附加选项。
    /// 去重跨越整次构建：后产生的选项若与此前任何选项
    /// （含附加选项）值相等即被跳过。
    pub fn build(&self) -> Result<Vec<Options>> {
        let mut list_options: Vec<Options> = Vec::new();

        for program in &self.programs {
            let analysis_combinations = expand_analyses(&self.analyses, program.expand);

            for analyses in &analysis_combinations {
                for beam in &self.beams {
                    for sample in &self.samples {
                        let mut options = Options::new(
                            program.clone(),
                            beam.clone(),
                            sample.clone(),
                            analyses.clone(),
                        );
                        if list_options.contains(&options) {
                            continue;
                        }

                        // 分析副作用按产生顺序立即执行
                        let mut extras: Vec<Options> = Vec::new();
                        for analysis in analyses {
                            extras.extend(analysis.apply(&mut options)?);
                        }

                        list_options.push(options);

                        for extra in extras {
                            if !list_options.contains(&extra) {
                                list_options.push(extra);
                            }
                        }
                    }
                }
            }
        }

        Ok(list_options)
    }
}

/// CLI 输入文件的声明式模拟计划，与构建器一一对应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationPlan {
    #[serde(default)]
    pub programs: Vec<Program>,
    #[serde(default)]
    pub beams: Vec<Beam>,
    #[serde(default)]
    pub samples: Vec<Sample>,
    #[serde(default)]
    pub analyses: Vec<Analysis>,
}

impl SimulationPlan {
    pub fn into_builder(self) -> OptionsBuilder {
        let mut builder = OptionsBuilder::new();
        for program in self.programs {
            builder.add_program(program);
        }
        for beam in self.beams {
            builder.add_beam(beam);
        }
        for sample in self.samples {
            builder.add_sample(sample);
        }
        for analysis in self.analyses {
            builder.add_analysis(analysis);
        }
        builder
    }
}
