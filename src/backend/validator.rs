//! # 选项校验
//!
//! 对一份选项运行全部检查：程序、束流、样品（逐材料）、分析
//! （逐探测器与标样），所有问题写入同一个错误累积器，一次
//! `validate()` 调用暴露全部配置问题。后端不支持的对象种类
//! 本身就是一条结构化错误（"not supported"），不是内部故障。
//!
//! ## 依赖关系
//! - 被 `backend/mock.rs`, `commands/` 使用
//! - 使用 `utils/accumulator.rs`

use std::f64::consts::{FRAC_PI_2, PI};

use regex::Regex;

use crate::error::Result;
use crate::models::analysis::Analysis;
use crate::models::beam::Beam;
use crate::models::detector::PhotonDetector;
use crate::models::material::Material;
use crate::models::options::Options;
use crate::models::program::Program;
use crate::models::sample::Sample;
use crate::utils::accumulator::{AccumulatorKind, ErrorAccumulator};

/// 组成质量分数之和允许的偏差
const COMPOSITION_TOLERANCE: f64 = 1e-6;

/// 后端校验器：能力表 + 共享字段检查
pub trait Validator: Send + Sync {
    /// 支持的束流种类（`Beam::kind()` 值）
    fn supported_beams(&self) -> &[&'static str];

    /// 支持的样品种类（`Sample::kind()` 值）
    fn supported_samples(&self) -> &[&'static str];

    /// 支持的分析种类（`Analysis::kind()` 值）
    fn supported_analyses(&self) -> &[&'static str];

    /// 运行全部检查；任何问题都汇成单个聚合校验错误
    fn validate(&self, options: &Options) -> Result<()> {
        let mut accumulator = ErrorAccumulator::new();
        self.validate_options(options, &mut accumulator);
        accumulator.finish(AccumulatorKind::Validation)
    }

    fn validate_options(&self, options: &Options, accumulator: &mut ErrorAccumulator) {
        validate_program(&options.program, accumulator);

        if !self.supported_beams().contains(&options.beam.kind()) {
            accumulator.add_error(format!("Beam ({}) is not supported", options.beam.kind()));
        } else {
            validate_beam(&options.beam, accumulator);
        }

        if !self.supported_samples().contains(&options.sample.kind()) {
            accumulator.add_error(format!(
                "Sample ({}) is not supported",
                options.sample.kind()
            ));
        } else {
            validate_sample(&options.sample, accumulator);
        }

        for analysis in &options.analyses {
            if !self.supported_analyses().contains(&analysis.kind()) {
                accumulator.add_error(format!("Analysis ({}) is not supported", analysis.kind()));
            } else {
                validate_analysis(analysis, accumulator);
            }
        }
    }
}

/// 程序字段检查
pub fn validate_program(program: &Program, accumulator: &mut ErrorAccumulator) {
    if program.identifier.trim().is_empty() {
        accumulator.add_error("Program identifier must not be empty");
    }
    if program.number_trajectories == 0 {
        accumulator.add_error("Number of trajectories must be greater than 0");
    }
}

/// 束流字段检查
pub fn validate_beam(beam: &Beam, accumulator: &mut ErrorAccumulator) {
    if beam.energy_ev() <= 0.0 {
        accumulator.add_error(format!(
            "Beam energy ({} eV) must be greater than 0",
            beam.energy_ev()
        ));
    }
    if beam.diameter_m() < 0.0 {
        accumulator.add_error(format!(
            "Beam diameter ({} m) must not be negative",
            beam.diameter_m()
        ));
    }
}

/// 样品字段检查：逐材料校验，真空基底视为错误
pub fn validate_sample(sample: &Sample, accumulator: &mut ErrorAccumulator) {
    match sample {
        Sample::Substrate(substrate) => {
            if substrate.material.is_vacuum() {
                accumulator.add_error("Substrate material must not be vacuum");
            } else {
                validate_material(&substrate.material, accumulator);
            }
        }
        Sample::Inclusion(inclusion) => {
            validate_material(&inclusion.substrate_material, accumulator);
            validate_material(&inclusion.inclusion_material, accumulator);
            if inclusion.inclusion_diameter_m <= 0.0 {
                accumulator.add_error(format!(
                    "Inclusion diameter ({} m) must be greater than 0",
                    inclusion.inclusion_diameter_m
                ));
            }
        }
        Sample::HorizontalLayers(layered) => {
            if layered.layers.is_empty() {
                accumulator.add_error("At least one layer is required");
            }
            for layer in &layered.layers {
                if !layer.material.is_vacuum() {
                    validate_material(&layer.material, accumulator);
                }
                if layer.thickness_m <= 0.0 {
                    accumulator.add_error(format!(
                        "Layer thickness ({} m) must be greater than 0",
                        layer.thickness_m
                    ));
                }
            }
            if let Some(substrate) = &layered.substrate_material {
                validate_material(substrate, accumulator);
            }
        }
    }
}

/// 材料字段检查：名称、组成分数、组成总和、密度、颜色
pub fn validate_material(material: &Material, accumulator: &mut ErrorAccumulator) {
    if material.name.trim().is_empty() {
        accumulator.add_error("Material name must not be empty");
    }

    for (z, fraction) in &material.composition {
        if *fraction <= 0.0 || *fraction > 1.0 {
            accumulator.add_error(format!(
                "Weight fraction of Z={} ({}) must be within (0, 1]",
                z, fraction
            ));
        }
    }

    let total: f64 = material.composition.values().sum();
    if (total - 1.0).abs() > COMPOSITION_TOLERANCE {
        accumulator.add_error(format!(
            "Sum of weight fractions ({}) must be equal to 1",
            total
        ));
    }

    if material.density_kg_m3 <= 0.0 {
        accumulator.add_error(format!(
            "Density ({} kg/m3) must be greater than 0",
            material.density_kg_m3
        ));
    }

    let color = Regex::new(r"^#[0-9a-fA-F]{6}([0-9a-fA-F]{2})?$").unwrap();
    if !color.is_match(&material.color) {
        accumulator.add_error(format!("Color ({}) is not a valid HTML color", material.color));
    }
}

/// 探测器字段检查
pub fn validate_photon_detector(detector: &PhotonDetector, accumulator: &mut ErrorAccumulator) {
    if detector.name.trim().is_empty() {
        accumulator.add_error("Detector name must not be empty");
    }
    if detector.elevation_rad < -FRAC_PI_2 || detector.elevation_rad > FRAC_PI_2 {
        accumulator.add_error(format!(
            "Detector elevation ({} rad) must be within [-pi/2, pi/2]",
            detector.elevation_rad
        ));
    }
    if detector.azimuth_rad < 0.0 || detector.azimuth_rad >= 2.0 * PI {
        accumulator.add_error(format!(
            "Detector azimuth ({} rad) must be within [0, 2pi)",
            detector.azimuth_rad
        ));
    }
}

/// 分析字段检查
pub fn validate_analysis(analysis: &Analysis, accumulator: &mut ErrorAccumulator) {
    validate_photon_detector(analysis.photon_detector(), accumulator);

    if let Analysis::KRatio(kratio) = analysis {
        for (z, material) in &kratio.standard_materials {
            validate_material(material, accumulator);
            if !material.composition.contains_key(z) {
                accumulator.add_error(format!(
                    "Standard material {} does not contain element Z={}",
                    material.name, z
                ));
            }
        }
    }
}
