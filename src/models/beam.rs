//! # 束流数据模型
//!
//! 入射束的能量、直径、位置与粒子种类。
//!
//! ## 依赖关系
//! - 被 `models/options.rs`, `models/analysis.rs` 使用
//! - 使用 `utils/compare.rs`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::compare::isclose;

/// 入射粒子种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Particle {
    Electron,
    Photon,
    Positron,
}

impl Default for Particle {
    fn default() -> Self {
        Particle::Electron
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Particle::Electron => write!(f, "electron"),
            Particle::Photon => write!(f, "photon"),
            Particle::Positron => write!(f, "positron"),
        }
    }
}

/// 高斯束：强度呈二维高斯分布，直径取全高半宽
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianBeam {
    /// 入射能量 (eV)
    pub energy_ev: f64,
    /// 束斑直径 (m)
    pub diameter_m: f64,
    /// 入射位置 x (m)
    pub x0_m: f64,
    /// 入射位置 y (m)
    pub y0_m: f64,
    /// 粒子种类
    pub particle: Particle,
}

impl GaussianBeam {
    pub fn new(energy_ev: f64, diameter_m: f64) -> Self {
        GaussianBeam {
            energy_ev,
            diameter_m,
            x0_m: 0.0,
            y0_m: 0.0,
            particle: Particle::Electron,
        }
    }

    pub fn with_position(mut self, x0_m: f64, y0_m: f64) -> Self {
        self.x0_m = x0_m;
        self.y0_m = y0_m;
        self
    }

    pub fn with_particle(mut self, particle: Particle) -> Self {
        self.particle = particle;
        self
    }
}

impl PartialEq for GaussianBeam {
    fn eq(&self, other: &Self) -> bool {
        isclose(self.energy_ev, other.energy_ev)
            && isclose(self.diameter_m, other.diameter_m)
            && isclose(self.x0_m, other.x0_m)
            && isclose(self.y0_m, other.y0_m)
            && self.particle == other.particle
    }
}

/// 圆柱束：均匀圆形截面
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CylindricalBeam {
    /// 入射能量 (eV)
    pub energy_ev: f64,
    /// 束直径 (m)
    pub diameter_m: f64,
    /// 入射位置 x (m)
    pub x0_m: f64,
    /// 入射位置 y (m)
    pub y0_m: f64,
    /// 粒子种类
    pub particle: Particle,
}

impl CylindricalBeam {
    pub fn new(energy_ev: f64, diameter_m: f64) -> Self {
        CylindricalBeam {
            energy_ev,
            diameter_m,
            x0_m: 0.0,
            y0_m: 0.0,
            particle: Particle::Electron,
        }
    }
}

impl PartialEq for CylindricalBeam {
    fn eq(&self, other: &Self) -> bool {
        isclose(self.energy_ev, other.energy_ev)
            && isclose(self.diameter_m, other.diameter_m)
            && isclose(self.x0_m, other.x0_m)
            && isclose(self.y0_m, other.y0_m)
            && self.particle == other.particle
    }
}

/// 束流
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Beam {
    Gaussian(GaussianBeam),
    Cylindrical(CylindricalBeam),
}

impl Beam {
    pub fn energy_ev(&self) -> f64 {
        match self {
            Beam::Gaussian(beam) => beam.energy_ev,
            Beam::Cylindrical(beam) => beam.energy_ev,
        }
    }

    pub fn diameter_m(&self) -> f64 {
        match self {
            Beam::Gaussian(beam) => beam.diameter_m,
            Beam::Cylindrical(beam) => beam.diameter_m,
        }
    }

    pub fn particle(&self) -> Particle {
        match self {
            Beam::Gaussian(beam) => beam.particle,
            Beam::Cylindrical(beam) => beam.particle,
        }
    }

    /// 种类名，用于能力校验与报告
    pub fn kind(&self) -> &'static str {
        match self {
            Beam::Gaussian(_) => "gaussian",
            Beam::Cylindrical(_) => "cylindrical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_defaults() {
        let beam = GaussianBeam::new(15e3, 10e-9);

        assert!((beam.energy_ev - 15e3).abs() < 1e-9);
        assert_eq!(Particle::Electron, beam.particle);
        assert_eq!(0.0, beam.x0_m);
    }

    #[test]
    fn test_beam_equality() {
        let a = Beam::Gaussian(GaussianBeam::new(20e3, 10e-9));
        let b = Beam::Gaussian(GaussianBeam::new(20e3, 10e-9));
        let c = Beam::Gaussian(GaussianBeam::new(20e3, 0.0));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_kind_differs_across_variants() {
        let gaussian = Beam::Gaussian(GaussianBeam::new(20e3, 10e-9));
        let cylindrical = Beam::Cylindrical(CylindricalBeam::new(20e3, 10e-9));

        assert_ne!(gaussian, cylindrical);
        assert_eq!("gaussian", gaussian.kind());
        assert_eq!("cylindrical", cylindrical.kind());
    }
}
