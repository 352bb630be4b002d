//! # 材料数据模型
//!
//! 材料由名称、质量分数组成与密度描述，可由纯元素或化学式构造。
//!
//! ## 依赖关系
//! - 被 `models/sample.rs`, `models/analysis.rs` 使用
//! - 使用 `xray/element.rs` 的原子量/密度表

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EpmakitError, Result};
use crate::utils::compare::{are_maps_close, isclose};
use crate::xray::element;

/// 默认材料显示颜色（按元素序数循环取用）
const COLOR_PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
];

/// 材料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// 名称
    pub name: String,

    /// 组成：原子序数 -> 质量分数，全体之和为 1
    pub composition: BTreeMap<u8, f64>,

    /// 密度 (kg/m³)
    pub density_kg_m3: f64,

    /// 显示颜色 (HTML 十六进制，如 "#1f77b4")
    pub color: String,
}

impl Material {
    pub fn new(
        name: impl Into<String>,
        composition: BTreeMap<u8, f64>,
        density_kg_m3: f64,
    ) -> Self {
        let color = composition
            .keys()
            .next()
            .map(|z| COLOR_PALETTE[(*z as usize) % COLOR_PALETTE.len()])
            .unwrap_or(COLOR_PALETTE[0])
            .to_string();

        Material {
            name: name.into(),
            composition,
            density_kg_m3,
            color,
        }
    }

    /// 真空：空组成、零密度
    pub fn vacuum() -> Self {
        Material {
            name: "Vacuum".to_string(),
            composition: BTreeMap::new(),
            density_kg_m3: 0.0,
            color: "#00000000".to_string(),
        }
    }

    /// 纯元素材料，名称与密度取自元素表
    pub fn pure(z: u8) -> Result<Self> {
        let mut composition = BTreeMap::new();
        composition.insert(z, 1.0);

        Ok(Material::new(
            element::name(z)?,
            composition,
            element::mass_density_kg_m3(z)?,
        ))
    }

    /// 由化学式构造，如 `Al2O3`。原子比按原子量换算为质量分数。
    pub fn from_formula(formula: &str, density_kg_m3: f64) -> Result<Self> {
        let composition = composition_from_formula(formula)?;
        Ok(Material::new(formula, composition, density_kg_m3))
    }

    pub fn is_vacuum(&self) -> bool {
        self.composition.is_empty()
    }
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && are_maps_close(&self.composition, &other.composition)
            && isclose(self.density_kg_m3, other.density_kg_m3)
            && self.color == other.color
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// 解析化学式为质量分数组成
fn composition_from_formula(formula: &str) -> Result<BTreeMap<u8, f64>> {
    let token = Regex::new(r"([A-Z][a-z]?)([0-9]*\.?[0-9]*)").unwrap();

    let mut mole_fractions: BTreeMap<u8, f64> = BTreeMap::new();
    let mut matched_len = 0;

    for capture in token.captures_iter(formula) {
        let whole = capture.get(0).map(|m| m.as_str()).unwrap_or("");
        if whole.is_empty() {
            continue;
        }
        matched_len += whole.len();

        let symbol = &capture[1];
        let z = element::atomic_number(symbol)?;

        let count: f64 = if capture[2].is_empty() {
            1.0
        } else {
            capture[2]
                .parse()
                .map_err(|_| EpmakitError::InvalidFormula(formula.to_string()))?
        };
        if count <= 0.0 {
            return Err(EpmakitError::InvalidFormula(formula.to_string()));
        }

        *mole_fractions.entry(z).or_insert(0.0) += count;
    }

    if mole_fractions.is_empty() || matched_len != formula.len() {
        return Err(EpmakitError::InvalidFormula(formula.to_string()));
    }

    // 摩尔分数 -> 质量分数
    let mut total_mass = 0.0;
    let mut masses: BTreeMap<u8, f64> = BTreeMap::new();
    for (z, count) in &mole_fractions {
        let mass = count * element::atomic_mass_g_mol(*z)?;
        masses.insert(*z, mass);
        total_mass += mass;
    }

    Ok(masses
        .into_iter()
        .map(|(z, mass)| (z, mass / total_mass))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure() {
        let copper = Material::pure(29).unwrap();

        assert_eq!("Copper", copper.name);
        assert_eq!(1, copper.composition.len());
        assert!((copper.composition[&29] - 1.0).abs() < 1e-12);
        assert!((copper.density_kg_m3 - 8960.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_formula_al2o3() {
        let alumina = Material::from_formula("Al2O3", 3.95e3).unwrap();

        // 2*26.98154 / (2*26.98154 + 3*15.9994) = 0.529251
        assert!((alumina.composition[&13] - 0.529251).abs() < 1e-5);
        assert!((alumina.composition[&8] - 0.470749).abs() < 1e-5);
        assert!((alumina.density_kg_m3 - 3.95e3).abs() < 1e-9);
    }

    #[test]
    fn test_from_formula_repeated_element() {
        // 重复出现的元素按计数累加
        let m = Material::from_formula("CHOCH", 1.0e3).unwrap();
        assert_eq!(3, m.composition.len());

        let total: f64 = m.composition.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_formula_invalid() {
        assert!(Material::from_formula("", 1e3).is_err());
        assert!(Material::from_formula("Xx2", 1e3).is_err());
        assert!(Material::from_formula("Al-O", 1e3).is_err());
    }

    #[test]
    fn test_vacuum() {
        let vacuum = Material::vacuum();
        assert!(vacuum.is_vacuum());
        assert_eq!(0.0, vacuum.density_kg_m3);
    }

    #[test]
    fn test_equality_is_value_based() {
        let a = Material::from_formula("CaSiO4", 2.9e3).unwrap();
        let b = Material::from_formula("CaSiO4", 2.9e3).unwrap();
        let c = Material::from_formula("CaSiO3", 2.9e3).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
