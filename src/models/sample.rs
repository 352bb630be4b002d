//! # 样品数据模型
//!
//! 基底、夹杂与水平多层三种样品几何。`materials()` 给出样品中
//! 出现的全部材料（保序去重，不含真空），k 比率标样生成依赖它。
//!
//! ## 依赖关系
//! - 被 `models/options.rs`, `models/analysis.rs` 使用
//! - 使用 `models/material.rs`

use serde::{Deserialize, Serialize};

use crate::models::material::Material;
use crate::utils::compare::isclose;

/// 基底样品：单一材料的半无限平面
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstrateSample {
    pub material: Material,
    /// 样品倾角 (rad)
    pub tilt_rad: f64,
    /// 方位角 (rad)
    pub azimuth_rad: f64,
}

impl SubstrateSample {
    pub fn new(material: Material) -> Self {
        SubstrateSample {
            material,
            tilt_rad: 0.0,
            azimuth_rad: 0.0,
        }
    }
}

impl PartialEq for SubstrateSample {
    fn eq(&self, other: &Self) -> bool {
        self.material == other.material
            && isclose(self.tilt_rad, other.tilt_rad)
            && isclose(self.azimuth_rad, other.azimuth_rad)
    }
}

/// 夹杂样品：基底中嵌入半球形夹杂
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InclusionSample {
    pub substrate_material: Material,
    pub inclusion_material: Material,
    /// 夹杂直径 (m)
    pub inclusion_diameter_m: f64,
    pub tilt_rad: f64,
    pub azimuth_rad: f64,
}

impl InclusionSample {
    pub fn new(
        substrate_material: Material,
        inclusion_material: Material,
        inclusion_diameter_m: f64,
    ) -> Self {
        InclusionSample {
            substrate_material,
            inclusion_material,
            inclusion_diameter_m,
            tilt_rad: 0.0,
            azimuth_rad: 0.0,
        }
    }
}

impl PartialEq for InclusionSample {
    fn eq(&self, other: &Self) -> bool {
        self.substrate_material == other.substrate_material
            && self.inclusion_material == other.inclusion_material
            && isclose(self.inclusion_diameter_m, other.inclusion_diameter_m)
            && isclose(self.tilt_rad, other.tilt_rad)
            && isclose(self.azimuth_rad, other.azimuth_rad)
    }
}

/// 一层材料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub material: Material,
    /// 层厚 (m)
    pub thickness_m: f64,
}

impl PartialEq for Layer {
    fn eq(&self, other: &Self) -> bool {
        self.material == other.material && isclose(self.thickness_m, other.thickness_m)
    }
}

/// 水平多层样品：自上而下的层序列叠在可选基底上
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizontalLayerSample {
    /// 基底材料；`None` 表示层悬空于真空
    pub substrate_material: Option<Material>,
    /// 层，自表面向下
    pub layers: Vec<Layer>,
    pub tilt_rad: f64,
    pub azimuth_rad: f64,
}

impl HorizontalLayerSample {
    pub fn new(substrate_material: Option<Material>) -> Self {
        HorizontalLayerSample {
            substrate_material,
            layers: Vec::new(),
            tilt_rad: 0.0,
            azimuth_rad: 0.0,
        }
    }

    pub fn add_layer(&mut self, material: Material, thickness_m: f64) {
        self.layers.push(Layer {
            material,
            thickness_m,
        });
    }
}

impl PartialEq for HorizontalLayerSample {
    fn eq(&self, other: &Self) -> bool {
        self.substrate_material == other.substrate_material
            && self.layers == other.layers
            && isclose(self.tilt_rad, other.tilt_rad)
            && isclose(self.azimuth_rad, other.azimuth_rad)
    }
}

/// 样品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sample {
    Substrate(SubstrateSample),
    Inclusion(InclusionSample),
    HorizontalLayers(HorizontalLayerSample),
}

impl Sample {
    /// 便捷构造：材料基底
    pub fn substrate(material: Material) -> Self {
        Sample::Substrate(SubstrateSample::new(material))
    }

    /// 样品中的全部材料，保序去重，不含真空
    pub fn materials(&self) -> Vec<&Material> {
        let mut materials: Vec<&Material> = Vec::new();

        match self {
            Sample::Substrate(sample) => {
                append_unique(&mut materials, &sample.material);
            }
            Sample::Inclusion(sample) => {
                append_unique(&mut materials, &sample.substrate_material);
                append_unique(&mut materials, &sample.inclusion_material);
            }
            Sample::HorizontalLayers(sample) => {
                for layer in &sample.layers {
                    append_unique(&mut materials, &layer.material);
                }
                if let Some(substrate) = &sample.substrate_material {
                    append_unique(&mut materials, substrate);
                }
            }
        }

        materials
    }

    /// 种类名，用于能力校验与报告
    pub fn kind(&self) -> &'static str {
        match self {
            Sample::Substrate(_) => "substrate",
            Sample::Inclusion(_) => "inclusion",
            Sample::HorizontalLayers(_) => "horizontal-layers",
        }
    }
}

fn append_unique<'a>(materials: &mut Vec<&'a Material>, material: &'a Material) {
    if material.is_vacuum() {
        return;
    }
    if !materials.iter().any(|m| *m == material) {
        materials.push(material);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substrate_materials() {
        let sample = Sample::substrate(Material::pure(29).unwrap());
        let materials = sample.materials();

        assert_eq!(1, materials.len());
        assert_eq!("Copper", materials[0].name);
    }

    #[test]
    fn test_inclusion_materials_deduplicated() {
        let copper = Material::pure(29).unwrap();
        let sample = Sample::Inclusion(InclusionSample::new(copper.clone(), copper, 1e-6));

        assert_eq!(1, sample.materials().len());
    }

    #[test]
    fn test_horizontal_layers_materials_ordered() {
        let mut sample = HorizontalLayerSample::new(Some(Material::pure(26).unwrap()));
        sample.add_layer(Material::pure(29).unwrap(), 50e-9);
        sample.add_layer(Material::pure(13).unwrap(), 100e-9);

        let sample = Sample::HorizontalLayers(sample);
        let names: Vec<&str> = sample.materials().iter().map(|m| m.name.as_str()).collect();

        // 层在前（自表面向下），基底最后
        assert_eq!(vec!["Copper", "Aluminium", "Iron"], names);
    }

    #[test]
    fn test_vacuum_excluded() {
        let mut sample = HorizontalLayerSample::new(None);
        sample.add_layer(Material::vacuum(), 10e-9);
        sample.add_layer(Material::pure(14).unwrap(), 50e-9);

        let sample = Sample::HorizontalLayers(sample);
        assert_eq!(1, sample.materials().len());
    }
}
