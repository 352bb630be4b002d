//! # 元素属性表
//!
//! Z = 1–96 的元素符号、英文名、原子量 (g/mol) 与质量密度 (kg/m³)。
//! 数据来源：Tableau periodique des elements, Sargent-Welch
//! scientifique Canada Limitee。
//!
//! ## 依赖关系
//! - 被 `models/material.rs`, `xray/transition.rs` 使用
//! - 无外部模块依赖

use crate::error::{EpmakitError, Result};

/// 表内最大原子序数
pub const MAX_Z: u8 = 96;

#[rustfmt::skip]
const SYMBOLS: [&str; 96] = [
    "H" , "He", "Li", "Be", "B" , "C" , "N" , "O" ,
    "F" , "Ne", "Na", "Mg", "Al", "Si", "P" , "S" ,
    "Cl", "Ar", "K" , "Ca", "Sc", "Ti", "V" , "Cr",
    "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge",
    "As", "Se", "Br", "Kr", "Rb", "Sr", "Y" , "Zr",
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I" , "Xe", "Cs", "Ba",
    "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd",
    "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf",
    "Ta", "W" , "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra",
    "Ac", "Th", "Pa", "U" , "Np", "Pu", "Am", "Cm",
];

#[rustfmt::skip]
const NAMES_EN: [&str; 96] = [
    "Hydrogen"    , "Helium"      , "Lithium"     , "Beryllium"   ,
    "Boron"       , "Carbon"      , "Nitrogen"    , "Oxygen"      ,
    "Fluorine"    , "Neon"        , "Sodium"      , "Magnesium"   ,
    "Aluminium"   , "Silicon"     , "Phosphorus"  , "Sulfur"      ,
    "Chlorine"    , "Argon"       , "Potassium"   , "Calcium"     ,
    "Scandium"    , "Titanium"    , "Vanadium"    , "Chromium"    ,
    "Manganese"   , "Iron"        , "Cobalt"      , "Nickel"      ,
    "Copper"      , "Zinc"        , "Gallium"     , "Germanium"   ,
    "Arsenic"     , "Selenium"    , "Bromine"     , "Krypton"     ,
    "Rubidium"    , "Strontium"   , "Yttrium"     , "Zirconium"   ,
    "Niobium"     , "Molybdenum"  , "Technetium"  , "Ruthenium"   ,
    "Rhodium"     , "Palladium"   , "Silver"      , "Cadmium"     ,
    "Indium"      , "Tin"         , "Antimony"    , "Tellurium"   ,
    "Iodine"      , "Xenon"       , "Cesium"      , "Barium"      ,
    "Lanthanum"   , "Cerium"      , "Praseodymium", "Neodymium"   ,
    "Promethium"  , "Samarium"    , "Europium"    , "Gadolinium"  ,
    "Terbium"     , "Dysprosium"  , "Holmium"     , "Erbium"      ,
    "Thulium"     , "Ytterbium"   , "Lutetium"    , "Hafnium"     ,
    "Tantalum"    , "Tungsten"    , "Rhenium"     , "Osmium"      ,
    "Iridium"     , "Platinum"    , "Gold"        , "Mercury"     ,
    "Thallium"    , "Lead"        , "Bismuth"     , "Polonium"    ,
    "Astatine"    , "Radon"       , "Francium"    , "Radium"      ,
    "Actinium"    , "Thorium"     , "Protactinium", "Uranium"     ,
    "Neptunium"   , "Plutonium"   , "Americium"   , "Curium"      ,
];

/// 原子量 (g/mol)
#[rustfmt::skip]
const ATOMIC_MASSES: [f64; 96] = [
    1.0079000, 4.0026000, 6.9410000, 9.0121800, 10.810000, 12.011000,
    14.006700, 15.999400, 18.998403, 20.179000, 22.989770, 24.305000,
    26.981540, 28.085500, 30.973760, 32.060000, 35.453000, 39.948000,
    39.098300, 40.080000, 44.955900, 47.900000, 50.941500, 51.996000,
    54.938000, 55.847000, 58.933200, 58.700000, 63.546000, 65.380000,
    69.720000, 72.590000, 74.921600, 78.960000, 79.904000, 83.800000,
    85.467800, 87.620000, 88.905600, 91.220000, 92.906400, 95.940000,
    98.000000, 101.07000, 102.90550, 106.40000, 107.86800, 112.41000,
    114.82000, 118.69000, 121.75000, 127.60000, 126.90450, 131.30000,
    132.90540, 137.33000, 138.90550, 140.12000, 140.90770, 144.24000,
    145.00000, 150.40000, 151.96000, 157.25000, 158.92540, 162.50000,
    164.93040, 167.26000, 168.93420, 173.04000, 174.96700, 178.49000,
    180.94790, 183.85000, 186.20700, 190.20000, 192.22000, 195.09000,
    196.96650, 200.59000, 204.37000, 207.20000, 208.98040, 209.00000,
    210.00000, 222.00000, 223.00000, 226.02540, 227.02780, 232.03810,
    231.03590, 238.02900, 237.04820, 244.00000, 243.00000, 247.00000,
];

/// 质量密度 (g/cm³)；Z = 85 与 87 无数据，置 1
#[rustfmt::skip]
const DENSITIES: [f64; 96] = [
    0.0899, 0.1787, 0.5300, 1.8500, 2.3400, 2.6200, 1.2510, 1.4290,
    1.6960, 0.9010, 0.9700, 1.7400, 2.7000, 2.3300, 1.8200, 2.0700,
    3.1700, 1.7840, 0.8600, 1.5500, 3.0000, 4.5000, 5.8000, 7.1900,
    7.4300, 7.8600, 8.9000, 8.9000, 8.9600, 7.1400, 5.9100, 5.3200,
    5.7200, 4.8000, 3.1200, 3.7400, 1.5300, 2.6000, 4.5000, 6.4900,
    8.5500, 10.200, 11.500, 12.200, 12.400, 12.000, 10.500, 8.6500,
    7.3100, 7.3000, 6.6800, 6.2400, 4.9200, 5.8900, 1.8700, 3.5000,
    6.7000, 6.7800, 6.7700, 7.0000, 6.4750, 7.5400, 5.2600, 7.8900,
    8.2700, 8.5400, 8.8000, 9.0500, 9.3300, 6.9800, 9.8400, 13.100,
    16.600, 19.300, 21.000, 22.400, 22.500, 21.400, 19.300, 13.530,
    11.850, 11.400, 9.8000, 9.4000, 1.0000, 9.9100, 1.0000, 5.0000,
    10.070, 11.700, 15.400, 18.900, 20.400, 19.800, 13.600, 13.511,
];

fn check_z(z: u8) -> Result<usize> {
    if z == 0 || z > MAX_Z {
        return Err(EpmakitError::UnknownElement(format!("Z={}", z)));
    }
    Ok((z - 1) as usize)
}

/// 元素符号
pub fn symbol(z: u8) -> Result<&'static str> {
    Ok(SYMBOLS[check_z(z)?])
}

/// 元素英文名
pub fn name(z: u8) -> Result<&'static str> {
    Ok(NAMES_EN[check_z(z)?])
}

/// 原子量 (g/mol)
pub fn atomic_mass_g_mol(z: u8) -> Result<f64> {
    Ok(ATOMIC_MASSES[check_z(z)?])
}

/// 质量密度 (kg/m³)
pub fn mass_density_kg_m3(z: u8) -> Result<f64> {
    Ok(DENSITIES[check_z(z)?] * 1e3)
}

/// 由符号查原子序数（大小写不敏感）
pub fn atomic_number(symbol: &str) -> Result<u8> {
    let mut normalized = String::with_capacity(2);
    for (i, c) in symbol.trim().chars().enumerate() {
        if i == 0 {
            normalized.extend(c.to_uppercase());
        } else {
            normalized.extend(c.to_lowercase());
        }
    }

    SYMBOLS
        .iter()
        .position(|s| *s == normalized)
        .map(|i| (i + 1) as u8)
        .ok_or_else(|| EpmakitError::UnknownElement(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_and_name() {
        assert_eq!("Cu", symbol(29).unwrap());
        assert_eq!("Copper", name(29).unwrap());
        assert_eq!("Cm", symbol(96).unwrap());
    }

    #[test]
    fn test_atomic_number_roundtrip() {
        for z in 1..=MAX_Z {
            assert_eq!(z, atomic_number(symbol(z).unwrap()).unwrap());
        }
    }

    #[test]
    fn test_atomic_number_case_insensitive() {
        assert_eq!(20, atomic_number("ca").unwrap());
        assert_eq!(8, atomic_number("O").unwrap());
        assert!(atomic_number("Xx").is_err());
    }

    #[test]
    fn test_atomic_mass() {
        assert!((atomic_mass_g_mol(20).unwrap() - 40.080).abs() < 1e-9);
        assert!((atomic_mass_g_mol(14).unwrap() - 28.0855).abs() < 1e-9);
    }

    #[test]
    fn test_mass_density() {
        // Cu: 8.96 g/cm3 -> 8960 kg/m3
        assert!((mass_density_kg_m3(29).unwrap() - 8960.0).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range() {
        assert!(symbol(0).is_err());
        assert!(symbol(97).is_err());
    }
}
