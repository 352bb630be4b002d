//! # X 射线跃迁与谱线标识
//!
//! 单个 Siegbahn 跃迁、跃迁组（线系/组合线）与 `XrayLine`
//! （元素 + 跃迁或跃迁组）标识键。每个跃迁带有其存在的最小
//! 原子序数，低于该值的元素物理上不发射该谱线。
//!
//! ## 依赖关系
//! - 被 `results/`, `models/analysis.rs` 使用
//! - 使用 `xray/element.rs` 渲染元素符号

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EpmakitError;
use crate::xray::element;

/// 单个 X 射线跃迁（Siegbahn 记号）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Transition {
    // K 线系
    Ka1,
    Ka2,
    Kb1,
    Kb2,
    Kb3,
    Kb4,
    Kb5,
    // L 线系
    La1,
    La2,
    Lb1,
    Lb2,
    Lb3,
    Lb4,
    Lg1,
    Lg2,
    Lg3,
    Ll,
    Ln,
    // M 线系
    Ma1,
    Ma2,
    Mb,
    Mg,
    Mz1,
    Mz2,
    // N 线系
    N4N6,
    N5N67,
}

impl Transition {
    pub const ALL: [Transition; 26] = [
        Transition::Ka1,
        Transition::Ka2,
        Transition::Kb1,
        Transition::Kb2,
        Transition::Kb3,
        Transition::Kb4,
        Transition::Kb5,
        Transition::La1,
        Transition::La2,
        Transition::Lb1,
        Transition::Lb2,
        Transition::Lb3,
        Transition::Lb4,
        Transition::Lg1,
        Transition::Lg2,
        Transition::Lg3,
        Transition::Ll,
        Transition::Ln,
        Transition::Ma1,
        Transition::Ma2,
        Transition::Mb,
        Transition::Mg,
        Transition::Mz1,
        Transition::Mz2,
        Transition::N4N6,
        Transition::N5N67,
    ];

    /// ASCII Siegbahn 记号
    pub fn siegbahn(&self) -> &'static str {
        match self {
            Transition::Ka1 => "Ka1",
            Transition::Ka2 => "Ka2",
            Transition::Kb1 => "Kb1",
            Transition::Kb2 => "Kb2",
            Transition::Kb3 => "Kb3",
            Transition::Kb4 => "Kb4",
            Transition::Kb5 => "Kb5",
            Transition::La1 => "La1",
            Transition::La2 => "La2",
            Transition::Lb1 => "Lb1",
            Transition::Lb2 => "Lb2",
            Transition::Lb3 => "Lb3",
            Transition::Lb4 => "Lb4",
            Transition::Lg1 => "Lg1",
            Transition::Lg2 => "Lg2",
            Transition::Lg3 => "Lg3",
            Transition::Ll => "Ll",
            Transition::Ln => "Ln",
            Transition::Ma1 => "Ma1",
            Transition::Ma2 => "Ma2",
            Transition::Mb => "Mb",
            Transition::Mg => "Mg",
            Transition::Mz1 => "Mz1",
            Transition::Mz2 => "Mz2",
            Transition::N4N6 => "N4-N6",
            Transition::N5N67 => "N5-N6,7",
        }
    }

    /// Unicode Siegbahn 记号（希腊字母）
    pub fn siegbahn_unicode(&self) -> &'static str {
        match self {
            Transition::Ka1 => "Kα1",
            Transition::Ka2 => "Kα2",
            Transition::Kb1 => "Kβ1",
            Transition::Kb2 => "Kβ2",
            Transition::Kb3 => "Kβ3",
            Transition::Kb4 => "Kβ4",
            Transition::Kb5 => "Kβ5",
            Transition::La1 => "Lα1",
            Transition::La2 => "Lα2",
            Transition::Lb1 => "Lβ1",
            Transition::Lb2 => "Lβ2",
            Transition::Lb3 => "Lβ3",
            Transition::Lb4 => "Lβ4",
            Transition::Lg1 => "Lγ1",
            Transition::Lg2 => "Lγ2",
            Transition::Lg3 => "Lγ3",
            Transition::Ll => "Lℓ",
            Transition::Ln => "Lη",
            Transition::Ma1 => "Mα1",
            Transition::Ma2 => "Mα2",
            Transition::Mb => "Mβ",
            Transition::Mg => "Mγ",
            Transition::Mz1 => "Mζ1",
            Transition::Mz2 => "Mζ2",
            Transition::N4N6 => "N4-N6",
            Transition::N5N67 => "N5-N6,7",
        }
    }

    /// IUPAC 记号 (终态壳层-初态壳层)
    pub fn iupac(&self) -> &'static str {
        match self {
            Transition::Ka1 => "K-L3",
            Transition::Ka2 => "K-L2",
            Transition::Kb1 => "K-M3",
            Transition::Kb2 => "K-N3",
            Transition::Kb3 => "K-M2",
            Transition::Kb4 => "K-N5",
            Transition::Kb5 => "K-M5",
            Transition::La1 => "L3-M5",
            Transition::La2 => "L3-M4",
            Transition::Lb1 => "L2-M4",
            Transition::Lb2 => "L3-N5",
            Transition::Lb3 => "L1-M3",
            Transition::Lb4 => "L1-M2",
            Transition::Lg1 => "L2-N4",
            Transition::Lg2 => "L1-N2",
            Transition::Lg3 => "L1-N3",
            Transition::Ll => "L3-M1",
            Transition::Ln => "L2-M1",
            Transition::Ma1 => "M5-N7",
            Transition::Ma2 => "M5-N6",
            Transition::Mb => "M4-N6",
            Transition::Mg => "M3-N5",
            Transition::Mz1 => "M5-N3",
            Transition::Mz2 => "M4-N2",
            Transition::N4N6 => "N4-N6",
            Transition::N5N67 => "N5-N6,7",
        }
    }

    /// 谱线存在的最小原子序数（参考阈值）
    pub fn min_z(&self) -> u8 {
        match self {
            Transition::Ka1 | Transition::Ka2 => 3,
            Transition::Kb1 | Transition::Kb3 => 12,
            Transition::Kb5 => 22,
            Transition::Kb2 => 29,
            Transition::Kb4 => 37,
            Transition::La1
            | Transition::La2
            | Transition::Lb1
            | Transition::Lb3
            | Transition::Lb4
            | Transition::Ll
            | Transition::Ln => 21,
            Transition::Lb2 | Transition::Lg1 | Transition::Lg2 | Transition::Lg3 => 39,
            Transition::Mz1 | Transition::Mz2 => 40,
            Transition::Ma1 | Transition::Ma2 | Transition::Mb => 57,
            Transition::Mg => 60,
            Transition::N4N6 | Transition::N5N67 => 71,
        }
    }

    /// 该跃迁对元素 Z 是否物理存在
    pub fn exists(&self, z: u8) -> bool {
        z >= self.min_z() && z <= element::MAX_Z
    }

    /// 由 ASCII Siegbahn 记号解析
    pub fn from_siegbahn(notation: &str) -> Option<Transition> {
        Transition::ALL
            .iter()
            .copied()
            .find(|t| t.siegbahn() == notation)
    }
}

/// 跃迁组：线系 (K, L, M, N) 与组合线 (Ka, La, Ll+n, Ma, Mz)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TransitionGroup {
    K,
    L,
    M,
    N,
    Ka,
    La,
    Lln,
    Ma,
    Mz,
}

impl TransitionGroup {
    /// 结果构建时合成的固定组列表
    pub const ALL: [TransitionGroup; 9] = [
        TransitionGroup::K,
        TransitionGroup::L,
        TransitionGroup::M,
        TransitionGroup::N,
        TransitionGroup::Ka,
        TransitionGroup::La,
        TransitionGroup::Lln,
        TransitionGroup::Ma,
        TransitionGroup::Mz,
    ];

    pub fn notation(&self) -> &'static str {
        match self {
            TransitionGroup::K => "K",
            TransitionGroup::L => "L",
            TransitionGroup::M => "M",
            TransitionGroup::N => "N",
            TransitionGroup::Ka => "Ka",
            TransitionGroup::La => "La",
            TransitionGroup::Lln => "Ll,n",
            TransitionGroup::Ma => "Ma",
            TransitionGroup::Mz => "Mz",
        }
    }

    pub fn notation_unicode(&self) -> &'static str {
        match self {
            TransitionGroup::Ka => "Kα",
            TransitionGroup::La => "Lα",
            TransitionGroup::Lln => "Lℓ,η",
            TransitionGroup::Ma => "Mα",
            TransitionGroup::Mz => "Mζ",
            other => other.notation(),
        }
    }

    /// 该组包含的具体跃迁
    pub fn members(&self) -> Vec<Transition> {
        match self {
            TransitionGroup::K => Transition::ALL
                .iter()
                .copied()
                .filter(|t| t.siegbahn().starts_with('K'))
                .collect(),
            TransitionGroup::L => Transition::ALL
                .iter()
                .copied()
                .filter(|t| t.siegbahn().starts_with('L'))
                .collect(),
            TransitionGroup::M => Transition::ALL
                .iter()
                .copied()
                .filter(|t| t.siegbahn().starts_with('M'))
                .collect(),
            TransitionGroup::N => vec![Transition::N4N6, Transition::N5N67],
            TransitionGroup::Ka => vec![Transition::Ka1, Transition::Ka2],
            TransitionGroup::La => vec![Transition::La1, Transition::La2],
            TransitionGroup::Lln => vec![Transition::Ll, Transition::Ln],
            TransitionGroup::Ma => vec![Transition::Ma1, Transition::Ma2],
            TransitionGroup::Mz => vec![Transition::Mz1, Transition::Mz2],
        }
    }

    /// 组内任一成员对元素 Z 存在，该组即可解析
    pub fn exists(&self, z: u8) -> bool {
        self.members().iter().any(|t| t.exists(z))
    }

    /// 由 ASCII 记号解析
    pub fn from_notation(notation: &str) -> Option<TransitionGroup> {
        TransitionGroup::ALL
            .iter()
            .copied()
            .find(|g| g.notation() == notation)
    }
}

/// 谱线键的跃迁部分：单一跃迁或跃迁组
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum XrayTransition {
    Single(Transition),
    Group(TransitionGroup),
}

/// 谱线标识键：元素 + 跃迁（或跃迁组）。
/// 序列化为 ASCII 记号字符串（如 "Ca Ka1"），便于做 JSON 映射键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct XrayLine {
    pub z: u8,
    pub transition: XrayTransition,
}

impl XrayLine {
    pub fn single(z: u8, transition: Transition) -> Self {
        XrayLine {
            z,
            transition: XrayTransition::Single(transition),
        }
    }

    pub fn group(z: u8, group: TransitionGroup) -> Self {
        XrayLine {
            z,
            transition: XrayTransition::Group(group),
        }
    }

    pub fn atomic_number(&self) -> u8 {
        self.z
    }

    /// ASCII Siegbahn 渲染，如 "Ca Ka1"、"Ca Ka"
    pub fn notation(&self) -> String {
        let symbol = element::symbol(self.z).unwrap_or("?");
        match self.transition {
            XrayTransition::Single(t) => format!("{} {}", symbol, t.siegbahn()),
            XrayTransition::Group(g) => format!("{} {}", symbol, g.notation()),
        }
    }

    /// Unicode Siegbahn 渲染，如 "Ca Kα1"
    pub fn notation_unicode(&self) -> String {
        let symbol = element::symbol(self.z).unwrap_or("?");
        match self.transition {
            XrayTransition::Single(t) => format!("{} {}", symbol, t.siegbahn_unicode()),
            XrayTransition::Group(g) => format!("{} {}", symbol, g.notation_unicode()),
        }
    }

    /// IUPAC 渲染，如 "Ca K-L3"；组合线无 IUPAC 名，回退 Siegbahn
    pub fn notation_iupac(&self) -> String {
        let symbol = element::symbol(self.z).unwrap_or("?");
        match self.transition {
            XrayTransition::Single(t) => format!("{} {}", symbol, t.iupac()),
            XrayTransition::Group(g) => format!("{} {}", symbol, g.notation()),
        }
    }
}

impl fmt::Display for XrayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

impl FromStr for XrayLine {
    type Err = EpmakitError;

    /// 解析 "Ca Ka1" / "Ca Ka" 形式的 ASCII 记号
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parts = text.split_whitespace();
        let (symbol, notation) = match (parts.next(), parts.next(), parts.next()) {
            (Some(symbol), Some(notation), None) => (symbol, notation),
            _ => return Err(EpmakitError::UnknownXrayLine(text.to_string())),
        };

        let z = element::atomic_number(symbol)
            .map_err(|_| EpmakitError::UnknownXrayLine(text.to_string()))?;

        if let Some(transition) = Transition::from_siegbahn(notation) {
            return Ok(XrayLine::single(z, transition));
        }
        if let Some(group) = TransitionGroup::from_notation(notation) {
            return Ok(XrayLine::group(z, group));
        }

        Err(EpmakitError::UnknownXrayLine(text.to_string()))
    }
}

impl Serialize for XrayLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.notation())
    }
}

impl<'de> Deserialize<'de> for XrayLine {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_members() {
        let ka = TransitionGroup::Ka.members();
        assert_eq!(vec![Transition::Ka1, Transition::Ka2], ka);

        let k = TransitionGroup::K.members();
        assert_eq!(7, k.len());
        assert!(k.contains(&Transition::Kb1));

        let lln = TransitionGroup::Lln.members();
        assert_eq!(vec![Transition::Ll, Transition::Ln], lln);
    }

    #[test]
    fn test_existence_thresholds() {
        // 碳只有 K 线
        assert!(Transition::Ka1.exists(6));
        assert!(!Transition::La1.exists(6));
        assert!(!Transition::Ma1.exists(6));

        // 铜有 K 和 L 线，无 M 线
        assert!(Transition::Kb2.exists(29));
        assert!(Transition::La1.exists(29));
        assert!(!Transition::Ma1.exists(29));

        // 金都有
        assert!(Transition::Ma1.exists(79));
    }

    #[test]
    fn test_group_exists() {
        assert!(TransitionGroup::Ka.exists(20));
        assert!(!TransitionGroup::L.exists(6));
        assert!(TransitionGroup::Mz.exists(40));
        assert!(!TransitionGroup::Ma.exists(40));
    }

    #[test]
    fn test_xrayline_notation() {
        let line = XrayLine::single(20, Transition::Ka1);
        assert_eq!("Ca Ka1", line.notation());
        assert_eq!("Ca Kα1", line.notation_unicode());
        assert_eq!("Ca K-L3", line.notation_iupac());

        let group = XrayLine::group(20, TransitionGroup::Ka);
        assert_eq!("Ca Ka", group.notation());
    }

    #[test]
    fn test_xrayline_parse() {
        assert_eq!(
            XrayLine::single(20, Transition::Ka1),
            "Ca Ka1".parse().unwrap()
        );
        assert_eq!(
            XrayLine::group(20, TransitionGroup::Ka),
            "Ca Ka".parse().unwrap()
        );
        assert_eq!(
            XrayLine::single(92, Transition::N4N6),
            "U N4-N6".parse().unwrap()
        );

        assert!("Ca".parse::<XrayLine>().is_err());
        assert!("Xx Ka1".parse::<XrayLine>().is_err());
        assert!("Ca Qz9".parse::<XrayLine>().is_err());
    }

    #[test]
    fn test_xrayline_serde_as_string() {
        let line = XrayLine::group(20, TransitionGroup::Ka);
        let text = serde_json::to_string(&line).unwrap();

        assert_eq!("\"Ca Ka\"", text);
        assert_eq!(line, serde_json::from_str::<XrayLine>(&text).unwrap());
    }

    #[test]
    fn test_xrayline_ordering_is_stable() {
        let a = XrayLine::single(14, Transition::Ka1);
        let b = XrayLine::single(20, Transition::Ka1);
        let c = XrayLine::group(20, TransitionGroup::Ka);

        assert!(a < b);
        assert_ne!(b, c);
    }
}
