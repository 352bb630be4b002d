//! # 用户偏好设置
//!
//! 谱线记号（Siegbahn / IUPAC）与字符编码（ASCII / UTF-8）偏好，
//! 持久化为用户配置目录下的 JSON 文件。文件不存在时返回默认值，
//! 不报错。
//!
//! ## 依赖关系
//! - 被 `commands/report.rs` 使用
//! - 使用 `xray/transition.rs` 渲染谱线

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EpmakitError, Result};
use crate::xray::transition::XrayLine;

/// 设置文件名
const SETTINGS_FILENAME: &str = "settings.json";

/// 谱线记号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XrayNotation {
    Siegbahn,
    Iupac,
}

/// 记号字符编码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XrayEncoding {
    Ascii,
    Utf8,
}

/// 用户偏好
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub preferred_xray_notation: XrayNotation,
    pub preferred_xray_encoding: XrayEncoding,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            preferred_xray_notation: XrayNotation::Siegbahn,
            preferred_xray_encoding: XrayEncoding::Utf8,
        }
    }
}

impl Settings {
    /// 默认设置文件路径（用户配置目录）
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("epmakit").join(SETTINGS_FILENAME))
    }

    /// 从默认位置读取；文件缺失时返回默认值
    pub fn load() -> Settings {
        match Settings::default_path() {
            Some(path) => Settings::load_from(&path).unwrap_or_default(),
            None => Settings::default(),
        }
    }

    /// 从指定路径读取；文件缺失时返回默认值
    pub fn load_from(path: &Path) -> Result<Settings> {
        if !path.is_file() {
            return Ok(Settings::default());
        }

        let text = fs::read_to_string(path).map_err(|e| EpmakitError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// 写入指定路径，父目录自动创建
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| EpmakitError::FileWriteError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| EpmakitError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// 按偏好渲染谱线
    pub fn format_xrayline(&self, line: &XrayLine) -> String {
        match (self.preferred_xray_notation, self.preferred_xray_encoding) {
            (XrayNotation::Iupac, _) => line.notation_iupac(),
            (XrayNotation::Siegbahn, XrayEncoding::Ascii) => line.notation(),
            (XrayNotation::Siegbahn, XrayEncoding::Utf8) => line.notation_unicode(),
        }
    }
}
