use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::sticker::{StickerConfig, StickerPerformanceProfile};

/// 工作目录下可选的设置文件名。
pub const SETTINGS_FILE: &str = "stickers.json";

fn default_input_dir() -> String {
    "input".to_string()
}

fn default_temp_dir() -> String {
    "temp".to_string()
}

fn default_profile() -> String {
    StickerPerformanceProfile::Balanced.as_str().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerSettings {
    #[serde(default = "default_input_dir")]
    pub input_dir: String,
    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,
    #[serde(default = "default_profile")]
    pub profile: String,
}

impl Default for StickerSettings {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            temp_dir: default_temp_dir(),
            profile: default_profile(),
        }
    }
}

impl StickerSettings {
    pub fn input_dir(&self) -> PathBuf {
        PathBuf::from(&self.input_dir)
    }

    pub fn temp_dir(&self) -> PathBuf {
        PathBuf::from(&self.temp_dir)
    }

    pub fn to_config(&self) -> Result<StickerConfig, AppError> {
        let profile = StickerPerformanceProfile::from_str(&self.profile)?;
        Ok(StickerConfig::with_profile(profile))
    }
}

/// 读取设置文件；文件不存在时返回默认设置。
pub fn load_settings_from_path(settings_path: &Path) -> Result<StickerSettings, AppError> {
    if !settings_path.exists() {
        return Ok(StickerSettings::default());
    }

    let content = fs::read_to_string(settings_path)
        .map_err(|e| AppError::Settings(format!("读取设置文件失败: {}", e)))?;
    let settings = serde_json::from_str::<StickerSettings>(&content)
        .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))?;

    log::info!("⚙️ 已加载设置文件 {}", settings_path.display());
    Ok(settings)
}

pub fn load_settings() -> Result<StickerSettings, AppError> {
    load_settings_from_path(Path::new(SETTINGS_FILE))
}
