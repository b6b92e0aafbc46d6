use crate::config::types::{Config, Settings};
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

impl Config {
    /// 從工作目錄的 `settings.json` 載入；檔案損壞時退回預設值
    pub fn new() -> Result<Self> {
        let settings_path = PathBuf::from(DEFAULT_SETTINGS_FILE);
        let settings = Self::load_settings(&settings_path).unwrap_or_else(|e| {
            warn!("設定檔讀取失敗，改用預設值: {e:#}");
            Settings::default()
        });

        Ok(Self {
            settings,
            settings_path,
        })
    }

    /// 使用者明確指定的設定檔必須存在且可解析
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("設定檔不存在: {}", path.display());
        }
        let settings = Self::load_settings(path)?;

        Ok(Self {
            settings,
            settings_path: path.to_path_buf(),
        })
    }

    fn load_settings(path: &Path) -> Result<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;
        debug!("已載入設定檔: {}", path.display());

        Ok(settings)
    }
}
