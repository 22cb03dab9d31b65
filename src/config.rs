use crate::error::{ChecklistError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_RAW_SHEET: &str = "Teams";
pub const DEFAULT_CLEAN_SHEET: &str = "Teams_clean";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 生データのシート名
    pub raw_sheet: String,
    /// 整形済みデータのシート名
    pub clean_sheet: String,
    pub default_folder: Option<PathBuf>,
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            raw_sheet: DEFAULT_RAW_SHEET.into(),
            clean_sheet: DEFAULT_CLEAN_SHEET.into(),
            default_folder: None,
            parallel: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ChecklistError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("checklist-scorer").join("config.json"))
    }

    pub fn set_default_folder(&mut self, folder: PathBuf) -> Result<()> {
        self.default_folder = Some(folder);
        self.save()
    }

    /// フォルダ指定がなければ既定フォルダ
    pub fn resolve_folder(&self, folder: Option<PathBuf>) -> Result<PathBuf> {
        folder
            .or_else(|| self.default_folder.clone())
            .ok_or_else(|| {
                ChecklistError::Config(
                    "フォルダが指定されていません。`checklist-scorer config --set-folder PATH` で設定してください".into(),
                )
            })
    }
}
