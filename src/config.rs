use crate::error::{LegalAiError, Result};
use legal_ai_common::prompts::DEFAULT_MAX_DOCUMENT_CHARS;
use legal_ai_common::Threshold;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub vision_model: String,
    pub max_document_chars: usize,
    pub max_files: usize,
    pub match_threshold: Threshold,
    pub max_image_size: u32,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".into(),
            vision_model: "gemini-2.0-flash".into(),
            max_document_chars: DEFAULT_MAX_DOCUMENT_CHARS,
            max_files: 5,
            match_threshold: Threshold::default(),
            max_image_size: 1568,
            timeout_seconds: 120,
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

    /// 設定ディレクトリ（~/.config/legal-ai）
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LegalAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("legal-ai"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key.clone().ok_or(LegalAiError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// 範囲外の値は保存せずにエラー
    pub fn set_match_threshold(&mut self, value: f64) -> Result<()> {
        self.match_threshold = Threshold::new(value)?;
        self.save()
    }
}
