//! AIクライアント（プロバイダごとの呼び出しをまとめる）

use super::ai_cli::CliClient;
use super::gemini::GeminiClient;
use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::Result;
use std::path::Path;

pub enum AiClient {
    Gemini(GeminiClient),
    Cli(CliClient),
}

impl AiClient {
    /// 設定とプロバイダからクライアントを作る
    ///
    /// Gemini APIの場合はAPIキーが必要（環境変数 GEMINI_API_KEY 優先）。
    pub fn from_config(provider: AiProvider, config: &Config) -> Result<Self> {
        match provider.command_name() {
            Some(command) => Ok(AiClient::Cli(CliClient::new(command, config.timeout_seconds))),
            None => {
                let client = GeminiClient::new(
                    config.get_api_key()?,
                    config.model.clone(),
                    config.vision_model.clone(),
                    config.max_image_size,
                    config.timeout_seconds,
                )?;
                Ok(AiClient::Gemini(client))
            }
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        match self {
            AiClient::Gemini(client) => client.generate(prompt).await,
            AiClient::Cli(client) => client.generate(prompt).await,
        }
    }

    pub async fn generate_with_image(&self, prompt: &str, image_path: &Path) -> Result<String> {
        match self {
            AiClient::Gemini(client) => client.generate_with_image(prompt, image_path).await,
            AiClient::Cli(client) => client.generate_with_image(prompt, image_path).await,
        }
    }
}
