//! ローカルAI CLI連携（claude / codex / gemini）
//!
//! `<cmd> -p <prompt>` で呼び出し、標準出力をレスポンスとして扱う。
//! 画像はファイルパスをプロンプトに含めてCLI側に読ませる。

use crate::error::{LegalAiError, Result};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

pub struct CliClient {
    command: String,
    timeout: Duration,
}

impl CliClient {
    pub fn new(command: impl Into<String>, timeout_seconds: u64) -> Self {
        Self {
            command: command.into(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!("[{}] プロンプト長: {} chars", self.command, prompt.len());
        let response = self.run(prompt).await?;
        tracing::debug!("[{}] レスポンス長: {} chars", self.command, response.len());
        Ok(response)
    }

    pub async fn generate_with_image(&self, prompt: &str, image_path: &Path) -> Result<String> {
        let abs_path = std::fs::canonicalize(image_path)?;
        let full_prompt = image_prompt(prompt, &abs_path);
        self.generate(&full_prompt).await
    }

    async fn run(&self, prompt: &str) -> Result<String> {
        // Windowsではcmd /c経由
        #[cfg(windows)]
        let mut command = {
            let mut c = Command::new("cmd");
            c.args(["/c", self.command.as_str(), "-p", prompt]);
            c
        };

        #[cfg(not(windows))]
        let mut command = {
            let mut c = Command::new(&self.command);
            c.args(["-p", prompt]);
            c
        };

        command.kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                LegalAiError::CliExecution(format!(
                    "{} CLIがタイムアウトしました（{}秒）",
                    self.command,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| LegalAiError::CliExecution(format!("{} CLI実行エラー: {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LegalAiError::ApiCall(format!(
                "{} CLI failed (code {:?}): {}",
                self.command,
                output.status.code(),
                stderr.trim()
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();
        if response.trim().is_empty() {
            return Err(LegalAiError::ApiParse(format!("{} CLIの出力が空です", self.command)));
        }

        Ok(response)
    }
}

fn image_prompt(prompt: &str, image_path: &Path) -> String {
    format!(
        "Read the following image file: {}\n\n{}",
        image_path.display().to_string().replace('\\', "/"),
        prompt
    )
}
