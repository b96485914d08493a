//! Gemini API連携
//!
//! - テキスト生成（契約書解析）
//! - Vision（画像からのテキスト抽出、画像はbase64でインライン送信）

use crate::error::{LegalAiError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// Gemini APIレスポンス
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    vision_model: String,
    max_image_size: u32,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        vision_model: String,
        max_image_size: u32,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| LegalAiError::ApiCall(format!("HTTPクライアント生成エラー: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            model,
            vision_model,
            max_image_size,
        })
    }

    /// テキストのみのプロンプトで生成
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let parts = vec![Part::Text { text: prompt.to_string() }];
        self.call(&self.model, parts).await
    }

    /// 画像 + プロンプトで生成
    pub async fn generate_with_image(&self, prompt: &str, image_path: &Path) -> Result<String> {
        let data = encode_image(image_path, self.max_image_size)?;
        let parts = vec![
            Part::Text { text: prompt.to_string() },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: "image/jpeg".into(),
                    data,
                },
            },
        ];
        self.call(&self.vision_model, parts).await
    }

    async fn call(&self, model: &str, parts: Vec<Part>) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig { temperature: 0.2 },
        };

        let url = format!("{}/{}:generateContent?key={}", GEMINI_API_BASE, model, self.api_key);
        tracing::debug!("Gemini API呼び出し: model={}", model);

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LegalAiError::ApiCall(format!("Gemini API送信エラー: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LegalAiError::ApiCall(format!(
                "Gemini API failed (status {}): {}",
                status,
                body.trim()
            )));
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LegalAiError::ApiParse(format!("Gemini APIレスポンス: {}", e)))?;

        response_text(payload)
    }
}

/// 候補1件目のテキストを連結して返す
fn response_text(payload: GeminiResponse) -> Result<String> {
    let candidate = payload
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LegalAiError::ApiParse("候補が空です".into()))?;

    let text: String = candidate
        .content
        .parts
        .into_iter()
        .map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        return Err(LegalAiError::ApiParse("レスポンスにテキストがありません".into()));
    }
    Ok(text)
}

/// 画像を長辺 `max_size` 以下に縮小し、JPEGのbase64文字列にする
pub fn encode_image(path: &Path, max_size: u32) -> Result<String> {
    let img = image::open(path)
        .map_err(|e| LegalAiError::Extraction(format!("画像読み込みエラー {}: {}", path.display(), e)))?;

    let img = if img.width() > max_size || img.height() > max_size {
        img.resize(max_size, max_size, FilterType::Triangle)
    } else {
        img
    };

    // JPEGはアルファ非対応
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageFormat::Jpeg)
        .map_err(|e| LegalAiError::Extraction(format!("画像エンコードエラー: {}", e)))?;

    Ok(STANDARD.encode(buffer.into_inner()))
}
