//! 文書テキスト抽出
//!
//! 拡張子で振り分ける:
//! - PDF: 全ページのテキストを連結
//! - Word: 段落ごとに改行を付けて連結
//! - 画像: Visionモデルにテキスト内容を説明させる

pub mod docx;
pub mod pdf;

use crate::analyzer::AiClient;
use crate::error::Result;
use crate::scanner::{DocumentInfo, DocumentKind};
use legal_ai_common::IMAGE_TEXT_PROMPT;

pub async fn extract_text(document: &DocumentInfo, client: &AiClient) -> Result<String> {
    match document.kind {
        DocumentKind::Pdf => {
            let data = std::fs::read(&document.path)?;
            pdf::extract_pdf_text(&data)
        }
        DocumentKind::Word => {
            let data = std::fs::read(&document.path)?;
            docx::extract_docx_text(&data)
        }
        DocumentKind::Image => {
            client
                .generate_with_image(IMAGE_TEXT_PROMPT, &document.path)
                .await
        }
    }
}
