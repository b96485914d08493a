//! プロンプト生成モジュール
//!
//! - DOCUMENT_TYPES: 文書種別の定数
//! - ANALYSIS_SECTIONS: 解析レスポンスの番号付きセクション
//! - build_analysis_prompt: 契約書解析用プロンプト
//! - IMAGE_TEXT_PROMPT: 画像からのテキスト抽出用プロンプト

/// 文書種別（AIに選択させる候補）
pub const DOCUMENT_TYPES: &[&str] = &[
    "Asset Purchase Agreement",
    "Collaboration Agreement",
    "Confidentiality Agreement",
    "Copyright Assignment Agreement",
    "Copyright License Agreement",
    "Escrow Agreement",
    "Franchise Agreement",
    "Guarantee Deed",
    "Indemnification Agreement",
    "Joint Venture Agreement",
    "License Agreement",
    "Loan Agreement",
    "Loan Purchase Agreement",
    "Investment Agreement",
    "Share Purchase Agreement",
    "Non-Compete Agreement",
    "Non-Disclosure Agreement",
    "Partnership Agreement",
    "Pledge Agreement",
    "Real Estate Agreement to Sell",
    "Real Estate Purchase Agreement",
    "Lease Agreement",
    "Employment Agreement",
    "Shareholders' Agreement",
    "Services Agreement",
    "Manufacturing Agreement",
    "Tolling Agreement",
    "Slump Sale Agreement",
    "Patent Assignment Agreement",
    "Technology License Agreement",
];

/// 解析レスポンスのセクション数（0〜12）
pub const SECTION_COUNT: usize = 13;

/// プロンプトに含める本文の既定上限（文字数）
pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 15_000;

/// 画像からテキストを取り出すためのプロンプト
pub const IMAGE_TEXT_PROMPT: &str = "Describe the text content of this image";

/// 番号付きセクションの見出し（番号 = インデックス）
///
/// 1番の文書種別だけは DOCUMENT_TYPES の一覧を後ろに付ける。
pub const ANALYSIS_SECTIONS: [&str; SECTION_COUNT] = [
    "Summary of the document (2-3 sentences)",
    "Type of document (choose from the following list)",
    "Next action items",
    "What would constitute a breach",
    "Obligations summary",
    "Term",
    "Termination rights",
    "Consequences of termination",
    "Is personal information being captured? (Yes/No)",
    "Is it a constitutional document, operational document, or financial document?",
    "Does it pertain to a listed company? If yes, does it have any price sensitive information?",
    "Date-wise summary of key points",
    "Identify and list any clauses that might pose risks or require special attention",
];

/// 本文を先頭から `max_chars` 文字に切り詰める（文字境界で切る）
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// 契約書解析プロンプト生成
///
/// # Arguments
/// * `text` - 文書本文
/// * `max_chars` - 本文の上限文字数
///
/// # Returns
/// 番号付きセクションで回答させるプロンプト
pub fn build_analysis_prompt(text: &str, max_chars: usize) -> String {
    let sections = ANALYSIS_SECTIONS
        .iter()
        .enumerate()
        .map(|(idx, heading)| {
            if idx == 1 {
                format!("{}. {}: {}", idx, heading, DOCUMENT_TYPES.join(", "))
            } else {
                format!("{}. {}", idx, heading)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = truncate_chars(text, max_chars);

    format!(
        r#"Analyze the following legal document and provide a structured response:

{sections}

Here's the document text:

{body}

Provide your analysis in a structured format, using the numbers above as headers.
"#
    )
}
