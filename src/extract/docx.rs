//! Wordテキスト抽出
//!
//! 本文直下の段落を順に取り出し、各段落の末尾に改行を付けて連結する。
//! 旧形式の .doc（zipでないバイナリ）は読めないためエラー。

use crate::error::{LegalAiError, Result};
use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild};

pub fn extract_docx_text(data: &[u8]) -> Result<String> {
    if !looks_like_docx(data) {
        return Err(LegalAiError::Extraction(
            "Word文書（.docx形式）ではありません。.docx で保存し直してください".into(),
        ));
    }

    let package = read_docx(data)
        .map_err(|e| LegalAiError::Extraction(format!("Word文書を読み込めません: {}", e)))?;

    let mut text = String::new();
    for child in &package.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            append_paragraph_text(paragraph, &mut text);
            text.push('\n');
        }
    }

    Ok(text)
}

fn looks_like_docx(data: &[u8]) -> bool {
    data.len() > 4 && data.starts_with(b"PK")
}

fn append_paragraph_text(paragraph: &Paragraph, buffer: &mut String) {
    for child in &paragraph.children {
        append_paragraph_child_text(child, buffer);
    }
}

fn append_paragraph_child_text(child: &ParagraphChild, buffer: &mut String) {
    match child {
        ParagraphChild::Run(run) => append_run_text(run, buffer),
        ParagraphChild::Hyperlink(hyperlink) => {
            for inner in &hyperlink.children {
                append_paragraph_child_text(inner, buffer);
            }
        }
        _ => {}
    }
}

fn append_run_text(run: &Run, buffer: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => buffer.push_str(&text.text),
            RunChild::Tab(_) => buffer.push('\t'),
            RunChild::Break(_) => buffer.push('\n'),
            _ => {}
        }
    }
}
