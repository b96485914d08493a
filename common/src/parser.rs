//! APIレスポンスパーサー
//!
//! 番号付き見出し（`\n1. ` など）でレスポンスを分割し、13セクションに揃える。
//! 文書種別の整形と、日付サマリからの日付抽出もここで行う。

use crate::prompts::SECTION_COUNT;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SECTION_HEADER: Regex = Regex::new(r"\n\d+\.\s").expect("valid section regex");
    static ref DOCUMENT_TYPE_LABEL: Regex =
        Regex::new(r"(?i)type\s+of\s+document:?\s*").expect("valid label regex");
    static ref DATE_TOKEN: Regex =
        Regex::new(r"\b\d{1,2}[-/]\d{1,2}[-/]\d{4}\b").expect("valid date regex");
}

/// 解析レスポンスをセクションに分割
///
/// 先頭（最初の見出しより前）が要約。各セクションは前後の空白を除去し、
/// 不足分は空文字で埋めて必ず13要素にする。
///
/// # Examples
/// ```
/// use legal_ai_common::parse_analysis;
///
/// let sections = parse_analysis("Short summary\n1. Lease Agreement\n5. Two years");
/// assert_eq!(sections[0], "Short summary");
/// assert_eq!(sections[1], "Lease Agreement");
/// assert_eq!(sections[2], "Two years");
/// assert_eq!(sections.len(), 13);
/// ```
pub fn parse_analysis(analysis: &str) -> Vec<String> {
    let mut parsed: Vec<String> = SECTION_HEADER
        .split(analysis)
        .map(|section| section.trim().to_string())
        .collect();

    parsed.resize(SECTION_COUNT, String::new());
    parsed
}

/// 文書種別から "Type of document:" などのラベルを取り除く
pub fn clean_document_type(doc_type: &str) -> String {
    DOCUMENT_TYPE_LABEL
        .replace_all(doc_type, "")
        .trim()
        .to_string()
}

/// 日付サマリから最初の日付を取り出す
///
/// `DD/MM/YYYY` → `DD-MM-YYYY` の順に解釈し、どちらでもなければ None。
pub fn extract_date(date_summary: &str) -> Option<NaiveDate> {
    let token = DATE_TOKEN.find(date_summary)?.as_str();

    NaiveDate::parse_from_str(token, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(token, "%d-%m-%Y"))
        .ok()
}
