//! キーワードによるリスク分類
//!
//! 固定のキーワード表を High → Medium → Low の順に調べ、
//! 最初にキーワードを含んだレベルを採用する。

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// リスクレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    #[serde(rename = "No Risk")]
    NoRisk,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
            RiskLevel::NoRisk => "No Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// レベルごとのキーワード（判定順）
pub const RISK_KEYWORDS: &[(RiskLevel, &[&str])] = &[
    (
        RiskLevel::High,
        &["breach", "termination", "litigation", "penalty", "liability", "damages"],
    ),
    (
        RiskLevel::Medium,
        &["dispute", "delay", "modification", "confidentiality", "intellectual property"],
    ),
    (
        RiskLevel::Low,
        &["notice", "amendment", "assignment", "waiver"],
    ),
];

lazy_static! {
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]\s+").expect("valid sentence regex");
}

/// テキストのリスクレベルを判定する
pub fn categorize_risk(text: &str) -> RiskLevel {
    let lower = text.to_lowercase();
    RISK_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(level, _)| *level)
        .unwrap_or(RiskLevel::NoRisk)
}

/// 文に分割する
///
/// `.` `!` `?` の直後に空白が続く位置で区切る。句読点は前の文に残し、空白は捨てる。
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(text) {
        // 句読点は1バイト
        sentences.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&text[start..]);

    sentences
}

/// リスクのある条項
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskyClause {
    pub clause: String,
    pub level: RiskLevel,
}

/// リスクのある文を抽出する（文書内の順序）
pub fn highlight_risky_clauses(text: &str) -> Vec<RiskyClause> {
    split_sentences(text)
        .into_iter()
        .filter_map(|sentence| match categorize_risk(sentence) {
            RiskLevel::NoRisk => None,
            level => Some(RiskyClause {
                clause: sentence.to_string(),
                level,
            }),
        })
        .collect()
}
