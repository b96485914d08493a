//! 解析結果の型定義
//!
//! - DocumentAnalysis: AIレスポンスの13セクション
//! - DocumentReport: 1文書分の最終出力（セクション + リスク判定）
//! - CumulativeEntry: 累積一覧の1行

use crate::parser::{clean_document_type, extract_date, parse_analysis};
use crate::risk::{RiskLevel, RiskyClause};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// AI解析の構造化結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentAnalysis {
    pub summary: String,
    pub document_type: String,
    pub next_action_items: String,
    pub breach_conditions: String,
    pub obligations_summary: String,
    pub term: String,
    pub termination_rights: String,
    pub termination_consequences: String,
    pub personal_info_captured: String,
    pub document_category: String,
    pub listed_company_info: String,
    pub date_wise_summary: String,
    pub risky_clauses: String,
}

impl DocumentAnalysis {
    /// セクション配列（0〜12の順）から構築。不足分は空文字
    pub fn from_sections(sections: &[String]) -> Self {
        let mut it = sections.iter().cloned();
        let mut next = || it.next().unwrap_or_default();

        Self {
            summary: next(),
            document_type: next(),
            next_action_items: next(),
            breach_conditions: next(),
            obligations_summary: next(),
            term: next(),
            termination_rights: next(),
            termination_consequences: next(),
            personal_info_captured: next(),
            document_category: next(),
            listed_company_info: next(),
            date_wise_summary: next(),
            risky_clauses: next(),
        }
    }

    /// AIレスポンス文字列から構築
    pub fn from_response(response: &str) -> Self {
        Self::from_sections(&parse_analysis(response))
    }

    /// ラベルを除去した文書種別
    pub fn cleaned_document_type(&self) -> String {
        clean_document_type(&self.document_type)
    }

    /// 日付サマリから取り出した締結日
    pub fn execution_date(&self) -> Option<NaiveDate> {
        extract_date(&self.date_wise_summary)
    }
}

/// 文書1件分の解析レポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    pub file_name: String,
    pub file_path: String,
    #[serde(default)]
    pub analysis: DocumentAnalysis,
    #[serde(default)]
    pub highlighted_clauses: Vec<RiskyClause>,
    pub overall_risk: RiskLevel,
}

/// 累積一覧の1行（解析実行ごとに追記）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeEntry {
    pub test_number: u32,
    pub file_name: String,
    pub file_path: String,
    pub overall_risk: RiskLevel,
}

impl CumulativeEntry {
    pub fn from_report(test_number: u32, report: &DocumentReport) -> Self {
        Self {
            test_number,
            file_name: report.file_name.clone(),
            file_path: report.file_path.clone(),
            overall_risk: report.overall_risk,
        }
    }
}
