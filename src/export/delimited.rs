//! CSV出力
//!
//! 列名は解析結果・累積一覧・マッピング結果それぞれ固定。

use crate::error::Result;
use legal_ai_common::{CumulativeEntry, DocumentReport, MatchResult};
use std::path::Path;

pub const REPORT_HEADERS: [&str; 17] = [
    "File Name",
    "File Path",
    "Summary",
    "Document Type",
    "Next Action Items",
    "Breach Conditions",
    "Obligations Summary",
    "Term",
    "Termination Rights",
    "Termination Consequences",
    "Personal Info Captured",
    "Document Category",
    "Listed Company Info",
    "Date-wise Summary",
    "Risky Clauses",
    "Highlighted Risky Clauses",
    "Overall Risk Level",
];

pub const MAPPING_HEADERS: [&str; 3] = [
    "source_description",
    "candidate_description",
    "similarity_score",
];

pub const CUMULATIVE_HEADERS: [&str; 4] = [
    "Test Number",
    "File Name",
    "File Path",
    "Overall Risk Level",
];

/// 強調条項を1セルにまとめる（"[High] ..." を " | " 区切り）
pub fn format_highlighted(report: &DocumentReport) -> String {
    report
        .highlighted_clauses
        .iter()
        .map(|c| format!("[{}] {}", c.level, c.clause))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// レポート1件を列順の値に並べる
pub fn report_row(report: &DocumentReport) -> [String; 17] {
    let a = &report.analysis;
    [
        report.file_name.clone(),
        report.file_path.clone(),
        a.summary.clone(),
        a.document_type.clone(),
        a.next_action_items.clone(),
        a.breach_conditions.clone(),
        a.obligations_summary.clone(),
        a.term.clone(),
        a.termination_rights.clone(),
        a.termination_consequences.clone(),
        a.personal_info_captured.clone(),
        a.document_category.clone(),
        a.listed_company_info.clone(),
        a.date_wise_summary.clone(),
        a.risky_clauses.clone(),
        format_highlighted(report),
        report.overall_risk.to_string(),
    ]
}

pub fn write_reports_csv(reports: &[DocumentReport], output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(REPORT_HEADERS)?;
    for report in reports {
        writer.write_record(report_row(report))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_mapping_csv(results: &[MatchResult], output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(MAPPING_HEADERS)?;
    for result in results {
        let score = result.score.to_string();
        writer.write_record([
            result.source.as_str(),
            result.candidate.as_deref().unwrap_or(""),
            score.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_cumulative_csv(entries: &[CumulativeEntry], output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(CUMULATIVE_HEADERS)?;
    for entry in entries {
        writer.write_record([
            entry.test_number.to_string(),
            entry.file_name.clone(),
            entry.file_path.clone(),
            entry.overall_risk.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
