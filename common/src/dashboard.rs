//! ダッシュボード集計
//!
//! 解析レポートの一覧から、グラフ・表に使う集計値を作る。
//! 描画はしない（CLIやWeb側の責務）。

use crate::risk::{RiskLevel, RiskyClause};
use crate::types::DocumentReport;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// 締結日タイムラインの1点
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub file_name: String,
    pub date: NaiveDate,
    pub document_type: String,
    pub overall_risk: RiskLevel,
}

/// 主要指標
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub total_documents: usize,
    pub document_classifications: usize,
    pub documents_with_dates: usize,
    pub high_risk_documents: usize,
}

/// ダッシュボード全体
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// 文書種別ごとの件数（件数の多い順）
    pub document_type_counts: Vec<(String, usize)>,
    /// リスクレベルごとの件数（件数の多い順）
    pub risk_counts: Vec<(RiskLevel, usize)>,
    pub timeline: Vec<TimelinePoint>,
    pub metrics: KeyMetrics,
    pub risky_clauses: Vec<RiskyClause>,
}

/// 出現数を数える（件数降順、同数は初出順）
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut order: Vec<T> = Vec::new();
    let mut counts: HashMap<T, usize> = HashMap::new();

    for value in values {
        let count = counts.entry(value.clone()).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut result: Vec<(T, usize)> = order
        .into_iter()
        .map(|v| {
            let c = counts[&v];
            (v, c)
        })
        .collect();
    // stable sort なので同数は初出順のまま
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

/// レポート一覧からダッシュボードを作る
pub fn build_dashboard(reports: &[DocumentReport]) -> DashboardSummary {
    let doc_types: Vec<String> = reports
        .iter()
        .map(|r| r.analysis.cleaned_document_type())
        .collect();

    let document_type_counts = value_counts(doc_types.iter().cloned());
    let risk_counts = value_counts(reports.iter().map(|r| r.overall_risk));

    let timeline: Vec<TimelinePoint> = reports
        .iter()
        .zip(&doc_types)
        .filter_map(|(report, doc_type)| {
            report.analysis.execution_date().map(|date| TimelinePoint {
                file_name: report.file_name.clone(),
                date,
                document_type: doc_type.clone(),
                overall_risk: report.overall_risk,
            })
        })
        .collect();

    let metrics = KeyMetrics {
        total_documents: reports.len(),
        document_classifications: document_type_counts.len(),
        documents_with_dates: timeline.len(),
        high_risk_documents: reports
            .iter()
            .filter(|r| r.overall_risk == RiskLevel::High)
            .count(),
    };

    let risky_clauses = reports
        .iter()
        .flat_map(|r| r.highlighted_clauses.iter().cloned())
        .collect();

    DashboardSummary {
        document_type_counts,
        risk_counts,
        timeline,
        metrics,
        risky_clauses,
    }
}
