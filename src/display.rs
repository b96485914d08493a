//! ターミナル表示（ダッシュボード・文書詳細・マッピング結果）

use legal_ai_common::{DashboardSummary, DocumentReport, MatchResult, MatchSummary};

const BAR_WIDTH: usize = 30;
const CLAUSE_PREVIEW_CHARS: usize = 100;

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH).div_ceil(max);
    "█".repeat(len)
}

/// 先頭 max_chars 文字まで（超えたら … を付ける）
fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "-"
    } else {
        text
    }
}

pub fn print_dashboard(summary: &DashboardSummary, test_number: Option<u32>) {
    match test_number {
        Some(n) => println!("📈 解析ダッシュボード - Test #{}\n", n),
        None => println!("📈 解析ダッシュボード\n"),
    }

    let m = &summary.metrics;
    println!("■ Key Metrics");
    println!("  Total Documents:          {}", m.total_documents);
    println!("  Document Classifications: {}", m.document_classifications);
    println!("  Documents with Dates:     {}", m.documents_with_dates);
    println!("  High Risk Documents:      {}", m.high_risk_documents);
    println!();

    println!("■ Document Classification");
    let max = summary.document_type_counts.first().map_or(0, |(_, c)| *c);
    for (doc_type, count) in &summary.document_type_counts {
        println!("  {:<40} {:>3} {}", preview(or_dash(doc_type), 40), count, bar(*count, max));
    }
    println!();

    println!("■ Overall Risk Distribution");
    let total = m.total_documents.max(1);
    for (level, count) in &summary.risk_counts {
        println!(
            "  {:<8} {:>3} ({:>5.1}%)",
            level.as_str(),
            count,
            *count as f64 * 100.0 / total as f64
        );
    }
    println!();

    println!("■ Document Execution Timeline");
    if summary.timeline.is_empty() {
        println!("  ⚠ No valid execution dates found in the documents.");
    } else {
        for point in &summary.timeline {
            println!(
                "  {}  {:<30} [{}] {}",
                point.date.format("%Y-%m-%d"),
                preview(or_dash(&point.document_type), 30),
                point.overall_risk,
                point.file_name
            );
        }
    }
    println!();

    println!("■ Top Risky Clauses");
    if summary.risky_clauses.is_empty() {
        println!("  No risky clauses identified.");
    } else {
        for clause in &summary.risky_clauses {
            println!("  [{:<6}] {}", clause.level.as_str(), preview(&clause.clause, CLAUSE_PREVIEW_CHARS));
        }
    }
    println!();
}

/// 文書ごとの詳細
pub fn print_report_details(reports: &[DocumentReport]) {
    for (idx, report) in reports.iter().enumerate() {
        let a = &report.analysis;
        println!(
            "📄 Document {}: {} - Risk Level: {}",
            idx + 1,
            report.file_name,
            report.overall_risk
        );
        println!("  File Path: {}", report.file_path);
        println!("  Summary: {}", or_dash(&a.summary));
        println!("  Document Type: {}", or_dash(&a.cleaned_document_type()));
        println!("  Term: {}", or_dash(&a.term));
        println!("  Personal Info Captured: {}", or_dash(&a.personal_info_captured));
        println!("  Document Category: {}", or_dash(&a.document_category));
        println!("  Listed Company Info: {}", or_dash(&a.listed_company_info));
        println!("  Next Action Items: {}", or_dash(&a.next_action_items));
        println!("  Breach Conditions: {}", or_dash(&a.breach_conditions));
        println!("  Obligations Summary: {}", or_dash(&a.obligations_summary));
        println!("  Termination Rights: {}", or_dash(&a.termination_rights));
        println!("  Termination Consequences: {}", or_dash(&a.termination_consequences));
        println!("  Date-wise Summary: {}", or_dash(&a.date_wise_summary));
        println!("  Risky Clauses: {}", or_dash(&a.risky_clauses));
        if !report.highlighted_clauses.is_empty() {
            println!("  Highlighted Risky Clauses:");
            for clause in &report.highlighted_clauses {
                println!("    - [{}] {}", clause.level, preview(&clause.clause, CLAUSE_PREVIEW_CHARS));
            }
        }
        println!();
    }
}

/// マッピング結果の先頭 limit 件
pub fn print_mapping_preview(results: &[MatchResult], limit: usize) {
    println!("  {:<40} {:<40} {:>6}", "source", "candidate", "score");
    for result in results.iter().take(limit) {
        println!(
            "  {:<40} {:<40} {:>6.3}",
            preview(&result.source, 40),
            preview(result.candidate.as_deref().unwrap_or("-"), 40),
            result.score
        );
    }
    if results.len() > limit {
        println!("  … 他 {}件", results.len() - limit);
    }
}

pub fn print_mapping_summary(summary: &MatchSummary) {
    println!("  件数: {}", summary.total);
    println!("  一致: {}", summary.matched);
    println!("  不一致: {}", summary.unmatched);
    if summary.matched > 0 {
        println!("  平均スコア（一致のみ）: {:.3}", summary.average_score);
    }
}
