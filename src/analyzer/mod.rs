mod ai_cli;
pub mod cache;
mod client;
mod gemini;

pub use cache::CacheFile;
pub use client::AiClient;

use crate::error::Result;
use crate::extract;
use crate::scanner::DocumentInfo;
use indicatif::{ProgressBar, ProgressStyle};
use legal_ai_common::{
    build_analysis_prompt, categorize_risk, highlight_risky_clauses, DocumentAnalysis,
    DocumentReport,
};
use std::path::Path;

/// 解析オプション
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// 解析する最大件数（0は無制限）
    pub max_files: usize,
    /// プロンプトに含める本文の上限文字数
    pub max_document_chars: usize,
}

/// 本文をAIで解析し、13セクションに分解する
pub async fn analyze_text(client: &AiClient, text: &str, max_chars: usize) -> Result<DocumentAnalysis> {
    let prompt = build_analysis_prompt(text, max_chars);
    let response = client.generate(&prompt).await?;
    Ok(DocumentAnalysis::from_response(&response))
}

/// 解析結果と本文からレポートを作る（リスク判定は本文全体に対して行う）
pub fn build_report(document: &DocumentInfo, text: &str, analysis: DocumentAnalysis) -> DocumentReport {
    DocumentReport {
        file_name: document.file_name.clone(),
        file_path: document.path.display().to_string(),
        analysis,
        highlighted_clauses: highlight_risky_clauses(text),
        overall_risk: categorize_risk(text),
    }
}

/// 文書を順に解析する
///
/// - テキスト抽出に失敗した文書、本文が空の文書はスキップ
/// - `max_files` 件のレポートができた時点で終了
/// - `cache_folder` を指定するとキャッシュを使う
pub async fn process_documents(
    documents: &[DocumentInfo],
    client: &AiClient,
    options: &AnalyzeOptions,
    cache_folder: Option<&Path>,
) -> Result<Vec<DocumentReport>> {
    let mut cache_file = cache_folder.map(CacheFile::load);
    let mut reports = Vec::new();

    let progress = ProgressBar::new(documents.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("  {spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for document in documents {
        if options.max_files > 0 && reports.len() >= options.max_files {
            break;
        }
        progress.set_message(document.file_name.clone());

        let hash = match &cache_file {
            Some(_) => cache::compute_file_hash(&document.path).ok(),
            None => None,
        };

        if let (Some(cached), Some(hash)) = (&cache_file, &hash) {
            if let Some(report) = cached.get(hash) {
                tracing::debug!("キャッシュヒット: {}", document.file_name);
                // 同一内容の別ファイルもあるので名前・パスは今の文書で上書き
                let mut report = report.clone();
                report.file_name = document.file_name.clone();
                report.file_path = document.path.display().to_string();
                reports.push(report);
                progress.inc(1);
                continue;
            }
        }

        let text = match extract::extract_text(document, client).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("{}: {}", document.file_name, e);
                progress.inc(1);
                continue;
            }
        };

        if text.trim().is_empty() {
            tracing::debug!("本文が空のためスキップ: {}", document.file_name);
            progress.inc(1);
            continue;
        }

        let analysis = match analyze_text(client, &text, options.max_document_chars).await {
            Ok(analysis) => analysis,
            Err(e) => {
                // 途中までの解析結果は失わない
                progress.finish_and_clear();
                if let Err(save_err) = save_cache(cache_file.as_ref(), cache_folder) {
                    tracing::warn!("キャッシュを保存できません: {}", save_err);
                }
                return Err(e);
            }
        };
        let report = build_report(document, &text, analysis);

        if let (Some(cached), Some(hash)) = (cache_file.as_mut(), hash) {
            let file_size = std::fs::metadata(&document.path).map(|m| m.len()).unwrap_or(0);
            cached.insert(hash, document.file_name.clone(), file_size, report.clone());
        }

        reports.push(report);
        progress.inc(1);
    }

    progress.finish_and_clear();
    save_cache(cache_file.as_ref(), cache_folder)?;

    Ok(reports)
}

fn save_cache(cache_file: Option<&CacheFile>, folder: Option<&Path>) -> Result<()> {
    match (cache_file, folder) {
        (Some(cached), Some(folder)) => cached.save(folder),
        _ => Ok(()),
    }
}
