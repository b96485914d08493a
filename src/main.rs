use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use legal_ai_common::{build_dashboard, summarize, DocumentReport, MatchOptions};
use legal_ai_rust::{analyzer, cli, config, display, error, export, mapping, scanner, session};
use session::SessionState;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const CUMULATIVE_FILE_STEM: &str = "cumulative_document_list";

/// スキャン → 解析（2ステップ分の表示を含む）
async fn analyze_folder(
    folder: &Path,
    cli: &Cli,
    config: &Config,
    max_files: Option<usize>,
    use_cache: bool,
    total_steps: usize,
) -> anyhow::Result<Vec<DocumentReport>> {
    println!("[1/{}] 文書をスキャン中...", total_steps);
    let documents = scanner::scan_folder(folder)?;
    println!("✔ {}件の文書を検出\n", documents.len());

    if documents.is_empty() {
        return Err(error::LegalAiError::NoDocumentsFound(folder.display().to_string()).into());
    }

    println!(
        "[2/{}] AI解析中... ({}){}",
        total_steps,
        cli.ai_provider,
        if use_cache { " (キャッシュ有効)" } else { "" }
    );
    let client = analyzer::AiClient::from_config(cli.ai_provider, config)?;
    let options = analyzer::AnalyzeOptions {
        max_files: max_files.unwrap_or(config.max_files),
        max_document_chars: config.max_document_chars,
    };
    let cache_folder = use_cache.then_some(folder);
    let reports = analyzer::process_documents(&documents, &client, &options, cache_folder)
        .await
        .context("文書の解析に失敗しました")?;
    println!("✔ {}件を解析\n", reports.len());

    if reports.is_empty() {
        return Err(error::LegalAiError::NoDocumentsFound(folder.display().to_string()).into());
    }

    Ok(reports)
}

/// 累積一覧に記録してテスト番号を返す
fn record_session(reports: &[DocumentReport]) -> anyhow::Result<u32> {
    let path = SessionState::default_path()?;
    let mut state = SessionState::load(&path)?;
    let test_number = state.record_run(reports).unwrap_or(state.test_counter);
    state.save(&path)?;
    tracing::debug!("セッション保存: {}", path.display());
    Ok(test_number)
}

fn print_written(paths: &[PathBuf]) {
    for path in paths {
        println!("✔ 出力: {}", path.display());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = Config::load().context("設定ファイルを読み込めません")?;

    match &cli.command {
        Commands::Analyze { folder, output, max_files, use_cache, details } => {
            println!("⚖ legal-ai - 文書解析\n");

            let reports = analyze_folder(folder, &cli, &config, *max_files, *use_cache, 3).await?;

            println!("[3/3] 結果を保存中...");
            let output = output.clone().unwrap_or_else(|| folder.join("analysis.json"));
            let json = serde_json::to_string_pretty(&reports)?;
            std::fs::write(&output, json)
                .with_context(|| format!("書き込みに失敗: {}", output.display()))?;
            println!("✔ 結果を保存: {}", output.display());

            let test_number = record_session(&reports)?;
            println!();
            display::print_dashboard(&build_dashboard(&reports), Some(test_number));
            if *details {
                display::print_report_details(&reports);
            }

            println!("✅ 解析完了 (Test #{})", test_number);
        }

        Commands::Export { input, format, output, test_number } => {
            println!("📄 legal-ai - エクスポート\n");

            let content = std::fs::read_to_string(input)
                .with_context(|| format!("読み込みに失敗: {}", input.display()))?;
            let reports: Vec<DocumentReport> = serde_json::from_str(&content)?;

            let output_dir = output.clone().unwrap_or_else(|| PathBuf::from("."));
            let written = export::export_reports(&reports, *format, &output_dir, *test_number)?;
            print_written(&written);

            println!("\n✅ エクスポート完了");
        }

        Commands::Run { folder, output, format, max_files, use_cache, details } => {
            println!("🚀 legal-ai - 一括処理\n");

            let reports = analyze_folder(folder, &cli, &config, *max_files, *use_cache, 4).await?;
            let test_number = record_session(&reports)?;

            println!("[3/4] ダッシュボード\n");
            display::print_dashboard(&build_dashboard(&reports), Some(test_number));
            if *details {
                display::print_report_details(&reports);
            }

            println!("[4/4] エクスポート中...");
            let output_dir = output.clone().unwrap_or_else(|| folder.clone());
            let written = export::export_reports(&reports, *format, &output_dir, test_number)?;
            print_written(&written);

            println!("\n✅ 完了 (Test #{})", test_number);
        }

        Commands::Map {
            source,
            candidate,
            source_column,
            candidate_column,
            threshold,
            keep_rejected_score,
            output,
            format,
            preview,
        } => {
            println!("🔗 legal-ai - 品目マッピング\n");

            let options = MatchOptions {
                threshold: threshold.unwrap_or(config.match_threshold),
                keep_rejected_score: *keep_rejected_score,
            };

            println!("[1/2] 照合中... (閾値 {})", options.threshold);
            let results = mapping::run_mapping(
                source,
                candidate,
                source_column.as_deref(),
                candidate_column.as_deref(),
                &options,
            )?;
            println!("✔ {}件を照合\n", results.len());

            display::print_mapping_preview(&results, *preview);
            println!();
            display::print_mapping_summary(&summarize(&results));
            println!();

            println!("[2/2] 結果を保存中...");
            let output_dir = output.clone().unwrap_or_else(|| PathBuf::from("."));
            let written = export::export_mapping(&results, *format, &output_dir)?;
            print_written(&written);

            println!("\n✅ マッピング完了");
        }

        Commands::History { export: export_path, clear } => {
            let path = SessionState::default_path()?;
            let mut state = SessionState::load(&path)?;

            if state.cumulative_documents.is_empty() {
                println!("まだ解析された文書はありません");
            } else {
                println!("📚 累積文書一覧 ({}回実行)\n", state.test_counter);
                println!("  {:>4}  {:<8}  {:<30}  パス", "Test", "Risk", "ファイル名");
                for entry in &state.cumulative_documents {
                    println!(
                        "  {:>4}  {:<8}  {:<30}  {}",
                        entry.test_number,
                        entry.overall_risk.as_str(),
                        entry.file_name,
                        entry.file_path
                    );
                }

                if let Some(target) = export_path {
                    let target = export::output_path_for(target, CUMULATIVE_FILE_STEM, "csv");
                    export::delimited::write_cumulative_csv(&state.cumulative_documents, &target)?;
                    println!("\n✔ 出力: {}", target.display());
                }
            }

            if *clear {
                state.clear();
                state.save(&path)?;
                println!("✔ 履歴を削除しました");
            }
        }

        Commands::Config { set_api_key, set_threshold, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key.clone())?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(threshold) = set_threshold {
                config.set_match_threshold(*threshold)?;
                println!("✔ 閾値を設定しました: {}", config.match_threshold);
            }

            if *show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  Visionモデル: {}", config.vision_model);
                println!("  最大文字数: {}", config.max_document_chars);
                println!("  最大件数: {}", config.max_files);
                println!("  マッピング閾値: {}", config.match_threshold);
                println!("  最大画像サイズ: {}px", config.max_image_size);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  APIキー: {}", if config.api_key.is_some() { "設定済み" } else { "未設定" });
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.clone().unwrap_or_else(|| PathBuf::from("."));
            let cache_path = analyzer::CacheFile::cache_path(&target);

            if *info || !*clear {
                if cache_path.exists() {
                    let cache = analyzer::CacheFile::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                    if !cache.is_empty() {
                        println!("  エントリ:");
                        for entry in cache.entries() {
                            println!(
                                "    {} ({} bytes, リスク: {})",
                                entry.file_name, entry.file_size, entry.report.overall_risk
                            );
                        }
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if *clear {
                if analyzer::CacheFile::clear(&target)? {
                    println!("✔ キャッシュを削除しました: {}", cache_path.display());
                } else {
                    println!("キャッシュファイルが存在しません");
                }
            }
        }
    }

    Ok(())
}
