use crate::ai_provider::AiProvider;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use legal_ai_common::Threshold;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "legal-ai")]
#[command(about = "契約書AI解析・品目マッピングツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ (gemini-api/claude/codex/gemini)
    #[arg(long, value_enum, default_value = "gemini-api", global = true)]
    pub ai_provider: AiProvider,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 文書フォルダを解析してJSONを出力
    Analyze {
        /// 文書フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 出力JSONファイル（デフォルト: 入力フォルダ/analysis.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 解析する最大件数（0で無制限、省略時は設定値）
        #[arg(short = 'n', long)]
        max_files: Option<usize>,

        /// キャッシュを使用（再解析をスキップ）
        #[arg(long)]
        use_cache: bool,

        /// 文書ごとの詳細を表示
        #[arg(long)]
        details: bool,
    },

    /// 解析結果JSONからCSV/Excelを生成
    Export {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力形式 (csv/excel/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ファイル名に使うテスト番号
        #[arg(short, long, default_value = "1")]
        test_number: u32,
    },

    /// 解析からダッシュボード表示・出力まで一括実行
    Run {
        /// 文書フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 出力ディレクトリ（デフォルト: 入力フォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/excel/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 解析する最大件数（0で無制限、省略時は設定値）
        #[arg(short = 'n', long)]
        max_files: Option<usize>,

        /// キャッシュを使用（再解析をスキップ）
        #[arg(long)]
        use_cache: bool,

        /// 文書ごとの詳細を表示
        #[arg(long)]
        details: bool,
    },

    /// 2つの表の説明文をあいまい照合
    Map {
        /// ソース表（csv/tsv/txt/xlsx/xls）
        #[arg(required = true)]
        source: PathBuf,

        /// 候補表（csv/tsv/txt/xlsx/xls）
        #[arg(required = true)]
        candidate: PathBuf,

        /// ソース表の説明列（省略時は対話選択）
        #[arg(long)]
        source_column: Option<String>,

        /// 候補表の説明列（省略時は対話選択）
        #[arg(long)]
        candidate_column: Option<String>,

        /// 採用閾値（0.0-1.0、省略時は設定値）
        #[arg(short, long)]
        threshold: Option<Threshold>,

        /// 閾値未満でも最良スコアを出力する
        #[arg(long)]
        keep_rejected_score: bool,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/excel/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// プレビュー表示件数
        #[arg(long, default_value = "10")]
        preview: usize,
    },

    /// 累積文書一覧の表示/出力/削除
    History {
        /// CSVに出力（ディレクトリ指定時は cumulative_document_list.csv）
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// 履歴を削除
        #[arg(long)]
        clear: bool,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// マッピングの既定閾値を設定（0.0〜1.0）
        #[arg(long, allow_negative_numbers = true)]
        set_threshold: Option<f64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_map_command() {
        let cli = Cli::try_parse_from([
            "legal-ai",
            "map",
            "a.csv",
            "b.xlsx",
            "--source-column",
            "Description",
            "--threshold",
            "0.75",
            "--format",
            "both",
        ])
        .unwrap();

        match cli.command {
            Commands::Map { source, threshold, format, candidate_column, .. } => {
                assert_eq!(source, PathBuf::from("a.csv"));
                assert_eq!(threshold.map(|t| t.value()), Some(0.75));
                assert_eq!(format, ExportFormat::Both);
                assert_eq!(candidate_column, None);
            }
            _ => panic!("map以外にパースされた"),
        }
        assert_eq!(cli.ai_provider, AiProvider::GeminiApi);
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let result = Cli::try_parse_from(["legal-ai", "map", "a.csv", "b.csv", "--threshold", "1.5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_set_threshold_defers_range_check() {
        let cli = Cli::try_parse_from(["legal-ai", "config", "--set-threshold", "-0.5"]).unwrap();
        match cli.command {
            Commands::Config { set_threshold, .. } => assert_eq!(set_threshold, Some(-0.5)),
            _ => panic!("config以外にパースされた"),
        }
    }

    #[test]
    fn test_global_provider() {
        let cli = Cli::try_parse_from(["legal-ai", "analyze", "docs", "--ai-provider", "claude", "-v"]).unwrap();
        assert_eq!(cli.ai_provider, AiProvider::Claude);
        assert!(cli.verbose);
    }
}
