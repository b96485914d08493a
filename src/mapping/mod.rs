//! 品目マッピング
//!
//! 2つの表から説明文の列を取り出し、あいまい照合する。

pub mod table;

pub use table::{read_table, Table};

use crate::error::{LegalAiError, Result};
use dialoguer::Select;
use legal_ai_common::{match_descriptions, MatchOptions, MatchResult};
use std::path::Path;

/// 列名が指定されていればそれを使い、なければ対話的に選ぶ
pub fn resolve_column(table: &Table, requested: Option<&str>, label: &str) -> Result<String> {
    match requested {
        Some(name) => {
            let index = table
                .column_index(name)
                .ok_or_else(|| LegalAiError::ColumnNotFound(name.to_string()))?;
            Ok(table.headers[index].clone())
        }
        None => select_column_interactive(table, label),
    }
}

pub fn select_column_interactive(table: &Table, label: &str) -> Result<String> {
    if table.headers.is_empty() {
        return Err(LegalAiError::ColumnNotFound(format!("{}（列がありません）", label)));
    }

    let index = Select::new()
        .with_prompt(format!("{}の説明列を選択", label))
        .items(&table.headers)
        .default(0)
        .interact()
        .map_err(|e| LegalAiError::CliExecution(e.to_string()))?;

    Ok(table.headers[index].clone())
}

/// ソース表と候補表を照合する
pub fn run_mapping(
    source_path: &Path,
    candidate_path: &Path,
    source_column: Option<&str>,
    candidate_column: Option<&str>,
    options: &MatchOptions,
) -> Result<Vec<MatchResult>> {
    let source_table = read_table(source_path)?;
    let candidate_table = read_table(candidate_path)?;

    let source_column = resolve_column(&source_table, source_column, "ソース")?;
    let candidate_column = resolve_column(&candidate_table, candidate_column, "候補")?;

    let sources = source_table.column_values(&source_column)?;
    let candidates = candidate_table.column_values(&candidate_column)?;

    tracing::info!(
        "照合: ソース{}件 × 候補{}件 (閾値 {})",
        sources.len(),
        candidates.len(),
        options.threshold
    );

    Ok(match_descriptions(&sources, &candidates, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use legal_ai_common::Threshold;

    #[test]
    fn test_run_mapping_with_named_columns() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.csv");
        let candidate = dir.path().join("candidate.tsv");
        std::fs::write(&source, "id,Item Description\n1,Red Widget 10mm\n2,Xyzzy\n").unwrap();
        std::fs::write(&candidate, "Description\tSku\nRed Widget 10 mm\tR1\nBlue Widget\tB1\n").unwrap();

        let results = run_mapping(
            &source,
            &candidate,
            Some("item description"),
            Some("Description"),
            &MatchOptions::default(),
        )
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source, "Red Widget 10mm");
        assert_eq!(results[0].candidate.as_deref(), Some("Red Widget 10 mm"));
        assert!(results[0].score > 0.6);
        assert_eq!(results[1].candidate, None);
        assert_eq!(results[1].score, 0.0);
    }

    #[test]
    fn test_run_mapping_blank_source_row_keeps_position() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.csv");
        let candidate = dir.path().join("candidate.csv");
        std::fs::write(&source, "id,Description\n1,Red Widget\n2,\n3,Blue Widget\n").unwrap();
        std::fs::write(&candidate, "Description\nRed Widget\nBlue Widget\n").unwrap();

        let results = run_mapping(
            &source,
            &candidate,
            Some("Description"),
            Some("Description"),
            &MatchOptions::default(),
        )
        .unwrap();

        let sources: Vec<&str> = results.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["Red Widget", "", "Blue Widget"]);
        assert_eq!(results[1].candidate, None);
        assert_eq!(results[1].score, 0.0);
        assert_eq!(results[2].candidate.as_deref(), Some("Blue Widget"));
    }

    #[test]
    fn test_run_mapping_unknown_column() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.csv");
        std::fs::write(&source, "Description\nRed Widget\n").unwrap();

        let err = run_mapping(
            &source,
            &source,
            Some("Name"),
            Some("Description"),
            &MatchOptions::with_threshold(Threshold::new(0.5).unwrap()),
        )
        .unwrap_err();

        assert!(matches!(err, LegalAiError::ColumnNotFound(_)));
    }

    #[test]
    fn test_resolve_column_returns_header_spelling() {
        let table = Table {
            headers: vec!["Description".into()],
            rows: vec![],
        };
        assert_eq!(resolve_column(&table, Some("DESCRIPTION"), "ソース").unwrap(), "Description");
    }
}
