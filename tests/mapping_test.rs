//! 品目マッピングの統合テスト
//!
//! 表ファイル読み込み → 照合 → CSV出力

use legal_ai_common::{summarize, MatchOptions, Threshold};
use legal_ai_rust::export::{self, ExportFormat};
use legal_ai_rust::mapping;
use tempfile::tempdir;

fn write_candidate_xlsx(path: &std::path::Path) {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Product").unwrap();
    sheet.write_string(1, 0, "Red Widget 10 mm").unwrap();
    sheet.write_string(2, 0, "Blue Widget").unwrap();
    sheet.write_string(3, 0, "Green Gadget").unwrap();
    workbook.save(path).unwrap();
}

#[test]
fn test_csv_source_against_xlsx_candidates() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = dir.path().join("source.csv");
    let candidate = dir.path().join("candidate.xlsx");
    std::fs::write(&source, "Description\nred widget 10mm\nBLUE WIDGET\nXyzzy\n").unwrap();
    write_candidate_xlsx(&candidate);

    let results = mapping::run_mapping(
        &source,
        &candidate,
        Some("Description"),
        Some("Product"),
        &MatchOptions::default(),
    )
    .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].candidate.as_deref(), Some("Red Widget 10 mm"));
    assert_eq!(results[1].candidate.as_deref(), Some("Blue Widget"));
    assert_eq!(results[1].score, 1.0);
    assert_eq!(results[2].candidate, None);

    let summary = summarize(&results);
    assert_eq!(summary.matched, 2);
    assert_eq!(summary.unmatched, 1);
}

#[test]
fn test_threshold_zero_always_matches() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = dir.path().join("source.csv");
    let candidate = dir.path().join("candidate.xlsx");
    std::fs::write(&source, "Description\nXyzzy\n").unwrap();
    write_candidate_xlsx(&candidate);

    let options = MatchOptions::with_threshold(Threshold::new(0.0).unwrap());
    let results = mapping::run_mapping(&source, &candidate, Some("Description"), Some("Product"), &options).unwrap();

    assert!(results[0].candidate.is_some());
}

#[test]
fn test_keep_rejected_score() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = dir.path().join("source.csv");
    let candidate = dir.path().join("candidate.csv");
    std::fs::write(&source, "Description\nRed Gizmo\n").unwrap();
    std::fs::write(&candidate, "Description\nRed Widget\n").unwrap();

    let options = MatchOptions {
        threshold: Threshold::new(0.95).unwrap(),
        keep_rejected_score: true,
    };
    let results = mapping::run_mapping(&source, &candidate, Some("Description"), Some("Description"), &options).unwrap();

    assert_eq!(results[0].candidate, None);
    assert!(results[0].score > 0.0 && results[0].score < 0.95);
}

#[test]
fn test_mapping_export_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = dir.path().join("source.csv");
    let candidate = dir.path().join("candidate.csv");
    std::fs::write(&source, "Description\nNut M8\n").unwrap();
    std::fs::write(&candidate, "Description\nNut M8\n").unwrap();

    let results = mapping::run_mapping(
        &source,
        &candidate,
        Some("Description"),
        Some("Description"),
        &MatchOptions::default(),
    )
    .unwrap();

    let output = dir.path().join("mapped.csv");
    let written = export::export_mapping(&results, ExportFormat::Csv, &output).unwrap();

    assert_eq!(written, vec![output.clone()]);
    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        "source_description,candidate_description,similarity_score\nNut M8,Nut M8,1\n"
    );
}
