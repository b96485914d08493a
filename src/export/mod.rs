pub mod delimited;
pub mod excel;

use crate::error::Result;
use legal_ai_common::{DocumentReport, MatchResult};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use csv, excel, or both", s)),
        }
    }
}

/// 解析結果の既定ファイル名（拡張子なし）
pub fn report_file_stem(test_number: u32) -> String {
    format!("document_analysis_results_test_{}", test_number)
}

/// 出力先がディレクトリ（または拡張子なし）なら `stem.extension` を付け、
/// ファイル指定ならその拡張子を差し替える
pub fn output_path_for(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.with_extension(extension)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// 解析結果を出力し、書き出したパスを返す
pub fn export_reports(
    reports: &[DocumentReport],
    format: ExportFormat,
    output: &Path,
    test_number: u32,
) -> Result<Vec<PathBuf>> {
    let stem = report_file_stem(test_number);
    let mut written = Vec::new();

    if matches!(format, ExportFormat::Csv | ExportFormat::Both) {
        let path = output_path_for(output, &stem, "csv");
        ensure_parent(&path)?;
        delimited::write_reports_csv(reports, &path)?;
        written.push(path);
    }

    if matches!(format, ExportFormat::Excel | ExportFormat::Both) {
        let path = output_path_for(output, &stem, "xlsx");
        ensure_parent(&path)?;
        excel::write_reports_excel(reports, &path, &format!("Test {}", test_number))?;
        written.push(path);
    }

    Ok(written)
}

/// マッピング結果を出力し、書き出したパスを返す
pub fn export_mapping(results: &[MatchResult], format: ExportFormat, output: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if matches!(format, ExportFormat::Csv | ExportFormat::Both) {
        let path = output_path_for(output, "mapping_results", "csv");
        ensure_parent(&path)?;
        delimited::write_mapping_csv(results, &path)?;
        written.push(path);
    }

    if matches!(format, ExportFormat::Excel | ExportFormat::Both) {
        let path = output_path_for(output, "mapping_results", "xlsx");
        ensure_parent(&path)?;
        excel::write_mapping_excel(results, &path)?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert_eq!("both".parse::<ExportFormat>().unwrap(), ExportFormat::Both);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_output_path_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path_for(dir.path(), &report_file_stem(3), "csv");
        assert_eq!(path, dir.path().join("document_analysis_results_test_3.csv"));
    }

    #[test]
    fn test_output_path_for_file() {
        let path = output_path_for(Path::new("out/result.csv"), "ignored", "xlsx");
        assert_eq!(path, PathBuf::from("out/result.xlsx"));
    }

    #[test]
    fn test_export_mapping_both() {
        let dir = tempfile::tempdir().unwrap();
        let results = vec![MatchResult {
            source: "Nut".into(),
            candidate: Some("Nut".into()),
            score: 1.0,
        }];

        let written = export_mapping(&results, ExportFormat::Both, dir.path()).unwrap();

        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|p| p.exists()));
    }
}
