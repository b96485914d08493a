//! Excel生成
//!
//! 1シートの表形式。ヘッダ行は太字・罫線付き、先頭行を固定する。

use super::delimited::{report_row, MAPPING_HEADERS, REPORT_HEADERS};
use crate::error::{LegalAiError, Result};
use legal_ai_common::{DocumentReport, MatchResult};
use rust_xlsxwriter::{Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::borrow::Cow;
use std::path::Path;

const TEXT_COL_WIDTH: f64 = 40.0;
const NARROW_COL_WIDTH: f64 = 16.0;

/// Excelの1セルに入る最大文字数
const EXCEL_CELL_LIMIT: usize = 32_767;
const TRUNCATION_MARK: char = '…';

/// 上限を超える文字列は文字境界で切り詰め、末尾に省略記号を付ける
fn fit_cell(value: &str) -> Cow<'_, str> {
    if value.char_indices().nth(EXCEL_CELL_LIMIT).is_none() {
        return Cow::Borrowed(value);
    }

    let end = value
        .char_indices()
        .nth(EXCEL_CELL_LIMIT - 1)
        .map(|(index, _)| index)
        .unwrap_or(value.len());
    tracing::warn!(
        "セルの文字数がExcelの上限（{}）を超えたため切り詰めました",
        EXCEL_CELL_LIMIT
    );
    Cow::Owned(format!("{}{}", &value[..end], TRUNCATION_MARK))
}

fn excel_error(e: XlsxError) -> LegalAiError {
    LegalAiError::ExcelGeneration(e.to_string())
}

fn write_header(sheet: &mut Worksheet, headers: &[&str]) -> std::result::Result<(), XlsxError> {
    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

pub fn write_reports_excel(reports: &[DocumentReport], output_path: &Path, sheet_name: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).map_err(excel_error)?;
    write_header(sheet, &REPORT_HEADERS).map_err(excel_error)?;

    let wrap = Format::new().set_text_wrap();
    for col in 0..REPORT_HEADERS.len() as u16 {
        let width = if col < 2 || col == 16 { NARROW_COL_WIDTH } else { TEXT_COL_WIDTH };
        sheet.set_column_width(col, width).map_err(excel_error)?;
    }

    for (i, report) in reports.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, value) in report_row(report).iter().enumerate() {
            sheet
                .write_string_with_format(row, col as u16, fit_cell(value), &wrap)
                .map_err(excel_error)?;
        }
    }

    workbook.save(output_path).map_err(excel_error)?;
    Ok(())
}

pub fn write_mapping_excel(results: &[MatchResult], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Mapping").map_err(excel_error)?;
    write_header(sheet, &MAPPING_HEADERS).map_err(excel_error)?;

    sheet.set_column_width(0, TEXT_COL_WIDTH).map_err(excel_error)?;
    sheet.set_column_width(1, TEXT_COL_WIDTH).map_err(excel_error)?;
    sheet.set_column_width(2, NARROW_COL_WIDTH).map_err(excel_error)?;

    let score_format = Format::new().set_num_format("0.0000");
    for (i, result) in results.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, fit_cell(&result.source)).map_err(excel_error)?;
        if let Some(candidate) = &result.candidate {
            sheet.write_string(row, 1, fit_cell(candidate)).map_err(excel_error)?;
        }
        sheet
            .write_number_with_format(row, 2, result.score, &score_format)
            .map_err(excel_error)?;
    }

    workbook.save(output_path).map_err(excel_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_auto, Reader};
    use legal_ai_common::{DocumentAnalysis, RiskLevel, RiskyClause};

    #[test]
    fn test_fit_cell_keeps_short_text() {
        assert!(matches!(fit_cell("Red Widget"), Cow::Borrowed("Red Widget")));
        let exact = "a".repeat(EXCEL_CELL_LIMIT);
        assert_eq!(fit_cell(&exact), exact.as_str());
    }

    #[test]
    fn test_fit_cell_truncates_on_char_boundary() {
        let long = "契約".repeat(EXCEL_CELL_LIMIT);
        let fitted = fit_cell(&long);
        assert_eq!(fitted.chars().count(), EXCEL_CELL_LIMIT);
        assert!(fitted.ends_with(TRUNCATION_MARK));
        assert!(fitted.starts_with("契約契約"));
    }

    #[test]
    fn test_write_reports_excel_truncates_oversized_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.xlsx");
        let highlighted_clauses = (0..800)
            .map(|i| RiskyClause {
                clause: format!("Clause {} states that any breach entitles the landlord to terminate.", i),
                level: RiskLevel::High,
            })
            .collect();
        let report = DocumentReport {
            file_name: "lease.pdf".into(),
            file_path: "/docs/lease.pdf".into(),
            analysis: DocumentAnalysis::default(),
            highlighted_clauses,
            overall_risk: RiskLevel::High,
        };

        write_reports_excel(&[report], &path, "Reports").unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range("Reports").unwrap();
        let cell = range.get_value((1, 15)).unwrap().to_string();
        assert_eq!(cell.chars().count(), EXCEL_CELL_LIMIT);
        assert!(cell.starts_with("[High] Clause 0 states"));
        assert!(cell.ends_with(TRUNCATION_MARK));
        assert_eq!(range.get_value((1, 16)).unwrap().to_string(), "High");
    }

    #[test]
    fn test_write_mapping_excel_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.xlsx");
        let results = vec![
            MatchResult { source: "Red Widget".into(), candidate: Some("Red Widget".into()), score: 1.0 },
            MatchResult { source: "Xyzzy".into(), candidate: None, score: 0.0 },
        ];

        write_mapping_excel(&results, &path).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range("Mapping").unwrap();
        assert_eq!(range.height(), 3);
        assert_eq!(range.get_value((0, 0)).unwrap().to_string(), "source_description");
        assert_eq!(range.get_value((2, 0)).unwrap().to_string(), "Xyzzy");
    }

    #[test]
    fn test_write_reports_excel_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.xlsx");

        write_reports_excel(&[], &path, "Test 1").unwrap();
        assert!(path.exists());
    }
}
