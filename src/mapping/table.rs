//! 表ファイルの読み込み
//!
//! - .xlsx/.xlsm/.xls/.xlsb: calamine（先頭シート）
//! - それ以外: csv（区切り文字は先頭行から推定）
//!
//! 1行目をヘッダとし、全セル空の行は捨てる。列数は最も長い行に揃える。

use crate::error::{LegalAiError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb"];

/// ヘッダ付きの表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// 列名から列番号を探す（完全一致を優先し、なければ大文字小文字を無視）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.headers
            .iter()
            .position(|h| h == name)
            .or_else(|| self.headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
    }

    /// 指定列の値（行順、空セルも1行として残す）
    pub fn column_values(&self, name: &str) -> Result<Vec<String>> {
        let index = self
            .column_index(name)
            .ok_or_else(|| LegalAiError::ColumnNotFound(name.to_string()))?;

        Ok(self
            .rows
            .iter()
            .map(|row| row.get(index).cloned().unwrap_or_default())
            .collect())
    }
}

pub fn read_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(LegalAiError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut table = if EXCEL_EXTENSIONS.contains(&extension.as_str()) {
        read_workbook(path)?
    } else {
        read_delimited(path, &extension)?
    };

    align_row_lengths(&mut table);
    tracing::debug!(
        "{}: {}列 {}行",
        path.display(),
        table.headers.len(),
        table.rows.len()
    );
    Ok(table)
}

fn read_delimited(path: &Path, extension: &str) -> Result<Table> {
    let fallback = if extension == "tsv" { b'\t' } else { b',' };
    let delimiter = detect_delimiter(path)?.unwrap_or(fallback);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader
        .headers()?
        .iter()
        .map(|value| value.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let values: Vec<String> = record?
            .iter()
            .map(|value| value.trim().to_string())
            .collect();
        if values.iter().all(|value| value.is_empty()) {
            continue;
        }
        rows.push(values);
    }

    Ok(Table { headers, rows })
}

fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| LegalAiError::Spreadsheet(format!("{}: {}", path.display(), e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LegalAiError::Spreadsheet("シートがありません".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LegalAiError::Spreadsheet(format!("{}: {}", sheet_name, e)))?;

    let mut rows_iter = range.rows();
    let headers = match rows_iter.next() {
        Some(row) => row.iter().map(cell_to_string).collect(),
        None => return Ok(Table::default()),
    };

    let rows = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|values| values.iter().any(|value| !value.is_empty()))
        .collect();

    Ok(Table { headers, rows })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        _ => cell.to_string().trim().to_string(),
    }
}

/// 先頭の空でない行から区切り文字を推定（タブ・カンマ・セミコロンの順で同数ならタブ優先）
fn detect_delimiter(path: &Path) -> Result<Option<u8>> {
    let reader = BufReader::new(File::open(path)?);

    for line in reader.lines().take(5) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut best: Option<(u8, usize)> = None;
        for delimiter in [b'\t', b',', b';'] {
            let count = line.matches(delimiter as char).count();
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((delimiter, count));
            }
        }
        return Ok(best.map(|(d, _)| d));
    }

    Ok(None)
}

fn align_row_lengths(table: &mut Table) {
    let column_count = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.headers.len()))
        .max()
        .unwrap_or(0);

    table.headers.resize(column_count, String::new());
    for row in &mut table.rows {
        row.resize(column_count, String::new());
    }
}
