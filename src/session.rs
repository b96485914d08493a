//! 解析セッションの状態
//!
//! 解析の実行回数（テスト番号）と、これまでに解析した文書の累積一覧を持つ。
//! 呼び出し側（CLI）が明示的に読み込み・更新・保存する。

use crate::config::Config;
use crate::error::Result;
use legal_ai_common::{CumulativeEntry, DocumentReport};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    pub test_counter: u32,
    pub cumulative_documents: Vec<CumulativeEntry>,
}

impl SessionState {
    /// 既定の保存先（~/.config/legal-ai/session.json）
    pub fn default_path() -> Result<PathBuf> {
        Ok(Config::config_dir()?.join(SESSION_FILE_NAME))
    }

    /// 読み込み（ファイルがなければ空の状態）
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// 1回分の解析結果を記録し、そのテスト番号を返す
    ///
    /// レポートが空の場合は何もしない（None）。
    pub fn record_run(&mut self, reports: &[DocumentReport]) -> Option<u32> {
        if reports.is_empty() {
            return None;
        }

        self.test_counter += 1;
        let test_number = self.test_counter;
        self.cumulative_documents.extend(
            reports
                .iter()
                .map(|report| CumulativeEntry::from_report(test_number, report)),
        );
        Some(test_number)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legal_ai_common::{DocumentAnalysis, RiskLevel};

    fn report(name: &str, risk: RiskLevel) -> DocumentReport {
        DocumentReport {
            file_name: name.to_string(),
            file_path: format!("/docs/{}", name),
            analysis: DocumentAnalysis::default(),
            highlighted_clauses: vec![],
            overall_risk: risk,
        }
    }

    #[test]
    fn test_record_run_increments_counter() {
        let mut state = SessionState::default();

        let first = state.record_run(&[report("a.pdf", RiskLevel::High), report("b.pdf", RiskLevel::Low)]);
        let second = state.record_run(&[report("c.pdf", RiskLevel::NoRisk)]);

        assert_eq!(first, Some(1));
        assert_eq!(second, Some(2));
        assert_eq!(state.cumulative_documents.len(), 3);
        assert_eq!(state.cumulative_documents[0].test_number, 1);
        assert_eq!(state.cumulative_documents[2].test_number, 2);
        assert_eq!(state.cumulative_documents[2].file_name, "c.pdf");
    }

    #[test]
    fn test_record_run_empty_is_noop() {
        let mut state = SessionState::default();
        assert_eq!(state.record_run(&[]), None);
        assert_eq!(state.test_counter, 0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut state = SessionState::default();
        state.record_run(&[report("a.pdf", RiskLevel::Medium)]);
        state.save(&path).unwrap();

        let loaded = SessionState::load(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = SessionState::load(&dir.path().join("none.json")).unwrap();
        assert_eq!(loaded, SessionState::default());
    }

    #[test]
    fn test_clear() {
        let mut state = SessionState::default();
        state.record_run(&[report("a.pdf", RiskLevel::High)]);
        state.clear();
        assert_eq!(state, SessionState::default());
    }
}
