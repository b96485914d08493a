//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid threshold: {0} (must be within 0.0..=1.0)")]
    InvalidThreshold(f64),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Threshold;

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("設定ファイルが見つかりません".to_string());
        assert_eq!(format!("{}", error), "Config error: 設定ファイルが見つかりません");
    }

    #[test]
    fn test_error_display_invalid_threshold() {
        let error = Error::InvalidThreshold(1.5);
        let display = format!("{}", error);
        assert!(display.contains("1.5"));
        assert!(display.contains("0.0..=1.0"));
    }

    #[test]
    fn test_non_numeric_threshold_is_config_error() {
        let error = "high".parse::<Threshold>().unwrap_err();
        assert!(matches!(error, Error::Config(message) if message.contains("high")));
    }
}
