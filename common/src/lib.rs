//! Legal AI Common Library
//!
//! CLIから使う解析・照合ロジック（I/Oなし）

pub mod dashboard;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod prompts;
pub mod risk;
pub mod similarity;
pub mod types;

pub use dashboard::{build_dashboard, DashboardSummary, KeyMetrics, TimelinePoint};
pub use error::{Error, Result};
pub use matcher::{match_descriptions, summarize, MatchOptions, MatchResult, MatchSummary, Threshold};
pub use parser::{clean_document_type, extract_date, parse_analysis};
pub use prompts::{build_analysis_prompt, DOCUMENT_TYPES, IMAGE_TEXT_PROMPT};
pub use risk::{categorize_risk, highlight_risky_clauses, RiskLevel, RiskyClause};
pub use similarity::{description_similarity, sequence_ratio};
pub use types::{CumulativeEntry, DocumentAnalysis, DocumentReport};
