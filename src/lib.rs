//! 契約書AI解析・品目マッピングツール

pub mod ai_provider;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod extract;
pub mod mapping;
pub mod scanner;
pub mod session;
