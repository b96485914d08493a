//! 説明文マッチング
//!
//! 照合元リストの各要素について、候補リストから最も類似度の高い要素を探す。
//! 索引や枝刈りは行わない総当たり（O(n·m)）。照合元ごとの計算は独立しているため、
//! 外側のループは rayon で並列化し、出力順は照合元の順序を保つ。

use crate::error::{Error, Result};
use crate::similarity::description_similarity;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 既定の閾値
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// マッチ採用の最小類似度（0.0〜1.0）
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    /// 範囲外（NaN含む）は `Error::InvalidThreshold`
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidThreshold(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl FromStr for Threshold {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("閾値が数値ではありません: {}", s)))?;
        Self::new(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// マッチングオプション
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions {
    pub threshold: Threshold,
    /// 閾値未満で不採用になった場合も最良スコアを残す
    ///
    /// false（既定）の場合、不採用のスコアは 0 になる。
    pub keep_rejected_score: bool,
}

impl MatchOptions {
    pub fn with_threshold(threshold: Threshold) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }
}

/// 照合元1件分の結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub source: String,
    pub candidate: Option<String>,
    pub score: f64,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        self.candidate.is_some()
    }
}

/// 候補リストから最良の候補を探す
///
/// 戻り値は (候補のインデックス, スコア)。同点の場合は先に現れた候補。
/// 候補が空なら None。
pub fn best_candidate<S: AsRef<str>>(source: &str, candidates: &[S]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, candidate) in candidates.iter().enumerate() {
        let score = description_similarity(source, candidate.as_ref());
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }

    best
}

/// 照合元1件をマッチングする
pub fn match_one<S: AsRef<str>>(source: &str, candidates: &[S], options: &MatchOptions) -> MatchResult {
    match best_candidate(source, candidates) {
        Some((idx, score)) if score >= options.threshold.value() => MatchResult {
            source: source.to_string(),
            candidate: Some(candidates[idx].as_ref().to_string()),
            score,
        },
        Some((_, score)) if options.keep_rejected_score => MatchResult {
            source: source.to_string(),
            candidate: None,
            score,
        },
        _ => MatchResult {
            source: source.to_string(),
            candidate: None,
            score: 0.0,
        },
    }
}

/// 照合元リスト全体をマッチングする
///
/// # Arguments
/// * `sources` - 照合元の説明文
/// * `candidates` - 候補の説明文
/// * `options` - 閾値など
///
/// # Returns
/// 照合元と同じ順序・同じ件数の結果
pub fn match_descriptions<S, C>(sources: &[S], candidates: &[C], options: &MatchOptions) -> Vec<MatchResult>
where
    S: AsRef<str> + Sync,
    C: AsRef<str> + Sync,
{
    sources
        .par_iter()
        .map(|source| match_one(source.as_ref(), candidates, options))
        .collect()
}

/// マッチング結果の集計
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSummary {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub average_score: f64,
}

/// 結果を集計する（平均スコアはマッチしたものだけで計算）
pub fn summarize(results: &[MatchResult]) -> MatchSummary {
    let matched: Vec<f64> = results
        .iter()
        .filter(|r| r.is_match())
        .map(|r| r.score)
        .collect();

    let average_score = if matched.is_empty() {
        0.0
    } else {
        matched.iter().sum::<f64>() / matched.len() as f64
    };

    MatchSummary {
        total: results.len(),
        matched: matched.len(),
        unmatched: results.len() - matched.len(),
        average_score,
    }
}
