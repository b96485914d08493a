//! 文字列類似度
//!
//! 一致ブロック方式（最長共通部分文字列を再帰的に取り出す）の類似度比率:
//!
//! ```text
//! ratio = 2 * M / (|a| + |b|)
//! ```
//!
//! M は一致ブロックの長さの合計。1.0 で完全一致、0.0 で共通文字なし。

/// 一致ブロック（a[a_start..a_start+size] == b[b_start..b_start+size]）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// 指定範囲内の最長一致ブロックを探す
///
/// 同じ長さの候補が複数ある場合は a 側の開始位置が最も小さいもの、
/// 次に b 側の開始位置が最も小さいものを返す。
fn find_longest_match(
    a: &[char],
    b: &[char],
    a_range: (usize, usize),
    b_range: (usize, usize),
) -> MatchingBlock {
    let (alo, ahi) = a_range;
    let (blo, bhi) = b_range;

    let mut best = MatchingBlock {
        a_start: alo,
        b_start: blo,
        size: 0,
    };

    // prev[j - blo + 1] = a[..i] と b[..j] の末尾一致長
    let width = bhi - blo + 1;
    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];

    for i in alo..ahi {
        for j in blo..bhi {
            let k = j - blo + 1;
            if a[i] == b[j] {
                curr[k] = prev[k - 1] + 1;
                if curr[k] > best.size {
                    best = MatchingBlock {
                        a_start: i + 1 - curr[k],
                        b_start: j + 1 - curr[k],
                        size: curr[k],
                    };
                }
            } else {
                curr[k] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

/// 一致ブロックの一覧を取得（a 側の位置順）
pub fn matching_blocks(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let mut queue = vec![((0, a.len()), (0, b.len()))];
    let mut blocks = Vec::new();

    while let Some(((alo, ahi), (blo, bhi))) = queue.pop() {
        let block = find_longest_match(a, b, (alo, ahi), (blo, bhi));
        if block.size == 0 {
            continue;
        }

        if alo < block.a_start && blo < block.b_start {
            queue.push(((alo, block.a_start), (blo, block.b_start)));
        }
        let a_end = block.a_start + block.size;
        let b_end = block.b_start + block.size;
        if a_end < ahi && b_end < bhi {
            queue.push(((a_end, ahi), (b_end, bhi)));
        }
        blocks.push(block);
    }

    blocks.sort_by_key(|blk| (blk.a_start, blk.b_start));
    blocks
}

/// 一致ブロック方式の類似度比率（0.0〜1.0）
///
/// 両方が空文字列の場合は 1.0。
#[must_use]
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let total = a_chars.len() + b_chars.len();

    if total == 0 {
        return 1.0;
    }

    let matched: usize = matching_blocks(&a_chars, &b_chars)
        .iter()
        .map(|blk| blk.size)
        .sum();

    2.0 * matched as f64 / total as f64
}

/// 説明文同士の類似度
///
/// 大文字小文字を無視して比較する。空白のみの文字列は空として扱い、
/// 片方だけが空なら 0.0、両方空なら 1.0。
#[must_use]
pub fn description_similarity(a: &str, b: &str) -> f64 {
    let a_blank = a.trim().is_empty();
    let b_blank = b.trim().is_empty();
    if a_blank || b_blank {
        return if a_blank && b_blank { 1.0 } else { 0.0 };
    }

    sequence_ratio(&a.to_lowercase(), &b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_sequence_ratio_identical() {
        assert!((sequence_ratio("abcd", "abcd") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sequence_ratio_disjoint() {
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_sequence_ratio_both_empty() {
        assert_eq!(sequence_ratio("", ""), 1.0);
        assert_eq!(sequence_ratio("", "abc"), 0.0);
    }

    #[test]
    fn test_sequence_ratio_known_values() {
        // "abcd" / "bcde": 一致 "bcd" → 2*3/8
        assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
        // "red widget 10mm" / "red widget 10 mm": "red widget 10" + "mm" → 30/31
        assert!((sequence_ratio("red widget 10mm", "red widget 10 mm") - 30.0 / 31.0).abs() < 1e-9);
    }

    #[test]
    fn test_matching_blocks_recurses_on_both_sides() {
        let blocks = matching_blocks(&chars("xabcyzq"), &chars("abcxyzq"));
        // 最長 "abc" を取った後、右側 "yzq" / "xyzq" から "yzq"
        assert_eq!(
            blocks,
            vec![
                MatchingBlock { a_start: 1, b_start: 0, size: 3 },
                MatchingBlock { a_start: 4, b_start: 4, size: 3 },
            ]
        );
    }

    #[test]
    fn test_find_longest_match_prefers_earliest() {
        let a = chars("abab");
        let b = chars("ab");
        let block = find_longest_match(&a, &b, (0, a.len()), (0, b.len()));
        assert_eq!(block, MatchingBlock { a_start: 0, b_start: 0, size: 2 });
    }

    #[test]
    fn test_sequence_ratio_multibyte() {
        assert!((sequence_ratio("契約書", "契約書") - 1.0).abs() < f64::EPSILON);
        assert!(sequence_ratio("秘密保持契約", "秘密保持") > 0.6);
    }

    #[test]
    fn test_description_similarity_case_insensitive() {
        assert!((description_similarity("Blue Widget", "BLUE WIDGET") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_description_similarity_blank() {
        assert_eq!(description_similarity("", "Widget"), 0.0);
        assert_eq!(description_similarity("Widget", "   "), 0.0);
        assert_eq!(description_similarity("", "  "), 1.0);
    }

    #[test]
    fn test_ratio_is_symmetric_in_magnitude_bounds() {
        for (a, b) in [("kitten", "sitting"), ("abc", "cba"), ("a", "aaaa")] {
            let r = sequence_ratio(a, b);
            assert!((0.0..=1.0).contains(&r), "{} / {} → {}", a, b, r);
        }
    }
}
