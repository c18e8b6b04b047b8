//! Longest-matching-blocks similarity (Ratcliff/Obershelp)
//!
//! The ratio is `2 * M / T` where `M` is the number of characters covered by
//! matching blocks and `T` the combined length of both strings. Blocks are
//! found by taking the longest common substring, then recursing on the pieces
//! to its left and right. Among equally long candidates the one starting
//! earliest in `a`, then earliest in `b`, wins.

use std::collections::HashMap;

/// Similarity of two strings in `[0, 1]`.
///
/// Identical non-empty strings score 1.0; an empty input on either side
/// scores 0.0.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a == b {
        return 1.0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let matched = matching_characters(&a, &b);

    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

/// Total size of all matching blocks between `a` and `b`
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b_index.entry(*c).or_default().push(j);
    }

    let mut runs = RunTable::new(b.len());
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let block = longest_match(a, &b_index, &mut runs, a_lo, a_hi, b_lo, b_hi);
        if block.size == 0 {
            continue;
        }

        total += block.size;

        if a_lo < block.a_start && b_lo < block.b_start {
            pending.push((a_lo, block.a_start, b_lo, block.b_start));
        }

        let a_end = block.a_start + block.size;
        let b_end = block.b_start + block.size;
        if a_end < a_hi && b_end < b_hi {
            pending.push((a_end, a_hi, b_end, b_hi));
        }
    }

    total
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    a_start: usize,
    b_start: usize,
    size: usize,
}

/// Two rows of run lengths over `b`, reused across rows and calls.
///
/// Slot `j + 1` holds the length of the run ending at `b[j]`. Only touched
/// slots are reset, so a row costs as much as the positions it visits.
struct RunTable {
    prev: Vec<usize>,
    curr: Vec<usize>,
    prev_touched: Vec<usize>,
    curr_touched: Vec<usize>,
}

impl RunTable {
    fn new(b_len: usize) -> Self {
        Self {
            prev: vec![0; b_len + 1],
            curr: vec![0; b_len + 1],
            prev_touched: Vec::new(),
            curr_touched: Vec::new(),
        }
    }

    /// Run length ending at `b[j - 1]` in the previous row
    fn previous(&self, j: usize) -> usize {
        self.prev[j]
    }

    fn record(&mut self, j: usize, size: usize) {
        self.curr[j + 1] = size;
        self.curr_touched.push(j + 1);
    }

    /// Zero the previous row and promote the current one
    fn advance(&mut self) {
        for k in self.prev_touched.drain(..) {
            self.prev[k] = 0;
        }
        std::mem::swap(&mut self.prev, &mut self.curr);
        std::mem::swap(&mut self.prev_touched, &mut self.curr_touched);
    }

    /// Clear the row left over from the last `advance`
    fn reset(&mut self) {
        self.advance();
    }
}

/// Longest common run of `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
///
/// Each row only looks at positions of `a[i]` in `b`.
fn longest_match(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    runs: &mut RunTable,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> Block {
    let mut best = Block {
        a_start: a_lo,
        b_start: b_lo,
        size: 0,
    };

    for (i, c) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        if let Some(positions) = b_index.get(c) {
            for &j in positions {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }

                let size = runs.previous(j) + 1;
                runs.record(j, size);

                if size > best.size {
                    best = Block {
                        a_start: i + 1 - size,
                        b_start: j + 1 - size,
                        size,
                    };
                }
            }
        }

        runs.advance();
    }

    runs.reset();
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_strings() {
        assert_eq!(similarity_ratio("abc123xyz", "abc123xyz"), 1.0);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(similarity_ratio("", "abc"), 0.0);
        assert_eq!(similarity_ratio("abc", ""), 0.0);
        assert_eq!(similarity_ratio("", ""), 0.0);
    }

    #[test]
    fn test_single_trailing_difference() {
        // "abc123xy" matches: 2 * 8 / 18
        assert!(approx(similarity_ratio("abc123xyz", "abc123xy0"), 16.0 / 18.0));
    }

    #[test]
    fn test_shifted_overlap() {
        assert!(approx(similarity_ratio("abcd", "bcde"), 0.75));
    }

    #[test]
    fn test_blocks_on_both_sides_are_counted() {
        // "ab" and "de" match around the differing middle character
        assert!(approx(similarity_ratio("abxde", "abyde"), 8.0 / 10.0));
    }

    #[test]
    fn test_disjoint_strings() {
        assert_eq!(similarity_ratio("aaaa", "bbbb"), 0.0);
    }

    #[test]
    fn test_is_order_sensitive_not_bag_of_chars() {
        // Same characters, reversed: only single-character blocks line up
        let ratio = similarity_ratio("abcdef", "fedcba");
        assert!(ratio < 0.5);
    }

    #[test]
    fn test_multibyte_characters() {
        assert!(approx(similarity_ratio("पेंशन", "पेंशन"), 1.0));
        assert!(similarity_ratio("पेंशन1", "पेंशन2") > 0.8);
    }

    #[test]
    fn test_long_fingerprints_with_one_edit() {
        let stored = "ab".repeat(2048);
        let mut candidate = stored.clone();
        candidate.pop();
        candidate.push('x');

        assert!(approx(similarity_ratio(&stored, &candidate), 2.0 * 4095.0 / 8192.0));
    }

    #[test]
    fn test_run_table_is_clean_between_blocks() {
        // Blocks found after the first one must not see stale run lengths
        assert!(approx(similarity_ratio("xabcyabc", "abcqabc"), 12.0 / 15.0));
    }

    #[test]
    fn test_ratio_is_within_bounds() {
        let pairs = [
            ("fp-chrome-120-linux", "fp-chrome-121-linux"),
            ("x", "xyz"),
            ("completely-different", "abc123xyz"),
        ];

        for (a, b) in pairs {
            let ratio = similarity_ratio(a, b);
            assert!((0.0..=1.0).contains(&ratio), "{a} vs {b} gave {ratio}");
        }
    }
}
