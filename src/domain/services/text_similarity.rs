//! Text similarity primitives shared by the scorers
//!
//! `ratio` is the Ratcliff/Obershelp "gestalt" similarity: twice the number
//! of characters in matching blocks divided by the total length. Matching
//! blocks are found by taking the longest common substring and recursing
//! on the pieces to its left and right.

/// Similarity of two strings in [0, 1], compared char by char (case-sensitive)
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_chars(&a, &b);
    2.0 * matched as f64 / total as f64
}

/// Case-insensitive `ratio`
pub fn ratio_ignore_case(a: &str, b: &str) -> f64 {
    ratio(&a.to_lowercase(), &b.to_lowercase())
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut stack = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = stack.pop() {
        let (i, j, size) = longest_common_block(a, b, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        total += size;
        if a_lo < i && b_lo < j {
            stack.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            stack.push((i + size, a_hi, j + size, b_hi));
        }
    }

    total
}

/// Longest common substring of a[a_lo..a_hi] and b[b_lo..b_hi].
/// Ties resolve to the earliest block in `a`, then in `b`.
fn longest_common_block(
    a: &[char],
    b: &[char],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let width = b_hi - b_lo;
    let mut best = (a_lo, b_lo, 0);
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for i in a_lo..a_hi {
        for j in b_lo..b_hi {
            let k = j - b_lo + 1;
            if a[i] == b[j] {
                curr[k] = prev[k - 1] + 1;
                let len = curr[k];
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            } else {
                curr[k] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

/// Levenshtein edit distance (insert, delete, substitute; all cost 1)
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
