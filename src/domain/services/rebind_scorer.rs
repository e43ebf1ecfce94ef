//! RebindScorer - is a live window the successor of a dead binding?
//!
//! Same-process candidates are banded by case-insensitive title ratio.
//! Cross-process candidates only get a discounted title ratio. Titles that
//! still match once timestamps, versions and parenthesised tags are
//! stripped earn a structural bonus in both cases.

use regex::Regex;

use super::text_similarity::ratio_ignore_case;

/// Score at or above which a rebind is applied without asking
pub const AUTO_REBIND_THRESHOLD: f64 = 0.9;
/// Score at or above which a candidate is suggested
pub const SUGGEST_THRESHOLD: f64 = 0.7;
/// Cleaned-title ratio that counts as a structural match
pub const STRUCTURAL_MATCH_THRESHOLD: f64 = 0.8;

const STRUCTURAL_BONUS: f64 = 0.1;

/// Breakdown of one rebind comparison
#[derive(Clone, Debug, PartialEq)]
pub struct RebindScore {
    /// Final score in [0, 1]
    pub score: f64,
    /// Ratio of the raw lowercase titles
    pub title_similarity: f64,
    /// Ratio after stripping volatile substrings (0 when either side is empty)
    pub cleaned_similarity: f64,
    pub structural_match: bool,
    pub same_process: bool,
    pub reason: String,
}

/// Compiled title cleaners
pub struct RebindScorer {
    volatile: Vec<Regex>,
}

impl RebindScorer {
    pub fn new() -> Self {
        let volatile = [
            r"\d{4}-\d{2}-\d{2}",
            r"\d{4}/\d{2}/\d{2}",
            r"\d{1,2}:\d{2}(:\d{2})?",
            r"v?\d+\.\d+\.\d+",
            r"\([^)]*\)",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect();

        Self { volatile }
    }

    /// Strip dates, times, semver-ish versions and parenthesised tags
    pub fn clean_title(&self, title: &str) -> String {
        let mut out = title.to_string();
        for re in &self.volatile {
            out = re.replace_all(&out, "").into_owned();
        }
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Compare a dead binding against a live candidate
    pub fn score(
        &self,
        old_title: &str,
        old_process: &str,
        new_title: &str,
        new_process: &str,
    ) -> RebindScore {
        let title_similarity = ratio_ignore_case(old_title, new_title);

        let clean_old = self.clean_title(old_title);
        let clean_new = self.clean_title(new_title);
        let cleaned_similarity = if clean_old.is_empty() || clean_new.is_empty() {
            0.0
        } else {
            ratio_ignore_case(&clean_old, &clean_new)
        };
        let structural_match = cleaned_similarity >= STRUCTURAL_MATCH_THRESHOLD;

        let same_process = old_process.eq_ignore_ascii_case(new_process);
        let (base, mut reason) = if same_process {
            let s = title_similarity;
            if s > 0.8 {
                (
                    0.85 + 0.15 * (s - 0.8) / 0.2,
                    format!("same process ({}), high title similarity", new_process),
                )
            } else if s > 0.5 {
                (
                    0.70 + 0.15 * (s - 0.5) / 0.3,
                    format!("same process ({}), medium title similarity", new_process),
                )
            } else {
                (0.7, format!("same process ({})", new_process))
            }
        } else {
            let s = title_similarity;
            if s > 0.8 {
                (s * 0.7, "high title similarity".to_string())
            } else if s > 0.5 {
                (s * 0.6, "medium title similarity".to_string())
            } else {
                (s * 0.5, "low title similarity".to_string())
            }
        };

        let mut score = base;
        if structural_match {
            score += STRUCTURAL_BONUS;
            reason.push_str(", structural match");
        }

        RebindScore {
            score: score.clamp(0.0, 1.0),
            title_similarity,
            cleaned_similarity,
            structural_match,
            same_process,
            reason,
        }
    }
}

impl Default for RebindScorer {
    fn default() -> Self {
        Self::new()
    }
}
