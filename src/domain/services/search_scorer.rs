//! SearchScorer - ranks windows against a free-text query
//!
//! Each keyword is scored against the title and the process name. The
//! cheapest evidence wins: a substring hit, then initials, then an
//! in-order subsequence, then a bounded edit distance against single words.

use regex::RegexBuilder;

use super::text_similarity::levenshtein;
use crate::domain::entities::WindowSnapshot;

/// A window with its query score
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredWindow {
    pub window: WindowSnapshot,
    pub score: i32,
}

/// Keyword scoring weights
#[derive(Clone, Debug)]
pub struct SearchScorer {
    /// Whole text equals the keyword
    pub exact: i32,
    /// Text starts with the keyword
    pub prefix: i32,
    /// Text ends with the keyword
    pub suffix: i32,
    /// Keyword appears anywhere
    pub contains: i32,
    /// Keyword spells the initials of the text (or of one " - " segment)
    pub initials: i32,
    /// Most keyword characters appear in order
    pub subsequence: i32,
    /// Keyword is a small edit away from one word
    pub fuzzy: i32,
    /// Title multiplier (process name counts once)
    pub title_weight: i32,
    /// Share of keyword characters a subsequence hit needs
    pub subsequence_ratio: f64,
}

impl Default for SearchScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchScorer {
    pub fn new() -> Self {
        Self {
            exact: 100,
            prefix: 80,
            suffix: 60,
            contains: 40,
            initials: 35,
            subsequence: 25,
            fuzzy: 15,
            title_weight: 2,
            subsequence_ratio: 0.6,
        }
    }

    /// Rank windows; windows with no positive score are dropped.
    /// Ties keep the input order.
    pub fn rank(&self, windows: &[WindowSnapshot], query: &str) -> Vec<ScoredWindow> {
        let keywords = split_query(query);
        if keywords.is_empty() {
            return windows
                .iter()
                .map(|w| ScoredWindow {
                    window: w.clone(),
                    score: 0,
                })
                .collect();
        }

        let mut results: Vec<ScoredWindow> = windows
            .iter()
            .filter_map(|w| {
                let score = self.score_window(&w.title, &w.process_name, &keywords);
                (score > 0).then(|| ScoredWindow {
                    window: w.clone(),
                    score,
                })
            })
            .collect();

        results.sort_by(|a, b| b.score.cmp(&a.score));
        results
    }

    /// Combined score of a title/process pair
    pub fn score_window(&self, title: &str, process_name: &str, keywords: &[String]) -> i32 {
        self.score_text(title, keywords) * self.title_weight + self.score_text(process_name, keywords)
    }

    /// Score one text against lowercase keywords
    pub fn score_text(&self, text: &str, keywords: &[String]) -> i32 {
        if text.is_empty() {
            return 0;
        }
        let text_lower = text.to_lowercase();
        keywords
            .iter()
            .map(|kw| self.score_keyword(&text_lower, kw))
            .sum()
    }

    fn score_keyword(&self, text: &str, keyword: &str) -> i32 {
        if keyword.is_empty() {
            return 0;
        }

        if text.contains(keyword) {
            let base = if text == keyword {
                self.exact
            } else if text.starts_with(keyword) {
                self.prefix
            } else if text.ends_with(keyword) {
                self.suffix
            } else {
                self.contains
            };
            return base + keyword.chars().count() as i32;
        }

        if matches_initials(text, keyword) {
            self.initials
        } else if subsequence_share(text, keyword) >= self.subsequence_ratio {
            self.subsequence
        } else if matches_fuzzy(text, keyword) {
            self.fuzzy
        } else {
            0
        }
    }
}

/// Lowercase, whitespace separated, de-duplicated keywords (first occurrence wins)
pub fn split_query(query: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in query.split_whitespace() {
        let word = word.to_lowercase();
        if !keywords.contains(&word) {
            keywords.push(word);
        }
    }
    keywords
}

/// Wrap every case-insensitive keyword occurrence in `**` markers,
/// preserving the text's own casing
pub fn highlight(text: &str, keywords: &[String]) -> String {
    let mut parts: Vec<&String> = keywords.iter().filter(|k| !k.is_empty()).collect();
    if text.is_empty() || parts.is_empty() {
        return text.to_string();
    }
    // Longest first so "code" beats "co" inside the alternation
    parts.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
    let pattern = parts
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");

    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.replace_all(text, "**$0**").into_owned(),
        Err(_) => text.to_string(),
    }
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn initials_of(text: &str) -> String {
    words(text).filter_map(|w| w.chars().next()).collect()
}

fn matches_initials(text: &str, keyword: &str) -> bool {
    if keyword.chars().count() < 2 {
        return false;
    }
    initials_of(text) == keyword || text.split(" - ").any(|seg| initials_of(seg) == keyword)
}

/// Share of the keyword's alphanumeric characters found in order in the text
fn subsequence_share(text: &str, keyword: &str) -> f64 {
    let needle: Vec<char> = keyword.chars().filter(|c| c.is_alphanumeric()).collect();
    if needle.len() < 2 {
        return 0.0;
    }
    let hay: Vec<char> = text.chars().filter(|c| c.is_alphanumeric()).collect();

    let mut pos = 0;
    let mut found = 0;
    for c in &needle {
        if let Some(offset) = hay[pos..].iter().position(|h| h == c) {
            pos += offset + 1;
            found += 1;
        }
    }
    found as f64 / needle.len() as f64
}

fn matches_fuzzy(text: &str, keyword: &str) -> bool {
    let len = keyword.chars().count();
    if len < 3 {
        return false;
    }
    let max_distance = (len / 3).min(2);
    words(text).any(|w| levenshtein(w, keyword) <= max_distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::WindowHandle;

    fn kw(query: &str) -> Vec<String> {
        split_query(query)
    }

    #[test]
    fn test_split_query_dedups() {
        assert_eq!(kw("  Code  code RUST "), vec!["code", "rust"]);
        assert!(kw("   ").is_empty());
    }

    #[test]
    fn test_substring_tiers() {
        let s = SearchScorer::new();
        assert_eq!(s.score_text("code", &kw("code")), 104);
        assert_eq!(s.score_text("code.exe", &kw("code")), 84);
        assert_eq!(s.score_text("vscode", &kw("code")), 64);
        assert_eq!(s.score_text("my code editor", &kw("code")), 44);
    }

    #[test]
    fn test_initials_subsequence_fuzzy() {
        let s = SearchScorer::new();
        assert_eq!(s.score_text("Visual Studio Code", &kw("vsc")), 35);
        assert_eq!(s.score_text("main.rs - Visual Studio Code", &kw("vsc")), 35);
        // t,r,m in order ignoring separators
        assert_eq!(s.score_text("Windows-Terminal", &kw("trml")), 25);
        assert_eq!(s.score_text("Google Chrome", &kw("chorme")), 25);
        assert_eq!(s.score_text("Google Chrome", &kw("zzz")), 0);

        assert!(matches_fuzzy("google chrome", "chrxme"));
        assert!(!matches_fuzzy("google chrome", "ch"));
    }

    #[test]
    fn test_rank_weights_title_and_sorts() {
        let windows = vec![
            WindowSnapshot::new(WindowHandle(1), "Inbox", "code.exe"),
            WindowSnapshot::new(WindowHandle(2), "code review", "firefox.exe"),
            WindowSnapshot::new(WindowHandle(3), "Calculator", "calc.exe"),
        ];
        let ranked = SearchScorer::new().rank(&windows, "code");

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].window.handle, WindowHandle(2));
        assert_eq!(ranked[0].score, 84 * 2);
        assert_eq!(ranked[1].score, 84);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let s = SearchScorer::new();
        let a = s.score_window("main.rs - ctxswitch - Visual Studio Code", "Code.exe", &kw("ctx vsc"));
        let b = s.score_window("main.rs - ctxswitch - Visual Studio Code", "Code.exe", &kw("ctx vsc"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_highlight_preserves_case() {
        assert_eq!(highlight("Visual Studio Code", &kw("code")), "Visual Studio **Code**");
        assert_eq!(highlight("abc", &[]), "abc");
        assert_eq!(highlight("a+b", &kw("+")), "a**+**b");
    }
}
