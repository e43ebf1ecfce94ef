//! PriorityScorer - display ordering for window pickers without a query

use std::collections::{HashMap, HashSet};

use crate::domain::entities::WindowSnapshot;
use crate::domain::value_objects::WindowHandle;

/// Activity signals gathered by the caller
#[derive(Clone, Debug, Default)]
pub struct ActivitySignals {
    pub foreground: Option<WindowHandle>,
    pub active: HashSet<WindowHandle>,
    pub recent: HashSet<WindowHandle>,
    /// Search scores keyed by handle, when a query is also in play
    pub search_scores: HashMap<WindowHandle, i32>,
}

/// A window with its display priority
#[derive(Clone, Debug, PartialEq)]
pub struct WindowPriority {
    pub window: WindowSnapshot,
    pub total: i32,
    pub is_foreground: bool,
    pub is_active: bool,
    pub is_recent: bool,
    pub search_score: i32,
}

/// Per-process bonus, lowercase executable names
const APP_BONUSES: &[(&str, i32)] = &[
    // Development tools
    ("code.exe", 50),
    ("devenv.exe", 50),
    ("notepad++.exe", 40),
    ("sublime_text.exe", 40),
    ("atom.exe", 40),
    // Browsers and office
    ("chrome.exe", 30),
    ("firefox.exe", 30),
    ("edge.exe", 30),
    ("winword.exe", 25),
    ("excel.exe", 25),
    ("powerpnt.exe", 25),
    // Chat
    ("wechat.exe", 20),
    ("qq.exe", 20),
    ("dingding.exe", 20),
    ("teams.exe", 20),
    ("slack.exe", 20),
];

/// Priority weights
#[derive(Clone, Debug)]
pub struct PriorityScorer {
    pub foreground: i32,
    pub active: i32,
    pub recent: i32,
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorityScorer {
    pub fn new() -> Self {
        Self {
            foreground: 1000,
            active: 500,
            recent: 200,
        }
    }

    /// Score every window and sort by descending priority (stable)
    pub fn rank(&self, windows: &[WindowSnapshot], signals: &ActivitySignals) -> Vec<WindowPriority> {
        let mut out: Vec<WindowPriority> = windows.iter().map(|w| self.score(w, signals)).collect();
        out.sort_by(|a, b| b.total.cmp(&a.total));
        out
    }

    /// Score a single window
    pub fn score(&self, window: &WindowSnapshot, signals: &ActivitySignals) -> WindowPriority {
        let is_foreground = signals.foreground == Some(window.handle);
        let is_active = signals.active.contains(&window.handle);
        let is_recent = signals.recent.contains(&window.handle);
        let search_score = signals.search_scores.get(&window.handle).copied().unwrap_or(0);

        let mut total = search_score + app_bonus(&window.process_name) + placement_bonus(window);
        if is_foreground {
            total += self.foreground;
        }
        if is_active {
            total += self.active;
        }
        if is_recent {
            total += self.recent;
        }

        WindowPriority {
            window: window.clone(),
            total,
            is_foreground,
            is_active,
            is_recent,
            search_score,
        }
    }
}

/// Category bonus for well-known applications
pub fn app_bonus(process_name: &str) -> i32 {
    let name = process_name.to_lowercase();
    APP_BONUSES
        .iter()
        .find(|(p, _)| *p == name)
        .map(|(_, b)| *b)
        .unwrap_or(0)
}

/// Plausibility of the window being a main work window, by size and position
pub fn placement_bonus(window: &WindowSnapshot) -> i32 {
    let r = window.rect;
    let (w, h) = (r.width(), r.height());

    let size = if (800..=2000).contains(&w) && (600..=1500).contains(&h) {
        15
    } else if (400..800).contains(&w) && (300..600).contains(&h) {
        10
    } else if w >= 2000 || h >= 1500 {
        5
    } else {
        0
    };
    let position = if (0..=100).contains(&r.left) && (0..=100).contains(&r.top) {
        5
    } else {
        0
    };

    size + position
}
