//! Windows path text helpers
//!
//! Contexts store paths as the text the OS reported (`C:\Users\Dev`), so
//! these operate on strings and accept either separator.

use percent_encoding::percent_decode_str;

const SEPARATORS: [char; 2] = ['\\', '/'];

/// Canonical comparison form: backslashes, no trailing separator, lowercase
pub fn normalize(path: &str) -> String {
    path.trim()
        .replace('/', "\\")
        .trim_end_matches('\\')
        .to_lowercase()
}

/// Same location after normalization. Empty paths never match.
pub fn paths_match(a: &str, b: &str) -> bool {
    let (a, b) = (normalize(a), normalize(b));
    !a.is_empty() && a == b
}

/// Last path component (`C:\Projects\Foo\` -> `Foo`)
pub fn basename(path: &str) -> &str {
    path.trim_end_matches(SEPARATORS)
        .rsplit(SEPARATORS)
        .next()
        .unwrap_or("")
}

/// Everything before the last component (`C:\p\main.rs` -> `C:\p`)
pub fn parent(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches(SEPARATORS);
    let idx = trimmed.rfind(SEPARATORS)?;
    let parent = &trimmed[..idx];
    // Keep the root separator of a drive ("C:\")
    if parent.ends_with(':') {
        Some(&trimmed[..idx + 1])
    } else {
        Some(parent)
    }
}

/// Drive-letter (`C:\...`) or UNC (`\\server\share`) path
pub fn is_absolute_windows(path: &str) -> bool {
    let bytes = path.as_bytes();
    let drive = bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/');
    drive || path.starts_with("\\\\")
}

/// Git-Bash style `/c/Users/Dev` -> `C:\Users\Dev`
pub fn mingw_to_windows(path: &str) -> Option<String> {
    let rest = path.trim().strip_prefix('/')?;
    let mut parts = rest.split('/');
    let drive = parts.next()?;
    let mut chars = drive.chars();
    let letter = chars.next()?;
    if chars.next().is_some() || !letter.is_ascii_alphabetic() {
        return None;
    }
    let tail: Vec<&str> = parts.filter(|p| !p.is_empty()).collect();
    Some(format!("{}:\\{}", letter.to_ascii_uppercase(), tail.join("\\")))
}

/// `file:///C:/Projects/My%20App` -> `C:\Projects\My App`;
/// `file://server/share` -> `\\server\share`. None for other schemes.
pub fn file_url_to_path(url: &str) -> Option<String> {
    let decoded = |s: &str| percent_decode_str(s).decode_utf8_lossy().replace('/', "\\");

    if let Some(local) = url.strip_prefix("file:///") {
        return Some(decoded(local));
    }
    url.strip_prefix("file://")
        .filter(|host| !host.is_empty())
        .map(|unc| format!("\\\\{}", decoded(unc)))
}
