//! Text normalization and token reduction for document profiles.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// A lowercase letter followed by a run of uppercase letters
static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])([A-Z]+)").expect("valid camel-case pattern"));

/// Tokens of this many characters or fewer are dropped
pub const MIN_TOKEN_CHARS: usize = 3;

/// Conservative cleanup: drop control characters, fold typographic quotes,
/// dashes and ellipses to ASCII, collapse whitespace runs, trim.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if ch.is_control() {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => out.push('"'),
            '\u{2010}'..='\u{2015}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            _ => out.push(ch),
        }
    }

    out
}

/// Split on whitespace and punctuation boundaries (Unicode word segmentation).
///
/// Word-internal periods, colons and apostrophes also split, so qualified
/// names such as `java.util.List` yield one token per segment.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .flat_map(|word| word.split(['.', ':', '\'']))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Break `parseHTTPRequest` into `parse`, `HTTPRequest`.
///
/// A split happens between a lowercase letter and the run of uppercase
/// letters that follows it.
pub fn split_camel_case(token: &str) -> Vec<String> {
    CAMEL_BOUNDARY
        .replace_all(token, "$1 $2")
        .split(' ')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep tokens longer than [`MIN_TOKEN_CHARS`], stripped to ASCII
/// alphanumerics and lowercased. Tokens the strip empties are dropped.
pub fn purge(token: &str) -> Option<String> {
    if token.chars().count() <= MIN_TOKEN_CHARS {
        return None;
    }
    let cleaned: String = token
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}
