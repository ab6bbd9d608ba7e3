//! Text cleanup applied before classification, matching the conventions the
//! sentiment model was trained on: URLs dropped, mentions canonicalized to
//! `@user`, hashtags reduced to their word, whitespace collapsed.

use regex::Regex;
use std::sync::OnceLock;

struct CleanPatterns {
    url: Regex,
    mention: Regex,
    hashtag: Regex,
    spaces: Regex,
}

fn patterns() -> &'static CleanPatterns {
    static PATTERNS: OnceLock<CleanPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| CleanPatterns {
        url: Regex::new(r"http\S+").unwrap(),
        mention: Regex::new(r"@\w+").unwrap(),
        hashtag: Regex::new(r"#(\w+)").unwrap(),
        spaces: Regex::new(r"\s+").unwrap(),
    })
}

/// Normalize raw comment text. Total: `None` becomes the empty string and no
/// input can fail.
pub fn normalize(raw: Option<&str>) -> String {
    let Some(s) = raw else { return String::new() };
    let p = patterns();
    let s = p.url.replace_all(s, " ");
    let s = p.mention.replace_all(&s, "@user");
    let s = p.hashtag.replace_all(&s, "${1}");
    let s = p.spaces.replace_all(&s, " ");
    s.trim().to_string()
}

/// Hard cap at `max` characters, never splitting a UTF-8 code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
