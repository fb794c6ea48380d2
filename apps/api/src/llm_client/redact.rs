//! Credential redaction for error text headed to logs or the UI.

use std::sync::OnceLock;

use regex::Regex;

/// Matches provider API keys: an `sk-` or `sk-ant-` prefix followed by 20+
/// alphanumeric characters.
fn api_key_pattern() -> &'static Regex {
    static API_KEY_RE: OnceLock<Regex> = OnceLock::new();
    API_KEY_RE.get_or_init(|| Regex::new(r"sk-(?:ant-)?[a-zA-Z0-9]{20,}").unwrap())
}

/// Replaces every key-shaped substring with its first 5 and last 4
/// characters joined by an ellipsis. Text without a key passes through
/// unchanged. Must be applied before any error reaches a log sink or a
/// router response.
pub fn redact_api_keys(text: &str) -> String {
    api_key_pattern()
        .replace_all(text, |caps: &regex::Captures| {
            let key = &caps[0];
            format!("{}...{}", &key[..5], &key[key.len() - 4..])
        })
        .into_owned()
}

/// Masked form for at-rest display: first 3 and last 4 characters kept,
/// the middle replaced by a bounded run of bullet characters. Counts in
/// chars, not bytes; saved keys are arbitrary user input.
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() < 10 {
        return api_key.to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    let bullets = "\u{25CF}".repeat((chars.len() - 7).min(15));
    format!("{head}{bullets}{tail}")
}
