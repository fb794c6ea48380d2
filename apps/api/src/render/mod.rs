//! Render/Copy Layer — converts the constrained markdown subset used by
//! generated proposals into display markup, and packages clipboard
//! payloads in rich and plain forms.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

fn bold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").unwrap())
}

fn italic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*([^*\n]+?)\*").unwrap())
}

fn h3_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^### (.+)$").unwrap())
}

fn h2_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^## (.+)$").unwrap())
}

fn h1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^# (.+)$").unwrap())
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[•\-*]\s+(.+)$").unwrap())
}

fn numbered_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^(\d+)\.\s+(.+)$").unwrap())
}

/// Translates the proposal's markdown subset into presentational markup:
/// `**bold**`, `*italic*`, `#`/`##`/`###` headings, bullet and numbered
/// lines, and paragraph breaks. Anything outside the recognized subset
/// passes through literally, unmatched markers included.
pub fn markdown_to_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Bold before italic: once double markers are consumed, the italic
    // pattern can no longer partially match them.
    let html = bold_re().replace_all(text, "<strong>$1</strong>");
    let html = italic_re().replace_all(&html, "<em>$1</em>");

    // Longest heading marker first so ### is not matched as #.
    let html = h3_re().replace_all(&html, "<h3>$1</h3>");
    let html = h2_re().replace_all(&html, "<h2>$1</h2>");
    let html = h1_re().replace_all(&html, "<h1>$1</h1>");

    // List lines must be rewritten while the line structure is intact.
    let html = bullet_re().replace_all(&html, r#"<div class="bullet">• $1</div>"#);
    let html = numbered_re().replace_all(&html, r#"<div class="bullet">$1. $2</div>"#);

    html.replace("\n\n", "<br><br>").replace('\n', "<br>")
}

/// Clipboard payload carrying the rendered rich form alongside the
/// original plain text. When rich copy is unavailable, the fallback keeps
/// only the plain form.
#[derive(Debug, Clone, Serialize)]
pub struct CopyPayload {
    /// Rendered markup, wrapped for paste into rich-text editors. `None`
    /// in the plain-only fallback.
    pub html: Option<String>,
    /// The original proposal text, always present.
    pub plain: String,
}

impl CopyPayload {
    pub fn rich(proposal: &str) -> Self {
        let wrapped = format!(
            r#"<div style="font-family: Arial, sans-serif; line-height: 1.5; color: #333;">{}</div>"#,
            markdown_to_html(proposal)
        );
        CopyPayload {
            html: Some(wrapped),
            plain: proposal.to_string(),
        }
    }

    pub fn plain_only(proposal: &str) -> Self {
        CopyPayload {
            html: None,
            plain: proposal.to_string(),
        }
    }
}
