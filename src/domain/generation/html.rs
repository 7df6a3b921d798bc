//! Post-processing of model output into a validated HTML document.

use super::GenerationError;

/// Every accepted document starts with this marker (case-insensitive).
pub const DOCUMENT_MARKER: &str = "<!DOCTYPE html>";

const FENCE: &str = "```";

/// HTML badge appended to free-tier exports.
const WATERMARK: &str = r#"<a href="https://sento.app" style="position:fixed;bottom:12px;right:12px;z-index:2147483647;padding:6px 10px;border-radius:6px;background:#111;color:#fff;font:12px/1.2 system-ui,sans-serif;text-decoration:none;">Built with Sento</a>"#;

/// A document that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHtml(String);

impl GeneratedHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Strip markdown code-fence artifacts the model sometimes wraps its reply in.
///
/// Only a reply that opens with a fence is unwrapped: the opening line
/// (with its language tag) and a trailing fence are dropped. Anything else,
/// including a document that carries fenced snippets in its own content, is
/// returned trimmed but otherwise untouched.
pub fn sanitize(raw: &str) -> String {
    let trimmed = raw.trim();

    if starts_with_marker(trimmed) {
        return trimmed.to_string();
    }

    let Some(after_open) = trimmed.strip_prefix(FENCE) else {
        return trimmed.to_string();
    };

    // Skip the language tag line (```html).
    let body = match after_open.find('\n') {
        Some(i) => &after_open[i + 1..],
        None => "",
    };
    let body = body.trim_end();
    let body = body.strip_suffix(FENCE).unwrap_or(body);

    body.trim().to_string()
}

fn starts_with_marker(text: &str) -> bool {
    text.get(..DOCUMENT_MARKER.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(DOCUMENT_MARKER))
}

/// Accept the document only if it starts with [`DOCUMENT_MARKER`].
pub fn validate(html: String) -> Result<GeneratedHtml, GenerationError> {
    let trimmed = html.trim();

    if !starts_with_marker(trimmed) {
        return Err(GenerationError::InvalidOutput {
            preview: trimmed.chars().take(120).collect(),
        });
    }

    Ok(GeneratedHtml(trimmed.to_string()))
}

/// Insert the Sento badge just before `</body>`, or append when absent.
pub fn apply_watermark(html: &str) -> String {
    match html.to_ascii_lowercase().rfind("</body>") {
        Some(idx) => {
            let mut out = String::with_capacity(html.len() + WATERMARK.len() + 1);
            out.push_str(&html[..idx]);
            out.push_str(WATERMARK);
            out.push('\n');
            out.push_str(&html[idx..]);
            out
        }
        None => format!("{}\n{}", html, WATERMARK),
    }
}
