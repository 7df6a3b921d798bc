//! Rendering a website page into a downloadable document.
//!
//! HTML exports are returned as-is (plus the badge for watermarked tiers).
//! Framework exports embed the HTML in a single component that mounts it.

use serde_json::Value;

use super::Website;
use crate::domain::generation::html::apply_watermark;
use crate::domain::subscription::ExportFormat;

/// A rendered export, ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub format: ExportFormat,
    pub file_name: String,
    pub content_type: &'static str,
    pub content: String,
}

/// Render the website's home page in `format`.
pub fn render(website: &Website, format: ExportFormat, watermark: bool) -> ExportedDocument {
    let html = if watermark {
        apply_watermark(website.home_html())
    } else {
        website.home_html().to_string()
    };

    let component = component_name(website.name());
    let content = match format {
        ExportFormat::Html => html,
        ExportFormat::React => react_component(&component, &html),
        ExportFormat::Vue => vue_component(&component, &html),
        ExportFormat::Nextjs => next_page(&html),
    };

    ExportedDocument {
        format,
        file_name: format!("{}.{}", slug(website.name()), format.file_extension()),
        content_type: format.content_type(),
        content,
    }
}

fn js_string(html: &str) -> String {
    Value::String(html.to_string()).to_string()
}

fn react_component(name: &str, html: &str) -> String {
    format!(
        "import React from 'react';\n\n\
         const html = {};\n\n\
         export default function {}() {{\n  \
         return <div dangerouslySetInnerHTML={{{{ __html: html }}}} />;\n\
         }}\n",
        js_string(html),
        name
    )
}

fn vue_component(name: &str, html: &str) -> String {
    format!(
        "<template>\n  <div v-html=\"html\"></div>\n</template>\n\n\
         <script>\n\
         export default {{\n  \
         name: '{}',\n  \
         data() {{\n    \
         return {{ html: {} }};\n  \
         }},\n\
         }};\n\
         </script>\n",
        name,
        js_string(html)
    )
}

fn next_page(html: &str) -> String {
    format!(
        "const html = {};\n\n\
         export default function Page() {{\n  \
         return <main dangerouslySetInnerHTML={{{{ __html: html }}}} />;\n\
         }}\n",
        js_string(html)
    )
}

/// PascalCase identifier built from the website name.
fn component_name(name: &str) -> String {
    let mut out: String = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    if out.is_empty() {
        return "Website".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert_str(0, "Site");
    }
    out
}

/// Lowercase, dash-separated file stem.
fn slug(name: &str) -> String {
    let words: Vec<String> = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
        .collect();

    if words.is_empty() {
        "website".to_string()
    } else {
        words.join("-")
    }
}
