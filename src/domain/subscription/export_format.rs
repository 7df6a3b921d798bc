//! Export formats a generated website can be downloaded in.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Download/export target for a generated site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Plain static HTML document.
    Html,
    /// React function component.
    React,
    /// Vue single-file component.
    Vue,
    /// Next.js page module.
    Nextjs,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Html,
        ExportFormat::React,
        ExportFormat::Vue,
        ExportFormat::Nextjs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::React => "react",
            ExportFormat::Vue => "vue",
            ExportFormat::Nextjs => "nextjs",
        }
    }

    /// File extension of the exported artifact.
    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::React => "jsx",
            ExportFormat::Vue => "vue",
            ExportFormat::Nextjs => "tsx",
        }
    }

    /// MIME type of the exported artifact.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Html => "text/html; charset=utf-8",
            _ => "text/plain; charset=utf-8",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "react" => Ok(ExportFormat::React),
            "vue" => Ok(ExportFormat::Vue),
            "nextjs" | "next" => Ok(ExportFormat::Nextjs),
            other => Err(ValidationError::invalid_format(
                "format",
                format!("unsupported export format '{}'", other),
            )),
        }
    }
}
