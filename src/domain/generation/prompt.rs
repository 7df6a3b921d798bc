//! Prompt value object and the fixed instruction preludes.

use super::GenerationError;

/// Prompts longer than this (in characters) are summarized before generation.
pub const COMPRESSION_THRESHOLD: usize = 1000;

/// Instruction prelude for the main generation call.
pub const GENERATION_SYSTEM_PROMPT: &str = "You are an expert web designer and front-end developer. \
Turn the user's description into a complete, production-ready, single-file website. \
Rules:\n\
- Output ONLY the HTML document. No explanations, no markdown, no code fences.\n\
- The very first characters of your reply must be <!DOCTYPE html>.\n\
- Put all CSS in a <style> tag in the <head> and all JavaScript in a <script> tag before </body>.\n\
- Use semantic HTML5, a responsive layout, accessible colour contrast and alt text.\n\
- Use realistic placeholder copy that matches the description; never lorem ipsum.\n\
- Do not reference external assets other than Google Fonts and images from https://images.unsplash.com.";

/// Instruction prelude for the compression call.
pub const COMPRESSION_SYSTEM_PROMPT: &str = "You condense website briefs. \
Rewrite the user's description as a compact bullet list that keeps every concrete requirement: \
pages and sections, brand names, colours, copy that must appear verbatim, features and tone. \
Drop repetition and filler. Reply with the condensed brief only.";

/// A non-blank user description of the site to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Accepts any prompt with visible content.
    pub fn new(text: impl Into<String>) -> Result<Self, GenerationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(GenerationError::MissingPrompt);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Returns true if the prompt is long enough to be summarized first.
    pub fn needs_compression(&self, threshold: usize) -> bool {
        self.char_len() > threshold
    }
}
