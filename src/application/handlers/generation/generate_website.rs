//! GenerateWebsiteHandler - Command handler for the prompt → HTML pipeline.
//!
//! RECEIVE → COMPRESS (long prompts only, best effort) → GENERATE →
//! SANITIZE → VALIDATE. Authenticated callers pay one generation from their
//! monthly quota, refunded if the pipeline fails.

use std::sync::Arc;

use crate::application::handlers::usage::UsageQuota;
use crate::domain::foundation::UserId;
use crate::domain::generation::{
    html, GeneratedHtml, GenerationError, Prompt, COMPRESSION_SYSTEM_PROMPT,
    COMPRESSION_THRESHOLD, GENERATION_SYSTEM_PROMPT,
};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole};

/// Tunables for the pipeline.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// Prompts longer than this many characters are compressed first.
    pub compression_threshold: usize,
    pub max_tokens: u32,
    pub compression_max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            compression_threshold: COMPRESSION_THRESHOLD,
            max_tokens: 8192,
            compression_max_tokens: 1024,
        }
    }
}

/// Command to generate a website from a prompt.
#[derive(Debug, Clone)]
pub struct GenerateWebsiteCommand {
    pub prompt: String,
    /// Present when the caller is authenticated; enables quota accounting.
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone)]
pub struct GenerateWebsiteResult {
    pub html: GeneratedHtml,
    /// True when the prompt was rewritten by the compression step.
    pub compressed: bool,
}

/// Handler for website generation.
pub struct GenerateWebsiteHandler {
    provider: Option<Arc<dyn AIProvider>>,
    quota: UsageQuota,
    settings: GenerationSettings,
}

impl GenerateWebsiteHandler {
    /// `provider` is `None` when no API key is configured; every request
    /// then fails with `NotConfigured`.
    pub fn new(
        provider: Option<Arc<dyn AIProvider>>,
        quota: UsageQuota,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            provider,
            quota,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateWebsiteCommand,
    ) -> Result<GenerateWebsiteResult, GenerationError> {
        let prompt = Prompt::new(cmd.prompt)?;
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| GenerationError::NotConfigured("AI API key is not set".to_string()))?;

        let reservation = match &cmd.user_id {
            Some(user_id) => Some(self.quota.reserve_generation(user_id).await?),
            None => None,
        };

        let outcome = self.run(provider.as_ref(), prompt, cmd.user_id).await;

        if let (Err(err), Some(reservation)) = (&outcome, &reservation) {
            tracing::warn!(user_id = %reservation.user_id, error = %err, "Generation failed, releasing quota");
            if let Err(release_err) = self.quota.release_generation(reservation).await {
                tracing::error!(error = %release_err, "Failed to release generation quota");
            }
        }

        outcome
    }

    async fn run(
        &self,
        provider: &dyn AIProvider,
        prompt: Prompt,
        user_id: Option<UserId>,
    ) -> Result<GenerateWebsiteResult, GenerationError> {
        let (prompt_text, compressed) = if prompt.needs_compression(self.settings.compression_threshold)
        {
            match self.compress(provider, &prompt, user_id.clone()).await {
                Some(shorter) => (shorter, true),
                None => (prompt.into_string(), false),
            }
        } else {
            (prompt.into_string(), false)
        };

        let request = CompletionRequest::new()
            .with_system_prompt(GENERATION_SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt_text)
            .with_max_tokens(self.settings.max_tokens)
            .with_user(user_id);

        let response = provider.complete(request).await.map_err(generation_error)?;
        let html = html::validate(html::sanitize(&response.content))?;

        tracing::info!(
            model = %response.model,
            compressed,
            bytes = html.as_str().len(),
            "Website generated"
        );

        Ok(GenerateWebsiteResult { html, compressed })
    }

    /// One compression call. Any failure falls back to the original prompt.
    async fn compress(
        &self,
        provider: &dyn AIProvider,
        prompt: &Prompt,
        user_id: Option<UserId>,
    ) -> Option<String> {
        let request = CompletionRequest::new()
            .with_system_prompt(COMPRESSION_SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt.as_str())
            .with_max_tokens(self.settings.compression_max_tokens)
            .with_user(user_id);

        match provider.complete(request).await {
            Ok(response) if !response.content.trim().is_empty() => {
                tracing::debug!(
                    original_chars = prompt.char_len(),
                    compressed_chars = response.content.chars().count(),
                    "Prompt compressed"
                );
                Some(response.content.trim().to_string())
            }
            Ok(_) => {
                tracing::warn!("Prompt compression returned nothing, using original prompt");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "Prompt compression failed, using original prompt");
                None
            }
        }
    }
}

fn generation_error(err: AIError) -> GenerationError {
    match err {
        AIError::NotConfigured(message) => GenerationError::NotConfigured(message),
        AIError::Upstream { status, body } => GenerationError::Upstream { status, body },
        other => GenerationError::Provider(other.to_string()),
    }
}
