//! Website aggregate entity.
//!
//! A website (project) is a generated site owned by one user. It holds the
//! prompt it was generated from and one HTML document per page.
//!
//! # Plan limits
//!
//! Page additions and AI iterations are gated against the owner's tier at the
//! moment of mutation. The project count itself lives on the profile and is
//! reserved by the handler before a website is constructed.

use serde::{Deserialize, Serialize};

use super::WebsiteError;
use crate::domain::foundation::{Timestamp, UserId, WebsiteId};
use crate::domain::subscription::{feature_gate, SubscriptionError, SubscriptionTier, TierLimits};

/// Maximum length for a website name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Path of the page created together with the website.
pub const HOME_PATH: &str = "/";

/// One page of a website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub path: String,
    pub html: String,
}

impl Page {
    pub fn new(path: impl Into<String>, html: impl Into<String>) -> Result<Self, WebsiteError> {
        let path = path.into();
        if !path.starts_with('/') || path.chars().any(char::is_whitespace) {
            return Err(WebsiteError::validation(
                "path",
                "Page path must start with '/' and contain no whitespace",
            ));
        }
        let html = html.into();
        if html.trim().is_empty() {
            return Err(WebsiteError::validation("html", "Page HTML cannot be empty"));
        }
        Ok(Self { path, html })
    }
}

/// Website aggregate.
///
/// # Invariants
///
/// - `name` is 1-200 characters, non-blank
/// - `pages` is never empty; the first page is the home page
/// - page paths are unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    id: WebsiteId,
    user_id: UserId,
    name: String,
    prompt: String,
    pages: Vec<Page>,
    /// AI edits applied after the initial generation.
    ai_iterations: u32,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Website {
    /// Create a website with its home page.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is blank/too long or the HTML is empty
    pub fn new(
        id: WebsiteId,
        user_id: UserId,
        name: String,
        prompt: String,
        html: String,
    ) -> Result<Self, WebsiteError> {
        Self::validate_name(&name)?;
        let home = Page::new(HOME_PATH, html)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            name: name.trim().to_string(),
            prompt,
            pages: vec![home],
            ai_iterations: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a website from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: WebsiteId,
        user_id: UserId,
        name: String,
        prompt: String,
        pages: Vec<Page>,
        ai_iterations: u32,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            prompt,
            pages,
            ai_iterations,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &WebsiteId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> u32 {
        u32::try_from(self.pages.len()).unwrap_or(u32::MAX)
    }

    /// HTML of the home page.
    pub fn home_html(&self) -> &str {
        self.pages.first().map(|p| p.html.as_str()).unwrap_or_default()
    }

    pub fn ai_iterations(&self) -> u32 {
        self.ai_iterations
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// # Errors
    ///
    /// - `Forbidden` if user is not the owner
    pub fn authorize(&self, user_id: &UserId) -> Result<(), WebsiteError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(WebsiteError::forbidden())
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a page.
    ///
    /// # Errors
    ///
    /// - `Subscription(LimitReached)` if the tier's page limit is reached
    /// - `ValidationFailed` if the path is malformed or already used
    pub fn add_page(&mut self, tier: SubscriptionTier, page: Page) -> Result<(), WebsiteError> {
        if !feature_gate::can_add_page(tier, self.page_count()) {
            let limit = TierLimits::for_tier(tier).max_pages_per_project;
            return Err(SubscriptionError::limit_reached("page", limit, tier).into());
        }
        if self.pages.iter().any(|p| p.path == page.path) {
            return Err(WebsiteError::validation(
                "path",
                format!("A page already exists at '{}'", page.path),
            ));
        }

        self.pages.push(page);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Replace a page's HTML with an AI-edited version.
    ///
    /// # Errors
    ///
    /// - `Subscription(LimitReached)` if the tier's iteration limit is reached
    /// - `PageNotFound` if `index` is out of range
    /// - `ValidationFailed` if the HTML is empty
    pub fn apply_iteration(
        &mut self,
        tier: SubscriptionTier,
        index: usize,
        html: String,
    ) -> Result<(), WebsiteError> {
        if !feature_gate::can_iterate(tier, self.ai_iterations) {
            let limit = TierLimits::for_tier(tier).max_ai_iterations;
            return Err(SubscriptionError::limit_reached("AI iteration", limit, tier).into());
        }
        if html.trim().is_empty() {
            return Err(WebsiteError::validation("html", "Page HTML cannot be empty"));
        }
        let page = self
            .pages
            .get_mut(index)
            .ok_or(WebsiteError::PageNotFound { index })?;

        page.html = html;
        self.ai_iterations += 1;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn validate_name(name: &str) -> Result<(), WebsiteError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(WebsiteError::validation("name", "Name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(WebsiteError::validation(
                "name",
                format!("Name cannot exceed {} characters", MAX_NAME_LENGTH),
            ));
        }
        Ok(())
    }
}
