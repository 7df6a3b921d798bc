//! Website repository port.
//!
//! Defines the contract for persisting and retrieving Website aggregates.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId, WebsiteId};
use crate::domain::website::Website;

/// Repository port for Website aggregate persistence.
#[async_trait]
pub trait WebsiteRepository: Send + Sync {
    /// Save a new website.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, website: &Website) -> Result<(), DomainError>;

    /// Update an existing website (name, pages, iteration count).
    ///
    /// # Errors
    ///
    /// - `WebsiteNotFound` if the website doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, website: &Website) -> Result<(), DomainError>;

    /// Find a website by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &WebsiteId) -> Result<Option<Website>, DomainError>;

    /// Find all websites owned by a user, most recently updated first.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Website>, DomainError>;

    /// Delete a website.
    ///
    /// # Errors
    ///
    /// - `WebsiteNotFound` if the website doesn't exist
    async fn delete(&self, id: &WebsiteId) -> Result<(), DomainError>;
}
