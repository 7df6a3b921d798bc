//! In-memory repository adapters for development and tests.

mod analytics_repository;
mod profile_repository;
mod website_repository;

pub use analytics_repository::InMemoryAnalyticsRepository;
pub use profile_repository::InMemoryProfileRepository;
pub use website_repository::InMemoryWebsiteRepository;
