//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresProfileRepository` - Tier and usage counters with atomic reservations
//! - `PostgresWebsiteRepository` - Websites with their pages as JSONB
//! - `PostgresAnalyticsRepository` - View counters and form submissions

mod analytics_repository;
mod profile_repository;
mod website_repository;

pub use analytics_repository::PostgresAnalyticsRepository;
pub use profile_repository::PostgresProfileRepository;
pub use website_repository::PostgresWebsiteRepository;
