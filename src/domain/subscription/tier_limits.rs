//! Tier-based feature limits configuration.
//!
//! Defines what features and limits are available for each subscription tier.

use super::{ExportFormat, Limit, SubscriptionTier};
use serde::{Deserialize, Serialize};

/// Feature limits for a subscription tier.
///
/// Defines the boundaries of what a user can do based on their subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// The tier these limits apply to.
    pub tier: SubscriptionTier,
    /// Website generations per calendar month.
    pub monthly_generations: Limit,
    /// Stored website projects.
    pub max_projects: Limit,
    /// Pages inside a single project.
    pub max_pages_per_project: Limit,
    /// AI refinement passes on a single project.
    pub max_ai_iterations: Limit,
    /// Whether generated sites may be downloaded at all.
    pub can_download: bool,
    /// Formats available for download.
    pub export_formats: Vec<ExportFormat>,
    /// Whether exported HTML carries the Sento badge.
    pub watermark: bool,
    /// Whether page analytics are visible.
    pub analytics: bool,
    /// Whether a custom domain may be attached.
    pub custom_domain: bool,
}

impl TierLimits {
    /// Get the limits for a specific tier.
    ///
    /// # Tier Configuration
    ///
    /// | Tier | Generations/mo | Projects | Pages | Iterations | Download | Formats | Watermark |
    /// |------|----------------|----------|-------|------------|----------|---------|-----------|
    /// | Free | 3 | 1 | 1 | 3 | No | html | Yes |
    /// | Basic | 25 | 5 | 5 | 10 | Yes | html | No |
    /// | Pro | 100 | 20 | 20 | 50 | Yes | html, react, vue | No |
    /// | Business | Unlimited | Unlimited | Unlimited | Unlimited | Yes | all | No |
    pub fn for_tier(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Free => Self {
                tier,
                monthly_generations: Limit::Limited(3),
                max_projects: Limit::Limited(1),
                max_pages_per_project: Limit::Limited(1),
                max_ai_iterations: Limit::Limited(3),
                can_download: false,
                export_formats: vec![ExportFormat::Html],
                watermark: true,
                analytics: false,
                custom_domain: false,
            },
            SubscriptionTier::Basic => Self {
                tier,
                monthly_generations: Limit::Limited(25),
                max_projects: Limit::Limited(5),
                max_pages_per_project: Limit::Limited(5),
                max_ai_iterations: Limit::Limited(10),
                can_download: true,
                export_formats: vec![ExportFormat::Html],
                watermark: false,
                analytics: true,
                custom_domain: false,
            },
            SubscriptionTier::Pro => Self {
                tier,
                monthly_generations: Limit::Limited(100),
                max_projects: Limit::Limited(20),
                max_pages_per_project: Limit::Limited(20),
                max_ai_iterations: Limit::Limited(50),
                can_download: true,
                export_formats: vec![ExportFormat::Html, ExportFormat::React, ExportFormat::Vue],
                watermark: false,
                analytics: true,
                custom_domain: true,
            },
            SubscriptionTier::Business => Self {
                tier,
                monthly_generations: Limit::Unlimited,
                max_projects: Limit::Unlimited,
                max_pages_per_project: Limit::Unlimited,
                max_ai_iterations: Limit::Unlimited,
                can_download: true,
                export_formats: ExportFormat::ALL.to_vec(),
                watermark: false,
                analytics: true,
                custom_domain: true,
            },
        }
    }

    /// The full table, lowest tier first.
    pub fn all() -> Vec<TierLimits> {
        SubscriptionTier::ALL
            .iter()
            .map(|tier| Self::for_tier(*tier))
            .collect()
    }

    /// Check whether a format is in this tier's export list.
    pub fn allows_export(&self, format: ExportFormat) -> bool {
        self.export_formats.contains(&format)
    }

    /// Lowest tier whose export list contains `format`.
    pub fn minimum_tier_for_export(format: ExportFormat) -> Option<SubscriptionTier> {
        SubscriptionTier::ALL
            .into_iter()
            .find(|tier| Self::for_tier(*tier).allows_export(format))
    }
}
