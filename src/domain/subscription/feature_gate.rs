//! Feature-gate predicates.
//!
//! Pure functions over a tier and reconciled usage. Callers obtain
//! [`ReconciledUsage`] from [`UsageCounters::reconcile`](super::UsageCounters::reconcile),
//! so nothing here can see a counter from a previous month.

use serde::Serialize;

use super::{ExportFormat, Limit, ReconciledUsage, SubscriptionTier, TierLimits, UsageMonth};

/// Returns true if `used` generations exhaust the tier's monthly allowance.
pub fn has_reached_monthly_limit(used: u32, tier: SubscriptionTier) -> bool {
    TierLimits::for_tier(tier).monthly_generations.is_reached(used)
}

/// Whether another generation is allowed this month.
pub fn can_generate(tier: SubscriptionTier, usage: &ReconciledUsage) -> bool {
    !has_reached_monthly_limit(usage.generations_this_month(), tier)
}

/// Whether another project may be created.
pub fn can_create_project(tier: SubscriptionTier, usage: &ReconciledUsage) -> bool {
    !TierLimits::for_tier(tier)
        .max_projects
        .is_reached(usage.project_count())
}

/// Whether a project holding `current_pages` pages may gain another.
pub fn can_add_page(tier: SubscriptionTier, current_pages: u32) -> bool {
    !TierLimits::for_tier(tier)
        .max_pages_per_project
        .is_reached(current_pages)
}

/// Whether a project that has been refined `iterations` times may be refined again.
pub fn can_iterate(tier: SubscriptionTier, iterations: u32) -> bool {
    !TierLimits::for_tier(tier)
        .max_ai_iterations
        .is_reached(iterations)
}

/// Whether the tier may download generated sites at all.
pub fn can_download(tier: SubscriptionTier) -> bool {
    TierLimits::for_tier(tier).can_download
}

/// Whether the tier may view page analytics.
pub fn can_view_analytics(tier: SubscriptionTier) -> bool {
    TierLimits::for_tier(tier).analytics
}

/// Generations left this month.
pub fn remaining_generations(tier: SubscriptionTier, usage: &ReconciledUsage) -> Limit {
    TierLimits::for_tier(tier)
        .monthly_generations
        .remaining(usage.generations_this_month())
}

/// Returns true if counters stamped with `last_reset` must be zeroed in `current`.
pub fn needs_monthly_reset(last_reset: UsageMonth, current: UsageMonth) -> bool {
    last_reset != current
}

/// Result of an export-format check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPermission {
    pub format: ExportFormat,
    pub allowed: bool,
    /// Lowest tier that would allow the format; `None` when already allowed.
    pub required_tier: Option<SubscriptionTier>,
}

/// Set-membership check against the tier's export list.
pub fn can_export_format(tier: SubscriptionTier, format: ExportFormat) -> ExportPermission {
    let allowed = TierLimits::for_tier(tier).allows_export(format);
    ExportPermission {
        format,
        allowed,
        required_tier: if allowed {
            None
        } else {
            TierLimits::minimum_tier_for_export(format)
        },
    }
}

/// Snapshot of every usage-dependent permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_generate: bool,
    pub can_create_project: bool,
    pub can_download: bool,
    pub can_view_analytics: bool,
    pub remaining_generations: Limit,
}

impl Permissions {
    pub fn evaluate(tier: SubscriptionTier, usage: &ReconciledUsage) -> Self {
        Self {
            can_generate: can_generate(tier, usage),
            can_create_project: can_create_project(tier, usage),
            can_download: can_download(tier),
            can_view_analytics: can_view_analytics(tier),
            remaining_generations: remaining_generations(tier, usage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::UsageCounters;
    use proptest::prelude::*;

    fn month() -> UsageMonth {
        UsageMonth::new(2024, 6).unwrap()
    }

    fn usage(generations: u32, projects: u32) -> ReconciledUsage {
        UsageCounters {
            generations_this_month: generations,
            project_count: projects,
            last_reset_month: month(),
        }
        .reconcile(month())
        .usage
    }

    #[test]
    fn free_user_can_generate_under_limit() {
        assert!(can_generate(SubscriptionTier::Free, &usage(2, 0)));
    }

    #[test]
    fn free_user_blocked_at_limit() {
        assert!(!can_generate(SubscriptionTier::Free, &usage(3, 0)));
    }

    #[test]
    fn business_user_never_blocked() {
        assert!(can_generate(SubscriptionTier::Business, &usage(1_000_000, 0)));
        assert!(can_create_project(SubscriptionTier::Business, &usage(0, 50_000)));
        assert!(can_add_page(SubscriptionTier::Business, u32::MAX));
        assert!(can_iterate(SubscriptionTier::Business, u32::MAX));
    }

    #[test]
    fn stale_usage_is_zeroed_before_gating() {
        let stale = UsageCounters {
            generations_this_month: 3,
            project_count: 0,
            last_reset_month: UsageMonth::new(2024, 5).unwrap(),
        };
        let reconciled = stale.reconcile(month()).usage;
        assert!(can_generate(SubscriptionTier::Free, &reconciled));
    }

    #[test]
    fn free_user_gets_one_project() {
        assert!(can_create_project(SubscriptionTier::Free, &usage(0, 0)));
        assert!(!can_create_project(SubscriptionTier::Free, &usage(0, 1)));
    }

    #[test]
    fn page_and_iteration_limits_follow_table() {
        assert!(!can_add_page(SubscriptionTier::Free, 1));
        assert!(can_add_page(SubscriptionTier::Basic, 4));
        assert!(!can_iterate(SubscriptionTier::Basic, 10));
        assert!(can_iterate(SubscriptionTier::Pro, 10));
    }

    #[test]
    fn only_paid_tiers_download() {
        assert!(!can_download(SubscriptionTier::Free));
        assert!(can_download(SubscriptionTier::Basic));
    }

    #[test]
    fn free_user_cannot_export_react_and_needs_pro() {
        let permission = can_export_format(SubscriptionTier::Free, ExportFormat::React);
        assert!(!permission.allowed);
        assert_eq!(permission.required_tier, Some(SubscriptionTier::Pro));
        assert_eq!(permission.required_tier.unwrap().to_string(), "Pro");
    }

    #[test]
    fn allowed_export_reports_no_required_tier() {
        let permission = can_export_format(SubscriptionTier::Pro, ExportFormat::Vue);
        assert!(permission.allowed);
        assert_eq!(permission.required_tier, None);
    }

    #[test]
    fn needs_reset_when_months_differ() {
        let may = UsageMonth::new(2024, 5).unwrap();
        assert!(needs_monthly_reset(may, month()));
        assert!(!needs_monthly_reset(month(), month()));
    }

    #[test]
    fn remaining_generations_counts_down() {
        assert_eq!(
            remaining_generations(SubscriptionTier::Basic, &usage(5, 0)),
            Limit::Limited(20)
        );
        assert_eq!(
            remaining_generations(SubscriptionTier::Business, &usage(5, 0)),
            Limit::Unlimited
        );
    }

    #[test]
    fn permissions_snapshot_matches_predicates() {
        let perms = Permissions::evaluate(SubscriptionTier::Free, &usage(3, 1));
        assert!(!perms.can_generate);
        assert!(!perms.can_create_project);
        assert!(!perms.can_download);
        assert!(!perms.can_view_analytics);
        assert_eq!(perms.remaining_generations, Limit::Limited(0));
    }

    fn any_tier() -> impl Strategy<Value = SubscriptionTier> {
        prop_oneof![
            Just(SubscriptionTier::Free),
            Just(SubscriptionTier::Basic),
            Just(SubscriptionTier::Pro),
            Just(SubscriptionTier::Business),
        ]
    }

    proptest! {
        #[test]
        fn monthly_limit_matches_table(tier in any_tier(), used in 0u32..500) {
            let expected = match TierLimits::for_tier(tier).monthly_generations {
                Limit::Limited(max) => used >= max,
                Limit::Unlimited => false,
            };
            prop_assert_eq!(has_reached_monthly_limit(used, tier), expected);
        }

        #[test]
        fn unlimited_limits_always_permit(tier in any_tier(), used in any::<u32>()) {
            let limits = TierLimits::for_tier(tier);
            if limits.monthly_generations.is_unlimited() {
                prop_assert!(can_generate(tier, &usage(used, 0)));
            }
            if limits.max_projects.is_unlimited() {
                prop_assert!(can_create_project(tier, &usage(0, used)));
            }
        }
    }
}
