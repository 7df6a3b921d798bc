//! Subscription tier definitions.
//!
//! Represents the subscription levels available in Sento.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Subscription tier.
///
/// Determines feature access, usage limits, and pricing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// Free tier - a few generations to evaluate the product.
    #[default]
    Free,

    /// Basic tier - downloads, a handful of projects.
    Basic,

    /// Pro tier - framework exports, custom domains.
    Pro,

    /// Business tier - everything unlimited.
    Business,
}

impl SubscriptionTier {
    /// All tiers, lowest first.
    pub const ALL: [SubscriptionTier; 4] = [
        SubscriptionTier::Free,
        SubscriptionTier::Basic,
        SubscriptionTier::Pro,
        SubscriptionTier::Business,
    ];

    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, SubscriptionTier::Free)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "Free",
            SubscriptionTier::Basic => "Basic",
            SubscriptionTier::Pro => "Pro",
            SubscriptionTier::Business => "Business",
        }
    }

    /// Returns the lowercase storage/wire name for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Basic => "basic",
            SubscriptionTier::Pro => "pro",
            SubscriptionTier::Business => "business",
        }
    }

    /// Returns the numeric rank of this tier for comparison.
    ///
    /// Higher rank = more features.
    pub fn rank(&self) -> u8 {
        match self {
            SubscriptionTier::Free => 0,
            SubscriptionTier::Basic => 1,
            SubscriptionTier::Pro => 2,
            SubscriptionTier::Business => 3,
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SubscriptionTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(SubscriptionTier::Free),
            "basic" => Ok(SubscriptionTier::Basic),
            "pro" => Ok(SubscriptionTier::Pro),
            "business" => Ok(SubscriptionTier::Business),
            other => Err(ValidationError::invalid_format(
                "tier",
                format!("unknown tier '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_tier_is_not_paid() {
        assert!(!SubscriptionTier::Free.is_paid());
    }

    #[test]
    fn paid_tiers_are_paid() {
        assert!(SubscriptionTier::Basic.is_paid());
        assert!(SubscriptionTier::Pro.is_paid());
        assert!(SubscriptionTier::Business.is_paid());
    }

    #[test]
    fn display_names_are_correct() {
        assert_eq!(SubscriptionTier::Free.to_string(), "Free");
        assert_eq!(SubscriptionTier::Pro.to_string(), "Pro");
    }

    #[test]
    fn ranks_follow_declaration_order() {
        let ranks: Vec<u8> = SubscriptionTier::ALL.iter().map(|t| t.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert!(SubscriptionTier::Pro > SubscriptionTier::Basic);
    }

    #[test]
    fn tier_serializes_lowercase() {
        let json = serde_json::to_string(&SubscriptionTier::Business).unwrap();
        assert_eq!(json, "\"business\"");
    }

    #[test]
    fn tier_parses_case_insensitively() {
        assert_eq!("PRO".parse::<SubscriptionTier>().unwrap(), SubscriptionTier::Pro);
        assert!("platinum".parse::<SubscriptionTier>().is_err());
    }
}
