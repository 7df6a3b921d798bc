//! Numeric quota that may be unbounded.
//!
//! Wire format accepts a non-negative integer, `-1`, or the string
//! `"unlimited"`; the last two both mean no limit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric cap on some counted resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LimitRepr", into = "i64")]
pub enum Limit {
    /// At most this many.
    Limited(u32),
    /// No cap.
    Unlimited,
}

impl Limit {
    /// Returns true if `used` has reached the cap.
    ///
    /// Never true for `Unlimited`.
    pub fn is_reached(&self, used: u32) -> bool {
        match self {
            Limit::Limited(max) => used >= *max,
            Limit::Unlimited => false,
        }
    }

    /// Returns true if this limit is unbounded.
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Limit::Unlimited)
    }

    /// Remaining headroom given current usage.
    pub fn remaining(&self, used: u32) -> Limit {
        match self {
            Limit::Limited(max) => Limit::Limited(max.saturating_sub(used)),
            Limit::Unlimited => Limit::Unlimited,
        }
    }

    /// Signed representation used by storage queries (`-1` = unlimited).
    pub fn as_i64(&self) -> i64 {
        match self {
            Limit::Limited(max) => i64::from(*max),
            Limit::Unlimited => -1,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Limited(max) => write!(f, "{}", max),
            Limit::Unlimited => write!(f, "unlimited"),
        }
    }
}

impl From<Limit> for i64 {
    fn from(limit: Limit) -> Self {
        limit.as_i64()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LimitRepr {
    Number(i64),
    Text(String),
}

impl TryFrom<LimitRepr> for Limit {
    type Error = String;

    fn try_from(repr: LimitRepr) -> Result<Self, Self::Error> {
        match repr {
            LimitRepr::Number(-1) => Ok(Limit::Unlimited),
            LimitRepr::Number(n) if n >= 0 => u32::try_from(n)
                .map(Limit::Limited)
                .map_err(|_| format!("limit {} out of range", n)),
            LimitRepr::Number(n) => Err(format!("invalid limit {}", n)),
            LimitRepr::Text(s) if s.eq_ignore_ascii_case("unlimited") => Ok(Limit::Unlimited),
            LimitRepr::Text(s) => s
                .trim()
                .parse::<u32>()
                .map(Limit::Limited)
                .map_err(|_| format!("invalid limit '{}'", s)),
        }
    }
}
