//! Per-user usage counters and monthly reconciliation.
//!
//! Counters are stored with the month they were last reset in. Before any
//! limit check they must be reconciled against the current month; the
//! gate predicates only accept [`ReconciledUsage`], which can only be
//! obtained through [`UsageCounters::reconcile`].

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A calendar month in UTC, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UsageMonth {
    year: i32,
    month: u32,
}

impl UsageMonth {
    /// Creates a month, validating the month number.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::invalid_format(
                "usage_month",
                format!("month {} out of range", month),
            ));
        }
        Ok(Self { year, month })
    }

    /// The month containing `dt`.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }

    /// The current UTC month.
    pub fn current() -> Self {
        Self::from_datetime(&Utc::now())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for UsageMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for UsageMonth {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::invalid_format("usage_month", format!("expected YYYY-MM, got '{}'", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for UsageMonth {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<UsageMonth> for String {
    fn from(month: UsageMonth) -> Self {
        month.to_string()
    }
}

/// Raw counters as stored. Not safe to gate on until reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounters {
    pub generations_this_month: u32,
    pub project_count: u32,
    pub last_reset_month: UsageMonth,
}

impl UsageCounters {
    /// Zeroed counters starting in `month`.
    pub fn fresh(month: UsageMonth) -> Self {
        Self {
            generations_this_month: 0,
            project_count: 0,
            last_reset_month: month,
        }
    }

    /// Returns true if the stored reset month is not `current`.
    pub fn is_stale(&self, current: UsageMonth) -> bool {
        self.last_reset_month != current
    }

    /// Zero the monthly counter if the stored month differs from `current`.
    ///
    /// Project count is not monthly and survives the reset.
    pub fn reconcile(self, current: UsageMonth) -> Reconciliation {
        let was_reset = self.is_stale(current);
        let generations_this_month = if was_reset {
            0
        } else {
            self.generations_this_month
        };

        Reconciliation {
            usage: ReconciledUsage {
                generations_this_month,
                project_count: self.project_count,
                month: current,
            },
            was_reset,
        }
    }
}

/// Outcome of reconciling counters against a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub usage: ReconciledUsage,
    /// True when the monthly counter was zeroed and must be persisted.
    pub was_reset: bool,
}

/// Counters known to belong to the current month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledUsage {
    generations_this_month: u32,
    project_count: u32,
    month: UsageMonth,
}

impl ReconciledUsage {
    pub fn generations_this_month(&self) -> u32 {
        self.generations_this_month
    }

    pub fn project_count(&self) -> u32 {
        self.project_count
    }

    pub fn month(&self) -> UsageMonth {
        self.month
    }
}
