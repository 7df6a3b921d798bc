//! Page counters, form submissions, and derived statistics.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AnalyticsError;
use crate::domain::foundation::{SubmissionId, Timestamp, WebsiteId};

/// View counters for one website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalytics {
    pub website_id: WebsiteId,
    pub views: u64,
    pub unique_visitors: u64,
}

impl PageAnalytics {
    pub fn empty(website_id: WebsiteId) -> Self {
        Self {
            website_id,
            views: 0,
            unique_visitors: 0,
        }
    }

    /// Count one view; a new visitor also counts towards unique visitors.
    pub fn record_view(&mut self, new_visitor: bool) {
        self.views += 1;
        if new_visitor {
            self.unique_visitors += 1;
        }
    }
}

/// A form posted from a published website.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub id: SubmissionId,
    pub website_id: WebsiteId,
    pub data: Value,
    pub submitted_at: Timestamp,
}

impl FormSubmission {
    /// # Errors
    ///
    /// - `ValidationFailed` unless `data` is a non-empty JSON object
    pub fn new(website_id: WebsiteId, data: Value) -> Result<Self, AnalyticsError> {
        match &data {
            Value::Object(fields) if !fields.is_empty() => {}
            _ => {
                return Err(AnalyticsError::validation(
                    "data",
                    "Form data must be a non-empty object",
                ))
            }
        }

        Ok(Self {
            id: SubmissionId::new(),
            website_id,
            data,
            submitted_at: Timestamp::now(),
        })
    }
}

/// Owner-facing statistics for a website.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    pub website_id: WebsiteId,
    pub views: u64,
    pub unique_visitors: u64,
    pub submissions: u64,
    /// Percentage of unique visitors that submitted a form.
    pub conversion_rate: f64,
}

impl AnalyticsStats {
    pub fn from_counts(analytics: PageAnalytics, submissions: u64) -> Self {
        Self {
            website_id: analytics.website_id,
            views: analytics.views,
            unique_visitors: analytics.unique_visitors,
            submissions,
            conversion_rate: conversion_rate(submissions, analytics.unique_visitors),
        }
    }
}

/// `submissions / unique_visitors * 100`, rounded to two decimals; 0 with no visitors.
pub fn conversion_rate(submissions: u64, unique_visitors: u64) -> f64 {
    if unique_visitors == 0 {
        return 0.0;
    }
    let rate = submissions as f64 / unique_visitors as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}
