//! Request/response bodies for websites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::website::{Page, Website};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebsiteRequest {
    pub name: String,
    #[serde(default)]
    pub prompt: String,
    pub html: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddPageRequest {
    pub path: String,
    pub html: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePageRequest {
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteResponse {
    pub id: Uuid,
    pub name: String,
    pub prompt: String,
    pub pages: Vec<Page>,
    pub ai_iterations: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Website> for WebsiteResponse {
    fn from(website: &Website) -> Self {
        Self {
            id: *website.id().as_uuid(),
            name: website.name().to_string(),
            prompt: website.prompt().to_string(),
            pages: website.pages().to_vec(),
            ai_iterations: website.ai_iterations(),
            created_at: *website.created_at().as_datetime(),
            updated_at: *website.updated_at().as_datetime(),
        }
    }
}

/// List entry; omits page bodies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteSummary {
    pub id: Uuid,
    pub name: String,
    pub page_count: u32,
    pub updated_at: DateTime<Utc>,
}

impl From<&Website> for WebsiteSummary {
    fn from(website: &Website) -> Self {
        Self {
            id: *website.id().as_uuid(),
            name: website.name().to_string(),
            page_count: website.page_count(),
            updated_at: *website.updated_at().as_datetime(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WebsiteListResponse {
    pub websites: Vec<WebsiteSummary>,
}
