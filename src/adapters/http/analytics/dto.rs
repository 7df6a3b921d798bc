//! Request bodies for analytics.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordViewRequest {
    #[serde(default)]
    pub new_visitor: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitFormRequest {
    #[serde(default)]
    pub data: Value,
}
