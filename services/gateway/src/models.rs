use serde::Deserialize;

/// Identifies the record to delete, from the query string or the body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMatchRequest {
    #[serde(default)]
    pub recorded_at: Option<String>,
}
