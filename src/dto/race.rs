use serde::{Deserialize, Serialize};

/// Both filters are optional; with neither the exchange reports every race
/// of the day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRaceDetailsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceDetails {
    pub meeting_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_code: Option<String>,
}
