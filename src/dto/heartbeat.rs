use serde::{Deserialize, Serialize};

/// Arms the dead man's switch: unmatched bets are cancelled if no heartbeat
/// arrives within the preferred timeout. Zero disarms it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRequest {
    pub preferred_timeout_seconds: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionPerformed {
    None,
    CancellationRequestSubmitted,
    AllBetsCancelled,
    SomeBetsNotCancelled,
    CancellationRequestError,
    CancellationStatusUnknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatReport {
    pub action_performed: ActionPerformed,
    pub actual_timeout_seconds: i32,
}
