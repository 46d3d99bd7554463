use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateEnvironmentStateRequest {
    pub action: String,
}

impl UpdateEnvironmentStateRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self { action: action.into() }
    }
}

/// Error payload returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Extracts `message` from a raw body, tolerating non-JSON payloads.
    pub fn message_from(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
    }
}
