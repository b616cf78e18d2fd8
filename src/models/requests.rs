use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Preferences;

/// Request to rank shelters for a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RankSheltersRequest {
    /// When present, preferences are loaded from this user's record.
    #[validate(length(min = 1))]
    #[serde(default)]
    pub user_id: Option<String>,
    /// Free-text search over shelter name and address.
    #[serde(default)]
    pub query: String,
    /// Service filter: a service tag or "all".
    #[serde(default = "default_service_filter")]
    pub service: String,
    #[serde(default)]
    pub limit: Option<u16>,
    /// Caller GPS fix, used only for distance display.
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Inline preferences for anonymous callers; ignored when userId is set.
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

fn default_service_filter() -> String {
    "all".to_string()
}

/// Request body for a shelter check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Request to create a connection request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateConnectionRequest {
    #[validate(length(min = 1))]
    pub from_user_id: String,
    #[validate(length(min = 1))]
    pub to_user_id: String,
    #[serde(default)]
    pub message: String,
}

/// Request to respond to a pending connection request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RespondConnectionRequest {
    #[validate(length(min = 1))]
    pub status: String,
}

/// Whitelist patch of a user's editable fields. Preferences are
/// replaced wholesale, never merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar.is_none() && self.preferences.is_none()
    }
}

/// Request to bookmark a shelter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBookmarkRequest {
    pub shelter_id: i64,
}
