use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Patient,
    Doctor,
    Admin,
}

/// The signed-in account as held by an auth provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Default display name derived from an email: everything before the `@`.
    pub fn display_name_from_email(email: &str) -> String {
        email.split('@').next().unwrap_or_default().to_string()
    }
}
