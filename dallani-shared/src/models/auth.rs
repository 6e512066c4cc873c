use super::lenient;
use serde::{Deserialize, Serialize};

/// Body of `POST auth/admin/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The authenticated staff member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminUser {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub role: Option<String>,
}

impl AdminUser {
    /// Name, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or_default()
    }
}

/// Response of `POST auth/admin/login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginResponse {
    #[serde(deserialize_with = "lenient::flag")]
    pub success: bool,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub access_token: Option<String>,
    pub user: Option<AdminUser>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub message: Option<String>,
}
