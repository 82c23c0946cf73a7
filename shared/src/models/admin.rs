//! Admin Account Model

use serde::{Deserialize, Serialize};

/// Admin row (includes the argon2 password hash, never serialized out;
/// use [`AdminPublic`] for responses)
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Admin {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: i64,
}

/// Admin response (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPublic {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "created")]
    pub created_at: i64,
}

impl From<Admin> for AdminPublic {
    fn from(a: Admin) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
            role: a.role,
            created_at: a.created_at,
        }
    }
}

/// Create admin payload (`adminData` in the request body)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

/// Update admin payload (partial; password re-hashed only when present)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: bearer token plus the authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(rename = "_id")]
    pub id: i64,
    pub role: String,
}
