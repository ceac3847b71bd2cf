//! User account response types.

use jiff::Timestamp;
use libris_postgres::model;
use libris_postgres::types::UserRole;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A user account. The password digest is never rendered.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Current role.
    pub role: UserRole,
}

impl User {
    pub fn from_model(user: model::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Response returned after a successful login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    /// Always `logged in successfully`.
    pub message: String,
    /// Signed identity token for the `Authorization: Bearer` header.
    pub token: String,
}

impl Login {
    /// Message sent with every issued token.
    pub const MESSAGE: &str = "logged in successfully";

    pub fn new(token: String) -> Self {
        Self {
            message: Self::MESSAGE.to_owned(),
            token,
        }
    }
}

/// The caller's identity as currently stored, plus the token expiry.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Me {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Stored role, which may differ from the role in the token.
    pub role: UserRole,
    /// When the presented token stops being accepted.
    pub jwt_expire_date: Timestamp,
}

impl Me {
    pub fn new(user: model::User, expires_at: Timestamp) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            jwt_expire_date: expires_at,
        }
    }
}
