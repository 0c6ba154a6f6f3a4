//! Types for admin authentication

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Role of an authenticated admin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::SuperAdmin => "super_admin",
        }
    }
}

/// The authenticated actor driving the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: AdminRole,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl AdminUser {
    pub fn is_super_admin(&self) -> bool {
        self.role == AdminRole::SuperAdmin
    }
}

/// Sign-in credentials
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Admin account creation request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: AdminRole,
}

/// Sign-in / sign-up payload as returned by the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    pub token: Option<String>,
    pub user: Option<AdminUser>,
    pub error: Option<String>,
}

/// Body of `GET /api/auth/session`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionResponse {
    pub user: Option<AdminUser>,
}

/// Result of a login or registration attempt.
///
/// A rejection is a normal outcome, not an `Err`: the attempt reached the
/// backend (or failed to) and the caller decides what to show.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Authenticated { token: String, user: Option<AdminUser> },
    Rejected { error: String },
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&AdminUser> {
        match self {
            AuthOutcome::Authenticated { user, .. } => user.as_ref(),
            AuthOutcome::Rejected { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AuthOutcome::Authenticated { .. } => None,
            AuthOutcome::Rejected { error } => Some(error),
        }
    }

    /// The signed-in user, with a rejection turned into [`Error::Auth`]
    pub fn into_result(self) -> Result<Option<AdminUser>> {
        match self {
            AuthOutcome::Authenticated { user, .. } => Ok(user),
            AuthOutcome::Rejected { error } => Err(Error::auth(error)),
        }
    }
}
