//! Platform user records

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of a platform user. Unknown roles keep their raw value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    User,
    Barrister,
    Freelancer,
    Admin,
    SuperAdmin,
    Other(String),
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::User => "user",
            UserRole::Barrister => "barrister",
            UserRole::Freelancer => "freelancer",
            UserRole::Admin => "admin",
            UserRole::SuperAdmin => "super_admin",
            UserRole::Other(raw) => raw,
        }
    }

    /// Roles counted as platform users (everything except staff)
    pub fn is_platform_user(&self) -> bool {
        matches!(self, UserRole::User | UserRole::Barrister | UserRole::Freelancer)
    }
}

impl From<String> for UserRole {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "user" => UserRole::User,
            "barrister" => UserRole::Barrister,
            "freelancer" => UserRole::Freelancer,
            "admin" => UserRole::Admin,
            "super_admin" => UserRole::SuperAdmin,
            _ => UserRole::Other(raw),
        }
    }
}

impl From<&str> for UserRole {
    fn from(raw: &str) -> Self {
        UserRole::from(raw.to_string())
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verification state of a barrister or freelancer.
///
/// Barristers use `verified`, freelancers use `approved`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Approved,
    Rejected,
    Other(String),
}

impl VerificationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
            VerificationStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for VerificationStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => VerificationStatus::Pending,
            "verified" => VerificationStatus::Verified,
            "approved" => VerificationStatus::Approved,
            "rejected" => VerificationStatus::Rejected,
            _ => VerificationStatus::Other(raw),
        }
    }
}

impl From<&str> for VerificationStatus {
    fn from(raw: &str) -> Self {
        VerificationStatus::from(raw.to_string())
    }
}

impl From<VerificationStatus> for String {
    fn from(status: VerificationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value the backend sends either as a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// The numeric value, if this is a number or a non-empty numeric string
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) if n.is_finite() => Some(*n),
            Numeric::Number(_) => None,
            Numeric::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return None;
                }
                s.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
    }
}

/// Professional profile shared by freelancer users and freelancer records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalProfile {
    /// Years; sent as an integer, a float or a numeric string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Numeric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expertise_areas: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_card_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_certificate_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_documents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<VerificationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_earnings: Option<Numeric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_score: Option<Numeric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl ProfessionalProfile {
    pub fn is_verified(&self) -> bool {
        self.is_verified.unwrap_or(false)
            || self.verification_status == Some(VerificationStatus::Approved)
    }
}

/// A platform user.
///
/// Every role shares one record shape. Role-specific fields are optional and
/// kept whatever the role, so a client with a barrister application or a
/// record with an unexpected role still decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Missing or `null` on some legacy records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barrister_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barrister_verification_notes: Option<String>,
    #[serde(flatten)]
    pub profile: ProfessionalProfile,
}

impl User {
    /// The user's role. Records without one report an empty `Other` role,
    /// which no role filter or platform count matches.
    pub fn role(&self) -> UserRole {
        self.role
            .clone()
            .unwrap_or_else(|| UserRole::Other(String::new()))
    }

    /// Barrister application status, if one is set
    pub fn barrister_status(&self) -> Option<&str> {
        self.barrister_status.as_deref().filter(|s| !s.is_empty())
    }

    pub fn professional(&self) -> &ProfessionalProfile {
        &self.profile
    }
}

/// Partial update sent to `PUT /api/users/update`
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<VerificationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barrister_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barrister_verification_notes: Option<String>,
}

/// Body of `GET /api/users/role`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoleResponse {
    pub role: UserRole,
}
