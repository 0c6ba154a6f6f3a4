//! Case records

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::barristers::Barrister;
use crate::endpoints;
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::freelancers::Freelancer;
use crate::response::unwrap_list;
use crate::users::User;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CaseStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Declined,
    Other(String),
}

impl CaseStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CaseStatus::Pending => "pending",
            CaseStatus::Active => "active",
            CaseStatus::Completed => "completed",
            CaseStatus::Declined => "declined",
            CaseStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for CaseStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => CaseStatus::Pending,
            "active" => CaseStatus::Active,
            "completed" => CaseStatus::Completed,
            "declined" => CaseStatus::Declined,
            _ => CaseStatus::Other(raw),
        }
    }
}

impl From<&str> for CaseStatus {
    fn from(raw: &str) -> Self {
        CaseStatus::from(raw.to_string())
    }
}

impl From<CaseStatus> for String {
    fn from(status: CaseStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case priority. Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    Medium,
    High,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Other(raw) => raw,
        }
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        match raw.to_lowercase().as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::Other(raw),
        }
    }
}

impl From<&str> for Priority {
    fn from(raw: &str) -> Self {
        Priority::from(raw.to_string())
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: CaseStatus,
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freelancer_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barrister_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freelancer: Option<Freelancer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barrister: Option<Barrister>,
}

impl Case {
    pub fn client_name(&self) -> Option<&str> {
        self.client.as_ref().and_then(|c| c.name.as_deref())
    }

    pub fn client_email(&self) -> Option<&str> {
        self.client.as_ref().and_then(|c| c.email.as_deref())
    }
}

/// Client for `/api/cases`
#[derive(Clone)]
pub struct CasesService {
    client: ApiClient,
}

impl CasesService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Vec<Case>> {
        let value = self.client.get(endpoints::CASES).execute_value().await?;
        Ok(unwrap_list(value))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Case> {
        self.client
            .get(endpoints::CASES)
            .segment(id)
            .execute()
            .await
    }

    /// Cases open for assignment
    pub async fn get_available(&self) -> Result<Vec<Case>> {
        let value = self
            .client
            .get(endpoints::CASES_AVAILABLE)
            .execute_value()
            .await?;
        Ok(unwrap_list(value))
    }

    /// Backend-computed case statistics, passed through untyped
    pub async fn get_stats(&self) -> Result<Value> {
        self.client.get(endpoints::CASES_STATS).execute_value().await
    }
}
