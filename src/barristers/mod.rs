//! Barrister records

use serde::{Deserialize, Serialize};

use crate::endpoints;
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::response::unwrap_list;
use crate::users::{User, VerificationStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrister {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default = "pending")]
    pub verification_status: VerificationStatus,
    /// Percentage, 0 to 100
    #[serde(default)]
    pub profile_completion: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

fn pending() -> VerificationStatus {
    VerificationStatus::Pending
}

impl Barrister {
    pub fn name(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.name.as_deref())
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }

    /// Completion clamped to 0..=100
    pub fn completion_percent(&self) -> f64 {
        if self.profile_completion.is_finite() {
            self.profile_completion.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// Client for `/api/barrister`
#[derive(Clone)]
pub struct BarristersService {
    client: ApiClient,
}

impl BarristersService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Vec<Barrister>> {
        let value = self.client.get(endpoints::BARRISTERS).execute_value().await?;
        Ok(unwrap_list(value))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Barrister> {
        self.client
            .get(endpoints::BARRISTERS)
            .segment(id)
            .execute()
            .await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Barrister>> {
        let value = self
            .client
            .get(endpoints::BARRISTERS_SEARCH)
            .query("q", query)
            .execute_value()
            .await?;
        Ok(unwrap_list(value))
    }
}
