//! Generated legal documents

use serde::{Deserialize, Serialize};

use crate::cases::Case;
use crate::endpoints;
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::response::unwrap_list;
use crate::users::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<i64>,
    #[serde(default)]
    pub document_type: Option<String>,
    /// Opaque external link
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<Case>,
}

impl Document {
    pub fn user_name(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.name.as_deref())
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.email.as_deref())
    }

    pub fn case_title(&self) -> Option<&str> {
        self.case.as_ref().map(|c| c.title.as_str())
    }
}

/// Client for `/api/v1/documents`
#[derive(Clone)]
pub struct DocumentsService {
    client: ApiClient,
}

impl DocumentsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/v1/documents/user` without a user filter
    pub async fn get_all(&self) -> Result<Vec<Document>> {
        let value = self
            .client
            .get(endpoints::DOCUMENTS_BY_USER)
            .execute_value()
            .await?;
        Ok(unwrap_list(value))
    }

    pub async fn get_for_user(&self, user_id: &str) -> Result<Vec<Document>> {
        let value = self
            .client
            .get(endpoints::DOCUMENTS_BY_USER)
            .query("userId", user_id)
            .execute_value()
            .await?;
        Ok(unwrap_list(value))
    }

    /// The unfiltered documents view used for dashboard totals
    pub async fn get_overview(&self) -> Result<Vec<Document>> {
        let value = self.client.get(endpoints::DOCUMENTS).execute_value().await?;
        Ok(unwrap_list(value))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Document> {
        self.client
            .get(endpoints::DOCUMENTS)
            .segment(id)
            .execute()
            .await
    }
}
