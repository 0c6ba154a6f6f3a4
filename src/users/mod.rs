//! Platform user management

mod types;

use serde::Serialize;

use crate::endpoints;
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::response::unwrap_list;

pub use types::*;

#[derive(Serialize)]
struct UpdateBody<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    #[serde(flatten)]
    update: &'a UserUpdate,
}

/// Client for `/api/users`
#[derive(Clone)]
pub struct UsersService {
    client: ApiClient,
}

impl UsersService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch every user. Wrapped (`{users: [...]}`, `{data: [...]}`) and bare
    /// array payloads are both accepted; anything else is an empty list.
    pub async fn get_all(&self) -> Result<Vec<User>> {
        let value = self.client.get(endpoints::USERS).execute_value().await?;
        Ok(unwrap_list(value))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<User> {
        self.client
            .get(endpoints::USERS)
            .segment(id)
            .execute()
            .await
    }

    /// Send a partial update; returns the backend's updated record
    pub async fn update(&self, id: &str, update: &UserUpdate) -> Result<User> {
        let body = UpdateBody { user_id: id, update };
        self.client
            .put(endpoints::USERS_UPDATE)
            .json(&body)?
            .execute()
            .await
    }

    pub async fn get_role(&self, user_id: &str) -> Result<RoleResponse> {
        self.client
            .get(endpoints::USERS_ROLE)
            .query("userId", user_id)
            .execute()
            .await
    }
}
