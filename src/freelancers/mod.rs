//! Freelancer records
//!
//! The backend sometimes returns profile fields directly on the freelancer
//! and sometimes only on the embedded `user`. The accessors on
//! [`Freelancer`] read the direct field first and fall back to the user.

use serde::{Deserialize, Serialize};

use crate::endpoints;
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::response::unwrap_list;
use crate::users::{Numeric, ProfessionalProfile, User, VerificationStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freelancer {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub profile: ProfessionalProfile,
}

impl Freelancer {
    fn user_profile(&self) -> Option<&ProfessionalProfile> {
        self.user.as_ref().map(User::professional)
    }

    pub fn name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or_else(|| self.user.as_ref().and_then(|u| u.name.as_deref()))
    }

    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .or_else(|| self.user.as_ref().and_then(|u| u.email.as_deref()))
    }

    pub fn expertise_areas(&self) -> &[String] {
        self.profile
            .expertise_areas
            .as_deref()
            .or_else(|| self.user_profile().and_then(|p| p.expertise_areas.as_deref()))
            .unwrap_or(&[])
    }

    /// Years of experience
    pub fn experience(&self) -> Option<f64> {
        self.profile
            .experience
            .as_ref()
            .or_else(|| self.user_profile().and_then(|p| p.experience.as_ref()))
            .and_then(Numeric::as_f64)
    }

    /// `is_available`, then the legacy `availability` flag, then the user
    pub fn is_available(&self) -> bool {
        self.profile
            .is_available
            .or(self.availability)
            .or_else(|| self.user_profile().and_then(|p| p.is_available))
            .unwrap_or(false)
    }

    pub fn is_verified(&self) -> bool {
        self.profile.is_verified()
            || self.user_profile().map(|p| p.is_verified()).unwrap_or(false)
    }

    pub fn verification_status(&self) -> Option<&VerificationStatus> {
        self.profile
            .verification_status
            .as_ref()
            .or_else(|| self.user_profile().and_then(|p| p.verification_status.as_ref()))
    }

    pub fn total_earnings(&self) -> Option<&Numeric> {
        self.profile
            .total_earnings
            .as_ref()
            .or_else(|| self.user_profile().and_then(|p| p.total_earnings.as_ref()))
    }

    pub fn performance_score(&self) -> Option<&Numeric> {
        self.profile
            .performance_score
            .as_ref()
            .or_else(|| self.user_profile().and_then(|p| p.performance_score.as_ref()))
    }
}

/// Client for `/api/freelancers`
#[derive(Clone)]
pub struct FreelancersService {
    client: ApiClient,
}

impl FreelancersService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Vec<Freelancer>> {
        let value = self.client.get(endpoints::FREELANCERS).execute_value().await?;
        Ok(unwrap_list(value))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Freelancer> {
        self.client
            .get(endpoints::FREELANCERS)
            .segment(id)
            .execute()
            .await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Freelancer>> {
        let value = self
            .client
            .get(endpoints::FREELANCERS_SEARCH)
            .query("q", query)
            .execute_value()
            .await?;
        Ok(unwrap_list(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_shape() {
        let f: Freelancer = serde_json::from_value(json!({
            "id": 1,
            "user_id": 2,
            "name": "Flat Fred",
            "email": "fred@example.com",
            "expertise_areas": ["tax"],
            "is_available": true,
            "verification_status": "approved"
        }))
        .unwrap();

        assert_eq!(f.name(), Some("Flat Fred"));
        assert_eq!(f.email(), Some("fred@example.com"));
        assert_eq!(f.expertise_areas().to_vec(), vec!["tax".to_string()]);
        assert!(f.is_available());
        assert!(f.is_verified());
    }

    #[test]
    fn nested_shape() {
        let f: Freelancer = serde_json::from_value(json!({
            "id": 1,
            "user_id": 2,
            "user": {
                "id": 2,
                "name": "Nested Nora",
                "email": "nora@example.com",
                "role": "freelancer",
                "experience": 6,
                "is_available": false,
                "is_verified": true,
                "performance_score": "9.1"
            }
        }))
        .unwrap();

        assert_eq!(f.name(), Some("Nested Nora"));
        assert_eq!(f.email(), Some("nora@example.com"));
        assert_eq!(f.experience(), Some(6.0));
        assert!(!f.is_available());
        assert!(f.is_verified());
        assert_eq!(f.performance_score().and_then(Numeric::as_f64), Some(9.1));
    }

    #[test]
    fn empty_record_decodes() {
        let f: Freelancer = serde_json::from_value(json!({})).unwrap();
        assert_eq!(f.name(), None);
        assert!(f.expertise_areas().is_empty());
        assert!(!f.is_available());
    }
}
