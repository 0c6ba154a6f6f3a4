//! Dashboard statistics
//!
//! Stats are recomputed from four list endpoints on every call. Each source
//! is fetched concurrently and degrades to an empty list on its own failure,
//! so one broken endpoint only zeroes its own slice of the result.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::cases::{Case, CasesService};
use crate::documents::{Document, DocumentsService};
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::freelancers::{Freelancer, FreelancersService};
use crate::users::{User, UserRole, UsersService};

/// Cases considered for the activity feed
const ACTIVITY_CASES: usize = 5;

/// Entries kept in the activity feed
const ACTIVITY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_barristers: usize,
    pub total_freelancers: usize,
    pub total_cases: usize,
    pub total_documents: usize,
    pub recent_activity: Vec<ActivityLog>,
}

/// The four inputs the dashboard is derived from
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn users(&self) -> Result<Vec<User>>;
    async fn freelancers(&self) -> Result<Vec<Freelancer>>;
    async fn cases(&self) -> Result<Vec<Case>>;
    async fn documents(&self) -> Result<Vec<Document>>;
}

/// Backend-backed source: `/api/users`, `/api/freelancers`,
/// `/api/cases/available` and `/api/v1/documents`
pub struct ApiSource {
    users: UsersService,
    freelancers: FreelancersService,
    cases: CasesService,
    documents: DocumentsService,
}

impl ApiSource {
    pub fn new(client: ApiClient) -> Self {
        Self {
            users: UsersService::new(client.clone()),
            freelancers: FreelancersService::new(client.clone()),
            cases: CasesService::new(client.clone()),
            documents: DocumentsService::new(client),
        }
    }
}

#[async_trait]
impl DashboardSource for ApiSource {
    async fn users(&self) -> Result<Vec<User>> {
        self.users.get_all().await
    }

    async fn freelancers(&self) -> Result<Vec<Freelancer>> {
        self.freelancers.get_all().await
    }

    async fn cases(&self) -> Result<Vec<Case>> {
        self.cases.get_available().await
    }

    async fn documents(&self) -> Result<Vec<Document>> {
        self.documents.get_overview().await
    }
}

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn DashboardSource>,
}

impl DashboardService {
    pub fn new(client: ApiClient) -> Self {
        Self::with_source(Arc::new(ApiSource::new(client)))
    }

    pub fn with_source(source: Arc<dyn DashboardSource>) -> Self {
        Self { source }
    }

    /// Fetch all four sources and derive the stats. Never fails: a failed
    /// source counts as empty, and a failure while deriving yields all-zero
    /// stats.
    pub async fn get_stats(&self) -> DashboardStats {
        let (users, freelancers, cases, documents) = tokio::join!(
            or_empty("users", self.source.users()),
            or_empty("freelancers", self.source.freelancers()),
            or_empty("cases", self.source.cases()),
            or_empty("documents", self.source.documents()),
        );

        debug!(
            "dashboard inputs: {} users, {} freelancers, {} cases, {} documents",
            users.len(),
            freelancers.len(),
            cases.len(),
            documents.len()
        );

        derive_or_default(|| summarize(&users, &freelancers, &cases, &documents))
    }
}

/// Run a derivation, turning a panic into all-zero stats
fn derive_or_default<F>(derive: F) -> DashboardStats
where
    F: FnOnce() -> DashboardStats,
{
    match panic::catch_unwind(AssertUnwindSafe(derive)) {
        Ok(stats) => stats,
        Err(_) => {
            error!("dashboard aggregation failed, reporting empty stats");
            DashboardStats::default()
        }
    }
}

async fn or_empty<T, F>(name: &str, fetch: F) -> Vec<T>
where
    F: std::future::Future<Output = Result<Vec<T>>>,
{
    match fetch.await {
        Ok(items) => items,
        Err(e) => {
            warn!("dashboard source {} unavailable: {}", name, e);
            Vec::new()
        }
    }
}

/// Derive dashboard stats from already-fetched lists.
///
/// A user counts as a barrister when their role is `barrister` OR they carry
/// a `barrister_status`. The two can disagree (a client with a pending
/// application is counted) and the union is kept as-is.
pub fn summarize(
    users: &[User],
    freelancers: &[Freelancer],
    cases: &[Case],
    documents: &[Document],
) -> DashboardStats {
    let total_users = users.iter().filter(|u| u.role().is_platform_user()).count();

    let total_barristers = users
        .iter()
        .filter(|u| u.role() == UserRole::Barrister || u.barrister_status().is_some())
        .count();

    DashboardStats {
        total_users,
        total_barristers,
        total_freelancers: freelancers.len(),
        total_cases: cases.len(),
        total_documents: documents.len(),
        recent_activity: recent_activity(cases),
    }
}

/// Activity entries for the first few cases, newest first
pub fn recent_activity(cases: &[Case]) -> Vec<ActivityLog> {
    let mut activity: Vec<ActivityLog> = cases
        .iter()
        .take(ACTIVITY_CASES)
        .map(|c| ActivityLog {
            id: c.id,
            kind: "case".to_string(),
            description: format!("Case \"{}\" was {}", c.title, c.status),
            user_id: c.client_id,
            created_at: c.created_at.clone(),
        })
        .collect();

    // Unparseable timestamps sort last.
    activity.sort_by(|a, b| {
        let a = a.created_at.as_deref().and_then(parse_timestamp);
        let b = b.created_at.as_deref().and_then(parse_timestamp);
        b.cmp(&a)
    });
    activity.truncate(ACTIVITY_LIMIT);
    activity
}

/// Parse the timestamp formats the backend emits
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde::de::DeserializeOwned;
    use serde_json::{json, Value};

    fn decode<T: DeserializeOwned>(value: Value) -> Vec<T> {
        serde_json::from_value(value).unwrap()
    }

    struct FakeSource {
        fail_cases: bool,
    }

    #[async_trait]
    impl DashboardSource for FakeSource {
        async fn users(&self) -> Result<Vec<User>> {
            Ok(decode(json!([
                { "role": "user" },
                { "role": "admin" },
                { "role": "barrister" }
            ])))
        }

        async fn freelancers(&self) -> Result<Vec<Freelancer>> {
            Ok(decode(json!([{}])))
        }

        async fn cases(&self) -> Result<Vec<Case>> {
            if self.fail_cases {
                return Err(Error::general("connection reset"));
            }
            Ok(decode(json!([
                { "id": 1, "title": "X", "status": "active", "created_at": "2025-03-01T10:00:00Z" }
            ])))
        }

        async fn documents(&self) -> Result<Vec<Document>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn aggregates_all_sources() {
        let service = DashboardService::with_source(Arc::new(FakeSource { fail_cases: false }));
        let stats = tokio_test::block_on(service.get_stats());

        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_barristers, 1);
        assert_eq!(stats.total_freelancers, 1);
        assert_eq!(stats.total_cases, 1);
        assert_eq!(stats.total_documents, 0);
        assert_eq!(stats.recent_activity.len(), 1);
        assert_eq!(stats.recent_activity[0].description, "Case \"X\" was active");
        assert_eq!(
            stats.recent_activity[0].created_at.as_deref(),
            Some("2025-03-01T10:00:00Z")
        );
    }

    #[test]
    fn failed_source_degrades_to_empty() {
        let service = DashboardService::with_source(Arc::new(FakeSource { fail_cases: true }));
        let stats = tokio_test::block_on(service.get_stats());

        assert_eq!(stats.total_cases, 0);
        assert!(stats.recent_activity.is_empty());
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_barristers, 1);
        assert_eq!(stats.total_freelancers, 1);
    }

    #[test]
    fn barrister_count_is_union_of_role_and_status() {
        let users: Vec<User> = decode(json!([
            { "role": "user", "barrister_status": "pending" },
            { "role": "barrister" },
            { "role": "barrister", "barrister_status": "approved" },
            { "role": "user", "barrister_status": null },
            { "role": "freelancer" }
        ]));

        let stats = summarize(&users, &[], &[], &[]);
        assert_eq!(stats.total_barristers, 3);
        assert_eq!(stats.total_users, 5);
    }

    #[test]
    fn barrister_status_counts_for_any_role() {
        let users: Vec<User> = decode(json!([
            { "role": "freelancer", "barrister_status": "pending" },
            { "role": "admin", "barrister_status": "pending" },
            { "name": "No Role", "barrister_status": "rejected" },
            { "role": "paralegal" }
        ]));

        let stats = summarize(&users, &[], &[], &[]);
        assert_eq!(users.len(), 4);
        assert_eq!(stats.total_barristers, 3);
        assert_eq!(stats.total_users, 1);
    }

    #[test]
    fn panicking_derivation_yields_empty_stats() {
        let stats = derive_or_default(|| panic!("bad record"));
        assert_eq!(stats, DashboardStats::default());

        let users: Vec<User> = decode(json!([{ "role": "user" }]));
        let stats = derive_or_default(|| summarize(&users, &[], &[], &[]));
        assert_eq!(stats.total_users, 1);
    }

    #[test]
    fn activity_uses_first_five_cases_sorted_newest_first() {
        let cases: Vec<Case> = decode(json!([
            { "id": 1, "title": "a", "status": "pending", "created_at": "2025-01-01T00:00:00Z" },
            { "id": 2, "title": "b", "status": "active", "created_at": "2025-01-05T00:00:00Z" },
            { "id": 3, "title": "c", "status": "completed", "created_at": "2025-01-03" },
            { "id": 4, "title": "d", "status": "declined", "created_at": "garbage" },
            { "id": 5, "title": "e", "status": "active", "created_at": "2025-01-04 12:00:00" },
            { "id": 6, "title": "f", "status": "active", "created_at": "2025-12-31T00:00:00Z" }
        ]));

        let ids: Vec<i64> = recent_activity(&cases).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 5, 3, 1, 4]);
    }

    #[test]
    fn stats_serialize_camel_case() {
        let value = serde_json::to_value(DashboardStats::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "totalUsers": 0,
                "totalBarristers": 0,
                "totalFreelancers": 0,
                "totalCases": 0,
                "totalDocuments": 0,
                "recentActivity": []
            })
        );
    }
}
