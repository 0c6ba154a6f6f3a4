//! Search and filter rules for the list pages, plus the summary counts
//! shown above each list
//!
//! Queries are matched case-insensitively against the listed fields. An
//! empty query matches everything.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, Utc};

use crate::barristers::Barrister;
use crate::cases::{Case, CaseStatus, Priority};
use crate::dashboard::parse_timestamp;
use crate::documents::Document;
use crate::freelancers::Freelancer;
use crate::users::{User, UserRole, VerificationStatus};

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

fn contains(field: Option<&str>, needle: &str) -> bool {
    field
        .map(|f| f.to_lowercase().contains(needle))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub query: String,
    pub role: Option<UserRole>,
}

impl UserFilter {
    /// Name and email case-insensitively, phone as a raw substring
    pub fn matches(&self, user: &User) -> bool {
        let needle = normalize(&self.query);
        let hit = needle.is_empty()
            || contains(user.name.as_deref(), &needle)
            || contains(user.email.as_deref(), &needle)
            || user
                .phone
                .as_deref()
                .map(|p| p.contains(self.query.trim()))
                .unwrap_or(false);

        hit && self.role.as_ref().map_or(true, |r| user.role() == *r)
    }

    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}

/// Number of users per raw role value. Users without a role are left out.
pub fn role_counts(users: &[User]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for role in users.iter().filter_map(|u| u.role.as_ref()) {
        *counts.entry(role.to_string()).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Default)]
pub struct BarristerFilter {
    pub query: String,
    pub status: Option<VerificationStatus>,
}

impl BarristerFilter {
    pub fn matches(&self, barrister: &Barrister) -> bool {
        let needle = normalize(&self.query);
        let hit = needle.is_empty()
            || contains(barrister.name(), &needle)
            || contains(barrister.email(), &needle);

        hit && self
            .status
            .as_ref()
            .map_or(true, |s| barrister.verification_status == *s)
    }

    pub fn apply<'a>(&self, barristers: &'a [Barrister]) -> Vec<&'a Barrister> {
        barristers.iter().filter(|b| self.matches(b)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarristerStats {
    pub total: usize,
    pub verified: usize,
    pub pending: usize,
    pub rejected: usize,
}

pub fn barrister_stats(barristers: &[Barrister]) -> BarristerStats {
    let count = |status: VerificationStatus| {
        barristers
            .iter()
            .filter(|b| b.verification_status == status)
            .count()
    };

    BarristerStats {
        total: barristers.len(),
        verified: count(VerificationStatus::Verified),
        pending: count(VerificationStatus::Pending),
        rejected: count(VerificationStatus::Rejected),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    All,
    Available,
    Unavailable,
}

#[derive(Debug, Clone, Default)]
pub struct FreelancerFilter {
    pub query: String,
    pub availability: Availability,
}

impl FreelancerFilter {
    pub fn matches(&self, freelancer: &Freelancer) -> bool {
        let needle = normalize(&self.query);
        let hit = needle.is_empty()
            || contains(freelancer.name(), &needle)
            || contains(freelancer.email(), &needle)
            || freelancer.expertise_areas().join(" ").to_lowercase().contains(&needle);

        let available = freelancer.is_available();
        hit && match self.availability {
            Availability::All => true,
            Availability::Available => available,
            Availability::Unavailable => !available,
        }
    }

    pub fn apply<'a>(&self, freelancers: &'a [Freelancer]) -> Vec<&'a Freelancer> {
        freelancers.iter().filter(|f| self.matches(f)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreelancerStats {
    pub total: usize,
    pub available: usize,
    pub unavailable: usize,
    pub verified: usize,
}

pub fn freelancer_stats(freelancers: &[Freelancer]) -> FreelancerStats {
    let available = freelancers.iter().filter(|f| f.is_available()).count();
    FreelancerStats {
        total: freelancers.len(),
        available,
        unavailable: freelancers.len() - available,
        verified: freelancers.iter().filter(|f| f.is_verified()).count(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    pub query: String,
    pub status: Option<CaseStatus>,
    pub priority: Option<Priority>,
}

impl CaseFilter {
    pub fn matches(&self, case: &Case) -> bool {
        let needle = normalize(&self.query);
        let hit = needle.is_empty()
            || case.title.to_lowercase().contains(&needle)
            || contains(case.client_name(), &needle)
            || contains(case.client_email(), &needle);

        let status_ok = self.status.as_ref().map_or(true, |s| case.status == *s);
        let priority_ok = self.priority.as_ref().map_or(true, |p| {
            case.priority
                .as_ref()
                .map(|cp| cp.as_str().eq_ignore_ascii_case(p.as_str()))
                .unwrap_or(false)
        });

        hit && status_ok && priority_ok
    }

    pub fn apply<'a>(&self, cases: &'a [Case]) -> Vec<&'a Case> {
        cases.iter().filter(|c| self.matches(c)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseStats {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub completed: usize,
}

pub fn case_stats(cases: &[Case]) -> CaseStats {
    let count = |status: CaseStatus| cases.iter().filter(|c| c.status == status).count();
    CaseStats {
        total: cases.len(),
        active: count(CaseStatus::Active),
        pending: count(CaseStatus::Pending),
        completed: count(CaseStatus::Completed),
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    pub query: String,
    pub document_type: Option<String>,
}

impl DocumentFilter {
    pub fn matches(&self, document: &Document) -> bool {
        let needle = normalize(&self.query);
        let hit = needle.is_empty()
            || contains(document.document_type.as_deref(), &needle)
            || contains(document.user_name(), &needle)
            || contains(document.user_email(), &needle)
            || contains(document.case_title(), &needle);

        let type_ok = self.document_type.as_deref().map_or(true, |wanted| {
            document
                .document_type
                .as_deref()
                .map(|t| t.eq_ignore_ascii_case(wanted))
                .unwrap_or(false)
        });

        hit && type_ok
    }

    pub fn apply<'a>(&self, documents: &'a [Document]) -> Vec<&'a Document> {
        documents.iter().filter(|d| self.matches(d)).collect()
    }
}

/// Distinct non-empty document types, sorted
pub fn document_types(documents: &[Document]) -> Vec<String> {
    documents
        .iter()
        .filter_map(|d| d.document_type.clone())
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Documents created in the same calendar month as `now`
pub fn documents_this_month(documents: &[Document], now: DateTime<Utc>) -> usize {
    documents
        .iter()
        .filter_map(|d| d.created_at.as_deref().and_then(parse_timestamp))
        .filter(|created| created.year() == now.year() && created.month() == now.month())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::de::DeserializeOwned;
    use serde_json::{json, Value};

    fn decode<T: DeserializeOwned>(value: Value) -> Vec<T> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn user_query_and_role() {
        let users: Vec<User> = decode(json!([
            { "id": 1, "name": "Ada Lovelace", "email": "ada@example.com", "phone": "+44 7700", "role": "user" },
            { "id": 2, "name": "Bob", "email": "BOB@law.co", "role": "barrister" },
            { "id": 3, "role": "freelancer" },
            { "id": 4, "name": "Pat", "role": "paralegal" },
            { "id": 5, "name": "Nobody" }
        ]));

        let by_email = UserFilter { query: "bob@".into(), role: None };
        assert_eq!(by_email.apply(&users).len(), 1);

        let by_phone = UserFilter { query: "7700".into(), role: None };
        assert_eq!(by_phone.apply(&users)[0].id, 1);

        let by_role = UserFilter { query: String::new(), role: Some(UserRole::Freelancer) };
        assert_eq!(by_role.apply(&users)[0].id, 3);

        let raw_role = UserFilter { query: String::new(), role: Some(UserRole::from("paralegal")) };
        assert_eq!(raw_role.apply(&users)[0].id, 4);

        let counts = role_counts(&users);
        assert_eq!(counts.get("barrister"), Some(&1));
        assert_eq!(counts.get("paralegal"), Some(&1));
        assert_eq!(counts.get("admin"), None);
        assert_eq!(counts.values().sum::<usize>(), 4);
    }

    #[test]
    fn barrister_status_filter_and_stats() {
        let barristers: Vec<Barrister> = decode(json!([
            { "id": 1, "verification_status": "verified", "user": { "name": "Jane Q", "role": "barrister" } },
            { "id": 2, "verification_status": "pending" },
            { "id": 3 },
            { "id": 4, "verification_status": "rejected" }
        ]));

        let filter = BarristerFilter { query: "jane".into(), status: None };
        assert_eq!(filter.apply(&barristers).len(), 1);

        let pending = BarristerFilter { query: String::new(), status: Some(VerificationStatus::Pending) };
        assert_eq!(pending.apply(&barristers).len(), 2);

        assert_eq!(
            barrister_stats(&barristers),
            BarristerStats { total: 4, verified: 1, pending: 2, rejected: 1 }
        );
    }

    #[test]
    fn freelancer_expertise_and_availability() {
        let freelancers: Vec<Freelancer> = decode(json!([
            { "id": 1, "name": "Tax Tom", "expertise_areas": ["Tax", "Probate"], "is_available": true, "is_verified": true },
            { "id": 2, "name": "Lease Lia", "availability": false, "verification_status": "approved" },
            { "id": 3 }
        ]));

        let by_skill = FreelancerFilter { query: "probate".into(), availability: Availability::All };
        assert_eq!(by_skill.apply(&freelancers)[0].id, 1);

        let unavailable = FreelancerFilter { query: String::new(), availability: Availability::Unavailable };
        assert_eq!(unavailable.apply(&freelancers).len(), 2);

        assert_eq!(
            freelancer_stats(&freelancers),
            FreelancerStats { total: 3, available: 1, unavailable: 2, verified: 2 }
        );
    }

    #[test]
    fn case_priority_ignores_case() {
        let cases: Vec<Case> = decode(json!([
            { "id": 1, "title": "Lease", "status": "active", "priority": "HIGH",
              "client": { "name": "Carl", "email": "carl@x.io", "role": "user" } },
            { "id": 2, "title": "Will", "status": "pending", "priority": "low" },
            { "id": 3, "title": "Estate", "status": "completed" }
        ]));

        let high = CaseFilter { priority: Some(Priority::from("high")), ..Default::default() };
        assert_eq!(high.apply(&cases)[0].id, 1);

        let by_client = CaseFilter { query: "carl@".into(), ..Default::default() };
        assert_eq!(by_client.apply(&cases).len(), 1);

        let done = CaseFilter { status: Some(CaseStatus::Completed), ..Default::default() };
        assert_eq!(done.apply(&cases)[0].id, 3);

        assert_eq!(case_stats(&cases), CaseStats { total: 3, active: 1, pending: 1, completed: 1 });
    }

    #[test]
    fn documents_by_type_and_month() {
        let documents: Vec<Document> = decode(json!([
            { "id": 1, "document_type": "Contract", "created_at": "2026-10-02T09:00:00Z",
              "case": { "id": 7, "title": "Lease dispute" } },
            { "id": 2, "document_type": "contract", "created_at": "2025-10-05T09:00:00Z" },
            { "id": 3, "document_type": "Affidavit", "created_at": "2026-09-30T23:59:59Z" },
            { "id": 4 }
        ]));

        let contracts = DocumentFilter { query: String::new(), document_type: Some("CONTRACT".into()) };
        assert_eq!(contracts.apply(&documents).len(), 2);

        let by_case = DocumentFilter { query: "lease".into(), document_type: None };
        assert_eq!(by_case.apply(&documents)[0].id, 1);

        assert_eq!(document_types(&documents), vec!["Affidavit", "Contract", "contract"]);

        let now = Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap();
        assert_eq!(documents_this_month(&documents, now), 1);
    }
}
