use std::sync::{Arc, Mutex};

use advoqat_admin::auth::{CredentialStore, MemoryStore, TOKEN_KEY, USER_KEY};
use advoqat_admin::barristers::BarristersService;
use advoqat_admin::cases::CasesService;
use advoqat_admin::documents::DocumentsService;
use advoqat_admin::error::Error;
use advoqat_admin::fetch::{ApiClient, LoginRedirect};
use advoqat_admin::users::{UserRole, UserUpdate, UsersService};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingRedirect {
    routes: Mutex<Vec<String>>,
}

impl LoginRedirect for RecordingRedirect {
    fn redirect(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

fn client(server: &MockServer) -> (ApiClient, Arc<MemoryStore>, Arc<RecordingRedirect>) {
    let store = Arc::new(MemoryStore::new());
    let redirect = Arc::new(RecordingRedirect::default());
    let client = ApiClient::with_parts(
        &format!("{}/api", server.uri()),
        reqwest::Client::new(),
        store.clone(),
        redirect.clone(),
    );
    (client, store, redirect)
}

#[tokio::test]
async fn test_list_shapes_are_unwrapped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                { "id": 1, "role": "user" },
                { "id": 2, "role": "barrister" },
                { "id": 3, "name": "No Role" },
                { "id": 4, "role": null, "experience": 2.5 }
            ]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/barrister"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 5, "verification_status": "verified" }]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 9, "title": "Bare", "status": "active" }
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cases/available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 3 })))
        .mount(&mock_server)
        .await;

    let (client, _, _) = client(&mock_server);

    let users = UsersService::new(client.clone()).get_all().await.unwrap();
    assert_eq!(users.len(), 4);
    assert_eq!(users[1].role(), UserRole::Barrister);
    assert_eq!(users[2].name.as_deref(), Some("No Role"));
    assert!(users[3].role.is_none());

    let barristers = BarristersService::new(client.clone()).get_all().await.unwrap();
    assert_eq!(barristers.len(), 1);
    assert_eq!(barristers[0].id, 5);

    let cases = CasesService::new(client.clone());
    assert_eq!(cases.get_all().await.unwrap()[0].title, "Bare");
    assert!(cases.get_available().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("Authorization", "Bearer t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, store, _) = client(&mock_server);
    store.set(TOKEN_KEY, "t").unwrap();

    let users = UsersService::new(client).get_all().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_unauthorized_ends_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "expired" })))
        .mount(&mock_server)
        .await;

    let (client, store, redirect) = client(&mock_server);
    store.set(TOKEN_KEY, "stale").unwrap();
    store.set(USER_KEY, r#"{"id":1}"#).unwrap();

    let result = UsersService::new(client).get_all().await;

    assert!(matches!(result, Err(Error::Unauthorized)));
    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(store.get(USER_KEY), None);
    assert_eq!(*redirect.routes.lock().unwrap(), vec!["/auth/login".to_string()]);
}

#[tokio::test]
async fn test_api_error_carries_status_and_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cases/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Case not found" })))
        .mount(&mock_server)
        .await;

    let (client, store, redirect) = client(&mock_server);
    store.set(TOKEN_KEY, "t").unwrap();

    let err = CasesService::new(client).get_by_id("42").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.backend_message(), Some("Case not found"));
    assert_eq!(store.get(TOKEN_KEY), Some("t".to_string()));
    assert!(redirect.routes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_sends_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/barrister/search"))
        .and(query_param("q", "jane doe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 3, "user": { "name": "Jane Doe", "role": "barrister" } }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _, _) = client(&mock_server);
    let found = BarristersService::new(client).search("jane doe").await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), Some("Jane Doe"));
}

#[tokio::test]
async fn test_user_update_and_role() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/users/update"))
        .and(body_json(json!({ "userId": "17", "name": "New Name", "is_verified": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 17,
            "name": "New Name",
            "role": "freelancer",
            "is_verified": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/users/role"))
        .and(query_param("userId", "17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "role": "freelancer" })))
        .mount(&mock_server)
        .await;

    let (client, _, _) = client(&mock_server);
    let users = UsersService::new(client);

    let update = UserUpdate {
        name: Some("New Name".to_string()),
        is_verified: Some(true),
        ..Default::default()
    };
    let updated = users.update("17", &update).await.unwrap();
    assert_eq!(updated.name.as_deref(), Some("New Name"));
    assert!(updated.professional().is_verified());

    let role = users.get_role("17").await.unwrap();
    assert_eq!(role.role, UserRole::Freelancer);
}

#[tokio::test]
async fn test_health() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&mock_server)
        .await;

    let (client, _, _) = client(&mock_server);
    assert!(client.health().await);

    let unreachable = ApiClient::new("http://127.0.0.1:9");
    assert!(!unreachable.health().await);
}

#[tokio::test]
async fn test_documents_and_case_stats() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/documents/user"))
        .and(query_param("userId", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 1, "user_id": 4, "document_type": "Contract", "file_url": "https://files/x.pdf" }]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/documents/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "user_id": 4,
            "case": { "id": 3, "title": "Lease dispute" }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cases/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "active": 2, "pending": 1 })))
        .mount(&mock_server)
        .await;

    let (client, _, _) = client(&mock_server);
    let documents = DocumentsService::new(client.clone());

    let mine = documents.get_for_user("4").await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].document_type.as_deref(), Some("Contract"));

    let one = documents.get_by_id("12").await.unwrap();
    assert_eq!(one.case_title(), Some("Lease dispute"));

    let stats = CasesService::new(client).get_stats().await.unwrap();
    assert_eq!(stats["active"], 2);
}
