use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use contactbook_api::app::validator::Validator;
use contactbook_api::{AppConfig, BootstrapConfig};
use contactbook_events::{InMemoryProducer, MessageProducer, Subscription, Message};
use contactbook_infra::Database;

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(producer: Option<Arc<dyn MessageProducer>>) -> Self {
        // Same composition as prod, bound to an ephemeral port.
        let app = contactbook_api::bootstrap(BootstrapConfig {
            config: AppConfig::default(),
            db: Database::new(),
            validator: Arc::new(Validator::new()),
            producer,
        })
        .expect("bootstrap failed");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app.router).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn register_and_login(&self, id: &str) -> String {
        let res = self
            .client
            .post(self.url("/api/users"))
            .json(&json!({ "id": id, "password": "secret", "name": "Test User" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = self
            .client
            .post(self.url("/api/users/_login"))
            .json(&json!({ "id": id, "password": "secret" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn create_contact(&self, token: &str, first_name: &str) -> String {
        let res = self
            .client
            .post(self.url("/api/contacts"))
            .bearer_auth(token)
            .json(&json!({
                "first_name": first_name,
                "last_name": "Smith",
                "email": format!("{}@example.com", first_name.to_lowercase()),
                "phone": "555-0100",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn drain(sub: &Subscription<Message>) -> Vec<String> {
    std::iter::from_fn(|| sub.try_recv().ok())
        .map(|m| m.event_type().to_string())
        .collect()
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn(None).await;

    let res = srv.client.get(srv.url("/api/users/_current")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "errors": "Unauthorized" }));

    let res = srv
        .client
        .get(srv.url("/api/contacts"))
        .bearer_auth("not-a-session")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_session_lifecycle() {
    let srv = TestServer::spawn(None).await;
    let token = srv.register_and_login("alice").await;

    let res = srv
        .client
        .patch(srv.url("/api/users/_current"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Alice Liddell" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = srv
        .client
        .get(srv.url("/api/users/_current"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["id"], "alice");
    assert_eq!(body["data"]["name"], "Alice Liddell");
    assert!(body["data"].get("token").is_none());

    let res = srv
        .client
        .delete(srv.url("/api/users"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"], true);

    let res = srv
        .client
        .get(srv.url("/api/users/_current"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_and_bad_login() {
    let srv = TestServer::spawn(None).await;
    srv.register_and_login("alice").await;

    let res = srv
        .client
        .post(srv.url("/api/users"))
        .json(&json!({ "id": "alice", "password": "x", "name": "Again" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = srv
        .client
        .post(srv.url("/api/users/_login"))
        .json(&json!({ "id": "alice", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = srv
        .client
        .post(srv.url("/api/users"))
        .json(&json!({ "id": "", "password": "x", "name": "Blank" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["errors"].as_str().unwrap().contains("id is required"));
}

#[tokio::test]
async fn contact_search_is_paged_and_private() {
    let srv = TestServer::spawn(None).await;
    let alice = srv.register_and_login("alice").await;
    let bob = srv.register_and_login("bob").await;

    for name in ["Ann", "Bert", "Berta", "Carl", "Dora"] {
        srv.create_contact(&alice, name).await;
    }
    let bobs_contact = srv.create_contact(&bob, "Eve").await;

    let res = srv
        .client
        .get(srv.url("/api/contacts?page=2&size=2"))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["paging"],
        json!({ "page": 2, "size": 2, "total_item": 5, "total_page": 3 })
    );

    let res = srv
        .client
        .get(srv.url("/api/contacts?name=bert"))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["paging"]["total_item"], 2);
    assert_eq!(body["paging"]["page"], 1);
    assert_eq!(body["paging"]["size"], 10);

    let res = srv
        .client
        .get(srv.url(&format!("/api/contacts/{bobs_contact}")))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contact_and_address_lifecycle() {
    let srv = TestServer::spawn(None).await;
    let token = srv.register_and_login("alice").await;
    let contact_id = srv.create_contact(&token, "Bob").await;

    let res = srv
        .client
        .put(srv.url(&format!("/api/contacts/{contact_id}")))
        .bearer_auth(&token)
        .json(&json!({ "first_name": "Robert", "last_name": "Smith", "email": "", "phone": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["first_name"], "Robert");

    let addresses = format!("/api/contacts/{contact_id}/addresses");
    let res = srv
        .client
        .post(srv.url(&addresses))
        .bearer_auth(&token)
        .json(&json!({
            "street": "1 Main St",
            "city": "Springfield",
            "province": "IL",
            "postal_code": "62701",
            "country": "US",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let address_id = body["data"]["id"].as_str().unwrap().to_string();

    let address = format!("{addresses}/{address_id}");
    let res = srv
        .client
        .put(srv.url(&address))
        .bearer_auth(&token)
        .json(&json!({ "city": "Chicago", "country": "US" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = srv.client.get(srv.url(&address)).bearer_auth(&token).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["city"], "Chicago");

    let res = srv.client.get(srv.url(&addresses)).bearer_auth(&token).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let res = srv.client.delete(srv.url(&address)).bearer_auth(&token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = srv
        .client
        .delete(srv.url(&format!("/api/contacts/{contact_id}")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = srv
        .client
        .get(srv.url(&format!("/api/contacts/{contact_id}")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
    let srv = TestServer::spawn(None).await;
    let token = srv.register_and_login("alice").await;

    let res = srv
        .client
        .get(srv.url("/api/contacts/not-a-uuid"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_payloads_use_the_error_envelope() {
    let srv = TestServer::spawn(None).await;

    let res = srv
        .client
        .post(srv.url("/api/users"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["errors"].is_string());

    let token = srv.register_and_login("alice").await;
    let res = srv
        .client
        .get(srv.url("/api/contacts?page=abc"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["errors"].is_string());
}

#[tokio::test]
async fn mutations_publish_events_when_a_producer_is_wired() {
    let bus = Arc::new(InMemoryProducer::new());
    let sub = bus.subscribe();
    let srv = TestServer::spawn(Some(bus.clone())).await;

    let token = srv.register_and_login("alice").await;
    srv.create_contact(&token, "Bob").await;

    let events = drain(&sub);
    assert_eq!(events, vec!["user.created", "user.updated", "contact.created"]);
}

#[tokio::test]
async fn docs_are_served_outside_production() {
    let srv = TestServer::spawn(None).await;

    let res = srv.client.get(srv.url("/openapi.json")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc: Value = res.json().await.unwrap();
    assert_eq!(doc["info"]["title"], "Contact Management API");
    assert_eq!(doc["servers"][0]["url"], "http://localhost:3001");

    let res = srv.client.get(srv.url("/docs")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("/openapi.json"));
}
