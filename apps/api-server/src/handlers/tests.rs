use std::sync::{Arc, Mutex, OnceLock};

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use whipsaw_core::ports::{
    ADMIN_ROLE, MailError, MailRelay, Mailbox, OutboundEmail, PasswordService, TokenService,
};
use whipsaw_core::services::AuthGate;
use whipsaw_infra::auth::JwtConfig;
use whipsaw_infra::{AdminAccount, Argon2PasswordService, FixedAdminVerifier, JwtTokenService};

use super::configure_routes;
use crate::config::MailConfig;
use crate::state::{AppState, ContentStores};

const USERNAME: &str = "admin";
const PASSWORD: &str = "correct horse battery";

#[derive(Default)]
struct RecordingRelay {
    sent: Mutex<Vec<OutboundEmail>>,
    fail: bool,
}

#[async_trait]
impl MailRelay for RecordingRelay {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Rejected {
                status: 401,
                detail: "bad api key".to_string(),
            });
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

fn jwt() -> JwtConfig {
    JwtConfig {
        secret: "http-test-secret".to_string(),
        issuer: "whipsaw-test".to_string(),
    }
}

// Argon2 is slow in debug builds; hash once per test binary.
fn admin_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| Argon2PasswordService::new().hash(PASSWORD).unwrap())
        .clone()
}

fn test_state(relay: Arc<RecordingRelay>) -> AppState {
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let account = AdminAccount {
        username: USERNAME.to_string(),
        password_hash: admin_hash(),
    };
    let auth = AuthGate::new(
        Arc::new(FixedAdminVerifier::new(account, passwords)),
        Arc::new(JwtTokenService::new(jwt())),
    );
    let mail = MailConfig {
        relay_url: None,
        relay_api_key: None,
        sender: Mailbox::named("Whipsaw Website", "site@whipsaw.test"),
        recipient: Mailbox::new("studio@whipsaw.test"),
    };

    AppState::new(ContentStores::in_memory(), Arc::new(auth), relay, &mail)
}

fn bearer() -> (header::HeaderName, String) {
    let token = JwtTokenService::new(jwt())
        .issue_token(USERNAME, ADMIN_ROLE)
        .unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_routes),
        )
        .await
    };
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn blog(title: &str) -> Value {
    json!({"title": title, "content": "C", "author": "A"})
}

fn work_without_client() -> Value {
    json!({
        "title": "Rebrand",
        "category": "Identity",
        "description": "A full rebrand",
        "content": "<p>Details</p>",
        "author": "Admin"
    })
}

#[actix_web::test]
async fn test_create_blog_returns_generated_fields() {
    let app = app!(test_state(Arc::default()));

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(bearer())
            .set_json(blog("T"))
    );

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
    assert_eq!(body["title"], "T");
    assert_eq!(body["author"], "A");
}

#[actix_web::test]
async fn test_writes_without_credential_are_rejected() {
    let app = app!(test_state(Arc::default()));

    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/api/blogs").set_json(blog("T"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
            .set_json(blog("T"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, list) = send!(app, test::TestRequest::get().uri("/api/blogs"));
    assert_eq!(list, json!([]));
}

#[actix_web::test]
async fn test_authorization_is_checked_before_validation() {
    let app = app!(test_state(Arc::default()));

    let (status, _) = send!(
        app,
        test::TestRequest::post().uri("/api/work").set_json(json!({}))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_work_writes_without_credential_leave_item_unchanged() {
    let app = app!(test_state(Arc::default()));
    let mut payload = work_without_client();
    payload["client"] = json!("Acme");

    let (_, created) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/work")
            .insert_header(bearer())
            .set_json(payload)
    );
    let id = created["id"].as_str().unwrap().to_string();
    let uri = format!("/api/work/{id}");

    let (status, _) = send!(app, test::TestRequest::delete().uri(&uri));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&uri)
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&uri)
            .insert_header((header::AUTHORIZATION, "Bearer forged"))
            .set_json(json!({"title": "Hijacked"}))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, fetched) = send!(app, test::TestRequest::get().uri(&uri));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn test_bearer_scheme_is_case_insensitive() {
    let app = app!(test_state(Arc::default()));
    let (name, value) = bearer();
    let lowercase = value.replacen("Bearer", "bearer", 1);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header((name, lowercase))
            .set_json(blog("T"))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "T");
}

#[actix_web::test]
async fn test_work_missing_client_is_a_validation_error() {
    let app = app!(test_state(Arc::default()));

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/work")
            .insert_header(bearer())
            .set_json(work_without_client())
    );

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["problems"], json!(["client is required"]));

    let (_, list) = send!(app, test::TestRequest::get().uri("/api/work"));
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn test_work_create_and_get() {
    let app = app!(test_state(Arc::default()));
    let mut payload = work_without_client();
    payload["client"] = json!("Acme");
    payload["year"] = json!("2024");

    let (status, created) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/work")
            .insert_header(bearer())
            .set_json(payload)
    );
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["date"].is_string());

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send!(
        app,
        test::TestRequest::get().uri(&format!("/api/work/{id}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn test_deleted_blog_is_not_found() {
    let app = app!(test_state(Arc::default()));

    let (_, created) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(bearer())
            .set_json(blog("Short-lived"))
    );
    let id = created["id"].as_str().unwrap().to_string();

    let (status, deleted) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/blogs/{id}"))
            .insert_header(bearer())
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["success"], true);
    assert_eq!(deleted["data"]["id"], id.as_str());

    let (status, body) = send!(
        app,
        test::TestRequest::get().uri(&format!("/api/blogs/{id}"))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Blog post not found");

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/blogs/{id}"))
            .insert_header(bearer())
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_malformed_id_is_not_found() {
    let app = app!(test_state(Arc::default()));

    let (status, _) = send!(app, test::TestRequest::get().uri("/api/blogs/not-an-id"));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_unauthorized_update_leaves_entity_unchanged() {
    let app = app!(test_state(Arc::default()));

    let (_, created) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(bearer())
            .set_json(blog("Original"))
    );
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/blogs/{id}"))
            .set_json(json!({"title": "Hijacked"}))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, fetched) = send!(
        app,
        test::TestRequest::get().uri(&format!("/api/blogs/{id}"))
    );
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn test_sequential_updates_last_title_wins() {
    let app = app!(test_state(Arc::default()));

    let (_, created) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(bearer())
            .set_json(blog("First"))
    );
    let id = created["id"].as_str().unwrap().to_string();

    for title in ["Second", "Third"] {
        let (status, _) = send!(
            app,
            test::TestRequest::put()
                .uri(&format!("/api/blogs/{id}"))
                .insert_header(bearer())
                .set_json(json!({ "title": title }))
        );
        assert_eq!(status, StatusCode::OK);
    }

    let (_, fetched) = send!(
        app,
        test::TestRequest::get().uri(&format!("/api/blogs/{id}"))
    );
    assert_eq!(fetched["title"], "Third");
    assert_eq!(fetched["content"], "C");
    assert_eq!(fetched["createdAt"], created["createdAt"]);
    assert_ne!(fetched["updatedAt"], created["updatedAt"]);
}

#[actix_web::test]
async fn test_list_is_newest_first() {
    let app = app!(test_state(Arc::default()));

    for title in ["Older", "Newer"] {
        send!(
            app,
            test::TestRequest::post()
                .uri("/api/blogs")
                .insert_header(bearer())
                .set_json(blog(title))
        );
        // keep creation timestamps apart
        actix_web::rt::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let (status, list) = send!(app, test::TestRequest::get().uri("/api/blogs"));
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Newer", "Older"]);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let app = app!(test_state(Arc::default()));

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(bearer())
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{\"title\": ")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn test_login_issues_working_credential() {
    let app = app!(test_state(Arc::default()));

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"username": USERNAME, "password": PASSWORD}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokenType"], "Bearer");

    let credential = body["credential"].as_str().unwrap();
    let (status, profile) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/auth/profile")
            .insert_header((header::AUTHORIZATION, format!("Bearer {credential}")))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile, json!({"username": USERNAME, "role": ADMIN_ROLE}));
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let app = app!(test_state(Arc::default()));

    for (username, password) in [(USERNAME, "wrong"), ("mallory", PASSWORD), ("", "")] {
        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({"username": username, "password": password}))
        );
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid credentials");
    }
}

#[actix_web::test]
async fn test_contact_forwards_to_recipient() {
    let relay = Arc::new(RecordingRelay::default());
    let app = app!(test_state(relay.clone()));

    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/api/contact").set_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "Hello <team>\nLet's talk."
        }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Message sent successfully");

    let sent = relay.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to.email, "studio@whipsaw.test");
    assert_eq!(
        sent[0].reply_to.as_ref().map(|m| m.email.as_str()),
        Some("ada@example.com")
    );
    assert!(sent[0].html_body.contains("Hello &lt;team&gt;<br>"));

    assert_eq!(sent[1].to.email, "ada@example.com");
    assert_eq!(sent[1].from.email, "site@whipsaw.test");
    assert_eq!(
        sent[1].subject,
        "Whipsaw Contact: Thank you for your message, Ada"
    );
    assert!(sent[1].html_body.contains("Hello &lt;team&gt;<br>Let&#39;s talk."));
}

#[actix_web::test]
async fn test_contact_rejects_invalid_submission() {
    let relay = Arc::new(RecordingRelay::default());
    let app = app!(test_state(relay.clone()));

    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/api/contact").set_json(json!({
            "name": "Ada",
            "email": "not-an-address",
            "message": ""
        }))
    );
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["problems"].as_array().unwrap().len(), 2);
    assert!(relay.sent.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_contact_relay_failure_is_bad_gateway() {
    let relay = Arc::new(RecordingRelay {
        fail: true,
        ..Default::default()
    });
    let app = app!(test_state(relay));

    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/api/contact").set_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "Hello"
        }))
    );
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!body["detail"].as_str().unwrap().contains("api key"));
}

#[actix_web::test]
async fn test_health_reports_storage() {
    let app = app!(test_state(Arc::default()));

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[actix_web::test]
async fn test_seed_fills_an_empty_collection_once() {
    let state = test_state(Arc::default());

    assert_eq!(crate::seed::seed_sample_content(&state).await.unwrap(), 3);
    assert_eq!(crate::seed::seed_sample_content(&state).await.unwrap(), 0);
    assert_eq!(state.blogs.count().await.unwrap(), 3);
}
