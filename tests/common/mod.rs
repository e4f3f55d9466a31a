#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use jobboard::jobboard_core::MIN_PASSWORD_COST;
use jobboard::jobboard_config::{AuthConfig, CorsConfig, JwtConfig, SuperadminConfig};
use jobboard::modules::auth::model::{CredentialRecord, NewCredential};
use jobboard::router::init_router;
use jobboard::state::AppState;
use jobboard::storage::{CredentialStore, InMemoryCredentialStore, InMemoryJobPostStore, StoreError};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";
pub const SUPERADMIN_EMAIL: &str = "admin@example.com";
pub const SUPERADMIN_PASSWORD: &str = "AdminPass123!";

/// Credential store that counts every call before delegating.
#[derive(Default)]
pub struct CountingCredentialStore {
    pub inner: InMemoryCredentialStore,
    calls: AtomicUsize,
}

impl CountingCredentialStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CredentialStore for CountingCredentialStore {
    async fn create(&self, new: NewCredential) -> Result<CredentialRecord, StoreError> {
        self.hit();
        self.inner.create(new).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError> {
        self.hit();
        self.inner.find_by_email(email).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CredentialRecord>, StoreError> {
        self.hit();
        self.inner.find_by_id(id).await
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CredentialRecord>, StoreError> {
        self.hit();
        self.inner.find_by_ids(ids).await
    }

    async fn find_all(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        self.hit();
        self.inner.find_all().await
    }
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET, 3600)
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt: jwt_config(),
        superadmin: Some(SuperadminConfig::new(SUPERADMIN_EMAIL, SUPERADMIN_PASSWORD)),
        password_cost: MIN_PASSWORD_COST,
    }
}

pub struct TestApp {
    pub router: Router,
    pub credentials: Arc<CountingCredentialStore>,
}

pub fn test_app() -> TestApp {
    test_app_with(auth_config())
}

pub fn test_app_with(auth_config: AuthConfig) -> TestApp {
    let credentials = Arc::new(CountingCredentialStore::default());
    let state = AppState::new(
        credentials.clone(),
        Arc::new(InMemoryJobPostStore::new()),
        auth_config,
        CorsConfig {
            allowed_origins: Vec::new(),
        },
    );

    TestApp {
        router: init_router(state, Duration::from_secs(10)),
        credentials,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    /// Registers a user and returns `(id, token)`.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> (String, String) {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({ "name": name, "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

        (
            body["data"]["user"]["id"].as_str().unwrap().to_string(),
            body["data"]["token"].as_str().unwrap().to_string(),
        )
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn superadmin_token(&self) -> String {
        let (status, body) = self.login(SUPERADMIN_EMAIL, SUPERADMIN_PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    pub async fn create_post(&self, token: &str, payload: Value) -> (StatusCode, Value) {
        self.request("POST", "/api/job-posts", Some(token), Some(payload))
            .await
    }
}

pub fn job_post_payload(title: &str) -> Value {
    json!({
        "title": title,
        "department": "Engineering",
        "location": "Berlin",
        "type": "Full-time",
        "description": "Build and run the platform.",
        "requirements": ["Rust", "PostgreSQL"]
    })
}
