//! Database test fixtures and utilities
//!
//! Live-database tests need `DATABASE_URL` pointing at a disposable Postgres.
//! Without it `TestDatabase::connect` returns `None` and the test returns
//! early. Tests share one database, so every fixture uses unique names
//! instead of truncating tables.

use axum::http::{header::AUTHORIZATION, HeaderValue};
use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use chatbox_saas::backend::origins::ChatboxDomainStore;
use chatbox_saas::backend::routes::create_router;
use chatbox_saas::backend::server::{build_state, AppState, ServerConfig};

/// Run database migrations for testing
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Short random suffix for usernames, emails and domains
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Test database fixture
pub struct TestDatabase {
    pool: PgPool,
}

impl TestDatabase {
    /// Connect and migrate, or `None` when no database is configured
    pub async fn connect() -> Option<Self> {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping live database test");
            return None;
        };

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to create test database pool");
        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The production router over this database
    pub fn spawn_app(&self) -> DbTestApp {
        let pool = self.pool.clone();
        let store = Arc::new(ChatboxDomainStore::new(Some(pool.clone())));
        let state = build_state(ServerConfig::default(), Some(pool), store);
        let server = TestServer::new(create_router(state.clone())).unwrap();

        DbTestApp { server, state }
    }
}

/// A running app backed by the test database
pub struct DbTestApp {
    pub server: TestServer,
    pub state: AppState,
}

/// A signed-up account and its bearer header
pub struct TestOwner {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub auth: HeaderValue,
}

impl DbTestApp {
    /// Sign up a fresh account through the API
    pub async fn sign_up(&self) -> TestOwner {
        let suffix = unique_suffix();
        let username = format!("owner_{suffix}");
        let email = format!("{username}@example.com");

        let response = self
            .server
            .post("/api/auth/signup")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": "password123"
            }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        let token = body["token"].as_str().unwrap();
        let id = body["user"]["id"].as_str().unwrap().parse().unwrap();

        TestOwner {
            id,
            username,
            email,
            auth: HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        }
    }

    /// Create a chatbox through the API and return its JSON
    pub async fn create_chatbox(
        &self,
        owner: &TestOwner,
        body: serde_json::Value,
    ) -> serde_json::Value {
        let response = self
            .server
            .post("/api/chatboxes")
            .add_header(AUTHORIZATION, owner.auth.clone())
            .json(&body)
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }
}
