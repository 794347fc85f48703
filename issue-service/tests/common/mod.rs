use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use issue_service::domain::issue::service::IssueService;
use issue_service::domain::user::service::UserService;
use issue_service::inbound::http::router::create_router;
use issue_service::outbound::repositories::PostgresIssueRepository;
use issue_service::outbound::repositories::PostgresUserRepository;
use serde_json::json;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Admin connection string for the test Postgres instance. Tests are
/// skipped when this is not set (see `require_test_db!`).
pub fn test_database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL").ok()
}

/// Skip the current integration test unless a test database is configured.
#[macro_export]
macro_rules! require_test_db {
    () => {
        if common::test_database_url().is_none() {
            eprintln!("TEST_DATABASE_URL not set; skipping integration test");
            return;
        }
    };
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub db: TestDb,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

/// Test database helper: one throwaway database per test
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let db = TestDb::new().await;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(PostgresUserRepository::new(db.pool.clone()));
        let issue_repository = Arc::new(PostgresIssueRepository::new(db.pool.clone()));

        let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
        let issue_service = Arc::new(IssueService::new(issue_repository));
        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET));

        let router = create_router(
            user_service,
            issue_service,
            user_repository,
            authenticator,
        );

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            db,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and log them in, returning (token, user_id).
    pub async fn register_and_login(&self, username: &str) -> (String, String) {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "email": format!("{}@example.com", username),
                "username": username,
                "password": "pass_word!"
            }))
            .send()
            .await
            .expect("Failed to register test user");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let user_id = body["data"]["id"].as_str().unwrap().to_string();

        let response = self
            .post("/api/auth/login")
            .json(&json!({
                "username": username,
                "password": "pass_word!"
            }))
            .send()
            .await
            .expect("Failed to log in test user");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let token = body["data"]["access_token"].as_str().unwrap().to_string();

        (token, user_id)
    }

    /// Create an issue for the token's user and return its id.
    pub async fn create_issue(&self, token: &str, body: serde_json::Value) -> String {
        let response = self
            .post_authenticated("/api/issues", token)
            .json(&body)
            .send()
            .await
            .expect("Failed to create test issue");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

impl TestDb {
    /// Create a new test database with a unique name
    pub async fn new() -> Self {
        let db_name = format!(
            "test_issue_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let postgres_url =
            test_database_url().expect("TEST_DATABASE_URL must be set for integration tests");

        let mut conn = PgConnection::connect(&postgres_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = postgres_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse TEST_DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool, db_name }
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        if let Some(postgres_url) = test_database_url() {
            tokio::spawn(async move {
                if let Ok(mut conn) = PgConnection::connect(&postgres_url).await {
                    let _ = conn.execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        ).as_str()
                    ).await;

                    let _ = conn
                        .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                        .await;
                }
            });
        }
    }
}
