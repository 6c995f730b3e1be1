//! Test helpers for integration tests
//!
//! Provides a test server over the in-memory store (or PostgreSQL when
//! configured), token minting and envelope assertions.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use library_api::{create_app, create_app_state, AppState};
use library_common::{AppConfig, JwtService, TokenType};
use library_service::{ServiceContext, StateService};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::memory::MemoryStore;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_USER: &str = "librarian";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// Backing store when running in memory
    pub store: Option<MemoryStore>,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over a fresh in-memory store
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        let store = MemoryStore::new();
        let ctx = memory_context(&store, &config).await?;
        Self::serve(AppState::new(ctx, config), Some(store)).await
    }

    /// Start a server against the PostgreSQL database from the environment
    pub async fn start_postgres() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;
        let state = create_app_state(config).await?;
        Self::serve(state, None).await
    }

    async fn serve(state: AppState, store: Option<MemoryStore>) -> Result<Self> {
        let jwt = JwtService::new(
            &state.config().jwt.secret,
            state.config().jwt.access_token_expiry,
        );
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            store,
            jwt,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A valid access token for `TEST_USER`
    pub fn token(&self) -> Result<String> {
        Ok(self.jwt.issue_access_token(TEST_USER)?)
    }

    /// A token that expired an hour ago
    pub fn expired_token(&self) -> Result<String> {
        Ok(self.jwt.encode_token(TEST_USER, TokenType::Access, -3600)?)
    }

    /// The in-memory store; panics on a PostgreSQL-backed server
    pub fn store(&self) -> &MemoryStore {
        match &self.store {
            Some(store) => store,
            None => panic!("server is not running in memory"),
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// POST a JSON body without credentials
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// POST a JSON body with a bearer token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// POST a raw body with a bearer token
    pub async fn post_raw(&self, path: &str, token: &str, body: &'static str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?)
    }

    /// Authenticated call under `/api/v1`, decoded as an envelope
    pub async fn call<T: Serialize>(&self, path: &str, body: &T) -> Result<Envelope> {
        let token = self.token()?;
        let response = self
            .post_auth(&format!("/api/v1{path}"), &token, body)
            .await?;
        assert_json(response, StatusCode::OK).await
    }
}

/// Response body shared by every API endpoint
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.code == library_common::codes::SUCCESS
    }

    /// `data`, failing with the envelope when the call did not succeed
    pub fn into_data(self) -> Result<Value> {
        if !self.is_success() {
            anyhow::bail!("Expected success, got {}: {}", self.code, self.message);
        }
        self.data
            .ok_or_else(|| anyhow::anyhow!("Success envelope carried no data"))
    }

    /// `data.id` of a successful envelope
    pub fn into_id(self) -> Result<String> {
        let data = self.into_data()?;
        data.get("id")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| anyhow::anyhow!("No id in {data}"))
    }
}

/// Configuration used by in-memory servers
pub fn test_config() -> Result<AppConfig> {
    let config = AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://unused/library".to_string()),
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        "LIBRARY_OVERDUE_FEE_PER_DAY" => Some("10.00".to_string()),
        _ => None,
    })
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;
    Ok(config)
}

/// A seeded service context over `store`
pub async fn memory_context(store: &MemoryStore, config: &AppConfig) -> Result<ServiceContext> {
    let jwt = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let ctx = store.service_context(jwt, config.library.clone())?;
    StateService::new(&ctx).ensure_registry().await?;
    Ok(ctx)
}

/// Helper to check if a PostgreSQL test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}
