//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use qamous_api::{create_app, memory_app_state, AppState};
use qamous_common::{AppConfig, JwtService};
use qamous_core::traits::DefinitionRepository;
use qamous_db::MemoryStore;
use qamous_service::ServiceContextBuilder;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::Seed;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// Shared with the server; writes here are visible to requests
    pub store: MemoryStore,
    pub seed: Seed,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with seeded users and a definition
    pub async fn start() -> Result<Self> {
        Self::start_with_env("test").await
    }

    /// Start a test server reporting the given `APP_ENV`
    pub async fn start_with_env(app_env: &str) -> Result<Self> {
        let config = test_config(app_env)?;
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

        let store = MemoryStore::new();
        let seed = Seed::create(&store, &jwt).await?;

        let state = memory_app_state(config, store.clone())?;
        Self::launch(create_app(state)?, store, seed).await
    }

    /// Start a test server whose definition lookups go through `definitions`
    ///
    /// Users and reactions still live in the returned server's store.
    pub async fn start_with_definitions(
        definitions: impl Fn(MemoryStore) -> Arc<dyn DefinitionRepository>,
    ) -> Result<Self> {
        let config = test_config("test")?;
        let jwt = Arc::new(JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry,
        ));

        let store = MemoryStore::new();
        let seed = Seed::create(&store, &jwt).await?;

        let context = ServiceContextBuilder::new()
            .user_repo(Arc::new(store.clone()))
            .definition_repo(definitions(store.clone()))
            .reaction_repo(Arc::new(store.clone()))
            .jwt_service(jwt)
            .build()
            .map_err(|e| anyhow::anyhow!("Context error: {e}"))?;

        let app = create_app(AppState::new(context, config))?;
        Self::launch(app, store, seed).await
    }

    async fn launch(app: Router, store: MemoryStore, seed: Seed) -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            store,
            seed,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(token).send().await?)
    }

    /// Make a POST request without a body or token
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).send().await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_auth_empty(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).bearer_auth(token).send().await?)
    }

    /// Make a POST request with auth token and JSON body
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
}

/// Configuration for an in-memory server; the seeded admin has id 3
pub fn test_config(app_env: &str) -> Result<AppConfig> {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("APP_ENV", app_env),
        ("API_PORT", "0"),
        ("DATABASE_URL", "memory://"),
        ("JWT_SECRET", "integration-test-secret"),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "1000"),
        ("ADMIN_USER_IDS", "3"),
        ("REACTIONS_RECALCULATE_BATCH_SIZE", "2"),
    ]);

    AppConfig::from_lookup(|name| vars.get(name).map(ToString::to_string))
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
