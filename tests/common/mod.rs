#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use uuid::Uuid;

use resource_api::auth::JwtKeys;
use resource_api::config::AppConfig;
use resource_api::database::MemoryStore;

pub const TEST_SECRET: &str = "integration-test-secret";

/// The full router served in-process on a free port, over a fresh memory store.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    keys: JwtKeys,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with(|_| {}).await
    }

    /// Start with development defaults adjusted by `configure`. Anonymous
    /// access is off unless `configure` turns it back on.
    pub async fn start_with(configure: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        let mut config = AppConfig::development();
        config.security.jwt_secret = TEST_SECRET.to_string();
        config.security.allow_anonymous = false;
        config.api.enable_request_logging = false;
        configure(&mut config);

        let app = resource_api::app::app(Arc::new(MemoryStore::new()), &config)?;

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: Client::new(),
            keys: JwtKeys::from_secret(TEST_SECRET, 1)?,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn token_for(&self, user_id: Uuid) -> Result<String> {
        Ok(self.keys.generate(user_id)?)
    }

    /// A new user and a bearer token for it.
    pub fn new_user(&self) -> Result<(Uuid, String)> {
        let user_id = Uuid::new_v4();
        Ok((user_id, self.token_for(user_id)?))
    }

    pub fn get(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(token)
    }

    pub fn post(&self, path: &str, token: &str, body: &Value) -> RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(token).json(body)
    }

    pub fn patch(&self, path: &str, token: &str, body: &Value) -> RequestBuilder {
        self.client.patch(self.url(path)).bearer_auth(token).json(body)
    }

    pub fn delete(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.delete(self.url(path)).bearer_auth(token)
    }
}

/// Status and parsed JSON body.
pub async fn json(res: Response) -> Result<(reqwest::StatusCode, Value)> {
    let status = res.status();
    let body = res.json::<Value>().await.context("response body was not JSON")?;
    Ok((status, body))
}

/// `data.id` of an envelope as a string.
pub fn data_id(body: &Value) -> String {
    body["data"]["id"].as_str().unwrap_or_default().to_string()
}
