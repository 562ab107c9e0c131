//! GraphQL HTTP session
//!
//! A thin reqwest wrapper holding the control-plane URL for the selected
//! region and environment, authenticated with the persisted session token
//! sent as a cookie.

use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use serde_json::Value;

use crate::error::ApiError;

pub const CLOUD_PROD_DOMAIN: &str = "stratodb.cloud";
pub const CLOUD_DEV_DOMAIN: &str = "stratodb-dev.cloud";

/// Domain of the control-plane environment
pub fn cloud_domain(env: &str) -> &'static str {
    if env.eq_ignore_ascii_case("dev") {
        CLOUD_DEV_DOMAIN
    } else {
        CLOUD_PROD_DOMAIN
    }
}

/// GraphQL endpoint for a region within an environment
pub fn cloud_url(region: &str, env: &str) -> String {
    format!("https://{region}.{}/graphql", cloud_domain(env))
}

/// Login page of an environment, where session tokens are issued
pub fn login_page_url(env: &str) -> String {
    format!("https://{}/login", cloud_domain(env))
}

/// Authenticated GraphQL session
#[derive(Debug)]
pub struct HttpSession {
    client: reqwest::Client,
    url: String,
}

impl HttpSession {
    /// Create a session against the given environment and region
    pub fn new(env: &str, region: &str, token: &str) -> Result<Self, ApiError> {
        Self::with_url(cloud_url(region, env), token)
    }

    /// Create a session against an explicit endpoint URL
    pub fn with_url(url: String, token: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let cookie = HeaderValue::from_str(&format!("session={token}"))
            .map_err(|_| ApiError::InvalidToken)?;
        headers.insert(COOKIE, cookie);
        let client = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Execute a GraphQL document and return its `data` payload.
    ///
    /// A 200 response whose body is not JSON is how the control plane answers
    /// an expired or missing session (it serves the login page instead), so
    /// that case maps to [`ApiError::Unauthorized`].
    pub async fn fetch(&self, query: &str) -> Result<Value, ApiError> {
        tracing::debug!(url = %self.url, "sending GraphQL request");
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(ApiError::Status { status });
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(_) => return Err(ApiError::Unauthorized),
        };
        Ok(body.get("data").cloned().unwrap_or(Value::Null))
    }
}
