use crate::analytics::{AnalyticsClient, RawResponse, ResponseBody};
use crate::config::Settings;
use crate::domain::query::{AuthHeader, QueryRequest};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.gatsiva.com";
const DEFAULT_PATH: &str = "/api/v1/conditions/return_profile";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct HttpAnalyticsClient {
    http: reqwest::Client,
    base_url: String,
    path: String,
}

impl HttpAnalyticsClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings
            .analytics_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = timeout_secs(std::env::var("ANALYTICS_TIMEOUT_SECS").ok().as_deref());

        let path = std::env::var("ANALYTICS_RETURN_PROFILE_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PATH.to_string());

        Self::new(base_url, path, Duration::from_secs(timeout_secs))
    }

    pub fn new(
        base_url: impl Into<String>,
        path: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build analytics http client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            path: path.into(),
        })
    }

    fn url(&self) -> String {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };

        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn headers(auth: &AuthHeader) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth.value()).context("API key is not a valid header value")?,
        );
        Ok(headers)
    }
}

// Zero would expire every request immediately, so it falls back to the default.
fn timeout_secs(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}

#[async_trait::async_trait]
impl AnalyticsClient for HttpAnalyticsClient {
    fn client_name(&self) -> &'static str {
        "http_json"
    }

    async fn post_query(&self, request: &QueryRequest, auth: &AuthHeader) -> Result<RawResponse> {
        let url = self.url();
        let headers = Self::headers(auth)?;

        let res = self
            .http
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .with_context(|| format!("analytics request to {url} failed"))?;

        let status = res.status().as_u16();
        let text = res
            .text()
            .await
            .context("failed to read analytics response body")?;

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(v) => ResponseBody::Json(v),
            Err(_) => ResponseBody::Text(text),
        };

        tracing::debug!(status, symbol = %request.symbol, "analytics response received");
        Ok(RawResponse { status, body })
    }
}
