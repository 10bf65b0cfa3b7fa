pub mod error;
pub mod http;

use crate::domain::query::{AuthHeader, QueryRequest};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    /// Body that did not parse as JSON, kept verbatim for diagnostics.
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl RawResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: ResponseBody::Json(body),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Text(body.into()),
        }
    }
}

#[async_trait::async_trait]
pub trait AnalyticsClient: Send + Sync {
    fn client_name(&self) -> &'static str;

    /// Sends one return-profile query. `Err` means the exchange itself failed
    /// (connect, timeout, unreadable body); any HTTP status comes back as `Ok`.
    async fn post_query(
        &self,
        request: &QueryRequest,
        auth: &AuthHeader,
    ) -> anyhow::Result<RawResponse>;
}
