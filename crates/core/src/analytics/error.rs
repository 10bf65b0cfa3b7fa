use crate::analytics::ResponseBody;
use std::fmt;

/// A response whose body does not match the contract for its status code.
#[derive(Debug, Clone)]
pub struct ResponseShapeError {
    pub status: u16,
    pub stage: &'static str,
    pub detail: String,
    pub raw_body: Option<String>,
}

impl ResponseShapeError {
    pub fn new(
        status: u16,
        stage: &'static str,
        detail: impl Into<String>,
        body: &ResponseBody,
    ) -> Self {
        let raw_body = match body {
            ResponseBody::Json(v) => Some(v.to_string()),
            ResponseBody::Text(t) if t.is_empty() => None,
            ResponseBody::Text(t) => Some(t.clone()),
        };
        Self {
            status,
            stage,
            detail: detail.into(),
            raw_body,
        }
    }
}

impl fmt::Display for ResponseShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unexpected analytics response (status={}, stage={}): {}",
            self.status, self.stage, self.detail
        )
    }
}

impl std::error::Error for ResponseShapeError {}
