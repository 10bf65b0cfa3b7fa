use crate::analytics::error::ResponseShapeError;
use crate::analytics::{RawResponse, ResponseBody};
use crate::domain::profile::{
    EnrichedRow, ErrorMessageResponse, FieldErrors, ReturnProfileResponse,
    ValidationErrorResponse,
};
use crate::pipeline::transform::{enrich_rows, observation_count};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const NO_DATA_MESSAGE: &str = "no data returned for this condition";

#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    Success {
        rows: Vec<EnrichedRow>,
        observation_count: i64,
    },
    ValidationError {
        field_errors: Vec<FieldErrors>,
    },
    OtherError {
        message: String,
    },
    /// The exchange failed or the body broke the contract. `cause` is for logs only.
    TransportFailure {
        cause: String,
    },
}

impl ApiOutcome {
    pub fn transport_failure(err: &anyhow::Error) -> Self {
        ApiOutcome::TransportFailure {
            cause: format!("{err:#}"),
        }
    }
}

pub fn route_response(raw: RawResponse) -> ApiOutcome {
    let status = raw.status;
    let routed = match status {
        200 => route_success(&raw),
        422 => route_validation(&raw),
        _ => decode::<ErrorMessageResponse>(&raw, "error_message")
            .map(|resp| ApiOutcome::OtherError { message: resp.message }),
    };

    routed.unwrap_or_else(|err| {
        tracing::warn!(status, error = %err, raw_body = ?err.raw_body, "analytics response did not match contract");
        ApiOutcome::TransportFailure {
            cause: err.to_string(),
        }
    })
}

fn route_success(raw: &RawResponse) -> Result<ApiOutcome, ResponseShapeError> {
    let resp = decode::<ReturnProfileResponse>(raw, "results")?;
    let Some(observation_count) = observation_count(&resp.results) else {
        return Ok(ApiOutcome::OtherError {
            message: NO_DATA_MESSAGE.to_string(),
        });
    };

    Ok(ApiOutcome::Success {
        rows: enrich_rows(resp.results),
        observation_count,
    })
}

fn route_validation(raw: &RawResponse) -> Result<ApiOutcome, ResponseShapeError> {
    let resp = decode::<ValidationErrorResponse>(raw, "errors")?;

    let mut field_errors = Vec::with_capacity(resp.errors.len());
    for (field, value) in resp.errors {
        let messages = match value {
            Value::String(s) => vec![s],
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(ResponseShapeError::new(
                        raw.status,
                        "errors",
                        format!("non-string message for field {field}: {other}"),
                        &raw.body,
                    )),
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => {
                return Err(ResponseShapeError::new(
                    raw.status,
                    "errors",
                    format!("messages for field {field} are not a list: {other}"),
                    &raw.body,
                ))
            }
        };
        field_errors.push(FieldErrors { field, messages });
    }

    Ok(ApiOutcome::ValidationError { field_errors })
}

fn decode<T: DeserializeOwned>(
    raw: &RawResponse,
    stage: &'static str,
) -> Result<T, ResponseShapeError> {
    match &raw.body {
        ResponseBody::Json(v) => serde_json::from_value::<T>(v.clone())
            .map_err(|e| ResponseShapeError::new(raw.status, stage, e.to_string(), &raw.body)),
        ResponseBody::Text(_) => Err(ResponseShapeError::new(
            raw.status,
            stage,
            "body is not valid JSON",
            &raw.body,
        )),
    }
}
