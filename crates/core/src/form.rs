use crate::analytics::AnalyticsClient;
use crate::domain::chart::Panel;
use crate::domain::query::FormFields;
use crate::pipeline::chart::present_chart;
use crate::pipeline::request::build_request;
use crate::pipeline::router::{route_response, ApiOutcome};
use std::sync::Arc;
use uuid::Uuid;

pub const REAL_KEY_NOTICE: &str = "Please enter your actual API key above";
pub const INPUT_ERRORS_HEADING: &str = "Input errors detected";
pub const REQUEST_FAILED_MESSAGE: &str = "request failed";

/// Runs one submission end to end. Holds no state between submissions: the
/// returned [`Panel`] is the new content of the result region.
#[derive(Clone)]
pub struct FormController {
    client: Arc<dyn AnalyticsClient>,
}

impl FormController {
    pub fn new(client: Arc<dyn AnalyticsClient>) -> Self {
        Self { client }
    }

    pub async fn submit(&self, fields: FormFields) -> Panel {
        let submission_id = Uuid::new_v4();

        if fields.uses_sentinel_key() {
            tracing::info!(%submission_id, "sentinel API key submitted; skipping analytics call");
            return Panel::Notice {
                message: REAL_KEY_NOTICE.to_string(),
            };
        }

        let (request, auth) = build_request(&fields);
        tracing::info!(
            %submission_id,
            client = self.client.client_name(),
            symbol = %request.symbol,
            from = %request.from,
            to = %request.to,
            "submitting return profile query"
        );

        let outcome = match self.client.post_query(&request, &auth).await {
            Ok(raw) => route_response(raw),
            Err(err) => ApiOutcome::transport_failure(&err),
        };

        render_outcome(outcome, &fields, submission_id)
    }
}

fn render_outcome(outcome: ApiOutcome, fields: &FormFields, submission_id: Uuid) -> Panel {
    match outcome {
        ApiOutcome::Success {
            rows,
            observation_count,
        } => {
            tracing::info!(%submission_id, periods = rows.len(), observation_count, "return profile received");
            Panel::Chart(present_chart(
                &rows,
                observation_count,
                &fields.condition,
                &fields.symbol,
            ))
        }
        ApiOutcome::ValidationError { field_errors } => {
            tracing::info!(%submission_id, fields = field_errors.len(), "analytics API rejected input");
            Panel::ValidationErrors {
                heading: INPUT_ERRORS_HEADING.to_string(),
                messages: field_errors.into_iter().flat_map(|f| f.messages).collect(),
            }
        }
        ApiOutcome::OtherError { message } => {
            tracing::warn!(%submission_id, %message, "analytics API returned an error");
            error_panel(&message)
        }
        ApiOutcome::TransportFailure { cause } => {
            tracing::error!(%submission_id, %cause, "analytics request failed");
            error_panel(REQUEST_FAILED_MESSAGE)
        }
    }
}

fn error_panel(message: &str) -> Panel {
    Panel::Error {
        message: format!("An error occurred: {message}"),
    }
}
