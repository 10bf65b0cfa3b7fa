use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use retprofile_core::analytics::http::HttpAnalyticsClient;
use retprofile_core::domain::chart::Panel;
use retprofile_core::domain::query::FormFields;
use retprofile_core::form::{FormController, INPUT_ERRORS_HEADING};

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = retprofile_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let client = match HttpAnalyticsClient::from_settings(&settings) {
        Ok(client) => client,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            return Err(e);
        }
    };

    let state = AppState {
        controller: FormController::new(Arc::new(client)),
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8050);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "web listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[derive(Clone)]
struct AppState {
    controller: FormController,
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/defaults", get(defaults))
        .route("/api/submit", post(submit))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn defaults() -> Json<FormFields> {
    Json(FormFields::default())
}

// Every failure is folded into the panel, so this always answers 200. A form the
// extractor cannot read (e.g. a cleared date picker) is reported as an input error.
async fn submit(
    State(state): State<AppState>,
    fields: Result<Json<FormFields>, JsonRejection>,
) -> Json<Panel> {
    match fields {
        Ok(Json(fields)) => Json(state.controller.submit(fields).await),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "unreadable form submission");
            Json(Panel::ValidationErrors {
                heading: INPUT_ERRORS_HEADING.to_string(),
                messages: vec![rejection.body_text()],
            })
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &retprofile_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use retprofile_core::analytics::{AnalyticsClient, RawResponse};
    use retprofile_core::domain::query::{AuthHeader, QueryRequest};
    use serde_json::{json, Value};

    struct CannedClient(RawResponse);

    #[async_trait::async_trait]
    impl AnalyticsClient for CannedClient {
        fn client_name(&self) -> &'static str {
            "canned"
        }

        async fn post_query(
            &self,
            _request: &QueryRequest,
            _auth: &AuthHeader,
        ) -> anyhow::Result<RawResponse> {
            Ok(self.0.clone())
        }
    }

    async fn spawn(raw: RawResponse) -> String {
        let state = AppState {
            controller: FormController::new(Arc::new(CannedClient(raw))),
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn form(api_key: &str) -> Value {
        json!({
            "symbol": "BTC:USD:daily",
            "condition": "bollinger range(20,2) crosses below 0",
            "api_key": api_key,
            "start_date": "2015-01-01",
            "end_date": "2017-10-10",
        })
    }

    #[tokio::test]
    async fn serves_page_health_and_defaults() {
        let base = spawn(RawResponse::json(200, json!({"results": []}))).await;
        let http = reqwest::Client::new();

        let page = http.get(format!("{base}/")).send().await.unwrap();
        assert_eq!(page.status(), 200);
        let html = page.text().await.unwrap();
        assert!(html.contains("id=\"result-region\""));
        assert!(html.contains("id=\"logo\""));

        let health = http.get(format!("{base}/healthz")).send().await.unwrap();
        assert_eq!(health.text().await.unwrap(), "ok");

        let defaults: Value = http
            .get(format!("{base}/api/defaults"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(defaults["symbol"], "BTC:USD:daily");
        assert_eq!(defaults["api_key"], "testkey");
        assert_eq!(defaults["start_date"], "2015-01-01");
    }

    #[tokio::test]
    async fn submit_returns_notice_for_sentinel_key() {
        let base = spawn(RawResponse::json(500, json!({"message": "unreachable"}))).await;

        let panel: Value = reqwest::Client::new()
            .post(format!("{base}/api/submit"))
            .json(&form("testkey"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(
            panel,
            json!({"kind": "notice", "message": "Please enter your actual API key above"})
        );
    }

    #[tokio::test]
    async fn cleared_date_becomes_input_error() {
        let base = spawn(RawResponse::json(500, json!({"message": "unreachable"}))).await;
        let mut body = form("real");
        body["end_date"] = json!("");

        let res = reqwest::Client::new()
            .post(format!("{base}/api/submit"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);

        let panel: Value = res.json().await.unwrap();
        assert_eq!(panel["kind"], "validation_errors");
        assert_eq!(panel["heading"], "Input errors detected");
        let messages = panel["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].as_str().unwrap().contains("end_date"));
    }

    #[tokio::test]
    async fn submit_returns_chart_panel() {
        let base = spawn(RawResponse::json(
            200,
            json!({"results": [
                {"returnperiod": 1, "n": 5, "mean": 0.5, "stddev": 0.25},
                {"returnperiod": 2, "n": 5, "mean": 0.75, "stddev": 0.5},
            ]}),
        ))
        .await;

        let panel: Value = reqwest::Client::new()
            .post(format!("{base}/api/submit"))
            .json(&form("real"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(panel["kind"], "chart");
        assert_eq!(panel["series"][1]["label"], "2 stddev band upper");
        assert_eq!(panel["series"][1]["y"], json!([0.75, 1.25]));
        assert_eq!(panel["series"][2]["y"], json!([0.25, 0.25]));
    }
}
