use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use retprofile_core::analytics::http::HttpAnalyticsClient;
use retprofile_core::domain::chart::Panel;
use retprofile_core::domain::query::FormFields;
use retprofile_core::form::FormController;

#[derive(Debug, Parser)]
#[command(name = "retprofile_cli")]
struct Args {
    /// Market symbol, e.g. BTC:USD:daily.
    #[arg(long)]
    symbol: Option<String>,

    /// Condition expression evaluated by the analytics API.
    #[arg(long)]
    condition: Option<String>,

    /// API key. Falls back to ANALYTICS_API_KEY.
    #[arg(long)]
    api_key: Option<String>,

    /// Start of the market data range (YYYY-MM-DD). Defaults to 2015-01-01.
    #[arg(long)]
    from: Option<String>,

    /// End of the market data range (YYYY-MM-DD). Defaults to today (UTC).
    #[arg(long)]
    to: Option<String>,

    /// Print the result panel as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let settings = retprofile_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let panel = match run(&args, &settings).await {
        Ok(panel) => panel,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "submission could not be started");
            return Err(err);
        }
    };

    if args.json {
        let out = serde_json::to_string_pretty(&panel).context("failed to encode panel")?;
        println!("{out}");
    } else {
        for line in panel.lines() {
            println!("{line}");
        }
    }

    Ok(ExitCode::from(exit_status(&panel)))
}

async fn run(args: &Args, settings: &retprofile_core::config::Settings) -> anyhow::Result<Panel> {
    let fields = form_fields(args, settings.analytics_api_key.clone())?;
    let client = HttpAnalyticsClient::from_settings(settings)?;
    let controller = FormController::new(Arc::new(client));
    Ok(controller.submit(fields).await)
}

/// 0 for a chart or the real-key notice, 1 when the panel reports an error.
fn exit_status(panel: &Panel) -> u8 {
    match panel {
        Panel::Chart(_) | Panel::Notice { .. } => 0,
        Panel::ValidationErrors { .. } | Panel::Error { .. } => 1,
    }
}

fn form_fields(args: &Args, env_api_key: Option<String>) -> anyhow::Result<FormFields> {
    let defaults = FormFields::default();
    Ok(FormFields {
        symbol: args.symbol.clone().unwrap_or(defaults.symbol),
        condition: args.condition.clone().unwrap_or(defaults.condition),
        api_key: args.api_key.clone().or(env_api_key).unwrap_or(defaults.api_key),
        start_date: parse_date(args.from.as_deref(), "--from")?.unwrap_or(defaults.start_date),
        end_date: parse_date(args.to.as_deref(), "--to")?.unwrap_or(defaults.end_date),
    })
}

fn parse_date(arg: Option<&str>, flag: &str) -> anyhow::Result<Option<NaiveDate>> {
    arg.map(|s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("{flag} must be YYYY-MM-DD (got {s})"))
    })
    .transpose()
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
