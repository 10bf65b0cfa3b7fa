pub mod analytics;
pub mod domain;
pub mod form;
pub mod pipeline;

pub mod config {
    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub analytics_base_url: Option<String>,
        pub analytics_api_key: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                analytics_base_url: non_empty_var("ANALYTICS_BASE_URL"),
                analytics_api_key: non_empty_var("ANALYTICS_API_KEY"),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}
