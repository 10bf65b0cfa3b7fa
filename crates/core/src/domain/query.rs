use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SYMBOL: &str = "BTC:USD:daily";
pub const DEFAULT_CONDITION: &str = "bollinger range(20,2) crosses below 0";

/// Placeholder key pre-filled in the form. Submissions carrying it never reach the API.
pub const SENTINEL_API_KEY: &str = "testkey";

pub const CONDITION_ID: i64 = 1;
pub const RETURN_PERIODS: u32 = 60;

/// Snapshot of the form inputs at the moment the user hits Submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub symbol: String,
    pub condition: String,
    pub api_key: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FormFields {
    pub fn default_start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default()
    }

    pub fn uses_sentinel_key(&self) -> bool {
        self.api_key == SENTINEL_API_KEY
    }
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            condition: DEFAULT_CONDITION.to_string(),
            api_key: SENTINEL_API_KEY.to_string(),
            start_date: Self::default_start_date(),
            end_date: Utc::now().date_naive(),
        }
    }
}

/// JSON body of `POST /conditions/return_profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub symbol: String,
    pub condition_id: i64,
    pub condition: String,
    pub periods: u32,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeader {
    pub token: String,
}

impl AuthHeader {
    pub const SCHEME: &'static str = "Bearer";

    pub fn value(&self) -> String {
        format!("{} {}", Self::SCHEME, self.token)
    }
}
