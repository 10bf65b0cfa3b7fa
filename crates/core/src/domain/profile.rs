use serde::{Deserialize, Serialize};

/// Statistics of forward returns `returnperiod` periods after the condition fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnProfileRow {
    pub returnperiod: i64,
    pub n: i64,
    pub mean: f64,
    pub stddev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    pub returnperiod: i64,
    pub n: i64,
    pub mean: f64,
    pub stddev: f64,
    pub upper: f64,
    pub lower: f64,
}

// Wire shapes of the three response contracts.

#[derive(Debug, Clone, Deserialize)]
pub struct ReturnProfileResponse {
    pub results: Vec<ReturnProfileRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorMessageResponse {
    pub message: String,
}

/// Messages the API reported for one input field, in response order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    pub field: String,
    pub messages: Vec<String>,
}
