use crate::domain::query::{AuthHeader, FormFields, QueryRequest, CONDITION_ID, RETURN_PERIODS};

/// Builds the API query from the form. Nothing is validated here; the API owns validation.
pub fn build_request(fields: &FormFields) -> (QueryRequest, AuthHeader) {
    let request = QueryRequest {
        symbol: fields.symbol.clone(),
        condition_id: CONDITION_ID,
        condition: fields.condition.clone(),
        periods: RETURN_PERIODS,
        from: fields.start_date,
        to: fields.end_date,
    };
    let auth = AuthHeader {
        token: fields.api_key.clone(),
    };
    (request, auth)
}
