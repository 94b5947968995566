use crate::core::RatesError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

impl RatesError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidDateFormat(_) => StatusCode::BAD_REQUEST,
            Self::NoDataForDate(_) => StatusCode::NOT_FOUND,
            Self::UpstreamUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::CurrencyCodeNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Client-facing explanation, rendered as `detail`.
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidDateFormat(_) => "Invalid date format. Use YYYY-MM-DD.".to_string(),
            Self::NoDataForDate(_) => "No data available for the given date.".to_string(),
            Self::UpstreamUnavailable(cause) => format!("Error loading data: {cause}"),
            Self::CurrencyCodeNotFound { date, code } => {
                format!("Currency with code {code} not found for {date}.")
            }
        }
    }
}

impl IntoResponse for RatesError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, "Request rejected");
        }

        let body = json!({ "detail": self.detail() });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (RatesError::InvalidDateFormat("x".into()), 400),
            (RatesError::NoDataForDate("2024-01-06".into()), 404),
            (RatesError::UpstreamUnavailable("boom".into()), 500),
            (
                RatesError::CurrencyCodeNotFound {
                    date: "2024-01-02".into(),
                    code: "999".into(),
                },
                404,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code().as_u16(), status, "{err:?}");
        }
    }

    #[tokio::test]
    async fn test_error_body() {
        let response = RatesError::UpstreamUnavailable("connection refused".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "Error loading data: connection refused");
    }
}
