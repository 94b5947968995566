//! HTTP surface

pub mod error;
pub mod framing;
pub mod handlers;

use crate::loader::RateLoader;
use axum::{Router, routing::get};
use std::sync::Arc;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
pub struct AppState {
    pub loader: RateLoader,
}

impl AppState {
    pub fn new(loader: RateLoader) -> Arc<Self> {
        Arc::new(Self { loader })
    }
}

/// Assemble the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/check", get(handlers::check))
        .route("/get_rate", get(handlers::get_rate))
        .route("/health", get(handlers::health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cache, RatesError};
    use crate::test_support::{FakeSource, record};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn request(source: &Arc<FakeSource>, uri: &str) -> (StatusCode, Option<String>, Value) {
        let loader = RateLoader::new(source.clone(), Arc::new(Cache::new()));
        let app = router(AppState::new(loader));

        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let crc = response
            .headers()
            .get(framing::CHECKSUM_HEADER)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        if let Some(crc) = &crc {
            assert_eq!(crc, &crc32fast::hash(&bytes).to_string());
        }
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, crc, body)
    }

    fn two_days() -> FakeSource {
        FakeSource::new()
            .with_day("2024-01-01", vec![record(431, "USD", 3.1)])
            .with_day(
                "2024-01-02",
                vec![record(431, "USD", 3.105), record(456, "RUB", 3.5)],
            )
    }

    #[tokio::test]
    async fn test_check_success() {
        let source = Arc::new(two_days());

        let (status, crc, body) = request(&source, "/check?date=2024-01-02").await;

        assert_eq!(status, StatusCode::OK);
        assert!(crc.is_some());
        assert_eq!(body["date"], "2024-01-02");
        assert_eq!(body["status"], "Success");
        assert_eq!(body["message"], "Exchange rates loaded successfully.");
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(source.calls(), ["2024-01-02"]);
    }

    #[tokio::test]
    async fn test_check_error_statuses() {
        let source = Arc::new(two_days().with_error(
            "2024-02-01",
            RatesError::UpstreamUnavailable("boom".to_string()),
        ));

        let (status, crc, body) = request(&source, "/check?date=2024-13-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(crc.is_none());
        assert_eq!(body["detail"], "Invalid date format. Use YYYY-MM-DD.");

        let (status, _, body) = request(&source, "/check?date=2024-01-06").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "No data available for the given date.");

        let (status, _, body) = request(&source, "/check?date=2024-02-01").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Error loading data: boom");

        let (status, _, _) = request(&source, "/check").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_rate_with_change() {
        let source = Arc::new(two_days());

        let (status, crc, body) = request(&source, "/get_rate?date=2024-01-02&code=431").await;

        assert_eq!(status, StatusCode::OK);
        assert!(crc.is_some());
        assert_eq!(body["Cur_ID"], 431);
        assert_eq!(body["Cur_Abbreviation"], "USD");
        assert_eq!(body["Cur_OfficialRate"], 3.105);
        assert_eq!(body["change"], 0.005);
    }

    #[tokio::test]
    async fn test_get_rate_missing_previous_currency() {
        let source = Arc::new(two_days());

        let (status, _, body) = request(&source, "/get_rate?date=2024-01-02&code=456").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["change"], "Not found");
    }

    #[tokio::test]
    async fn test_get_rate_unknown_code() {
        let source = Arc::new(two_days());

        let (status, crc, body) = request(&source, "/get_rate?date=2024-01-02&code=999").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(crc.is_none());
        assert_eq!(body["detail"], "Currency with code 999 not found for 2024-01-02.");
        // The previous day is never consulted for an unknown code.
        assert_eq!(source.calls(), ["2024-01-02"]);
    }

    #[tokio::test]
    async fn test_get_rate_previous_day_failure_fails_request() {
        let source = Arc::new(
            FakeSource::new().with_day("2024-01-08", vec![record(431, "USD", 3.2)]),
        );

        let (status, _, body) = request(&source, "/get_rate?date=2024-01-08&code=431").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "No data available for the given date.");
    }

    #[tokio::test]
    async fn test_health() {
        let source = Arc::new(FakeSource::new());

        let (status, crc, body) = request(&source, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert!(crc.is_none());
        assert_eq!(body["status"], "ok");
    }
}
