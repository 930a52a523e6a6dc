//! HTTP Handlers

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use bitcoin_rates::render::{CONTENT_TYPE, render};

use crate::state::AppState;

/// Prometheus scrape endpoint
///
/// The scrape runs on its own task so a client hanging up mid-request does
/// not abort the fetch; the collector state is updated either way.
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    let collector = state.collector.clone();
    let families = match tokio::spawn(async move { collector.collect().await }).await {
        Ok(families) => families,
        Err(e) => {
            tracing::error!("Scrape task failed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    match render(&families) {
        Ok(body) => ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            tracing::error!("Failed to render metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{Router, body::Body, http::Request};
    use bitcoin_rates::{ExporterCollector, FetchError, MockTicker, Price, PriceRecord};
    use tower::ServiceExt;

    fn app(ticker: MockTicker) -> Router {
        let collector = ExporterCollector::new(Arc::new(ticker)).unwrap();
        let state = AppState {
            collector: Arc::new(collector),
        };
        crate::router(state)
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_metrics_after_successful_scrape() {
        let record = PriceRecord::new().with("USD", Price::new(50000.1, 50010.0, 49990.0));
        let (status, content_type, body) = get_body(app(MockTicker::always(record)), "/metrics").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some(CONTENT_TYPE));
        assert!(body.contains("bitcoin_up 1"));
        assert!(body.contains("bitcoin_exporter_total_scrapes 1"));
        assert!(body.contains(r#"bitcoin_exchange_rate{class="ltp",currency="USD"} 50000.1"#));
        assert!(body.contains(r#"bitcoin_exchange_rate{class="ask",currency="USD"} 50010"#));
        assert!(body.contains(r#"bitcoin_exchange_rate{class="bid",currency="USD"} 49990"#));
    }

    #[tokio::test]
    async fn test_metrics_stay_up_when_ticker_fails() {
        let ticker = MockTicker::failing(FetchError::Transport("dns error".into()));
        let (status, _, body) = get_body(app(ticker), "/metrics").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("bitcoin_up 0"));
        assert!(body.contains("bitcoin_exporter_total_scrapes 0"));
        assert!(!body.contains("bitcoin_exchange_rate"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let (status, _, _) = get_body(app(MockTicker::default()), "/health").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_abandoned_request_still_scrapes() {
        let record = PriceRecord::new().with("USD", Price::new(1.0, 1.0, 1.0));
        let ticker = MockTicker::always(record).with_delay(Duration::from_millis(200));
        let collector = Arc::new(ExporterCollector::new(Arc::new(ticker)).unwrap());
        let app = crate::router(AppState {
            collector: Arc::clone(&collector),
        });

        // Client gives up long before the ticker answers
        let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
        let abandoned = tokio::time::timeout(Duration::from_millis(20), app.oneshot(request)).await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(300)).await;

        let body = render(&collector.collect().await).unwrap();
        assert!(body.contains("bitcoin_exporter_total_scrapes 2"));
        assert!(body.contains("bitcoin_up 1"));
    }
}
