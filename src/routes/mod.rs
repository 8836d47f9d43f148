//! HTTP route handlers.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;

use axum::{middleware, routing::any, Router};
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::{catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer};

use crate::config::{CACHE_CONTROL_HEALTH, HEALTH_PATH};
use crate::error::AppError;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Fallback for unknown paths.
async fn not_found() -> AppError {
    AppError::NotFound
}

/// Layers wrapping the health route: panics become an unhealthy report, and
/// nothing it returns is cacheable, panic responses included.
fn with_health_layers<S>(routes: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes
        .layer(CatchPanicLayer::custom(health::panic_response))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ))
}

/// Creates the Axum router with all routes and headers.
pub fn create_router(state: AppState) -> Router {
    // Health check - every method reaches the handler so it can answer 405 itself
    let health_routes = with_health_layers(Router::new().route(HEALTH_PATH, any(health::health)));

    Router::new()
        .merge(health_routes)
        .fallback(not_found)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_health_panic_is_unhealthy_and_uncached() {
        let app: Router = with_health_layers(Router::new().route(HEALTH_PATH, get(explode)));

        let response = app
            .oneshot(Request::builder().uri(HEALTH_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[CACHE_CONTROL], CACHE_CONTROL_HEALTH);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["error"], "Unknown error");
    }
}
