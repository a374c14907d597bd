//! Application router builder.
//!
//! Both the binary and the HTTP tests go through [`build_app_router`], so tests
//! exercise the same middleware stack production uses.

use std::any::Any;
use std::time::Duration;

use axum::http::header::{CONTENT_TYPE, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{middleware, Json, Router};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

use crate::app_system::{ConfigError, ServerConfig};
use crate::clients::ProductClient;

use super::metrics::{self, HttpMetrics};
use super::{health, routes};

/// Build the full application [`Router`] with all middleware layers.
pub fn build_app_router(
    products: ProductClient,
    metrics: HttpMetrics,
    config: &ServerConfig,
) -> Result<Router, ConfigError> {
    let app_routes = Router::new()
        .merge(health::router::<ProductClient>())
        .merge(metrics::router::<ProductClient>(metrics.clone()))
        .nest("/products", routes::router())
        .fallback(route_not_found);

    Ok(with_middleware(app_routes, metrics, config)?.with_state(products))
}

/// The middleware stack is applied bottom-up:
///
/// 1. CORS
/// 2. Security response headers
/// 3. Set request ID on incoming requests
/// 4. Structured request/response tracing
/// 5. Propagate request ID to response
/// 6. Request metrics
/// 7. Request timeout
/// 8. Panic recovery (catch panics, return 500)
fn with_middleware<S>(
    router: Router<S>,
    metrics: HttpMetrics,
    config: &ServerConfig,
) -> Result<Router<S>, ConfigError>
where
    S: Clone + Send + Sync + 'static,
{
    let cors = build_cors_layer(config)?;
    let request_id_header = HeaderName::from_static("x-request-id");

    let router = router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(middleware::from_fn_with_state(metrics, metrics::track_requests))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors);

    Ok(router)
}

/// Any origin when none are configured, otherwise exactly the listed ones.
pub fn build_cors_layer(config: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    if config.cors_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidOrigin { origin: origin.clone() })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]))
}

async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Unhandled error in request handler");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal Server Error" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[test]
    fn permissive_cors_without_origins() {
        assert!(build_cors_layer(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn invalid_origin_is_a_config_error() {
        let config = ServerConfig {
            cors_origins: vec!["http://ok.test".into(), "bad\norigin".into()],
            ..Default::default()
        };
        assert!(matches!(
            build_cors_layer(&config),
            Err(ConfigError::InvalidOrigin { .. })
        ));
    }

    async fn explode() -> StatusCode {
        panic!("secret detail")
    }

    #[tokio::test]
    async fn handler_panic_becomes_generic_500_with_headers() {
        let metrics = HttpMetrics::new().unwrap();
        let routes = Router::new().route("/explode", get(explode));
        let app = with_middleware(routes, metrics.clone(), &ServerConfig::default()).unwrap();

        let request = Request::builder().uri("/explode").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let headers = response.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "SAMEORIGIN");
        assert_eq!(headers.get("referrer-policy").unwrap(), "no-referrer");
        assert!(headers.get("x-request-id").is_some());

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Internal Server Error" }));
        assert!(!String::from_utf8_lossy(&bytes).contains("secret"));

        assert!(metrics.render().unwrap().contains(
            r#"http_requests_total{method="GET",route="/explode",status_code="500"} 1"#
        ));
    }
}
