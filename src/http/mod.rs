//! HTTP transport: axum routes over the catalog client.

pub mod dto;
pub mod error;
pub mod health;
pub mod metrics;
pub mod router;
pub mod routes;

pub use metrics::HttpMetrics;
pub use router::build_app_router;
