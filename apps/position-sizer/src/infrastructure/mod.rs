//! Infrastructure layer - adapters around the sizing engine.

/// HTTP/REST API adapter.
pub mod http;

/// Prometheus metrics.
pub mod metrics;
