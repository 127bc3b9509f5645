//! Introspection endpoints module
//!
//! `/health` is the liveness probe; `/api/status` reports uptime and the
//! build version. Both are plain JSON and never touch the filesystem.

use chrono::Utc;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::http::response::build_json_response;

#[derive(Debug, Serialize)]
struct HealthPayload<'a> {
    status: &'static str,
    /// RFC 3339 timestamp taken at request time
    timestamp: String,
    service: &'a str,
}

#[derive(Debug, Serialize)]
struct StatusPayload {
    status: &'static str,
    /// Seconds since process start, fractional
    uptime: f64,
    version: &'static str,
}

/// GET /health
pub fn health(service_name: &str) -> Response<Full<Bytes>> {
    build_json_response(
        StatusCode::OK,
        &HealthPayload {
            status: "ok",
            timestamp: Utc::now().to_rfc3339(),
            service: service_name,
        },
    )
}

/// GET /api/status
pub fn status(uptime_secs: f64) -> Response<Full<Bytes>> {
    build_json_response(
        StatusCode::OK,
        &StatusPayload {
            status: "running",
            uptime: uptime_secs,
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}
