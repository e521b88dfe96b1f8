//! Health check endpoint

use actix_web::{HttpRequest, HttpResponse};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
    pub cf_ray: String,
}

impl HealthStatus {
    fn ok(now: DateTime<Utc>, cf_ray: String) -> Self {
        Self {
            status: "ok",
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            cf_ray,
        }
    }
}

fn header_or_unknown(req: &HttpRequest, name: &str) -> String {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Liveness check; echoes the edge ray id when present
pub async fn health_check(req: HttpRequest) -> HttpResponse {
    let ip = header_or_unknown(&req, "cf-connecting-ip");
    let status = HealthStatus::ok(Utc::now(), header_or_unknown(&req, "cf-ray"));

    info!("Health check from {} at {}", ip, status.timestamp);
    HttpResponse::Ok().json(status)
}
