//! Credential readiness check

use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::warn;

use crate::core::providers::ProviderInfo;
use crate::server::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EnvCheckResponse {
    Ready {
        status: &'static str,
        provider: ProviderInfo,
    },
    NotConfigured {
        status: &'static str,
        error: String,
    },
}

/// Resolve the default vendor without calling it; 400 when unresolvable
pub async fn env_check(state: web::Data<AppState>) -> HttpResponse {
    match state.factory.check() {
        Ok(provider) => HttpResponse::Ok().json(EnvCheckResponse::Ready {
            status: "ready",
            provider,
        }),
        Err(e) => {
            warn!("Environment check failed: {}", e);
            HttpResponse::BadRequest().json(EnvCheckResponse::NotConfigured {
                status: "not configured",
                error: e.message().to_string(),
            })
        }
    }
}
