//! HTTP route modules
//!
//! Request bodies are parsed leniently: a missing, empty or malformed JSON
//! body yields the request type's default value instead of a 400, and a
//! field of the wrong type is treated as absent without touching the others.

pub mod agent;
pub mod chat;
pub mod env_check;
pub mod health;
pub mod persona;

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use bytes::Bytes;
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::providers::{HeaderMap, VendorSelection};
use crate::server::middleware::RequestId;
use crate::utils::error::{GatewayError, Result};

/// Register every route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::health_check))
        .route("/health", web::get().to(health::health_check))
        .route("/hello", web::post().to(persona::hello))
        .route("/support", web::post().to(persona::support))
        .route("/wonka", web::post().to(persona::wonka))
        .route("/chat", web::post().to(chat::chat))
        .route("/custom-chat", web::post().to(chat::custom_chat))
        .route("/env-check", web::get().to(env_check::env_check))
        .route("/agent", web::post().to(agent::create_agent))
        .route("/agent/{id}/generate", web::post().to(agent::generate));
}

/// Fallback for unmatched paths
pub async fn not_found(req: HttpRequest) -> Result<&'static str> {
    debug!(request_id = %request_id(&req), path = req.path(), "No route matched");
    Err(GatewayError::not_found("Not found"))
}

/// JSON body extractor that never rejects malformed input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LenientJson<T>(pub T);

impl<T> LenientJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for LenientJson<T>
where
    T: DeserializeOwned + Default + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = Bytes::from_request(req, payload);
        Box::pin(async move {
            let body = body.await.map_err(body_error)?;
            Ok(LenientJson(parse_lenient(&body)))
        })
    }
}

fn body_error(err: actix_web::Error) -> actix_web::Error {
    let status = err.as_response_error().status_code();
    warn!(status = status.as_u16(), "Failed to read request body: {}", err);
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::payload_too_large(err.to_string()).into()
    } else {
        GatewayError::bad_request(err.to_string()).into()
    }
}

/// Deserialize `body`; anything other than a JSON object yields `T::default()`.
///
/// Field-level leniency comes from [`lenient`] on each field.
pub fn parse_lenient<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    let value = match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            debug!("JSON body is not an object, using defaults");
            return T::default();
        }
        Err(e) => {
            if !body.iter().all(u8::is_ascii_whitespace) {
                debug!("Malformed JSON body, using defaults: {}", e);
            }
            return T::default();
        }
    };
    serde_json::from_value(value).unwrap_or_else(|e| {
        debug!("Body does not match the request shape, using defaults: {}", e);
        T::default()
    })
}

/// Field deserializer mapping a value of the wrong type to the default
pub fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        debug!("Ignoring field of unexpected type: {}", e);
        T::default()
    }))
}

/// Header map deserializer: strings kept, numbers and booleans stringified,
/// anything else dropped
pub fn lenient_headers<'de, D>(deserializer: D) -> std::result::Result<HeaderMap, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(HeaderMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::String(s) => Some((name, s)),
            Value::Number(n) => Some((name, n.to_string())),
            Value::Bool(b) => Some((name, b.to_string())),
            _ => None,
        })
        .collect())
}

/// Parse an optional vendor name from a request body
pub(crate) fn parse_selection(provider: Option<&str>) -> Result<Option<VendorSelection>> {
    match provider.map(str::trim).filter(|p| !p.is_empty()) {
        Some(name) => Ok(Some(name.parse()?)),
        None => Ok(None),
    }
}

/// First non-blank value
pub(crate) fn first_present(values: &[Option<&String>]) -> Option<String> {
    values
        .iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
}

pub(crate) fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|id| id.as_str().to_string())
        .unwrap_or_default()
}
