//! Base URL and header composition for upstream vendors

use std::collections::BTreeMap;

/// Public root of the AI gateway
pub const DEFAULT_GATEWAY_ROOT: &str = "https://gateway.ai.cloudflare.com/v1";

/// Public API root of the OpenAI-compatible vendor
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Value sent in the gateway source header unless configured otherwise
pub const DEFAULT_GATEWAY_SOURCE: &str = "agent-gateway";

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const GATEWAY_SOURCE_HEADER: &str = "CF-AIG-Source";

/// Header set sent to a vendor, ordered for stable output
pub type HeaderMap = BTreeMap<String, String>;

/// Compose the canonical gateway base URL:
/// `<root>/<account_id>/<gateway_id>/<vendor_slug>/v1`, no trailing slash.
pub fn build_endpoint(root: &str, vendor_slug: &str, account_id: &str, gateway_id: &str) -> String {
    format!(
        "{}/{}/{}/{}/v1",
        root.trim_end_matches('/'),
        segment(account_id),
        segment(gateway_id),
        segment(vendor_slug)
    )
}

/// Normalise a configured base URL so path joins never double a slash
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn segment(value: &str) -> &str {
    value.trim().trim_matches('/')
}

/// Headers for a vendor request; caller-supplied entries override defaults
pub fn vendor_headers(gateway_source: Option<&str>, extra: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE_HEADER.to_string(), "application/json".to_string());
    if let Some(source) = gateway_source {
        headers.insert(GATEWAY_SOURCE_HEADER.to_string(), source.to_string());
    }
    for (name, value) in extra {
        headers.insert(name.clone(), value.clone());
    }
    headers
}
