//! Agent registry routes: create a named agent, then generate with it

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{LenientJson, first_present, lenient, lenient_headers, parse_selection, request_id};
use crate::core::agent::AgentRequest;
use crate::core::agent::presets::DEFAULT_CHAT_PROMPT;
use crate::core::providers::{CredentialOverrides, HeaderMap, ResolveOptions};
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};

/// Per-agent provider settings; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigBody {
    /// Vendor name, or `auto`
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub provider_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub api_key: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub account_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub gateway_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub api_token: Option<String>,
    #[serde(rename = "baseURL", alias = "baseUrl", default, deserialize_with = "lenient")]
    pub base_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_headers")]
    pub headers: HeaderMap,
}

impl ProviderConfigBody {
    fn credentials(&self) -> CredentialOverrides {
        CredentialOverrides {
            api_key: self.api_key.clone(),
            account_id: self.account_id.clone(),
            gateway_id: self.gateway_id.clone(),
            api_token: self.api_token.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAgentRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub instructions: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub config: Option<ProviderConfigBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAgentResponse {
    pub id: String,
    pub name: String,
    pub ready: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub text: String,
}

impl CreateAgentRequest {
    fn into_agent_request(self) -> Result<(Option<String>, AgentRequest)> {
        let config = self.config.unwrap_or_default();
        let request = AgentRequest {
            selection: parse_selection(config.provider_type.as_deref())?,
            model: self.model,
            name: self.name,
            instructions: self.instructions,
            overrides: config.credentials(),
            options: ResolveOptions {
                base_url: config.base_url,
                headers: config.headers,
            },
            stream: false,
        };
        Ok((self.id, request))
    }
}

pub async fn create_agent(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: LenientJson<CreateAgentRequest>,
) -> Result<HttpResponse> {
    let (id, request) = body.into_inner().into_agent_request()?;
    let agent = state.factory.build(request)?;
    let name = agent.name().to_string();

    let id = state.registry.create(id, agent).await;
    info!(request_id = %request_id(&req), id = %id, "Agent created");

    Ok(HttpResponse::Ok().json(CreateAgentResponse {
        id,
        name,
        ready: true,
    }))
}

pub async fn generate(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: LenientJson<GenerateRequest>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let Some(agent) = state.registry.get(&id).await else {
        warn!(request_id = %request_id(&req), id = %id, "Unknown agent");
        return Err(GatewayError::not_found("Agent not found"));
    };

    let prompt = first_present(&[body.into_inner().prompt.as_ref()])
        .unwrap_or_else(|| DEFAULT_CHAT_PROMPT.to_string());
    let generation = agent.generate(&prompt).await?;

    Ok(HttpResponse::Ok().json(GenerateResponse {
        text: generation.text,
    }))
}
