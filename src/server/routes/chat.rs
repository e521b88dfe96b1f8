//! Generic chat routes: `/chat` and `/custom-chat`

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{LenientJson, first_present, lenient, parse_selection, request_id};
use crate::core::agent::AgentRequest;
use crate::core::agent::presets::{DEFAULT_CHAT_PROMPT, DEFAULT_INSTRUCTIONS};
use crate::server::state::AppState;
use crate::utils::error::Result;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub prompt: Option<String>,
    /// Accepted in place of `prompt`
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub provider: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub stream: bool,
}

impl ChatRequest {
    pub fn prompt(&self) -> String {
        first_present(&[self.prompt.as_ref(), self.message.as_ref()])
            .unwrap_or_else(|| DEFAULT_CHAT_PROMPT.to_string())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomChatRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub prompt: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub instructions: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

pub async fn chat(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: LenientJson<ChatRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let prompt = body.prompt();

    let agent = state.factory.build(AgentRequest {
        selection: parse_selection(body.provider.as_deref())?,
        model: body.model,
        stream: body.stream,
        ..Default::default()
    })?;
    info!(
        request_id = %request_id(&req),
        model = agent.model_id(),
        stream = body.stream,
        "Chat requested"
    );

    let generation = agent.generate(&prompt).await?;
    Ok(HttpResponse::Ok().json(ChatResponse {
        response: generation.text,
    }))
}

pub async fn custom_chat(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: LenientJson<CustomChatRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let prompt = first_present(&[body.prompt.as_ref()])
        .unwrap_or_else(|| DEFAULT_CHAT_PROMPT.to_string());

    let agent = state.factory.build(AgentRequest {
        selection: parse_selection(body.provider.as_deref())?,
        model: body.model,
        name: body.name,
        instructions: Some(
            first_present(&[body.instructions.as_ref()])
                .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
        ),
        ..Default::default()
    })?;
    info!(
        request_id = %request_id(&req),
        name = agent.name(),
        model = agent.model_id(),
        "Custom chat requested"
    );

    let generation = agent.generate(&prompt).await?;
    Ok(HttpResponse::Ok().json(ChatResponse {
        response: generation.text,
    }))
}
