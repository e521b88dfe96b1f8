//! Fixed-persona routes: `/hello`, `/support` and `/wonka`

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{LenientJson, lenient, request_id};
use crate::core::agent::presets::{self, HELLO, Persona, SUPPORT, WONKA};
use crate::core::agent::{AgentRequest, Generation};
use crate::server::state::AppState;
use crate::utils::error::Result;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HelloRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloResponse {
    pub greeting: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub reply: String,
    pub message: String,
}

async fn run_persona(state: &AppState, persona: &Persona, prompt: &str) -> Result<Generation> {
    let agent = state.factory.build(AgentRequest::persona(persona))?;
    debug!(persona = persona.name, model = agent.model_id(), "Running persona");
    Ok(agent.generate(prompt).await?)
}

pub async fn hello(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: LenientJson<HelloRequest>,
) -> Result<HttpResponse> {
    let name = HELLO.message_or_default(body.into_inner().name.as_deref());
    info!(request_id = %request_id(&req), name = %name, "Hello requested");

    let generation = run_persona(&state, &HELLO, &presets::greeting_prompt(&name)).await?;
    Ok(HttpResponse::Ok().json(HelloResponse {
        greeting: generation.text,
        name,
    }))
}

async fn reply(
    req: &HttpRequest,
    state: &AppState,
    persona: &Persona,
    body: MessageRequest,
) -> Result<HttpResponse> {
    let message = persona.message_or_default(body.message.as_deref());
    info!(request_id = %request_id(req), persona = persona.name, "Persona message received");

    let generation = run_persona(state, persona, &message).await?;
    Ok(HttpResponse::Ok().json(ReplyResponse {
        reply: generation.text,
        message,
    }))
}

pub async fn support(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: LenientJson<MessageRequest>,
) -> Result<HttpResponse> {
    reply(&req, &state, &SUPPORT, body.into_inner()).await
}

pub async fn wonka(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: LenientJson<MessageRequest>,
) -> Result<HttpResponse> {
    reply(&req, &state, &WONKA, body.into_inner()).await
}
