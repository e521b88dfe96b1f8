//! Mock upstream model server

use super::fixtures::{ACCOUNT_ID, GATEWAY_ID};
use agent_gateway::config::Config;
use agent_gateway::core::agent::HttpCompletionClient;
use agent_gateway::core::providers::{CredentialSource, EnvSource, VendorResolver};
use agent_gateway::server::state::AppState;
use actix_web::web;
use serde_json::Value;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct MockUpstream {
    pub server: MockServer,
}

impl MockUpstream {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Value to use as the gateway root
    pub fn gateway_root(&self) -> String {
        format!("{}/v1", self.server.uri())
    }

    /// Value to use as the direct OpenAI base URL
    pub fn openai_base_url(&self) -> String {
        format!("{}/openai/v1", self.server.uri())
    }

    /// Path a gateway-routed vendor posts completions to
    pub fn gateway_path(slug: &str) -> String {
        format!("/v1/{}/{}/{}/v1/chat/completions", ACCOUNT_ID, GATEWAY_ID, slug)
    }

    pub fn direct_path() -> &'static str {
        "/openai/v1/chat/completions"
    }

    pub fn resolver(&self) -> VendorResolver {
        VendorResolver::default()
            .with_gateway_root(self.gateway_root())
            .with_openai_base_url(self.openai_base_url())
    }

    /// Gateway configuration pointing every vendor at this server
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.gateway.providers.gateway_root = self.gateway_root();
        config.gateway.providers.openai_base_url = self.openai_base_url();
        config
    }

    /// Application state calling this server over real HTTP
    pub fn state(&self, env: impl EnvSource + 'static) -> web::Data<AppState> {
        let backend = HttpCompletionClient::new(None).unwrap();
        let state = AppState::with_parts(
            self.config(),
            CredentialSource::new(Arc::new(env)),
            Arc::new(backend),
        )
        .unwrap();
        web::Data::new(state)
    }

    pub async fn respond_json(&self, route: &str, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn respond_sse(&self, route: &str, events: &[&str]) {
        let body: String = events
            .iter()
            .map(|event| format!("data: {}\n\n", event))
            .collect();
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
            .mount(&self.server)
            .await;
    }
}
