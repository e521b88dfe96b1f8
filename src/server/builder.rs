//! Server builder and serve function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config)
    }
}

/// Build the server from `config` and run it until shutdown
pub async fn serve(config: Config) -> Result<()> {
    info!("Starting agent gateway");

    let server = ServerBuilder::new().with_config(config).build()?;
    info!(
        "Server starting at: http://{}",
        server.config().address()
    );
    info!("   GET  /, /health      - Health check");
    info!("   POST /hello, /support, /wonka");
    info!("   POST /chat, /custom-chat");
    info!("   GET  /env-check      - Credential readiness");
    info!("   POST /agent, /agent/{{id}}/generate");

    server.start().await
}
