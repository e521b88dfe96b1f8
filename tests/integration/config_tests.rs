//! Configuration loading tests

#[cfg(test)]
mod tests {
    use agent_gateway::config::Config;
    use agent_gateway::core::providers::{MapEnv, Vendor, VendorSelection};
    use agent_gateway::server::builder::ServerBuilder;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    const YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9000
  workers: 2
providers:
  default_vendor: "openai"
  gateway_source: "my-app"
agents:
  max_capacity: 10
  idle_timeout_secs: 60
logging:
  level: "debug"
  json: true
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_file_then_env_overrides() {
        let file = write_config(YAML);
        let env = MapEnv::new()
            .with("GATEWAY_PORT", "9100")
            .with("LLM_DEFAULT_VENDOR", "workers-ai")
            .with("CLOUDFLARE_GATEWAY_ROOT", "http://localhost:8080/v1");

        let config = Config::from_file(file.path())
            .await
            .unwrap()
            .with_env_overrides(&env)
            .unwrap();

        assert_eq!(config.server().address(), "127.0.0.1:9100");
        assert_eq!(config.server().workers, Some(2));
        assert_eq!(
            config.providers().default_selection().unwrap(),
            VendorSelection::Explicit(Vendor::WorkersAi)
        );
        assert_eq!(config.providers().gateway_root, "http://localhost:8080/v1");
        assert_eq!(config.agents().idle_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(config.logging().level, "debug");
        assert!(config.logging().json);
    }

    #[tokio::test]
    async fn test_from_file_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file(dir.path().join("absent.yaml")).await;
        assert!(config.is_err());

        let config = Config::default();
        assert_eq!(config.server().address(), "0.0.0.0:8787");
        assert_eq!(
            config.providers().default_selection().unwrap(),
            VendorSelection::Auto
        );
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected() {
        let file = write_config("server:\n  port: 0\n");
        assert!(Config::from_file(file.path()).await.is_err());

        let file = write_config("providers:\n  gateway_root: \"ftp://example.com\"\n");
        assert!(Config::from_file(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_server_builds_from_loaded_config() {
        let file = write_config(YAML);
        let config = Config::from_file(file.path()).await.unwrap();

        let server = ServerBuilder::new().with_config(config).build().unwrap();
        assert_eq!(server.config().port, 9000);
        assert_eq!(server.state().registry.len(), 0);
    }
}
