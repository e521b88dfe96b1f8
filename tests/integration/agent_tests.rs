//! Agent tests against a mock upstream over real HTTP

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{API_TOKEN, OPENAI_KEY};
    use crate::common::{CredentialFactory, MockUpstream, completion_body};
    use agent_gateway::core::agent::{AgentFactory, AgentRequest, HttpCompletionClient};
    use agent_gateway::core::providers::{
        CredentialSource, MapEnv, ProviderError, Vendor, VendorSelection,
    };
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn factory(upstream: &MockUpstream, env: MapEnv) -> AgentFactory {
        AgentFactory::new(
            CredentialSource::new(Arc::new(env)),
            upstream.resolver(),
            Arc::new(HttpCompletionClient::new(None).unwrap()),
        )
    }

    #[tokio::test]
    async fn test_gateway_request_shape() {
        let upstream = MockUpstream::start().await;
        Mock::given(method("POST"))
            .and(path(MockUpstream::gateway_path("workers-ai")))
            .and(header("Authorization", format!("Bearer {}", API_TOKEN).as_str()))
            .and(header("CF-AIG-Source", "agent-gateway"))
            .and(body_partial_json(json!({
                "model": "@cf/meta/llama-3.1-8b-instruct",
                "stream": false,
                "messages": [
                    {"role": "system", "content": "Be brief."},
                    {"role": "user", "content": "Hi"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hello!")))
            .expect(1)
            .mount(&upstream.server)
            .await;

        let agent = factory(&upstream, CredentialFactory::workers_env())
            .build(AgentRequest {
                instructions: Some("Be brief.".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(agent.provider().provider_type, Vendor::WorkersAi);

        let generation = agent.generate("Hi").await.unwrap();
        assert_eq!(generation.text, "Hello!");
        assert!(generation.recognized);
    }

    #[tokio::test]
    async fn test_every_generate_calls_upstream() {
        let upstream = MockUpstream::start().await;
        Mock::given(method("POST"))
            .and(path(MockUpstream::direct_path()))
            .and(header("Authorization", format!("Bearer {}", OPENAI_KEY).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("same")))
            .expect(2)
            .mount(&upstream.server)
            .await;

        let agent = factory(&upstream, CredentialFactory::openai_env())
            .build(AgentRequest {
                selection: Some(VendorSelection::Explicit(Vendor::OpenAi)),
                model: Some("gpt-4o".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(agent.model_id(), "gpt-4o");

        let first = agent.generate("ping").await.unwrap();
        let second = agent.generate("ping").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_upstream_error_message_passes_through() {
        let upstream = MockUpstream::start().await;
        upstream
            .respond_json(
                MockUpstream::direct_path(),
                401,
                json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}),
            )
            .await;

        let agent = factory(&upstream, CredentialFactory::openai_env())
            .build(AgentRequest::default())
            .unwrap();
        let err = agent.generate("Hi").await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::upstream_status("openai", 401, "Incorrect API key provided")
        );
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_unrecognized_body_is_serialized() {
        let upstream = MockUpstream::start().await;
        upstream
            .respond_json(MockUpstream::direct_path(), 200, json!({"result": {"answer": 42}}))
            .await;

        let agent = factory(&upstream, CredentialFactory::openai_env())
            .build(AgentRequest::default())
            .unwrap();
        let generation = agent.generate("Hi").await.unwrap();
        assert!(!generation.recognized);
        assert_eq!(generation.text, r#"{"result":{"answer":42}}"#);
    }

    #[tokio::test]
    async fn test_streamed_generation_is_reassembled() {
        let upstream = MockUpstream::start().await;
        upstream
            .respond_sse(
                &MockUpstream::gateway_path("workers-ai"),
                &[
                    r#"{"choices":[{"index":0,"delta":{"role":"assistant"}}]}"#,
                    r#"{"choices":[{"index":0,"delta":{"content":"Hel"}}]}"#,
                    r#"{"choices":[{"index":0,"delta":{"content":"lo"}}]}"#,
                    "[DONE]",
                ],
            )
            .await;

        let agent = factory(&upstream, CredentialFactory::workers_env())
            .build(AgentRequest {
                stream: true,
                ..Default::default()
            })
            .unwrap();
        let generation = agent.generate("Hi").await.unwrap();
        assert_eq!(generation.text, "Hello");
    }
}
