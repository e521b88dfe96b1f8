//! HTTP route tests: the full app against a mock upstream

#[cfg(test)]
mod tests {
    use crate::common::{CredentialFactory, MockUpstream, completion_body};
    use agent_gateway::core::providers::MapEnv;
    use agent_gateway::server::server::HttpServer;
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[actix_web::test]
    async fn test_hello_greets_by_name() {
        let upstream = MockUpstream::start().await;
        Mock::given(method("POST"))
            .and(path(MockUpstream::gateway_path("workers-ai")))
            .and(body_partial_json(json!({
                "messages": [{"role": "system"}, {"role": "user", "content": "Say hello to Alice"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hello, Alice!")))
            .expect(1)
            .mount(&upstream.server)
            .await;

        let app = test::init_service(HttpServer::create_app(
            upstream.state(CredentialFactory::workers_env()),
        ))
        .await;
        let req = test::TestRequest::post()
            .uri("/hello")
            .set_json(json!({"name": "Alice"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"greeting": "Hello, Alice!", "name": "Alice"}));
    }

    #[actix_web::test]
    async fn test_chat_prefers_prompt_over_message() {
        let upstream = MockUpstream::start().await;
        Mock::given(method("POST"))
            .and(path(MockUpstream::direct_path()))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "system"}, {"role": "user", "content": "from prompt"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
            .expect(1)
            .mount(&upstream.server)
            .await;

        let app = test::init_service(HttpServer::create_app(
            upstream.state(CredentialFactory::openai_env()),
        ))
        .await;
        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({"message": "from message", "prompt": "from prompt"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"response": "ok"}));
    }

    #[actix_web::test]
    async fn test_streamed_chat() {
        let upstream = MockUpstream::start().await;
        upstream
            .respond_sse(
                &MockUpstream::gateway_path("workers-ai"),
                &[
                    r#"{"choices":[{"delta":{"content":"Once "}}]}"#,
                    r#"{"choices":[{"delta":{"content":"upon a time"}}]}"#,
                    "[DONE]",
                ],
            )
            .await;

        let app = test::init_service(HttpServer::create_app(
            upstream.state(CredentialFactory::workers_env()),
        ))
        .await;
        let req = test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({"prompt": "Tell a story", "stream": true}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"response": "Once upon a time"}));
    }

    #[actix_web::test]
    async fn test_upstream_failure_surfaces_as_500() {
        let upstream = MockUpstream::start().await;
        upstream
            .respond_json(
                &MockUpstream::gateway_path("workers-ai"),
                502,
                json!({"success": false, "errors": [{"code": 2005, "message": "Failed to route"}]}),
            )
            .await;

        let app = test::init_service(HttpServer::create_app(
            upstream.state(CredentialFactory::workers_env()),
        ))
        .await;
        let req = test::TestRequest::post()
            .uri("/support")
            .set_json(json!({"message": "Help"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Failed to route"}));
    }

    #[actix_web::test]
    async fn test_agent_with_inline_config() {
        let upstream = MockUpstream::start().await;
        Mock::given(method("POST"))
            .and(path("/proxy/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-inline"))
            .and(header("X-Team", "support"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "inline"})))
            .expect(1)
            .mount(&upstream.server)
            .await;

        let app = test::init_service(HttpServer::create_app(upstream.state(MapEnv::new()))).await;

        let req = test::TestRequest::post()
            .uri("/agent")
            .set_json(json!({
                "id": "inline",
                "config": {
                    "type": "openai",
                    "apiKey": "sk-inline",
                    "baseURL": format!("{}/proxy/v1/", upstream.server.uri()),
                    "headers": {"X-Team": "support"}
                }
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"id": "inline", "name": "agent", "ready": true}));

        let req = test::TestRequest::post()
            .uri("/agent/inline/generate")
            .set_json(json!({"prompt": "Hi"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"text": "inline"}));
    }

    #[actix_web::test]
    async fn test_agent_creation_without_credentials() {
        let upstream = MockUpstream::start().await;
        let app = test::init_service(HttpServer::create_app(upstream.state(MapEnv::new()))).await;

        let req = test::TestRequest::post()
            .uri("/agent")
            .set_json(json!({"id": "broken"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let req = test::TestRequest::post()
            .uri("/agent/broken/generate")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_agent_generate_upstream_failure() {
        let upstream = MockUpstream::start().await;
        upstream
            .respond_json(
                MockUpstream::direct_path(),
                429,
                json!({"error": {"message": "Rate limit reached for gpt-4o-mini"}}),
            )
            .await;

        let app = test::init_service(HttpServer::create_app(
            upstream.state(CredentialFactory::openai_env()),
        ))
        .await;

        let req = test::TestRequest::post()
            .uri("/agent")
            .set_json(json!({"id": "busy", "config": {"type": "openai"}}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["id"], "busy");

        let req = test::TestRequest::post()
            .uri("/agent/busy/generate")
            .set_json(json!({"prompt": "Hi"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Rate limit reached for gpt-4o-mini"}));
    }

    #[actix_web::test]
    async fn test_wrong_typed_fields_over_http() {
        let upstream = MockUpstream::start().await;
        Mock::given(method("POST"))
            .and(path(MockUpstream::gateway_path("workers-ai")))
            .and(body_partial_json(json!({
                "stream": false,
                "messages": [{"role": "system", "content": "Answer in French."}, {"role": "user", "content": "Bonjour"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Salut")))
            .expect(1)
            .mount(&upstream.server)
            .await;

        let app = test::init_service(HttpServer::create_app(
            upstream.state(CredentialFactory::workers_env()),
        ))
        .await;
        let req = test::TestRequest::post()
            .uri("/custom-chat")
            .set_json(json!({"prompt": "Bonjour", "instructions": "Answer in French.", "model": false}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"response": "Salut"}));
    }
}
