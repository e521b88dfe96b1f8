//! Test fixtures and data factories

use agent_gateway::core::providers::{Credentials, MapEnv};
use serde_json::{Value, json};

pub const ACCOUNT_ID: &str = "acct-123";
pub const GATEWAY_ID: &str = "gw-main";
pub const API_TOKEN: &str = "cf-token";
pub const OPENAI_KEY: &str = "sk-test";

/// Factory for credential sets and the equivalent fake environments
pub struct CredentialFactory;

impl CredentialFactory {
    pub fn workers() -> Credentials {
        Credentials {
            cloudflare_account_id: Some(ACCOUNT_ID.to_string()),
            cloudflare_gateway_id: Some(GATEWAY_ID.to_string()),
            cloudflare_api_token: Some(API_TOKEN.to_string()),
            ..Default::default()
        }
    }

    pub fn openai() -> Credentials {
        Credentials {
            openai_api_key: Some(OPENAI_KEY.to_string()),
            ..Default::default()
        }
    }

    pub fn both() -> Credentials {
        Credentials {
            openai_api_key: Some(OPENAI_KEY.to_string()),
            ..Self::workers()
        }
    }

    pub fn workers_env() -> MapEnv {
        MapEnv::new()
            .with("CLOUDFLARE_ACCOUNT_ID", ACCOUNT_ID)
            .with("CLOUDFLARE_GATEWAY_ID", GATEWAY_ID)
            .with("CLOUDFLARE_API_TOKEN", API_TOKEN)
    }

    pub fn openai_env() -> MapEnv {
        MapEnv::new().with("OPENAI_API_KEY", OPENAI_KEY)
    }
}

/// Chat-completion response carrying `content`
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "@cf/meta/llama-3.1-8b-instruct",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
    })
}
