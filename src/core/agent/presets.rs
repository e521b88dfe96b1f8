//! Built-in personas served by the fixed routes

/// A named agent with fixed instructions and a fallback user message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persona {
    pub name: &'static str,
    pub instructions: &'static str,
    pub default_message: &'static str,
}

pub const HELLO: Persona = Persona {
    name: "hello-agent",
    instructions: "You are a friendly greeter. Always respond with enthusiasm and include the person's name.",
    default_message: "World",
};

pub const SUPPORT: Persona = Persona {
    name: "support",
    instructions: "Be concise and helpful.",
    default_message: "Hello, can you assist me?",
};

pub const WONKA: Persona = Persona {
    name: "wonka-agent",
    instructions: "Write as Willy Wonka: whimsical, kind, candy-themed. Keep it to 1–3 sentences, \
                   family-friendly, and include one light confectionery metaphor. Stay in character; \
                   no voice cues or stage directions.",
    default_message: "Hello, who are you?",
};

pub const DEFAULT_AGENT_NAME: &str = "agent";
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful AI assistant.";
pub const DEFAULT_CHAT_PROMPT: &str = "Hello!";

pub fn greeting_prompt(name: &str) -> String {
    format!("Say hello to {}", name)
}

impl Persona {
    /// `message` as given, or the default when absent
    pub fn message_or_default(&self, message: Option<&str>) -> String {
        message.unwrap_or(self.default_message).to_string()
    }
}
