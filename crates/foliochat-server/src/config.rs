use anyhow::{anyhow, Context, Result};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL: &str = "llama3-16k";

/// Fixed system prompt for the completion call.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant for a software developer portfolio site. Keep answers concise and friendly.";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub api_key: String,
    pub model: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid PORT value: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };
        let api_key =
            std::env::var("GROQ_API_KEY").map_err(|_| anyhow!("GROQ_API_KEY is not set"))?;
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            port,
            api_key,
            model,
        })
    }
}
