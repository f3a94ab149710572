use anyhow::{bail, Result};
use foliochat_schema::ChatRequest;

/// Reply used when the relay answers 2xx without a `reply` field.
pub const FALLBACK_REPLY: &str = "I couldn't understand that.";

/// Fixed user-visible reply for any relay failure.
pub const RELAY_ERROR_REPLY: &str = "⚠️ Server error. Try again later.";

/// Client side of the relay: forwards an unmatched utterance to the relay
/// server and always resolves to displayable text. Failures are logged and
/// collapsed into a fixed error reply; there are no retries.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn relay(&self, text: &str) -> String {
        match self.try_relay(text).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = %err, "relay request failed");
                RELAY_ERROR_REPLY.to_string()
            }
        }
    }

    async fn try_relay(&self, text: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            message: text.to_string(),
            // This widget sends the bare message; history stays local.
            history: None,
        };

        let resp = self.client.post(url).json(&request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            bail!("relay returned {status}");
        }

        let body: serde_json::Value = resp.json().await?;
        Ok(body
            .get("reply")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}
