//! OpenAI-compatible provider constructors.
//!
//! Groq exposes the same API format as OpenAI, just with a different base
//! URL; `custom` covers any other compatible endpoint.

use crate::OpenAiProvider;

/// Groq API - OpenAI compatible, very fast inference
/// https://console.groq.com/docs/api
pub fn groq(api_key: impl Into<String>) -> OpenAiProvider {
    OpenAiProvider::new(api_key, "https://api.groq.com/openai/v1")
}

/// Custom OpenAI-compatible endpoint
pub fn custom(api_key: impl Into<String>, base_url: impl Into<String>) -> OpenAiProvider {
    OpenAiProvider::new(api_key, base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groq_constructor_builds() {
        let provider = groq("gsk-test");
        assert!(std::mem::size_of_val(&provider) > 0);
    }

    #[test]
    fn custom_accepts_any_base() {
        let provider = custom("key", "https://my-llm.example.com/v1");
        assert!(std::mem::size_of_val(&provider) > 0);
    }
}
