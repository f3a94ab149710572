use axum::extract::State;
use axum::Json;
use foliochat_provider::{LlmMessage, LlmRequest, LlmRole};
use foliochat_schema::{ChatReply, ChatRequest, Role};

use crate::error::ApiError;
use crate::state::AppState;

/// Forward an unmatched chat message to the completion provider.
///
/// The completion call sees the fixed system prompt, any caller-supplied
/// history verbatim, then the message as the final user turn.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    if body.message.trim().is_empty() {
        return Err(ApiError::EmptyMessage);
    }

    let mut messages = Vec::new();
    if let Some(history) = &body.history {
        for entry in history {
            messages.push(LlmMessage {
                role: to_llm_role(entry.role),
                content: entry.content.clone(),
            });
        }
    }
    messages.push(LlmMessage::user(body.message.clone()));

    let request = LlmRequest {
        model: state.model.clone(),
        system: Some(state.system_prompt.clone()),
        messages,
    };

    let response = state.provider.chat(request).await?;
    Ok(Json(ChatReply {
        reply: response.text,
    }))
}

fn to_llm_role(role: Role) -> LlmRole {
    match role {
        Role::System => LlmRole::System,
        Role::User => LlmRole::User,
        Role::Assistant => LlmRole::Assistant,
    }
}
