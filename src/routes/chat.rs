use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::db::queries::{append_exchange, get_or_create_session};
use crate::routes::error_response;
use crate::utils::config::AppState;

const MAX_QUESTION_WORDS: usize = 60;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<String>,
}

// Main chat endpoint
pub async fn chat_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let question = validate_message(&payload.message)
        .map_err(|detail| error_response(StatusCode::BAD_REQUEST, detail))?;

    let session_id = payload
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    tracing::info!("Processing chat request for session {}", session_id);

    get_or_create_session(&app_state.db, &session_id)
        .await
        .map_err(|e| {
            tracing::error!("❌ Failed to resolve session: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        })?;

    let prompt = build_prompt(&app_state.knowledge, &question);

    // The gateway never errors: on failure it hands back its fallback text.
    let answer = app_state.llm.complete(&prompt).await;

    // The answer is already generated at this point, so a failed write is
    // logged rather than costing the user the reply.
    if let Err(e) = append_exchange(&app_state.db, &session_id, &question, &answer).await {
        tracing::error!("❌ Failed to persist exchange for session {}: {}", session_id, e);
    }

    Ok(Json(json!({
        "response": format!("🤖 {}", answer),
        "session_id": session_id
    })))
}

pub(crate) fn validate_message(raw: &str) -> Result<String, &'static str> {
    let question = raw.trim();

    if question.is_empty() {
        return Err("❌ Please ask a valid question.");
    }
    if question.split_whitespace().count() > MAX_QUESTION_WORDS {
        return Err("❌ Please keep your question within 60 words.");
    }

    Ok(question.to_string())
}

pub(crate) fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "You are a helpful AI assistant who answers ONLY questions about Varun Gandhi.\n\n\
         Here is all the information you know:\n\
         \"\"\"\n{}\n\"\"\"\n\n\
         Answer this question in a friendly, natural tone:\n\"{}\"",
        context, question
    )
}

// Create the router for chat routes
pub fn create_chat_router() -> Router<AppState> {
    Router::new().route("/chat", post(chat_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims_whitespace() {
        assert_eq!(validate_message("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(validate_message("").is_err());
        assert!(validate_message("   \n\t ").is_err());
    }

    #[test]
    fn test_validate_word_limit() {
        let at_limit = vec!["word"; 60].join(" ");
        assert!(validate_message(&at_limit).is_ok());

        let over_limit = vec!["word"; 61].join(" ");
        assert_eq!(
            validate_message(&over_limit),
            Err("❌ Please keep your question within 60 words.")
        );
    }

    #[test]
    fn test_build_prompt_grounds_the_question() {
        let prompt = build_prompt("Varun likes Rust.", "What does Varun like?");
        assert!(prompt.contains("Varun likes Rust."));
        assert!(prompt.contains("\"What does Varun like?\""));
        assert!(prompt.starts_with("You are a helpful AI assistant"));
    }
}
