use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::db::models::{Message, MessageEntry, Session, SessionHistory};
use crate::db::queries::{list_messages, list_sessions};
use crate::routes::error_response;
use crate::utils::config::AppState;

#[derive(Debug, Deserialize)]
pub struct AdminAuthRequest {
    pub secret: String,
}

// Full transcript dump, gated by the shared admin secret.
pub async fn admin_history_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<AdminAuthRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if payload.secret != *app_state.admin_secret {
        tracing::warn!("⚠️ Rejected admin history request with bad secret");
        return Err(error_response(StatusCode::FORBIDDEN, "❌ Unauthorized"));
    }

    let sessions = list_sessions(&app_state.db).await.map_err(|e| {
        tracing::error!("❌ Failed to list sessions: {}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    })?;

    let messages = list_messages(&app_state.db).await.map_err(|e| {
        tracing::error!("❌ Failed to list messages: {}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    })?;

    let history = assemble_history(sessions, messages);
    tracing::info!("✅ Returning history for {} sessions", history.len());

    Ok(Json(json!({ "sessions": history })))
}

/// Groups the flat message list under its sessions. Sessions keep their
/// newest-first order from the query; messages keep insertion order.
pub(crate) fn assemble_history(
    sessions: Vec<Session>,
    messages: Vec<Message>,
) -> Vec<SessionHistory> {
    let mut by_session: HashMap<String, Vec<MessageEntry>> = HashMap::new();
    for msg in messages {
        by_session
            .entry(msg.session_id.clone())
            .or_default()
            .push(MessageEntry {
                sender: msg.sender,
                text: msg.content,
                timestamp: msg.timestamp.to_rfc3339(),
            });
    }

    sessions
        .into_iter()
        .map(|session| SessionHistory {
            created_at: session.created_at.to_rfc3339(),
            messages: by_session.remove(&session.id).unwrap_or_default(),
            session_id: session.id,
        })
        .collect()
}

// Create the router for admin routes
pub fn create_admin_router() -> Router<AppState> {
    Router::new().route("/admin/history", post(admin_history_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn session(id: &str, secs: i64) -> Session {
        Session {
            id: id.to_string(),
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    fn message(id: i64, session_id: &str, sender: &str, content: &str) -> Message {
        Message {
            id,
            session_id: session_id.to_string(),
            sender: sender.to_string(),
            content: content.to_string(),
            timestamp: Utc.timestamp_opt(1_700_000_000 + id, 0).unwrap(),
        }
    }

    #[test]
    fn test_assemble_groups_messages_under_sessions() {
        let sessions = vec![session("b", 200), session("a", 100)];
        let messages = vec![
            message(1, "a", "user", "hi"),
            message(2, "a", "bot", "hello"),
            message(3, "b", "user", "who is varun?"),
            message(4, "b", "bot", "a developer"),
        ];

        let history = assemble_history(sessions, messages);

        assert_eq!(history.len(), 2);
        // Session order from the query is preserved (newest first).
        assert_eq!(history[0].session_id, "b");
        assert_eq!(history[1].session_id, "a");

        assert_eq!(history[0].messages.len(), 2);
        assert_eq!(history[0].messages[0].sender, "user");
        assert_eq!(history[0].messages[0].text, "who is varun?");
        assert_eq!(history[0].messages[1].sender, "bot");
    }

    #[test]
    fn test_assemble_keeps_empty_sessions() {
        let history = assemble_history(vec![session("lonely", 1)], vec![]);
        assert_eq!(history.len(), 1);
        assert!(history[0].messages.is_empty());
    }

    #[test]
    fn test_timestamps_are_rfc3339() {
        let history = assemble_history(
            vec![session("a", 1_700_000_000)],
            vec![message(1, "a", "user", "hi")],
        );
        assert!(history[0].created_at.contains('T'));
        assert!(history[0].messages[0].timestamp.ends_with("+00:00"));
    }
}
