use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde_json::{json, Map, Value};

use crate::routes::error_response;
use crate::utils::config::AppState;

const CONTACT_SUBJECT: &str = "New Contact Form Submission";
const ISSUE_SUBJECT: &str = "New Issue Report";

// Forwards an arbitrary feedback payload as a plain-text email.
pub async fn send_feedback_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let subject = subject_for(&payload);
    let body = format_feedback_body(&payload);

    tracing::info!("Forwarding feedback email: {}", subject);

    if !app_state.mailer.send(subject, &body).await {
        return Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to send email",
        ));
    }

    Ok(Json(json!({ "message": "Email sent successfully" })))
}

fn subject_for(payload: &Map<String, Value>) -> &'static str {
    match payload.get("type").and_then(Value::as_str) {
        Some("contact") => CONTACT_SUBJECT,
        _ => ISSUE_SUBJECT,
    }
}

fn format_feedback_body(payload: &Map<String, Value>) -> String {
    payload
        .iter()
        .map(|(key, value)| format!("{}: {}", capitalize(key), render_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

// Create the router for feedback routes
pub fn create_feedback_router() -> Router<AppState> {
    Router::new().route("/send-feedback", post(send_feedback_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_contact_subject() {
        let data = payload(json!({"type": "contact", "name": "Jo"}));
        assert_eq!(subject_for(&data), CONTACT_SUBJECT);
    }

    #[test]
    fn test_other_types_are_issue_reports() {
        assert_eq!(subject_for(&payload(json!({"type": "bug"}))), ISSUE_SUBJECT);
        assert_eq!(subject_for(&payload(json!({"name": "Jo"}))), ISSUE_SUBJECT);
    }

    #[test]
    fn test_body_has_capitalized_key_lines() {
        let data = payload(json!({"type": "contact", "name": "Jo", "email": "jo@example.com"}));
        let body = format_feedback_body(&data);

        assert!(body.lines().any(|line| line == "Name: Jo"));
        assert!(body.lines().any(|line| line == "Email: jo@example.com"));
        assert!(body.lines().any(|line| line == "Type: contact"));
    }

    #[test]
    fn test_non_string_values_are_rendered() {
        let data = payload(json!({"rating": 5}));
        assert_eq!(format_feedback_body(&data), "Rating: 5");
    }

    #[test]
    fn test_capitalize_matches_form_field_style() {
        assert_eq!(capitalize("name"), "Name");
        assert_eq!(capitalize("userEmail"), "Useremail");
        assert_eq!(capitalize(""), "");
    }
}
