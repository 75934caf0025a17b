use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: i64,
    pub session_id: String,
    pub sender: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

// Response DTOs for the admin history dump
#[derive(Debug, Serialize)]
pub struct SessionHistory {
    pub session_id: String,
    pub created_at: String,
    pub messages: Vec<MessageEntry>,
}

#[derive(Debug, Serialize)]
pub struct MessageEntry {
    #[serde(rename = "from")]
    pub sender: String,
    pub text: String,
    pub timestamp: String,
}
