use crate::services::{llm::LlmService, mailer::Mailer};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub knowledge: Arc<String>,
    pub llm: Arc<LlmService>,
    pub mailer: Arc<Mailer>,
    pub admin_secret: Arc<String>,
}
