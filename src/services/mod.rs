pub mod llm;
pub mod mailer;
