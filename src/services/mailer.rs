use crate::errors::{AppError, AppResult};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::env;

const SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_TO_EMAIL: &str = "pricky0portfolio@gmail.com";

pub struct Mailer {
    credentials: Option<(String, String)>,
    to_email: String,
}

impl Mailer {
    pub fn from_env() -> Self {
        let credentials = match (env::var("EMAIL_USER"), env::var("EMAIL_PASS")) {
            (Ok(user), Ok(pass)) => Some((user, pass)),
            _ => None,
        };
        let to_email = env::var("TO_EMAIL").unwrap_or_else(|_| DEFAULT_TO_EMAIL.to_string());

        if credentials.is_none() {
            tracing::warn!("⚠️ Email credentials not configured, feedback delivery is disabled");
        }

        Self {
            credentials,
            to_email,
        }
    }

    #[cfg(test)]
    fn new(credentials: Option<(String, String)>, to_email: &str) -> Self {
        Self {
            credentials,
            to_email: to_email.to_string(),
        }
    }

    /// Submits one plain-text message to the configured recipient. Never
    /// raises: missing credentials or any SMTP failure yields `false`.
    pub async fn send(&self, subject: &str, body: &str) -> bool {
        let Some((user, pass)) = &self.credentials else {
            tracing::error!("❌ Missing email credentials in environment variables");
            return false;
        };

        match self.try_send(user, pass, subject, body).await {
            Ok(()) => {
                tracing::info!("✅ Email sent to {}", self.to_email);
                true
            }
            Err(e) => {
                tracing::error!("❌ Email error: {}", e);
                false
            }
        }
    }

    async fn try_send(&self, user: &str, pass: &str, subject: &str, body: &str) -> AppResult<()> {
        let message = Message::builder()
            .from(user.parse().map_err(|e| AppError::Other(format!("Invalid sender address: {}", e)))?)
            .to(self.to_email.parse().map_err(|e| AppError::Other(format!("Invalid recipient address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::Other(format!("Failed to build email: {}", e)))?;

        // relay() is implicit TLS on the submissions port, matching the
        // provider's SMTPS endpoint.
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(SMTP_HOST)?
            .credentials(Credentials::new(user.to_string(), pass.to_string()))
            .build();

        transport.send(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_without_credentials_fails_fast() {
        let mailer = Mailer::new(None, "inbox@example.com");
        assert!(!mailer.send("subject", "body").await);
    }
}
