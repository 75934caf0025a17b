use crate::db::models::{Message, Session};
use crate::errors::AppResult;
use sqlx::PgPool;

// Session queries
pub async fn get_or_create_session(pool: &PgPool, session_id: &str) -> AppResult<Session> {
    // ON CONFLICT DO NOTHING keeps this safe when two requests race to
    // create the same session: one insert wins, both see the same row.
    sqlx::query("INSERT INTO sessions (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
        .bind(session_id)
        .execute(pool)
        .await?;

    let session = sqlx::query_as::<_, Session>(
        "SELECT * FROM sessions WHERE id = $1"
    )
    .bind(session_id)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

pub async fn list_sessions(pool: &PgPool) -> AppResult<Vec<Session>> {
    let sessions = sqlx::query_as::<_, Session>(
        "SELECT * FROM sessions ORDER BY created_at DESC"
    )
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

// Message queries
pub async fn append_exchange(
    pool: &PgPool,
    session_id: &str,
    user_text: &str,
    bot_text: &str,
) -> AppResult<()> {
    // Both sides of the exchange land together or not at all.
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO messages (session_id, sender, content) VALUES ($1, 'user', $2)")
        .bind(session_id)
        .bind(user_text)
        .execute(&mut *tx)
        .await?;

    sqlx::query("INSERT INTO messages (session_id, sender, content) VALUES ($1, 'bot', $2)")
        .bind(session_id)
        .bind(bot_text)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

pub async fn list_messages(pool: &PgPool) -> AppResult<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        "SELECT * FROM messages ORDER BY id ASC"
    )
    .fetch_all(pool)
    .await?;

    Ok(messages)
}
