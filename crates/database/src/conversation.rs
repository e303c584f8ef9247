//! Per-user conversation log.

use sqlx::SqlitePool;

use crate::models::StoredMessage;
use crate::Result;

/// Default number of messages restored at sign-in.
pub const DEFAULT_MESSAGE_LIMIT: i64 = 8;

/// Append a message; the timestamp is assigned by the database.
pub async fn save_message(pool: &SqlitePool, user_id: &str, role: &str, content: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO messages (user_id, role, content)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(role)
    .bind(content)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load the newest `limit` messages, returned oldest-first.
pub async fn load_last_messages(
    pool: &SqlitePool,
    user_id: &str,
    limit: i64,
) -> Result<Vec<StoredMessage>> {
    let mut rows = sqlx::query_as::<_, StoredMessage>(
        r#"
        SELECT id, user_id, role, content, ts
        FROM messages
        WHERE user_id = ?
        ORDER BY ts DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.reverse();
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    async fn insert_at(db: &Database, user_id: &str, content: &str, ts: &str) {
        sqlx::query("INSERT INTO messages (user_id, role, content, ts) VALUES (?, 'user', ?, ?)")
            .bind(user_id)
            .bind(content)
            .bind(ts)
            .execute(db.pool())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_save_and_load_in_order() {
        let db = test_db().await;

        save_message(db.pool(), "u1", "user", "first").await.unwrap();
        save_message(db.pool(), "u1", "assistant", "second").await.unwrap();
        save_message(db.pool(), "u1", "user", "third").await.unwrap();

        let messages = load_last_messages(db.pool(), "u1", DEFAULT_MESSAGE_LIMIT)
            .await
            .unwrap();
        let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["first", "second", "third"]);
        assert_eq!(messages[1].role, "assistant");
        assert!(messages[0].ts.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_ascending_regardless_of_insert_order() {
        let db = test_db().await;

        insert_at(&db, "u1", "late", "2024-03-03T10:00:00.000Z").await;
        insert_at(&db, "u1", "early", "2024-03-01T10:00:00.000Z").await;
        insert_at(&db, "u1", "middle", "2024-03-02T10:00:00.000Z").await;

        let messages = load_last_messages(db.pool(), "u1", 8).await.unwrap();
        let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["early", "middle", "late"]);
    }

    #[tokio::test]
    async fn test_limit_keeps_newest() {
        let db = test_db().await;

        for day in 1..=9 {
            insert_at(&db, "u1", &format!("day {}", day), &format!("2024-03-0{}T08:00:00.000Z", day)).await;
        }

        let messages = load_last_messages(db.pool(), "u1", 8).await.unwrap();
        assert_eq!(messages.len(), 8);
        assert_eq!(messages.first().unwrap().content, "day 2");
        assert_eq!(messages.last().unwrap().content, "day 9");
    }

    #[tokio::test]
    async fn test_empty_and_isolated() {
        let db = test_db().await;

        save_message(db.pool(), "alice", "user", "hello").await.unwrap();

        assert!(load_last_messages(db.pool(), "bob", 8).await.unwrap().is_empty());
        assert_eq!(load_last_messages(db.pool(), "alice", 8).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_role_rejected() {
        let db = test_db().await;
        let result = save_message(db.pool(), "u1", "tool", "nope").await;
        assert!(result.is_err());
    }
}
