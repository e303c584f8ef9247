//! Per-user itinerary log.

use sqlx::SqlitePool;

use crate::models::{ItineraryRecord, ITINERARY_ROLE};
use crate::Result;

/// Default number of itineraries shown in history.
pub const DEFAULT_HISTORY_LIMIT: i64 = 5;

/// Append a generated itinerary; the timestamp is assigned by the database.
///
/// Returns the id of the new record.
pub async fn save_itinerary(pool: &SqlitePool, user_id: &str, content: &str) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO itineraries (user_id, role, content)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(ITINERARY_ROLE)
    .bind(content)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Load the newest `limit` itineraries, newest first.
pub async fn load_itinerary_history(
    pool: &SqlitePool,
    user_id: &str,
    limit: i64,
) -> Result<Vec<ItineraryRecord>> {
    let rows = sqlx::query_as::<_, ItineraryRecord>(
        r#"
        SELECT id, user_id, role, content, ts
        FROM itineraries
        WHERE user_id = ?
        ORDER BY ts DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count stored itineraries for a user.
pub async fn count_itineraries(pool: &SqlitePool, user_id: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM itineraries WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
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

    #[tokio::test]
    async fn test_history_newest_first() {
        let db = test_db().await;

        for (content, ts) in [
            ("middle", "2024-03-02T09:00:00.000Z"),
            ("oldest", "2024-03-01T09:00:00.000Z"),
            ("newest", "2024-03-03T09:00:00.000Z"),
        ] {
            sqlx::query("INSERT INTO itineraries (user_id, content, ts) VALUES ('u1', ?, ?)")
                .bind(content)
                .bind(ts)
                .execute(db.pool())
                .await
                .unwrap();
        }

        let history = load_itinerary_history(db.pool(), "u1", DEFAULT_HISTORY_LIMIT)
            .await
            .unwrap();
        let contents: Vec<_> = history.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, ["newest", "middle", "oldest"]);
        assert!(history.iter().all(|r| r.role == "assistant"));
    }

    #[tokio::test]
    async fn test_limit_without_padding() {
        let db = test_db().await;

        save_itinerary(db.pool(), "u1", "## Day 1").await.unwrap();
        save_itinerary(db.pool(), "u1", "## Day 1\n## Day 2").await.unwrap();

        let history = load_itinerary_history(db.pool(), "u1", 5).await.unwrap();
        assert_eq!(history.len(), 2);
        // Same-millisecond writes still come back newest first
        assert_eq!(history[0].content, "## Day 1\n## Day 2");
    }

    #[tokio::test]
    async fn test_partitioned_by_user() {
        let db = test_db().await;

        save_itinerary(db.pool(), "alice", "Hue").await.unwrap();
        save_itinerary(db.pool(), "bob", "Hoi An").await.unwrap();

        let alice = load_itinerary_history(db.pool(), "alice", 5).await.unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].content, "Hue");
        assert_eq!(count_itineraries(db.pool(), "bob").await.unwrap(), 1);
        assert_eq!(count_itineraries(db.pool(), "carol").await.unwrap(), 0);
    }
}
