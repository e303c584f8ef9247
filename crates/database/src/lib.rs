//! SQLite persistence layer for the travel planner.
//!
//! This crate provides async database operations for accounts, the per-user
//! conversation log, and the per-user itinerary log using SQLx with SQLite.
//! Every query is scoped to one user id.
//!
//! # Example
//!
//! ```no_run
//! use database::{conversation, itinerary, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:planner.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     conversation::save_message(db.pool(), "user-1", "user", "Plan Da Nang").await?;
//!     itinerary::save_itinerary(db.pool(), "user-1", "## Day 1").await?;
//!
//!     let history = itinerary::load_itinerary_history(db.pool(), "user-1", 5).await?;
//!     println!("{} itineraries", history.len());
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod conversation;
pub mod error;
pub mod itinerary;
pub mod models;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{Account, ItineraryRecord, StoredMessage};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/planner.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect_with_pool_size("sqlite::memory:", 1).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn account(id: &str, email: &str) -> Account {
        Account {
            id: id.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_account_create_and_lookup() {
        let db = test_db().await;

        // Create
        account::create_account(db.pool(), &account("acc-1", "a@example.com"))
            .await
            .unwrap();

        // Read back
        let by_email = account::get_account_by_email(db.pool(), "a@example.com")
            .await
            .unwrap();
        assert_eq!(by_email.id, "acc-1");
        assert!(by_email.password_hash.starts_with("$argon2id$"));
        assert!(!by_email.created_at.is_empty());

        // Missing
        let result = account::get_account_by_email(db.pool(), "b@example.com").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let db = test_db().await;

        account::create_account(db.pool(), &account("acc-1", "a@example.com"))
            .await
            .unwrap();
        let result = account::create_account(db.pool(), &account("acc-2", "a@example.com")).await;

        assert!(matches!(
            result,
            Err(DatabaseError::AlreadyExists { entity: "Account", .. })
        ));
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let db = test_db().await;
        db.migrate().await.unwrap();
    }
}
