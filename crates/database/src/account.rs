//! Account storage for the built-in auth backend.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Account;

/// Create a new account.
pub async fn create_account(pool: &SqlitePool, account: &Account) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO accounts (id, email, password_hash)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&account.id)
    .bind(&account.email)
    .bind(&account.password_hash)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Account",
                    id: account.email.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get an account by email.
pub async fn get_account_by_email(pool: &SqlitePool, email: &str) -> Result<Account> {
    sqlx::query_as::<_, Account>(
        r#"
        SELECT id, email, password_hash, created_at
        FROM accounts
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Account",
        id: email.to_string(),
    })
}
