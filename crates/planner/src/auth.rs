//! Authentication providers.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use planner_database::validation::{normalize_email, validate_email, validate_password};
use planner_database::{account, Account, Database, DatabaseError};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::AuthError;

/// Identity returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Stable user id; partitions all stored data.
    pub user_id: String,
    /// Email the user signed in with.
    pub email: String,
    /// Session token handed to the client.
    pub token: String,
}

/// Email/password authentication backend.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verify credentials and open a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Create an account; returns the new user id.
    async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError>;

    /// Get a human-readable name for this provider.
    fn name(&self) -> &str;
}

/// Accounts kept in the planner's own SQLite database.
///
/// Passwords are stored as Argon2id PHC strings.
#[derive(Debug, Clone)]
pub struct LocalAuth {
    db: Database,
}

impl LocalAuth {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthProvider for LocalAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email);

        let account = match account::get_account_by_email(self.db.pool(), &email).await {
            Ok(account) => account,
            Err(DatabaseError::NotFound { .. }) => {
                debug!("Sign-in for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => return Err(err.into()),
        };

        if !verify_password(password, &account.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %account.id, "User signed in");

        Ok(AuthSession {
            user_id: account.id,
            email: account.email,
            token: Uuid::new_v4().to_string(),
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError> {
        validate_email(email)?;
        validate_password(password)?;

        let new_account = Account {
            id: Uuid::new_v4().to_string(),
            email: normalize_email(email),
            password_hash: hash_password(password)?,
            created_at: String::new(),
        };

        match account::create_account(self.db.pool(), &new_account).await {
            Ok(()) => {
                info!(user_id = %new_account.id, "Account created");
                Ok(new_account.id)
            }
            Err(DatabaseError::AlreadyExists { .. }) => {
                Err(AuthError::EmailTaken(new_account.email))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn name(&self) -> &str {
        "LocalAuth"
    }
}

/// Argon2id hash of `password` with a fresh random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check `password` against a stored PHC string. Unparsable hashes never match.
fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            warn!(error = %err, "Stored password hash is malformed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_database::ValidationError;

    async fn test_auth() -> LocalAuth {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        LocalAuth::new(db)
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let auth = test_auth().await;

        let user_id = auth.sign_up("Traveler@Example.com", "secret1").await.unwrap();
        let first = auth.sign_in("traveler@example.com", "secret1").await.unwrap();
        let second = auth.sign_in(" TRAVELER@example.com", "secret1").await.unwrap();

        assert_eq!(first.user_id, user_id);
        assert_eq!(first.email, "traveler@example.com");
        assert_eq!(second.user_id, user_id);
        assert_ne!(first.token, second.token);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let auth = test_auth().await;
        auth.sign_up("a@example.com", "secret1").await.unwrap();

        assert!(matches!(
            auth.sign_in("a@example.com", "secret2").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.sign_in("nobody@example.com", "secret1").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let auth = test_auth().await;

        assert!(matches!(
            auth.sign_up("not-an-email", "secret1").await,
            Err(AuthError::Invalid(ValidationError::InvalidEmail(_)))
        ));
        assert!(matches!(
            auth.sign_up("a@example.com", "12345").await,
            Err(AuthError::Invalid(ValidationError::PasswordTooShort { .. }))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_sign_up() {
        let auth = test_auth().await;

        auth.sign_up("a@example.com", "secret1").await.unwrap();
        let result = auth.sign_up("A@example.com", "another1").await;

        match result {
            Err(AuthError::EmailTaken(email)) => assert_eq!(email, "a@example.com"),
            other => panic!("Expected EmailTaken, got {:?}", other),
        }
    }

    #[test]
    fn test_password_hash_round_trip() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();

        assert!(first.starts_with("$argon2id$"));
        // Salt lives in the PHC string, so equal passwords hash differently
        assert_ne!(first, second);
        assert!(verify_password("secret1", &first));
        assert!(verify_password("secret1", &second));
        assert!(!verify_password("secret2", &first));
        assert!(!verify_password("secret1", "not-a-phc-string"));
    }
}
