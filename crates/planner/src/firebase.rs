//! Firebase Identity Toolkit authentication.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, info};

use crate::auth::{AuthProvider, AuthSession};
use crate::error::AuthError;

/// Default Identity Toolkit base URL.
pub const DEFAULT_FIREBASE_AUTH_URL: &str = "https://identitytoolkit.googleapis.com";

/// Configuration for [`FirebaseAuth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project.
    pub api_key: String,
    /// Identity Toolkit base URL.
    pub base_url: String,
}

impl FirebaseConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_FIREBASE_AUTH_URL.to_string(),
        }
    }

    /// Load from `FIREBASE_API_KEY` (required) and `FIREBASE_AUTH_URL`.
    pub fn from_env() -> Result<Self, AuthError> {
        let api_key = env::var("FIREBASE_API_KEY").map_err(|_| {
            AuthError::Configuration("FIREBASE_API_KEY not set".to_string())
        })?;
        let base_url = env::var("FIREBASE_AUTH_URL")
            .unwrap_or_else(|_| DEFAULT_FIREBASE_AUTH_URL.to_string());

        Ok(Self { api_key, base_url })
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1/accounts:{}?key={}",
            self.base_url.trim_end_matches('/'),
            action,
            self.api_key
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    message: String,
}

/// Accounts managed by Firebase Authentication.
#[derive(Debug, Clone)]
pub struct FirebaseAuth {
    http: Client,
    config: FirebaseConfig,
}

impl FirebaseAuth {
    pub fn new(config: FirebaseConfig) -> Result<Self, AuthError> {
        let http = Client::builder().build().map_err(|e| {
            AuthError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!("FirebaseAuth initialized with base URL: {}", config.base_url);
        Ok(Self { http, config })
    }

    async fn call(&self, action: &str, email: &str, password: &str) -> Result<PasswordResponse, AuthError> {
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };

        debug!("Identity Toolkit call: accounts:{}", action);

        let response = self
            .http
            .post(self.config.endpoint(action))
            .json(&request)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(map_error(&message, email));
        }

        serde_json::from_str(&body)
            .map_err(|e| AuthError::Rejected(format!("unexpected response: {}", e)))
    }
}

/// Map an Identity Toolkit error code to an [`AuthError`].
///
/// Codes may carry a suffix such as `WEAK_PASSWORD : Password should be...`.
fn map_error(message: &str, email: &str) -> AuthError {
    let code = message.split(" : ").next().unwrap_or(message).trim();
    match code {
        "EMAIL_EXISTS" => AuthError::EmailTaken(email.to_string()),
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_PASSWORD" | "EMAIL_NOT_FOUND" => {
            AuthError::InvalidCredentials
        }
        _ => AuthError::Rejected(message.to_string()),
    }
}

#[async_trait]
impl AuthProvider for FirebaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let response = self.call("signInWithPassword", email, password).await?;
        let token = response
            .id_token
            .ok_or_else(|| AuthError::Rejected("response carried no idToken".to_string()))?;

        info!(user_id = %response.local_id, "User signed in");

        Ok(AuthSession {
            user_id: response.local_id,
            email: response.email.unwrap_or_else(|| email.to_string()),
            token,
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let response = self.call("signUp", email, password).await?;
        info!(user_id = %response.local_id, "Account created");
        Ok(response.local_id)
    }

    fn name(&self) -> &str {
        "FirebaseAuth"
    }
}
