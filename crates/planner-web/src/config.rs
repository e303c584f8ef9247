//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use planner::DEFAULT_HISTORY_LIMIT;

/// Which accounts backend to sign users in against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthBackend {
    /// Accounts in the planner's own database.
    Local,
    /// Firebase Authentication.
    Firebase,
}

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Accounts backend.
    pub auth_backend: AuthBackend,
    /// Itineraries shown in the history list.
    pub history_limit: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `PLANNER_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:planner.db?mode=rwc` |
    /// | `AUTH_BACKEND` | `local` or `firebase` | `local` |
    /// | `HISTORY_LIMIT` | Itineraries shown in history | `5` |
    ///
    /// The generator reads `OLLAMA_*` and the Firebase backend reads
    /// `FIREBASE_*` on their own.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("PLANNER_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:planner.db?mode=rwc".to_string());

        let auth_backend = match env::var("AUTH_BACKEND") {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "" | "local" => AuthBackend::Local,
                "firebase" => AuthBackend::Firebase,
                _ => return Err(ConfigError::InvalidAuthBackend(value)),
            },
            Err(_) => AuthBackend::Local,
        };

        let history_limit = match env::var("HISTORY_LIMIT") {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => return Err(ConfigError::InvalidHistoryLimit(value)),
            },
            Err(_) => DEFAULT_HISTORY_LIMIT,
        };

        Ok(Self {
            addr,
            database_url,
            auth_backend,
            history_limit,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PLANNER_ADDR format")]
    InvalidAddr,

    #[error("AUTH_BACKEND must be \"local\" or \"firebase\", got {0:?}")]
    InvalidAuthBackend(String),

    #[error("HISTORY_LIMIT must be a positive integer, got {0:?}")]
    InvalidHistoryLimit(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 4] = ["PLANNER_ADDR", "SQLITE_PATH", "AUTH_BACKEND", "HISTORY_LIMIT"];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = Config::from_env().unwrap();
        assert_eq!(config.addr.to_string(), "127.0.0.1:8790");
        assert_eq!(config.database_url, "sqlite:planner.db?mode=rwc");
        assert_eq!(config.auth_backend, AuthBackend::Local);
        assert_eq!(config.history_limit, 5);
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("PLANNER_ADDR", "0.0.0.0:9000");
        env::set_var("AUTH_BACKEND", "Firebase");
        env::set_var("HISTORY_LIMIT", "10");

        let config = Config::from_env().unwrap();
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.auth_backend, AuthBackend::Firebase);
        assert_eq!(config.history_limit, 10);

        clear_env();
    }

    #[test]
    fn test_invalid_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        env::set_var("PLANNER_ADDR", "not an address");
        assert!(matches!(Config::from_env(), Err(ConfigError::InvalidAddr)));
        env::remove_var("PLANNER_ADDR");

        env::set_var("AUTH_BACKEND", "ldap");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidAuthBackend(_))
        ));
        env::remove_var("AUTH_BACKEND");

        env::set_var("HISTORY_LIMIT", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidHistoryLimit(_))
        ));

        clear_env();
    }
}
