//! Application configuration.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Account bootstrap configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Initial administrator account.
///
/// Only used when the account table is empty at start-up.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// E-mail of the administrator to create.
    #[serde(default)]
    pub bootstrap_email: Option<String>,
    /// Password of the administrator to create.
    #[serde(default)]
    pub bootstrap_password: Option<String>,
    /// Display name of the administrator to create.
    #[serde(default)]
    pub bootstrap_name: Option<String>,
}

impl AuthConfig {
    /// Returns the bootstrap credentials when both e-mail and password are set.
    #[must_use]
    pub fn bootstrap_credentials(&self) -> Option<(&str, &str)> {
        match (&self.bootstrap_email, &self.bootstrap_password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email.as_str(), password.as_str()))
            }
            _ => None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present, exported into the process environment)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `PARISH_ENV`)
    /// 4. Environment variables with `PARISH__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        // A missing .env file is the normal case in production.
        let _ = dotenvy::dotenv();

        let env = std::env::var("PARISH_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PARISH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: Config = config::Config::builder()
            .set_override("database.url", "postgres://localhost/parish")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.max_connections, 20);
        assert!(!config.logging.json);
        assert!(config.auth.bootstrap_credentials().is_none());
    }

    #[test]
    fn test_bootstrap_credentials_require_both_fields() {
        let mut auth = AuthConfig {
            bootstrap_email: Some("admin@parish.org".to_string()),
            bootstrap_password: None,
            bootstrap_name: None,
        };
        assert!(auth.bootstrap_credentials().is_none());

        auth.bootstrap_password = Some(String::new());
        assert!(auth.bootstrap_credentials().is_none());

        auth.bootstrap_password = Some("changeme123".to_string());
        assert_eq!(
            auth.bootstrap_credentials(),
            Some(("admin@parish.org", "changeme123"))
        );
    }
}
