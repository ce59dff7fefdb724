/**
 * Server Configuration
 *
 * This module loads server configuration from environment variables and
 * opens the optional PostgreSQL connection.
 *
 * # Configuration Sources
 *
 * Values come from the process environment (after `.env` is loaded by the
 * binary), with defaults suitable for local development.
 *
 * # Error Handling
 *
 * Malformed values are a `ConfigError` and stop startup. A missing or
 * unreachable database is not: the server runs without database features and
 * the CORS allowlist falls back to its static part.
 */

use sqlx::PgPool;
use std::env;
use thiserror::Error;

use crate::backend::origins::allowlist::{DEFAULT_PRIMARY_DOMAIN, DEFAULT_STATIC_ORIGINS};

const DEV_JWT_SECRET: &str = "dev-only-secret-change-me";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

/// Settings for the CORS origin allowlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsSettings {
    /// Domain whose subdomains are always allowed
    pub primary_domain: String,
    /// Literal origins always allowed
    pub static_origins: Vec<String>,
    /// Extra origin appended to the static list (`FRONTEND_URL`)
    pub frontend_url: Option<String>,
    /// How long a populated allowlist stays fresh
    pub cache_ttl_secs: u64,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            primary_domain: DEFAULT_PRIMARY_DOMAIN.to_string(),
            static_origins: DEFAULT_STATIC_ORIGINS.iter().map(|o| o.to_string()).collect(),
            frontend_url: None,
            cache_ttl_secs: 300,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    /// Base URL written into generated widget scripts
    pub public_api_url: String,
    pub cors: CorsSettings,
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("SERVER_PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                value,
            })?,
            None => 3000,
        };

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using development secret");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(ConfigError::MissingValue("JWT_SECRET")),
        };

        let mut cors = CorsSettings::default();
        if let Some(domain) = get("CORS_PRIMARY_DOMAIN") {
            cors.primary_domain = domain;
        }
        if let Some(list) = get("CORS_STATIC_ORIGINS") {
            cors.static_origins = list
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
        }
        cors.frontend_url = get("FRONTEND_URL");
        if let Some(value) = get("CORS_CACHE_TTL_SECS") {
            cors.cache_ttl_secs = value.parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "CORS_CACHE_TTL_SECS",
                value,
            })?;
        }

        let public_api_url = get("PUBLIC_API_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", port))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            port,
            database_url: get("DATABASE_URL"),
            jwt_secret,
            public_api_url,
            cors,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            public_api_url: "http://localhost:3000".to_string(),
            cors: CorsSettings::default(),
        }
    }
}

/// Open the database pool and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is reachable
/// - `None` if `DATABASE_URL` is not set or the connection fails
///
/// Migration failures are logged and startup continues; the schema may
/// already be current.
pub async fn load_database(config: &ServerConfig) -> Option<PgPool> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, None);
        assert_eq!(config.cors, CorsSettings::default());
        assert_eq!(config.public_api_url, "http://localhost:3000");
    }

    #[test]
    fn test_cors_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("CORS_PRIMARY_DOMAIN", "example.org"),
            ("CORS_STATIC_ORIGINS", "https://a.example.org, ,https://b.example.org"),
            ("FRONTEND_URL", "https://app.example.org"),
            ("CORS_CACHE_TTL_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(config.cors.primary_domain, "example.org");
        assert_eq!(
            config.cors.static_origins,
            vec!["https://a.example.org".to_string(), "https://b.example.org".to_string()]
        );
        assert_eq!(config.cors.frontend_url.as_deref(), Some("https://app.example.org"));
        assert_eq!(config.cors.cache_ttl_secs, 60);
    }

    #[test]
    fn test_invalid_port() {
        let result = ServerConfig::from_lookup(lookup(&[("SERVER_PORT", "eighty")]));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::Invalid {
                name: "SERVER_PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_blank_frontend_url_is_unset() {
        let config =
            ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "x"), ("FRONTEND_URL", "  ")])).unwrap();
        assert_eq!(config.cors.frontend_url, None);
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_reads_process_environment() {
        env::set_var("JWT_SECRET", "from-env");
        env::set_var("CORS_CACHE_TTL_SECS", "not-a-number");

        let result = ServerConfig::from_env();

        env::remove_var("JWT_SECRET");
        env::remove_var("CORS_CACHE_TTL_SECS");

        assert_eq!(
            result.unwrap_err(),
            ConfigError::Invalid {
                name: "CORS_CACHE_TTL_SECS",
                value: "not-a-number".to_string()
            }
        );
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_secret() {
        env::set_var("JWT_SECRET", "from-env");
        let config = ServerConfig::from_env();
        env::remove_var("JWT_SECRET");

        assert_eq!(config.unwrap().jwt_secret, "from-env");
    }

    #[test]
    fn test_public_api_url_trailing_slash() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "x"),
            ("PUBLIC_API_URL", "https://api.algoqube.com/"),
        ]))
        .unwrap();
        assert_eq!(config.public_api_url, "https://api.algoqube.com");
    }
}
