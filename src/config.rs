//! Environment configuration: database connection, listen port, migration flag.

use crate::error::AppError;
use sqlx::postgres::PgConnectOptions;

/// Pool bounds for the main connection pool.
pub const POOL_MIN_CONNECTIONS: u32 = 2;
pub const POOL_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_host: String,
    pub database_port: u16,
    pub database_name: String,
    pub database_username: String,
    pub database_password: String,
    /// HTTP listen port.
    pub port: u16,
    /// External base URL, advertised in the generated API documentation.
    pub base_url: String,
    /// When true, pending migrations are applied once at startup.
    pub run_migrations_on_start: bool,
}

impl AppConfig {
    /// Read config from the process environment. `.env` should already be
    /// loaded (`dotenvy::dotenv`).
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_port = parse_port(&lookup, "DATABASE_PORT", 5432)?;
        let port = parse_port(&lookup, "PORT", 3000)?;
        Ok(Self {
            database_host: lookup("DATABASE_HOST").unwrap_or_else(|| "localhost".into()),
            database_port,
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| "tedly".into()),
            database_username: lookup("DATABASE_USERNAME").unwrap_or_else(|| "postgres".into()),
            database_password: lookup("DATABASE_PASSWORD").unwrap_or_default(),
            port,
            base_url: lookup("BASE_URL").unwrap_or_else(|| format!("http://localhost:{port}")),
            run_migrations_on_start: lookup("RUN_MIGRATIONS_ON_START").as_deref() == Some("true"),
        })
    }

    /// Connection options for the main pool.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.database_host)
            .port(self.database_port)
            .database(&self.database_name)
            .username(&self.database_username)
            .password(&self.database_password)
    }
}

fn parse_port(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u16,
) -> Result<u16, AppError> {
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{key} must be a port number, got '{raw}'"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.database_host, "localhost");
        assert_eq!(config.database_port, 5432);
        assert_eq!(config.port, 3000);
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(!config.run_migrations_on_start);
    }

    #[test]
    fn env_values_override_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_HOST", "db.internal"),
            ("DATABASE_PORT", "5433"),
            ("DATABASE_NAME", "tedly_prod"),
            ("DATABASE_USERNAME", "tedly"),
            ("DATABASE_PASSWORD", "secret"),
            ("PORT", "8080"),
            ("BASE_URL", "https://api.tedly.example"),
            ("RUN_MIGRATIONS_ON_START", "true"),
        ]))
        .unwrap();
        assert_eq!(config.database_host, "db.internal");
        assert_eq!(config.database_port, 5433);
        assert_eq!(config.database_name, "tedly_prod");
        assert_eq!(config.port, 8080);
        assert_eq!(config.base_url, "https://api.tedly.example");
        assert!(config.run_migrations_on_start);
    }

    #[test]
    fn migration_flag_requires_exact_true() {
        let config = AppConfig::from_lookup(lookup_from(&[("RUN_MIGRATIONS_ON_START", "1")])).unwrap();
        assert!(!config.run_migrations_on_start);
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let result = AppConfig::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
    }
}
