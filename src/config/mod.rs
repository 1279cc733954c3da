use std::env;

use sqlx::mysql::MySqlConnectOptions;
use tracing::warn;

pub mod security;

pub use security::create_security_headers_layer;

const DEFAULT_PORT: u16 = 3001;

pub struct Config {
    pub database: DatabaseConfig,
    pub port: u16,
    /// `RUST_ENV=production`: HSTS and `Secure` session cookies.
    pub production: bool,
}

/// The only recognized database options: host, user, password, name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
                warn!("Invalid PORT value '{}': {}, using {}", raw, e, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            database: DatabaseConfig::from_lookup(&lookup),
            port,
            production: is_production(lookup("RUST_ENV").as_deref()),
        }
    }
}

pub fn is_production(rust_env: Option<&str>) -> bool {
    rust_env.is_some_and(|v| v.eq_ignore_ascii_case("production"))
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            user: lookup("DB_USER").unwrap_or_else(|| "root".to_string()),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            name: lookup("DB_NAME").unwrap_or_else(|| "event5".to_string()),
        }
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}
