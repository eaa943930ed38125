use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while assembling [`AppConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT key is not configured (set JWT_KEY)")]
    MissingJwtKey,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub smtp: SmtpConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub log_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string for the user store. `None` means the store is not
    /// configured and every write request fails with a configuration error.
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub statement_timeout_ms: u64,
}

impl DatabaseConfig {
    pub fn statement_timeout(&self) -> Duration {
        Duration::from_millis(self.statement_timeout_ms)
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub key: String,
    pub issuer: String,
    pub audience: String,
    pub expiry_minutes: i64,
}

// Keep the signing key out of debug output
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiry_minutes", &self.expiry_minutes)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub starttls: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("starttls", &self.starttls)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Environment presets are applied first, then individual keys override
    /// them. The JWT key is mandatory: the service refuses to start without it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let base = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        };

        let config = base.with_overrides(&lookup)?;

        if config.jwt.key.trim().is_empty() {
            return Err(ConfigError::MissingJwtKey);
        }

        Ok(config)
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server
        if let Some(v) = lookup("ISLEMLER_API_PORT").or_else(|| lookup("PORT")) {
            self.server.port = parse_value("PORT", &v)?;
        }
        if let Some(v) = lookup("LOG_DIR") {
            self.server.log_dir = v;
        }

        // Database
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = non_blank(v);
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_value("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse_value("DATABASE_CONNECTION_TIMEOUT", &v)?;
        }
        if let Some(v) = lookup("DATABASE_STATEMENT_TIMEOUT_MS") {
            self.database.statement_timeout_ms = parse_value("DATABASE_STATEMENT_TIMEOUT_MS", &v)?;
        }

        // JWT
        if let Some(v) = lookup("JWT_KEY") {
            self.jwt.key = v;
        }
        if let Some(v) = lookup("JWT_ISSUER") {
            self.jwt.issuer = v;
        }
        if let Some(v) = lookup("JWT_AUDIENCE") {
            self.jwt.audience = v;
        }
        if let Some(v) = lookup("JWT_EXPIRY_MINUTES") {
            self.jwt.expiry_minutes = parse_value("JWT_EXPIRY_MINUTES", &v)?;
        }

        // SMTP
        if let Some(v) = lookup("SMTP_HOST") {
            self.smtp.host = v;
        }
        if let Some(v) = lookup("SMTP_PORT") {
            self.smtp.port = parse_value("SMTP_PORT", &v)?;
        }
        if let Some(v) = lookup("SMTP_STARTTLS") {
            self.smtp.starttls = parse_value("SMTP_STARTTLS", &v)?;
        }
        if let Some(v) = lookup("SMTP_USERNAME") {
            self.smtp.username = non_blank(v);
        }
        if let Some(v) = lookup("SMTP_PASSWORD") {
            self.smtp.password = non_blank(v);
        }
        if let Some(v) = lookup("SMTP_FROM") {
            self.smtp.from = non_blank(v);
        }

        // Security
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(self)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                log_dir: "logs".to_string(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                statement_timeout_ms: 5_000,
            },
            jwt: JwtConfig {
                key: String::new(),
                issuer: "islemler-api".to_string(),
                audience: "islemler-api".to_string(),
                expiry_minutes: 60 * 24,
            },
            smtp: SmtpConfig::gmail_relay(),
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 8080,
                log_dir: "logs".to_string(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                statement_timeout_ms: 5_000,
            },
            jwt: JwtConfig {
                key: String::new(),
                issuer: "islemler-api".to_string(),
                audience: "islemler-api".to_string(),
                expiry_minutes: 60,
            },
            smtp: SmtpConfig::gmail_relay(),
            security: SecurityConfig {
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 8080,
                log_dir: "logs".to_string(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                statement_timeout_ms: 3_000,
            },
            jwt: JwtConfig {
                key: String::new(),
                issuer: "islemler-api".to_string(),
                audience: "islemler-api".to_string(),
                expiry_minutes: 15,
            },
            smtp: SmtpConfig::gmail_relay(),
            security: SecurityConfig {
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

impl SmtpConfig {
    fn gmail_relay() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            starttls: true,
            username: None,
            password: None,
            from: None,
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
