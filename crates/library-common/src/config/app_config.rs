//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use library_core::{BookStatus, CatalogStatus, FeeSchedule, MemberStatus, StatusName};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub library: LibraryConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Directory holding the SQL migrations; the bundled set is used when unset
    pub migrations_dir: Option<String>,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Lending rules and record defaults
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// State given to newly created members, authors, categories and books
    pub default_state: StatusName,
    pub default_borrow_days: u32,
    pub max_borrow_days: u32,
    pub overdue_fee_per_day: Decimal,
    pub currency: String,
}

impl LibraryConfig {
    /// Borrowing terms derived from this configuration
    #[must_use]
    pub fn fee_schedule(&self) -> FeeSchedule {
        FeeSchedule {
            overdue_fee_per_day: self.overdue_fee_per_day,
            currency: self.currency.clone(),
            default_borrow_days: self.default_borrow_days,
            max_borrow_days: self.max_borrow_days,
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            default_state: StatusName::Active,
            default_borrow_days: default_borrow_days(),
            max_borrow_days: default_max_borrow_days(),
            overdue_fee_per_day: default_overdue_fee(),
            currency: default_currency(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "library-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_borrow_days() -> u32 {
    14
}

fn default_max_borrow_days() -> u32 {
    60
}

fn default_overdue_fee() -> Decimal {
    Decimal::new(1000, 2)
}

fn default_currency() -> String {
    "KES".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required keys are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: parse_or(&lookup, "API_PORT", default_port)?,
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                migrations_dir: lookup("DATABASE_MIGRATIONS_DIR").filter(|s| !s.trim().is_empty()),
            },
            jwt: JwtConfig {
                secret: lookup("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
                access_token_expiry: parse_or(&lookup, "JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry)?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            library: LibraryConfig {
                default_state: parse_or(&lookup, "LIBRARY_DEFAULT_STATE", || StatusName::Active)?,
                default_borrow_days: parse_or(&lookup, "LIBRARY_DEFAULT_BORROW_DAYS", default_borrow_days)?,
                max_borrow_days: parse_or(&lookup, "LIBRARY_MAX_BORROW_DAYS", default_max_borrow_days)?,
                overdue_fee_per_day: parse_or(&lookup, "LIBRARY_OVERDUE_FEE_PER_DAY", default_overdue_fee)?,
                currency: lookup("LIBRARY_CURRENCY").unwrap_or_else(default_currency),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let lib = &self.library;
        if lib.max_borrow_days == 0 {
            return Err(ConfigError::InvalidValue(
                "LIBRARY_MAX_BORROW_DAYS",
                "must be at least 1".to_string(),
            ));
        }
        if lib.default_borrow_days == 0 || lib.default_borrow_days > lib.max_borrow_days {
            return Err(ConfigError::InvalidValue(
                "LIBRARY_DEFAULT_BORROW_DAYS",
                format!("must lie in 1..={}", lib.max_borrow_days),
            ));
        }
        if lib.overdue_fee_per_day.is_sign_negative() {
            return Err(ConfigError::InvalidValue(
                "LIBRARY_OVERDUE_FEE_PER_DAY",
                "must not be negative".to_string(),
            ));
        }
        // must be representable by every kind of record created with it
        let state = lib.default_state;
        if MemberStatus::try_from(state).is_err()
            || CatalogStatus::try_from(state).is_err()
            || BookStatus::try_from(state).is_err()
        {
            return Err(ConfigError::InvalidValue(
                "LIBRARY_DEFAULT_STATE",
                format!("{state} cannot be used for new records"),
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::InvalidValue(
                "DATABASE_MIN_CONNECTIONS",
                "must not exceed DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse an optional key, falling back to `default` when unset
fn parse_or<F, T, D>(lookup: &F, key: &'static str, default: D) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    D: FnOnce() -> T,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        _ => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
