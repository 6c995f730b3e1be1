//! # library-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService, TokenType};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    LibraryConfig, ServerConfig,
};
pub use error::{codes, AppError, AppResult};
pub use telemetry::{try_init_tracing_with_config, TracingConfig, TracingError};
