//! # account-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    credential_hasher, hash_password, verify_password, Argon2Hasher, Claims, CredentialHasher,
    JwtService, PlainHasher, TOKEN_PATTERN,
};
pub use config::{
    AccountPolicyConfig, AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment,
    GatewayConfig, HandshakeLimitConfig, JwtConfig, LimiterBudget, PerformanceConfig,
    RateLimitConfig, DEFAULT_BLACKLISTED_DOMAINS,
};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing_with_config, TracingConfig, TracingError};
