//! Configuration structs

mod app_config;

pub use app_config::{
    AccountPolicyConfig, AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment,
    GatewayConfig, HandshakeLimitConfig, JwtConfig, LimiterBudget, PerformanceConfig,
    RateLimitConfig, DEFAULT_BLACKLISTED_DOMAINS,
};
