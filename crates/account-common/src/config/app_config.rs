//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).
//! Every value is read once at startup; unparsable values fall back to defaults.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Disposable email providers rejected when blacklisting is enabled and no
/// explicit list is configured
pub const DEFAULT_BLACKLISTED_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "dispostable.com",
    "guerrillamail.com",
    "mailinator.com",
    "maildrop.cc",
    "sharklasers.com",
    "tempmail.com",
    "throwawaymail.com",
    "trashmail.com",
    "yopmail.com",
];

/// Secret used for tokens when running in test mode without `JWT_SECRET`
const TEST_MODE_JWT_SECRET: &str = "test-mode-secret-not-for-production-use";

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub gateway: GatewayConfig,
    /// `None` runs the server against the in-memory account store
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub accounts: AccountPolicyConfig,
    pub performance: PerformanceConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
    /// Bypasses rate limiting and password hashing
    pub test_mode: bool,
    /// Disables all log output
    pub silent_logging: bool,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
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
}

/// WebSocket gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Route the WebSocket upgrade is served on
    pub path: String,
    /// Idle connections are closed after this long without a frame
    pub connect_timeout_ms: u64,
    pub handshake: HandshakeLimitConfig,
}

impl GatewayConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Throttle on WebSocket upgrade requests
#[derive(Debug, Clone)]
pub struct HandshakeLimitConfig {
    pub per_second: u32,
    pub burst: u32,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds
    pub expiry: i64,
}

/// Budget of one point limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimiterBudget {
    pub max_points: u32,
    pub clear_delay_ms: u64,
}

impl LimiterBudget {
    #[must_use]
    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.clear_delay_ms)
    }
}

/// Point-based event rate limiting
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Budget for logged-in connections
    pub authenticated: LimiterBudget,
    /// Budget for anonymous connections
    pub unauthenticated: LimiterBudget,
}

/// Rules applied to new accounts
#[derive(Debug, Clone)]
pub struct AccountPolicyConfig {
    pub email_blacklisting_enabled: bool,
    /// Lowercase email domains refused at registration
    pub blacklisted_domains: Vec<String>,
}

impl AccountPolicyConfig {
    /// Whether registration must refuse this email domain
    #[must_use]
    pub fn is_blacklisted(&self, domain: &str) -> bool {
        self.email_blacklisting_enabled
            && self
                .blacklisted_domains
                .iter()
                .any(|blocked| blocked.eq_ignore_ascii_case(domain))
    }
}

/// Slow event reporting
#[derive(Debug, Clone)]
pub struct PerformanceConfig {
    pub reports_enabled: bool,
    /// Handlers slower than this are reported
    pub min_ms: u64,
}

// Default value functions
fn default_app_name() -> String {
    "account-gateway".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_gateway_path() -> String {
    "/gateway".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    5000
}

fn default_handshake_per_second() -> u32 {
    50
}

fn default_handshake_burst() -> u32 {
    100
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_db_connect_timeout() -> u64 {
    30
}

fn default_jwt_expiry() -> i64 {
    604_800 // 7 days
}

fn default_authenticated_budget() -> LimiterBudget {
    LimiterBudget {
        max_points: 40,
        clear_delay_ms: 2500,
    }
}

fn default_unauthenticated_budget() -> LimiterBudget {
    LimiterBudget {
        max_points: 10,
        clear_delay_ms: 2500,
    }
}

fn default_blacklisted_domains() -> Vec<String> {
    DEFAULT_BLACKLISTED_DOMAINS
        .iter()
        .map(|d| (*d).to_string())
        .collect()
}

fn default_performance_min_ms() -> u64 {
    50
}

/// Parse a boolean flag: `true`/`1`/`yes`/`on`, case-insensitive
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name).and_then(|s| s.trim().parse().ok())
}

fn flag_var<F>(lookup: &F, name: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).and_then(|s| parse_flag(&s)).unwrap_or(false)
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = lookup("APP_ENV")
            .and_then(|s| match s.to_lowercase().as_str() {
                "production" => Some(Environment::Production),
                "staging" => Some(Environment::Staging),
                "development" => Some(Environment::Development),
                _ => None,
            })
            .unwrap_or_default();
        let test_mode = flag_var(&lookup, "TEST_MODE");

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if test_mode => TEST_MODE_JWT_SECRET.to_string(),
            None => return Err(ConfigError::MissingVar("JWT_SECRET")),
        };
        if env.is_production() && jwt_secret.len() < 32 {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET",
                "must be at least 32 characters in production".to_string(),
            ));
        }

        let authenticated = default_authenticated_budget();
        let unauthenticated = default_unauthenticated_budget();

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
                test_mode,
                silent_logging: flag_var(&lookup, "SILENT_LOGGING"),
            },
            gateway: GatewayConfig {
                host: lookup("GATEWAY_HOST").unwrap_or_else(default_host),
                port: parse_var(&lookup, "PORT").unwrap_or_else(default_port),
                path: lookup("GATEWAY_PATH")
                    .filter(|p| p.starts_with('/'))
                    .unwrap_or_else(default_gateway_path),
                connect_timeout_ms: parse_var(&lookup, "CONNECT_TIMEOUT_MS")
                    .unwrap_or_else(default_connect_timeout_ms),
                handshake: HandshakeLimitConfig {
                    per_second: parse_var(&lookup, "HANDSHAKE_PER_SECOND")
                        .filter(|n: &u32| *n > 0)
                        .unwrap_or_else(default_handshake_per_second),
                    burst: parse_var(&lookup, "HANDSHAKE_BURST")
                        .filter(|n: &u32| *n > 0)
                        .unwrap_or_else(default_handshake_burst),
                },
            },
            database: lookup("DATABASE_URL")
                .filter(|url| !url.is_empty())
                .map(|url| DatabaseConfig {
                    url,
                    max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")
                        .unwrap_or_else(default_max_connections),
                    min_connections: parse_var(&lookup, "DATABASE_MIN_CONNECTIONS")
                        .unwrap_or_else(default_min_connections),
                    connect_timeout_secs: parse_var(&lookup, "DATABASE_CONNECT_TIMEOUT")
                        .unwrap_or_else(default_db_connect_timeout),
                }),
            jwt: JwtConfig {
                secret: jwt_secret,
                expiry: parse_var(&lookup, "JWT_EXPIRY").unwrap_or_else(default_jwt_expiry),
            },
            rate_limit: RateLimitConfig {
                authenticated: LimiterBudget {
                    max_points: parse_var(&lookup, "RATELIMITER_POINTS").unwrap_or(authenticated.max_points),
                    clear_delay_ms: parse_var(&lookup, "RATELIMITER_DURATION")
                        .unwrap_or(authenticated.clear_delay_ms),
                },
                unauthenticated: LimiterBudget {
                    max_points: parse_var(&lookup, "RATELIMITER_POINTS_UNAUTHORISED")
                        .unwrap_or(unauthenticated.max_points),
                    clear_delay_ms: parse_var(&lookup, "RATELIMITER_DURATION_UNAUTHORISED")
                        .unwrap_or(unauthenticated.clear_delay_ms),
                },
            },
            accounts: AccountPolicyConfig {
                email_blacklisting_enabled: flag_var(&lookup, "EMAIL_BLACKLISTING_ENABLED"),
                blacklisted_domains: lookup("EMAIL_BLACKLIST")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|d| !d.is_empty())
                            .map(str::to_ascii_lowercase)
                            .collect()
                    })
                    .unwrap_or_else(default_blacklisted_domains),
            },
            performance: PerformanceConfig {
                reports_enabled: flag_var(&lookup, "PERFORMANCE_REPORTS"),
                min_ms: parse_var(&lookup, "PERFORMANCE_REPORTS_MIN_MS")
                    .unwrap_or_else(default_performance_min_ms),
            },
        })
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
