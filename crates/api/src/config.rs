use anyhow::{Context, Result};
use std::env;

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub skip_migrations: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        Ok(Self::from_vars(url, |key| env::var(key).ok()))
    }

    fn from_vars(url: String, var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            url,
            max_connections: var("DATABASE_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            skip_migrations: var("SKIP_MIGRATIONS")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
        }
    }
}

/// Longest session lifetime accepted from SESSION_TTL_HOURS (one year).
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub session_ttl_hours: i64,
    pub session_sweep_interval_secs: u64,
    pub cookie_domain: Option<String>,
    pub cookie_secure: bool,
    /// Principals with these usernames are treated as admins whatever their role.
    pub admin_usernames: Vec<String>,
    pub bcrypt_cost: u32,
    /// Reject bookings that leave the field's daily operating window.
    pub enforce_operating_hours: bool,
    pub rate_limit_auth: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
            ],
            session_ttl_hours: 24 * 7,
            session_sweep_interval_secs: 3600,
            cookie_domain: None,
            cookie_secure: true,
            admin_usernames: Vec::new(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            enforce_operating_hours: true,
            rate_limit_auth: true,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(raw) => raw.parse().with_context(|| format!("invalid PORT: {raw}"))?,
            None => defaults.port,
        };

        Ok(Self {
            port,
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|raw| split_list(&raw))
                .unwrap_or(defaults.allowed_origins),
            session_ttl_hours: var("SESSION_TTL_HOURS")
                .and_then(|s| s.parse().ok())
                .filter(|h: &i64| *h > 0)
                .map(|h| h.min(MAX_SESSION_TTL_HOURS))
                .unwrap_or(defaults.session_ttl_hours),
            session_sweep_interval_secs: var("SESSION_SWEEP_INTERVAL_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|s: &u64| *s > 0)
                .unwrap_or(defaults.session_sweep_interval_secs),
            cookie_domain: var("COOKIE_DOMAIN").filter(|d| !d.is_empty()),
            cookie_secure: var("COOKIE_SECURE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cookie_secure),
            admin_usernames: var("ADMIN_USERNAMES")
                .map(|raw| split_list(&raw))
                .unwrap_or_default(),
            bcrypt_cost: var("BCRYPT_COST")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.bcrypt_cost),
            enforce_operating_hours: var("ENFORCE_OPERATING_HOURS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.enforce_operating_hours),
            rate_limit_auth: var("RATE_LIMIT_AUTH")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rate_limit_auth),
        })
    }

    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl_hours * 60 * 60
    }

    pub fn is_admin_username(&self, username: &str) -> bool {
        self.admin_usernames.iter().any(|a| a == username)
    }
}
