//! Runtime settings read from the process environment (after `.env` is loaded).

use crate::error::ConfigError;
use std::net::SocketAddr;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/guild_board";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Selects how much detail a 500 response carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeploymentMode {
    Production,
    Development,
}

impl DeploymentMode {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            DeploymentMode::Production
        } else {
            DeploymentMode::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == DeploymentMode::Production
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseTarget {
    Postgres(String),
    /// In-process tables; nothing survives a restart.
    Memory,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database: DatabaseTarget,
    pub bind_addr: SocketAddr,
    pub mode: DeploymentMode,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match lookup("DATABASE_URL") {
            Some(url) if url.trim().eq_ignore_ascii_case("memory") => DatabaseTarget::Memory,
            Some(url) if !url.trim().is_empty() => DatabaseTarget::Postgres(url.trim().to_string()),
            _ => DatabaseTarget::Postgres(DEFAULT_DATABASE_URL.to_string()),
        };

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw
            .trim()
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidSetting {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let mode = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .map(|v| DeploymentMode::parse(&v))
            .unwrap_or(DeploymentMode::Development);

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidSetting {
                        name: "DB_MAX_CONNECTIONS",
                        reason: format!("expected a positive integer, got '{}'", raw),
                    })
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::InvalidSetting {
                name: "RUN_MIGRATIONS",
                reason: format!("expected true or false, got '{}'", raw),
            })?,
            None => true,
        };

        Ok(Settings {
            database,
            bind_addr,
            mode,
            max_connections,
            run_migrations,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
