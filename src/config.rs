use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_DATABASE_URL: &str = "postgresql://user:password@db:5432/appdb";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub allowed_origins: Vec<String>,
    pub allowed_hosts: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source, falling back to
    /// local development defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server_address: get_or(&lookup, "SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            database_url: get_or(&lookup, "DATABASE_URL", DEFAULT_DATABASE_URL),
            db_max_connections: get_parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            db_acquire_timeout_secs: get_parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 30)?,
            allowed_origins: get_list(&lookup, "ALLOWED_ORIGINS", "http://localhost:3000"),
            allowed_hosts: get_list(&lookup, "ALLOWED_HOSTS", "*"),
        })
    }
}

fn get_or<F>(lookup: &F, name: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn get_parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(default),
    }
}

fn get_list<F>(lookup: &F, name: &str, default: &str) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    get_or(lookup, name, default)
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
