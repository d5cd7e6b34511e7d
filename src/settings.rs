//! Runtime settings from the environment.

use std::net::SocketAddr;
use thiserror::Error;

/// Default page size for list responses, overridable via `PAGE_SIZE`.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Bearer token required for mutating requests. Writes are rejected when unset.
    pub api_token: Option<String>,
    pub page_size: u32,
}

impl Settings {
    /// Read settings from env vars: `DATABASE_URL`, `BIND_ADDR`, `API_TOKEN`, `PAGE_SIZE`.
    pub fn from_env() -> Result<Self, SettingsError> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/products".into());
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
        let bind_addr = parse_bind_addr(&bind_addr)?;
        let api_token = std::env::var("API_TOKEN").ok().filter(|s| !s.trim().is_empty());
        let page_size = match std::env::var("PAGE_SIZE") {
            Ok(v) => parse_page_size(&v)?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };
        Ok(Settings {
            database_url,
            bind_addr,
            api_token,
            page_size,
        })
    }
}

fn parse_bind_addr(s: &str) -> Result<SocketAddr, SettingsError> {
    s.parse().map_err(|_| SettingsError::Invalid {
        name: "BIND_ADDR",
        value: s.to_string(),
    })
}

fn parse_page_size(s: &str) -> Result<u32, SettingsError> {
    match s.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SettingsError::Invalid {
            name: "PAGE_SIZE",
            value: s.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_parses() {
        assert!(parse_bind_addr("127.0.0.1:8080").is_ok());
        assert!(parse_bind_addr("not-an-addr").is_err());
    }

    #[test]
    fn page_size_rejects_zero_and_garbage() {
        assert_eq!(parse_page_size("25").unwrap(), 25);
        assert!(parse_page_size("0").is_err());
        assert!(parse_page_size("ten").is_err());
    }
}
