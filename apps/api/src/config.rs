use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Which backing data the worker endpoints serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Static JSON fixtures loaded at startup.
    Mock,
    /// PostgreSQL via `DATABASE_URL`.
    Live,
}

impl FromStr for DataMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(DataMode::Mock),
            "live" => Ok(DataMode::Live),
            other => bail!("DATA_MODE must be 'mock' or 'live', got '{other}'"),
        }
    }
}

const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:3002",
    "http://localhost:3013",
    "http://localhost:5173",
    "http://localhost:5174",
];

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_mode: DataMode,
    /// Required only in live mode.
    pub database_url: Option<String>,
    pub company_data_path: String,
    pub learner_data_path: String,
    pub company_data_url: Option<String>,
    pub learner_data_url: Option<String>,
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_mode: DataMode = get("DATA_MODE")
            .unwrap_or_else(|| "mock".to_string())
            .parse()?;

        let database_url = get("DATABASE_URL").filter(|v| !v.trim().is_empty());
        if data_mode == DataMode::Live && database_url.is_none() {
            bail!("Required environment variable 'DATABASE_URL' is not set (DATA_MODE=live)");
        }

        Ok(Config {
            data_mode,
            database_url,
            company_data_path: get("COMPANY_DATA_PATH")
                .unwrap_or_else(|| "data/company-mock.json".to_string()),
            learner_data_path: get("LEARNER_DATA_PATH")
                .unwrap_or_else(|| "data/learner-mock.json".to_string()),
            company_data_url: get("COMPANY_DATA_URL").filter(|v| !v.trim().is_empty()),
            learner_data_url: get("LEARNER_DATA_URL").filter(|v| !v.trim().is_empty()),
            cors_origins: parse_origins(get("CORS_ORIGINS").as_deref()),
            port: get("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_origins(raw: Option<&str>) -> Vec<String> {
    match raw.map(str::trim) {
        None | Some("") => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        Some("*") => Vec::new(),
        Some(list) => list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_mock() {
        let config = load(&[]).unwrap();
        assert_eq!(config.data_mode, DataMode::Mock);
        assert_eq!(config.port, 5000);
        assert_eq!(config.company_data_path, "data/company-mock.json");
        assert_eq!(config.cors_origins.len(), DEFAULT_CORS_ORIGINS.len());
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_live_requires_database_url() {
        assert!(load(&[("DATA_MODE", "live")]).is_err());
        let config = load(&[("DATA_MODE", "LIVE"), ("DATABASE_URL", "postgres://x")]).unwrap();
        assert_eq!(config.data_mode, DataMode::Live);
    }

    #[test]
    fn test_rejects_unknown_mode_and_bad_port() {
        assert!(load(&[("DATA_MODE", "staging")]).is_err());
        assert!(load(&[("PORT", "not-a-port")]).is_err());
    }

    #[test]
    fn test_cors_origins() {
        assert!(load(&[("CORS_ORIGINS", "*")]).unwrap().cors_origins.is_empty());
        let config = load(&[("CORS_ORIGINS", "http://a.test, http://b.test,")]).unwrap();
        assert_eq!(config.cors_origins, ["http://a.test", "http://b.test"]);
    }
}
