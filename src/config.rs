use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    #[allow(dead_code)]
    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,

    // Profile API (gender options, uploads, profile updates)
    pub api_base_url: String,
    pub api_timeout_seconds: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        // Pick up a local .env if one exists
        dotenvy::dotenv().ok();

        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));

        let api_base_url = env::var("API_BASE_URL").context("API_BASE_URL must be set")?;
        let api_timeout_seconds = env::var("API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30); // uploads can take a while on slow links

        Ok(Settings {
            env,
            api_base_url,
            api_timeout_seconds,
        })
    }
}
