use anyhow::{Context, Result};

/// Runtime configuration for the daily-duel ranking API, read from the
/// environment (a `.env` file is honored in development).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Comma-separated bearer keys granting access to the admin routes.
    /// Empty means no key is accepted and those routes stay locked.
    pub api_keys: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").context("Cannot load HOST env variable")?;
        let port = std::env::var("PORT")
            .context("Cannot load PORT env variable")?
            .parse()
            .context("PORT must be a number")?;
        let database_url =
            std::env::var("DATABASE_URL").context("Cannot load DATABASE_URL env variable")?;
        let api_keys = std::env::var("API_KEYS").unwrap_or_default();

        Ok(Self {
            host,
            port,
            database_url,
            api_keys,
        })
    }
}
