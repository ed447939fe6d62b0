use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Runtime configuration, sourced from the environment.
///
/// | Variable      | Default        |
/// |---------------|----------------|
/// | `DB_HOST`     | `localhost`    |
/// | `DB_USER`     | `postgres`     |
/// | `DB_PASSWORD` | *(empty)*      |
/// | `DB_NAME`     | `countries_db` |
/// | `PORT`        | `5000`         |
///
/// The summary image always lands in `<cache_dir>/summary.png`; the directory
/// is only overridable in code (tests point it at a tempdir).
#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub port: u16,
    pub cache_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_host: "localhost".to_string(),
            db_user: "postgres".to_string(),
            db_password: String::new(),
            db_name: "countries_db".to_string(),
            port: 5000,
            cache_dir: PathBuf::from("cache"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let port = match env::var("PORT") {
            Ok(s) => s.parse::<u16>().context("PORT must be a number")?,
            Err(_) => defaults.port,
        };
        Ok(Self {
            db_host: env::var("DB_HOST").unwrap_or(defaults.db_host),
            db_user: env::var("DB_USER").unwrap_or(defaults.db_user),
            db_password: env::var("DB_PASSWORD").unwrap_or(defaults.db_password),
            db_name: env::var("DB_NAME").unwrap_or(defaults.db_name),
            port,
            cache_dir: defaults.cache_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.db_host, "localhost");
        assert_eq!(cfg.db_user, "postgres");
        assert_eq!(cfg.db_password, "");
        assert_eq!(cfg.db_name, "countries_db");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.cache_dir, PathBuf::from("cache"));
    }
}
