use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    Postgres { dsn: String },
    Memory,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn parse(contents: &str) -> Result<Config, Box<dyn std::error::Error>> {
    serde_yaml::from_str(contents).map_err(Into::into)
}

fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    let port = match env::var("PORT") {
        Ok(port) => port
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse PORT: {e}"))?,
        Err(_) => DEFAULT_PORT,
    };

    let store = match env::var("PG_DSN") {
        Ok(dsn) => StoreConfig::Postgres { dsn },
        Err(_) => {
            tracing::warn!("PG_DSN is not set, notes will be kept in memory only");
            StoreConfig::Memory
        }
    };

    Ok(Config { port, store })
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path =
        env::var("NOTES_SERVICE_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        let contents = fs::read_to_string(&config_path)?;
        return parse(&contents);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        let contents = fs::read_to_string("config.yaml")?;
        return parse(&contents);
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        let contents = fs::read_to_string("config.example.yaml")?;
        return parse(&contents);
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    load_from_env()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_postgres_store() {
        let cfg = parse(
            "port: 9000\nstore:\n  backend: postgres\n  dsn: \"host=db user=notes\"\n",
        )
        .unwrap();

        assert_eq!(cfg.port, 9000);
        assert_eq!(
            cfg.store,
            StoreConfig::Postgres {
                dsn: "host=db user=notes".into()
            }
        );
    }

    #[test]
    fn port_defaults_when_omitted() {
        let cfg = parse("store:\n  backend: memory\n").unwrap();

        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.store, StoreConfig::Memory);
    }

    #[test]
    fn postgres_requires_dsn() {
        assert!(parse("store:\n  backend: postgres\n").is_err());
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(parse("store:\n  backend: sqlite\n").is_err());
    }
}
