use std::{env, path::PathBuf};

use attendtrack_server::DEFAULT_PORT;
use log::LevelFilter;

use crate::StartupError;

const PORT_VAR: &str = "ATTENDTRACK_SERVER_PORT";
const DATA_DIR_VAR: &str = "ATTENDTRACK_DATA_DIR";
const IN_MEMORY_VAR: &str = "ATTENDTRACK_IN_MEMORY";
const DEMO_DATA_VAR: &str = "ATTENDTRACK_DEMO_DATA";
const LOG_LEVEL_VAR: &str = "ATTENDTRACK_LOG_LEVEL";

/// Where attendtrack keeps its state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    Directory(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub storage: StorageKind,
    pub seed_demo_data: bool,
    /// The most verbose level attendtrack itself logs at
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            storage: StorageKind::Directory(PathBuf::from("./data")),
            seed_demo_data: false,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Reads the configuration from the environment, falling back to defaults
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|name| env::var(name).ok().filter(|v| !v.is_empty()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StartupError> {
        let mut config = Self::default();

        if let Some(port) = lookup(PORT_VAR) {
            config.port = port
                .parse()
                .map_err(|_| StartupError::Config(format!("{PORT_VAR} must be a port number")))?;
        }

        if lookup(IN_MEMORY_VAR).is_some() {
            config.storage = StorageKind::Memory;
        } else if let Some(dir) = lookup(DATA_DIR_VAR) {
            config.storage = StorageKind::Directory(dir.into());
        }

        config.seed_demo_data = lookup(DEMO_DATA_VAR).is_some();

        if let Some(level) = lookup(LOG_LEVEL_VAR) {
            config.log_level = level.parse().map_err(|_| {
                StartupError::Config(format!("{LOG_LEVEL_VAR} must be one of off, error, warn, info, debug or trace"))
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, StartupError> {
        Config::from_lookup(|name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        })
    }

    #[test]
    fn defaults() {
        assert_eq!(config_from(&[]).unwrap(), Config::default());
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            (PORT_VAR, "8080"),
            (DATA_DIR_VAR, "/var/lib/attendtrack"),
            (DEMO_DATA_VAR, "1"),
            (LOG_LEVEL_VAR, "debug"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.storage,
            StorageKind::Directory("/var/lib/attendtrack".into())
        );
        assert!(config.seed_demo_data);
        assert_eq!(config.log_level, LevelFilter::Debug);

        let config = config_from(&[(IN_MEMORY_VAR, "1"), (DATA_DIR_VAR, "ignored")]).unwrap();
        assert_eq!(config.storage, StorageKind::Memory);

        assert!(config_from(&[(PORT_VAR, "nine thousand")]).is_err());
        assert!(config_from(&[(LOG_LEVEL_VAR, "loud")]).is_err());
    }
}
