//! Configuration file loading

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dbcanon_core::{DbCanonError, SnapshotFilters};
use serde::Deserialize;

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|p| p.join("dbcanon"))
}

pub fn default_config_file() -> Result<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Where and how to connect
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConnectionConfig {
    /// `mysql://` URL; takes precedence over the individual fields
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "127.0.0.1".to_string(),
            port: 3306,
            database: None,
            user: None,
            password: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub filters: SnapshotFilters,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::parse(&text).with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Listings are scoped to the selected database, so one must be named.
    pub fn validate(&self) -> dbcanon_core::Result<()> {
        let conn = &self.connection;
        if conn.url.is_none() && conn.database.as_deref().is_none_or(str::is_empty) {
            return Err(DbCanonError::Configuration(
                "connection.database (or connection.url) is required".to_string(),
            ));
        }
        if conn.url.is_none() && conn.host.is_empty() {
            return Err(DbCanonError::Configuration(
                "connection.host must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbcanon_core::{KindFilter, ObjectKind};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            [connection]
            host = "db.internal"
            port = 3307
            database = "app"
            user = "reader"

            [filters]
            skip = ["trigger"]

            [filters.table]
            exclude = "audit_log,sessions"

            [filters.view]
            include = "active_users"
            "#,
        )
        .unwrap();

        assert_eq!(config.connection.host, "db.internal");
        assert_eq!(config.connection.port, 3307);
        assert_eq!(config.connection.database.as_deref(), Some("app"));
        assert_eq!(config.connection.password, None);
        assert_eq!(config.filters.table, KindFilter::new("", "audit_log,sessions"));
        assert_eq!(config.filters.view, KindFilter::new("active_users", ""));
        assert_eq!(config.filters.skip, vec![ObjectKind::Trigger]);
    }

    #[test]
    fn test_defaults_with_url() {
        let config = Config::parse(
            r#"
            [connection]
            url = "mysql://root:pw@localhost:3306/app"
            "#,
        )
        .unwrap();

        assert_eq!(config.connection.host, "127.0.0.1");
        assert_eq!(config.connection.port, 3306);
        assert_eq!(config.filters, SnapshotFilters::default());
    }

    #[test]
    fn test_missing_database_is_rejected() {
        let err = Config::parse("[connection]\nhost = \"localhost\"\n").unwrap_err();
        assert!(err.to_string().contains("connection.database"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[connection]\ndatabase = \"shop\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.connection.database.as_deref(), Some("shop"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(&dir.path().join("absent.toml")).is_err());
    }
}
