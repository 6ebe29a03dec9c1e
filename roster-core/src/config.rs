//! Configuration management for Roster
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (ROSTER_*)
//! 3. Config file (~/.config/roster/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database location and pool size
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Path to the SQLite file (None uses ~/.cache/roster/roster.db)
    pub path: Option<PathBuf>,

    /// Maximum number of pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: 5,
        }
    }
}

/// Reviewer assignment rules
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssignmentConfig {
    /// Reviewers picked when a pull request is created
    pub max_reviewers: usize,

    /// Fail reassignment with NO_CANDIDATE instead of keeping the old reviewer
    pub fail_when_no_candidate: bool,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            max_reviewers: 2,
            fail_when_no_candidate: false,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub assignment: AssignmentConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/roster/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("roster").join("config.toml"))
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            return Err(Error::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.assignment.max_reviewers == 0 {
            return Err(Error::Config(
                "assignment.max_reviewers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply `ROSTER_*` overrides read through `lookup`
    ///
    /// Supported variables:
    /// - ROSTER_HOST / ROSTER_PORT: HTTP bind address
    /// - ROSTER_DB_PATH / ROSTER_DB_MAX_CONNECTIONS: SQLite file and pool size
    /// - ROSTER_MAX_REVIEWERS: reviewers assigned on create
    /// - ROSTER_FAIL_WHEN_NO_CANDIDATE: strict reassignment (`true`/`false`)
    ///
    /// Values that fail to parse are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("ROSTER_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("ROSTER_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }

        if let Some(path) = lookup("ROSTER_DB_PATH") {
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(max) = lookup("ROSTER_DB_MAX_CONNECTIONS").and_then(|m| m.parse().ok()) {
            self.database.max_connections = max;
        }

        if let Some(max) = lookup("ROSTER_MAX_REVIEWERS").and_then(|m| m.parse().ok()) {
            self.assignment.max_reviewers = max;
        }

        if let Some(strict) = lookup("ROSTER_FAIL_WHEN_NO_CANDIDATE").and_then(|v| v.parse().ok()) {
            self.assignment.fail_when_no_candidate = strict;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, db_path: Option<PathBuf>, port: Option<u16>) -> Self {
        if let Some(path) = db_path {
            self.database.path = Some(path);
        }

        if let Some(port) = port {
            self.server.port = port;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        config_file: Option<PathBuf>,
        db_path: Option<PathBuf>,
        port: Option<u16>,
    ) -> Result<Self> {
        let base = match config_file {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::load()?,
        };
        base.layered(|key| std::env::var(key).ok(), db_path, port)
    }

    /// Apply env then CLI overrides and validate the result
    fn layered<F>(self, lookup: F, db_path: Option<PathBuf>, port: Option<u16>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = self
            .with_overrides_from(lookup)
            .with_cli_overrides(db_path, port);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.assignment.max_reviewers, 2);
        assert!(!config.assignment.fail_when_no_candidate);
        assert!(config.database.path.is_none());
    }

    #[test]
    fn test_cli_overrides() {
        let config =
            Config::default().with_cli_overrides(Some(PathBuf::from("/tmp/r.db")), Some(9000));

        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/r.db")));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[assignment]
fail_when_no_candidate = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        // max_reviewers should use default
        assert_eq!(config.assignment.max_reviewers, 2);
        assert!(config.assignment.fail_when_no_candidate);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nport = 3000\n\n[database]\npath = \"/var/lib/roster.db\"\nmax_connections = 2"
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(
            config.database.path,
            Some(PathBuf::from("/var/lib/roster.db"))
        );
    }

    #[test]
    fn test_zero_connections_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\nmax_connections = 0").unwrap();

        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().with_overrides_from(lookup(&[
            ("ROSTER_PORT", "9100"),
            ("ROSTER_DB_MAX_CONNECTIONS", "8"),
            ("ROSTER_MAX_REVIEWERS", "3"),
            ("ROSTER_FAIL_WHEN_NO_CANDIDATE", "true"),
        ]));

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(config.assignment.max_reviewers, 3);
        assert!(config.assignment.fail_when_no_candidate);
    }

    #[test]
    fn test_unparsable_env_values_ignored() {
        let config = Config::default().with_overrides_from(lookup(&[
            ("ROSTER_PORT", "http"),
            ("ROSTER_FAIL_WHEN_NO_CANDIDATE", "yes"),
        ]));

        assert_eq!(config.server.port, 8080);
        assert!(!config.assignment.fail_when_no_candidate);
    }

    #[test]
    fn test_env_overrides_are_validated() {
        let err = Config::default()
            .layered(lookup(&[("ROSTER_DB_MAX_CONNECTIONS", "0")]), None, None)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::default()
            .layered(lookup(&[("ROSTER_MAX_REVIEWERS", "0")]), None, None)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_cli_beats_env() {
        let config = Config::default()
            .layered(lookup(&[("ROSTER_PORT", "9100")]), None, Some(7000))
            .unwrap();
        assert_eq!(config.server.port, 7000);
    }
}
