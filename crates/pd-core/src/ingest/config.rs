//! Database connection settings.
//!
//! Read from the environment:
//! - `PERSONAL_DATA_DB_HOST` (default `localhost`)
//! - `PERSONAL_DATA_DB_NAME` (default empty, must be set)
//! - `PERSONAL_DATA_DB_USERNAME` (default `root`)
//! - `PERSONAL_DATA_DB_PASSWORD` (default empty)
//!
//! The SQLite source treats the database name as a file path; host, user and
//! password are kept for networked backends.

use super::{IngestError, Result};

pub const ENV_DB_HOST: &str = "PERSONAL_DATA_DB_HOST";
pub const ENV_DB_NAME: &str = "PERSONAL_DATA_DB_NAME";
pub const ENV_DB_USERNAME: &str = "PERSONAL_DATA_DB_USERNAME";
pub const ENV_DB_PASSWORD: &str = "PERSONAL_DATA_DB_PASSWORD";

/// Where to read user rows from.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub name: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            name: String::new(),
            username: "root".to_string(),
            password: String::new(),
        }
    }
}

impl DbConfig {
    /// Load settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from an arbitrary variable lookup, falling back to
    /// defaults for anything missing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup(ENV_DB_HOST).unwrap_or(defaults.host),
            name: lookup(ENV_DB_NAME).unwrap_or(defaults.name),
            username: lookup(ENV_DB_USERNAME).unwrap_or(defaults.username),
            password: lookup(ENV_DB_PASSWORD).unwrap_or(defaults.password),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Reject settings that cannot name a database.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(IngestError::Config(format!(
                "database name is empty (set {} or --db-name)",
                ENV_DB_NAME
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &password)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DbConfig::from_lookup(lookup(&[]));
        assert_eq!(config.host, "localhost");
        assert_eq!(config.name, "");
        assert_eq!(config.username, "root");
        assert_eq!(config.password, "");
    }

    #[test]
    fn test_env_values_override_defaults() {
        let config = DbConfig::from_lookup(lookup(&[
            (ENV_DB_HOST, "db.internal"),
            (ENV_DB_NAME, "my_db"),
            (ENV_DB_USERNAME, "reader"),
            (ENV_DB_PASSWORD, "s3cret"),
        ]));
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.name, "my_db");
        assert_eq!(config.username, "reader");
        assert_eq!(config.password, "s3cret");
    }

    #[test]
    fn test_debug_masks_password() {
        let config = DbConfig::default().with_name("my_db");
        let config = DbConfig {
            password: "s3cret".to_string(),
            ..config
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("\"***\""));
        assert!(debug.contains("my_db"));
    }

    #[test]
    fn test_validate_requires_name() {
        let err = DbConfig::default().validate().unwrap_err();
        assert!(matches!(err, IngestError::Config(_)));
        assert!(err.to_string().contains(ENV_DB_NAME));

        assert!(DbConfig::default().with_name("users.db").validate().is_ok());
        assert!(DbConfig::default().with_name("   ").validate().is_err());
    }
}
