use std::env;
use std::time::Duration;

use crate::error::QuillError;

/// Port the HTTP listener binds when `APP_PORT` is unset or empty.
pub const DEFAULT_APP_PORT: u16 = 8081;

/// Local env file loaded outside production.
pub const DEV_ENV_FILE: &str = "dev.env";

/// Connect/acquire timeout handed to the database pool.
const DEFAULT_DB_TIMEOUT: Duration = Duration::from_secs(60);

/// Runtime mode derived from the `ENV` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    Production,
    Development,
}

impl RuntimeMode {
    /// `PRODUCTION` in any letter case selects production; anything else,
    /// including an unset variable, is development.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("PRODUCTION") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Runtime
    pub env: String,
    pub mode: RuntimeMode,

    // Database
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_pass: String,
    pub db_name: String,
    pub db_timeout: Duration,

    // Server
    pub app_port: u16,

    // Observability
    pub enable_query_logging: bool,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Outside production the `dev.env` file in the working directory is
    /// loaded first. Variables already present in the environment win.
    pub fn from_env() -> Result<Self, QuillError> {
        let mode = RuntimeMode::from_env_value(env::var("ENV").ok().as_deref());
        if !mode.is_production() {
            load_env_file(DEV_ENV_FILE)?;
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, QuillError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = lookup("ENV").unwrap_or_default();
        let mode = RuntimeMode::from_env_value(Some(&env));

        let app_port = match non_empty(&lookup, "APP_PORT") {
            Some(raw) => parse_port("APP_PORT", &raw)?,
            None => DEFAULT_APP_PORT,
        };

        let db_port = required(&lookup, "DBPORT")?;

        Ok(Self {
            env,
            mode,
            db_host: required(&lookup, "DBHOST")?,
            db_port: parse_port("DBPORT", &db_port)?,
            db_user: required(&lookup, "DBUSER")?,
            db_pass: lookup("DBPASS").unwrap_or_default(),
            db_name: required(&lookup, "DBNAME")?,
            db_timeout: DEFAULT_DB_TIMEOUT,
            app_port,
            enable_query_logging: !mode.is_production(),
        })
    }

    /// Loopback address the HTTP listener binds.
    pub fn bind_addr(&self) -> String {
        format!("127.0.0.1:{}", self.app_port)
    }
}

fn load_env_file(path: &str) -> Result<(), QuillError> {
    match dotenvy::from_filename(path) {
        Ok(_) => {
            tracing::debug!(path, "Loaded env file");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(QuillError::Config(format!("failed to load {path}: {e}"))),
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &str) -> Result<String, QuillError>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).ok_or_else(|| QuillError::MissingEnv(key.to_string()))
}

fn parse_port(key: &str, raw: &str) -> Result<u16, QuillError> {
    raw.parse().map_err(|_| QuillError::InvalidEnv {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn base_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DBHOST", "db.internal"),
            ("DBPORT", "5432"),
            ("DBUSER", "quill"),
            ("DBPASS", "secret"),
            ("DBNAME", "todos"),
        ]
    }

    #[test]
    fn defaults_port_and_enables_logging_outside_production() {
        let config = AppConfig::from_lookup(lookup_from(&base_vars())).unwrap();
        assert_eq!(config.app_port, DEFAULT_APP_PORT);
        assert_eq!(config.mode, RuntimeMode::Development);
        assert!(config.enable_query_logging);
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
        assert_eq!(config.db_timeout, Duration::from_secs(60));
    }

    #[test]
    fn empty_app_port_falls_back_to_default() {
        let mut vars = base_vars();
        vars.push(("APP_PORT", ""));
        let config = AppConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.app_port, 8081);
    }

    #[test]
    fn explicit_app_port_is_used() {
        let mut vars = base_vars();
        vars.push(("APP_PORT", "9000"));
        let config = AppConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.app_port, 9000);
    }

    #[test]
    fn production_is_case_insensitive_and_disables_logging() {
        for value in ["PRODUCTION", "production", "Production"] {
            let mut vars = base_vars();
            vars.push(("ENV", value));
            let config = AppConfig::from_lookup(lookup_from(&vars)).unwrap();
            assert!(config.mode.is_production(), "{value} should be production");
            assert!(!config.enable_query_logging);
        }
    }

    #[test]
    fn other_env_values_are_development() {
        assert_eq!(RuntimeMode::from_env_value(None), RuntimeMode::Development);
        assert_eq!(
            RuntimeMode::from_env_value(Some("staging")),
            RuntimeMode::Development
        );
        assert_eq!(
            RuntimeMode::from_env_value(Some("PROD")),
            RuntimeMode::Development
        );
    }

    #[test]
    fn missing_password_is_empty() {
        let vars: Vec<_> = base_vars()
            .into_iter()
            .filter(|(k, _)| *k != "DBPASS")
            .collect();
        let config = AppConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.db_pass, "");
    }

    #[test]
    fn missing_host_is_an_error() {
        let vars: Vec<_> = base_vars()
            .into_iter()
            .filter(|(k, _)| *k != "DBHOST")
            .collect();
        let err = AppConfig::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, QuillError::MissingEnv(ref key) if key == "DBHOST"));
        assert_eq!(err.to_string(), "DBHOST environment variable is required");
    }

    #[test]
    fn non_numeric_port_is_an_error() {
        let vars: Vec<_> = base_vars()
            .into_iter()
            .map(|(k, v)| if k == "DBPORT" { (k, "pg") } else { (k, v) })
            .collect();
        let err = AppConfig::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, QuillError::InvalidEnv { ref key, .. } if key == "DBPORT"));
    }
}
