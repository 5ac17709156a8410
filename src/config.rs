use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{LookupError, Result};

const DEFAULT_CONFIG: &str = "config/default";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Environment identifiers, exposed through [`Config::get`].
    #[serde(default)]
    environment: BTreeMap<String, String>,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LookupConfig {
    pub default_timeout_ms: Option<u64>,
}

fn default_pool_size() -> u32 {
    4
}

fn default_connection_timeout() -> u64 {
    30
}

impl Config {
    /// Loads `config/default.toml`, then `override_file` if given, then
    /// `ELIG_*` environment variables (`ELIG_DATABASE__PATH=...`).
    pub fn load(override_file: Option<&str>) -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG, override_file)
    }

    pub fn load_from(base: &str, override_file: Option<&str>) -> Result<Self> {
        dotenv::dotenv().ok();

        if !has_config_file(base) {
            return Err(LookupError::Config(format!(
                "properties resource {} not found",
                base
            )));
        }

        let mut builder = config::Config::builder().add_source(config::File::with_name(base));

        if let Some(path) = override_file {
            if !Path::new(path).exists() {
                return Err(LookupError::Config(format!("config file {} not found", path)));
            }
            builder = builder.add_source(config::File::with_name(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("ELIG")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| LookupError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| LookupError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.database.path.trim().is_empty() {
            return Err(LookupError::Config("database.path must not be empty".into()));
        }
        if self.database.pool_size == 0 {
            return Err(LookupError::Config("database.pool_size must be at least 1".into()));
        }
        Ok(())
    }

    /// Environment property by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.environment.get(key).map(String::as_str)
    }

    /// Names of all environment properties, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.environment.keys().map(String::as_str)
    }
}

// `config::File::with_name` accepts a path without extension, so probe the
// formats we ship.
fn has_config_file(base: &str) -> bool {
    let path = Path::new(base);
    if path.extension().is_some() && path.exists() {
        return true;
    }
    ["toml", "json", "yaml", "yml", "ini"]
        .iter()
        .any(|ext| path.with_extension(ext).exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_base(dir: &TempDir, body: &str) -> String {
        let path = dir.path().join("default.toml");
        fs::write(&path, body).unwrap();
        dir.path().join("default").to_string_lossy().into_owned()
    }

    #[test]
    fn test_missing_properties_resource_is_config_error() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("absent").to_string_lossy().into_owned();

        let err = Config::load_from(&base, None).unwrap_err();
        assert!(matches!(err, LookupError::Config(_)));
    }

    #[test]
    fn test_environment_properties_are_readable_by_key() {
        let dir = TempDir::new().unwrap();
        let base = write_base(
            &dir,
            r#"
[environment]
region = "test-east"
system_of_record = "facets"

[database]
path = "elig.db"
"#,
        );

        let config = Config::load_from(&base, None).unwrap();
        assert_eq!(config.get("region"), Some("test-east"));
        assert_eq!(config.get("system_of_record"), Some("facets"));
        assert_eq!(config.get("missing"), None);
        assert_eq!(
            config.keys().collect::<Vec<_>>(),
            vec!["region", "system_of_record"]
        );
        assert_eq!(config.database.pool_size, 4);
        assert_eq!(config.lookup.default_timeout_ms, None);
    }

    #[test]
    fn test_override_file_wins_over_base() {
        let dir = TempDir::new().unwrap();
        let base = write_base(
            &dir,
            r#"
[database]
path = "base.db"
pool_size = 2
"#,
        );
        let override_path = dir.path().join("local.toml");
        fs::write(&override_path, "[database]\npath = \"local.db\"\n").unwrap();

        let config = Config::load_from(&base, Some(override_path.to_str().unwrap())).unwrap();
        assert_eq!(config.database.path, "local.db");
        assert_eq!(config.database.pool_size, 2);
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let dir = TempDir::new().unwrap();
        let base = write_base(&dir, "[database]\npath = \"x.db\"\npool_size = 0\n");

        let err = Config::load_from(&base, None).unwrap_err();
        assert!(matches!(err, LookupError::Config(msg) if msg.contains("pool_size")));
    }
}
