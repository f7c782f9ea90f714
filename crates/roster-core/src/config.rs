//! roster.toml configuration parser.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Provider-imposed maximum number of ids per upstream request.
pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid duration for {field}: {value:?}")]
    Duration { field: &'static str, value: String },
    #[error("directory.batch_size must be at least 1")]
    BatchSize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub base_url: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_offices")]
    pub offices: PathBuf,
    #[serde(default = "default_departments")]
    pub departments: PathBuf,
}

/// Request defaults applied when a query parameter is omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub expand: Vec<String>,
}

fn default_port() -> u16 {
    8000
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_timeout() -> String {
    "10s".to_string()
}

fn default_offices() -> PathBuf {
    PathBuf::from("data/offices.json")
}

fn default_departments() -> PathBuf {
    PathBuf::from("data/departments.json")
}

fn default_limit() -> u32 {
    100
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            offices: default_offices(),
            departments: default_departments(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
            expand: Vec::new(),
        }
    }
}

impl RosterConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RosterConfig = toml::from_str(content)?;
        if config.directory.batch_size == 0 {
            return Err(ConfigError::BatchSize);
        }
        config.directory.timeout()?;
        Ok(config)
    }

    /// Resolve dataset paths relative to the directory holding the config file.
    pub fn rebase_data_paths(&mut self, base: &Path) {
        if self.data.offices.is_relative() {
            self.data.offices = base.join(&self.data.offices);
        }
        if self.data.departments.is_relative() {
            self.data.departments = base.join(&self.data.departments);
        }
    }
}

impl DirectoryConfig {
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.timeout).ok_or_else(|| ConfigError::Duration {
            field: "directory.timeout",
            value: self.timeout.clone(),
        })
    }
}

/// Parse a duration string like "5s", "500ms", "1m".
///
/// Returns `None` for unknown units and for values that overflow.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(secs) = s.strip_suffix('s') {
        if let Some(ms) = secs.strip_suffix('m') {
            ms.parse::<u64>().ok().map(Duration::from_millis)
        } else {
            secs.parse::<u64>().ok().map(Duration::from_secs)
        }
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let config = RosterConfig::from_toml(
            r#"
[directory]
base_url = "http://127.0.0.1:9000"
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.directory.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.directory.timeout().unwrap(), Duration::from_secs(10));
        assert_eq!(config.data.offices, PathBuf::from("data/offices.json"));
        assert_eq!(config.defaults.limit, 100);
        assert_eq!(config.defaults.offset, 0);
        assert!(config.defaults.expand.is_empty());
    }

    #[test]
    fn test_parse_full() {
        let config = RosterConfig::from_toml(
            r#"
[server]
port = 9100

[directory]
base_url = "http://directory.internal"
batch_size = 50
timeout = "750ms"

[data]
offices = "/srv/offices.json"
departments = "/srv/departments.json"

[defaults]
limit = 10
offset = 5
expand = ["manager", "office"]
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.directory.batch_size, 50);
        assert_eq!(config.directory.timeout().unwrap(), Duration::from_millis(750));
        assert_eq!(config.defaults.expand, vec!["manager", "office"]);
    }

    #[test]
    fn test_missing_directory_is_error() {
        assert!(matches!(
            RosterConfig::from_toml("[server]\nport = 1\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = RosterConfig::from_toml(
            "[directory]\nbase_url = \"http://x\"\nbatch_size = 0\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::BatchSize));
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let err = RosterConfig::from_toml(
            "[directory]\nbase_url = \"http://x\"\ntimeout = \"soon\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Duration { .. }));
    }

    #[test]
    fn test_rebase_relative_data_paths() {
        let mut config = RosterConfig::from_toml(
            "[directory]\nbase_url = \"http://x\"\n[data]\noffices = \"/abs/offices.json\"\n",
        )
        .unwrap();
        config.rebase_data_paths(Path::new("/etc/roster"));
        assert_eq!(config.data.offices, PathBuf::from("/abs/offices.json"));
        assert_eq!(
            config.data.departments,
            PathBuf::from("/etc/roster/data/departments.json")
        );
    }

    #[test]
    fn parse_duration_units() {
        assert_eq!(parse_duration("5s"), Some(Duration::from_secs(5)));
        assert_eq!(parse_duration("500ms"), Some(Duration::from_millis(500)));
        assert_eq!(parse_duration("2m"), Some(Duration::from_secs(120)));
        assert_eq!(parse_duration("10"), Some(Duration::from_secs(10)));
        assert_eq!(parse_duration("soon"), None);
        assert_eq!(parse_duration("307445734561825861m"), None);
        assert_eq!(parse_duration("99999999999999999999s"), None);
    }

    #[test]
    fn test_overflowing_timeout_rejected() {
        let err = RosterConfig::from_toml(
            "[directory]\nbase_url = \"http://x\"\ntimeout = \"307445734561825861m\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Duration { .. }));
    }
}
