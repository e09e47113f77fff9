//! Configuration file parsing for todos.toml.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use todos_server::{ServerConfig, TODOS_BUCKET};

/// Main configuration structure.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Listener settings
    #[serde(default)]
    pub server: ServerSection,

    /// Database settings
    #[serde(default)]
    pub store: StoreSection,
}

/// Listener configuration.
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Deserialize)]
pub struct StoreSection {
    /// Database file, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            bucket: default_bucket(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_db_path() -> PathBuf {
    PathBuf::from("todos.redb")
}

fn default_bucket() -> String {
    TODOS_BUCKET.to_string()
}

impl Config {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            db_path: self.store.path.clone(),
            bucket: self.store.bucket.clone(),
        }
    }
}

/// Load configuration from a file or search for default config files.
///
/// An explicit path must exist; a missing discovered file means defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path.map(PathBuf::from).or_else(find_config_file) {
        Some(path) => read_config(&path),
        None => Ok(Config::default()),
    }
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Config file names to search for
const CONFIG_NAMES: &[&str] = &["todos.toml", "todos.config.toml", ".todosrc.toml"];

/// Search for configuration file in the current directory and parent directories.
fn find_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_ancestors(&cwd)
}

fn find_config_in_ancestors(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        for name in CONFIG_NAMES {
            let path = current.join(name);
            if path.exists() {
                return Some(path);
            }
        }
        dir = current.parent();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.path, PathBuf::from("todos.redb"));
        assert_eq!(config.store.bucket, "todos");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000

[store]
path = "/var/lib/todos/todos.redb"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.store.path,
            PathBuf::from("/var/lib/todos/todos.redb")
        );
        assert_eq!(config.store.bucket, "todos");

        let server = config.server_config();
        assert_eq!(server.port, 9000);
        assert_eq!(server.bucket, "todos");
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("todos.toml"), "[server]\nport = 1\n").unwrap();

        let found = find_config_in_ancestors(&nested).unwrap();
        assert_eq!(found, dir.path().join("todos.toml"));

        let config = load_config(Some(&found)).unwrap();
        assert_eq!(config.server.port, 1);
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("custom.toml");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.toml");
        std::fs::write(&path, "[server]\nport = \"eighty\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"));
    }
}
