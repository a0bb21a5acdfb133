//! Server configuration, read once from the environment at startup

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::{bail, Context};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
/// Request body cap for JSON payloads
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Where tasks are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Pretty-printed JSON file, rewritten on every mutation
    File,
    /// Process memory, lost on restart
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub data_file: PathBuf,
    pub storage: StorageBackend,
    /// Allowed CORS origin; `*` allows any
    pub frontend_url: String,
    pub security_headers: bool,
    pub body_limit: usize,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; used directly by tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = match var("TRACKTODO_HOST") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid TRACKTODO_HOST: {}", raw))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match var("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid PORT: {}", raw))?,
            None => DEFAULT_PORT,
        };

        let data_dir = var("TRACKTODO_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let data_file = var("TRACKTODO_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("tasks.json"));

        let storage = match var("TRACKTODO_STORAGE").as_deref() {
            None | Some("file") => StorageBackend::File,
            Some("memory") => StorageBackend::Memory,
            Some(other) => bail!("Invalid TRACKTODO_STORAGE: {} (expected file or memory)", other),
        };

        Ok(Self {
            host,
            port,
            data_file,
            storage,
            frontend_url: var("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            security_headers: flag(var("TRACKTODO_SECURITY_HEADERS"), true),
            body_limit: DEFAULT_BODY_LIMIT,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn flag(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_file, PathBuf::from("data").join("tasks.json"));
        assert_eq!(config.storage, StorageBackend::File);
        assert_eq!(config.frontend_url, DEFAULT_FRONTEND_URL);
        assert!(config.security_headers);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3001");
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("TRACKTODO_HOST", "127.0.0.1"),
            ("TRACKTODO_DATA_DIR", "/var/lib/tracktodo"),
            ("TRACKTODO_STORAGE", "memory"),
            ("FRONTEND_URL", "*"),
            ("TRACKTODO_SECURITY_HEADERS", "off"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.data_file, PathBuf::from("/var/lib/tracktodo/tasks.json"));
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.frontend_url, "*");
        assert!(!config.security_headers);
    }

    #[test]
    fn test_data_file_wins_over_data_dir() {
        let config = config(&[
            ("TRACKTODO_DATA_DIR", "ignored"),
            ("TRACKTODO_DATA_FILE", "/tmp/todo.json"),
        ])
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/todo.json"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(config(&[("PORT", "http")]).is_err());
        assert!(config(&[("TRACKTODO_STORAGE", "sqlite")]).is_err());
        assert!(config(&[("TRACKTODO_HOST", "localhost:80")]).is_err());
    }

    #[test]
    fn test_flag_parsing() {
        assert!(flag(Some("YES".to_string()), false));
        assert!(!flag(Some("0".to_string()), true));
        assert!(flag(Some("maybe".to_string()), true));
        assert!(!flag(None, false));
    }
}
