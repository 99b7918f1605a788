//! Server configuration module
//!
//! Handles loading configuration from environment variables with sensible defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Origin of the Vite dev server serving the browser UI
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port (default: 5000)
    pub port: u16,
    /// Server host (default: 127.0.0.1)
    pub host: [u8; 4],
    /// Allowed CORS origins, comma-separated (None = allow all)
    pub allowed_origins: Option<Vec<String>>,
    /// Directory receiving uploaded query images (default: ./uploads)
    pub upload_dir: PathBuf,
    /// JSON catalog used by the in-memory store (default: ./data/products.json)
    pub catalog_path: PathBuf,
    /// PostgreSQL URL; selects the database-backed store when set
    pub database_url: Option<String>,
    /// Database connection pool maximum connections (default: 10)
    pub database_max_connections: u32,
    /// Request body limit in MB (default: 10)
    pub body_limit_mb: usize,
    /// Maximum size per uploaded image in MB (default: 5)
    pub max_file_size_mb: usize,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Enable rate limiting (default: false for tests, true when loaded from env)
    pub rate_limit_enabled: bool,
    /// Rate limit: requests per second (default: 10)
    pub rate_limit_per_sec: u64,
    /// Rate limit: burst size (default: 20)
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            host: [127, 0, 0, 1],
            allowed_origins: None, // None = allow all (dev mode)
            upload_dir: PathBuf::from("uploads"),
            catalog_path: PathBuf::from("data/products.json"),
            database_url: None,
            database_max_connections: 10,
            body_limit_mb: 10,
            max_file_size_mb: 5,
            timeout_secs: 30,
            rate_limit_enabled: false, // Disabled by default (for tests)
            rate_limit_per_sec: 10,
            rate_limit_burst: 20,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST")
            .map(|h| {
                if h == "0.0.0.0" {
                    [0, 0, 0, 0]
                } else {
                    [127, 0, 0, 1]
                }
            })
            .unwrap_or(defaults.host);

        // Unset keeps the dev UI origin; set-but-empty allows all origins
        let allowed_origins = Some(
            lookup("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(|| vec![DEFAULT_ALLOWED_ORIGIN.to_string()]),
        );

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        // Rate limiting enabled by default in production, can be disabled with RATE_LIMIT_ENABLED=false
        let rate_limit_enabled = lookup("RATE_LIMIT_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        Self {
            port: parse_var(&lookup, "PORT").unwrap_or(defaults.port),
            host,
            allowed_origins,
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            catalog_path: lookup("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            database_url,
            database_max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.database_max_connections),
            body_limit_mb: parse_var(&lookup, "BODY_LIMIT_MB").unwrap_or(defaults.body_limit_mb),
            max_file_size_mb: parse_var(&lookup, "MAX_FILE_SIZE_MB")
                .unwrap_or(defaults.max_file_size_mb),
            timeout_secs: parse_var(&lookup, "REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.timeout_secs),
            rate_limit_enabled,
            rate_limit_per_sec: parse_var(&lookup, "RATE_LIMIT_PER_SEC")
                .unwrap_or(defaults.rate_limit_per_sec),
            rate_limit_burst: parse_var(&lookup, "RATE_LIMIT_BURST")
                .unwrap_or(defaults.rate_limit_burst),
        }
    }

    /// Get socket address from config
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }

    /// Maximum upload size in bytes
    pub fn max_file_size(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert!(config.allowed_origins.is_none());
        assert!(config.database_url.is_none());
        assert!(!config.rate_limit_enabled);
    }

    #[test]
    fn test_empty_environment() {
        let config = config_from(&[]);
        assert_eq!(config.port, 5000);
        assert_eq!(
            config.allowed_origins,
            Some(vec![DEFAULT_ALLOWED_ORIGIN.to_string()])
        );
        assert!(config.rate_limit_enabled);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5000");
    }

    #[test]
    fn test_environment_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("HOST", "0.0.0.0"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("UPLOAD_DIR", "/var/lib/vpm/uploads"),
            ("DATABASE_URL", "postgres://localhost/vpm"),
            ("MAX_FILE_SIZE_MB", "2"),
            ("RATE_LIMIT_ENABLED", "FALSE"),
        ]);

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(
            config.allowed_origins,
            Some(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
        assert_eq!(config.upload_dir, PathBuf::from("/var/lib/vpm/uploads"));
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/vpm"));
        assert_eq!(config.max_file_size(), 2 * 1024 * 1024);
        assert!(!config.rate_limit_enabled);
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "not-a-port"), ("REQUEST_TIMEOUT_SECS", "-3")]);
        assert_eq!(config.port, 5000);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_blank_database_url_ignored() {
        let config = config_from(&[("DATABASE_URL", "  ")]);
        assert!(config.database_url.is_none());
    }
}
