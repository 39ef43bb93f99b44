// Configuration module entry point
// Loads layered configuration and builds the shared application state

mod state;
mod types;

use std::net::SocketAddr;
use std::path::PathBuf;

pub use state::AppState;
pub use types::Config;

/// Prefix for environment overrides, e.g. `NAV_SERVER__HOST=127.0.0.1`
const ENV_PREFIX: &str = "NAV";

impl Config {
    /// Load configuration from the given file path (without extension)
    ///
    /// Precedence, lowest first: built-in defaults, the config file (optional),
    /// `NAV_*` environment variables, and finally `PORT` for the listen port.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("storage.root", ".")?
            .set_default("storage.data_file", "data/navigation-data.json")?
            .set_default("storage.entry_file", "mainPage.html")?
            .set_default("http.server_name", "navigation-server")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Directory static files are served from
    ///
    /// A relative `storage.root` is resolved against the working directory
    /// once, at startup, so every derived path and log line is absolute.
    pub fn static_root(&self) -> PathBuf {
        std::path::absolute(&self.storage.root)
            .unwrap_or_else(|_| PathBuf::from(&self.storage.root))
    }

    /// Location of the navigation document
    pub fn data_path(&self) -> PathBuf {
        self.static_root().join(&self.storage.data_file)
    }

    /// Page served for `/` when no index file exists
    pub fn entry_path(&self) -> PathBuf {
        self.static_root().join(&self.storage.entry_file)
    }
}

#[cfg(test)]
impl Config {
    /// Configuration rooted at a scratch directory, with logging kept quiet
    pub fn for_root(root: &std::path::Path) -> Self {
        use types::{HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, StorageConfig};

        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            storage: StorageConfig {
                root: root.display().to_string(),
                data_file: "data/navigation-data.json".to_string(),
                entry_file: "mainPage.html".to_string(),
                index_files: vec!["index.html".to_string()],
            },
            http: HttpConfig {
                server_name: "navigation-server".to_string(),
                enable_cors: false,
                max_body_size: 1_048_576,
            },
            logging: LoggingConfig {
                level: "error".to_string(),
                access_log: false,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("definitely-not-a-config-file").unwrap();
        assert_eq!(cfg.storage.data_file, "data/navigation-data.json");
        assert_eq!(cfg.storage.entry_file, "mainPage.html");
        assert_eq!(cfg.storage.index_files, vec!["index.html".to_string()]);
        assert_eq!(cfg.http.max_body_size, 1_048_576);
        assert_eq!(cfg.logging.access_log_format, "combined");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[server]\nhost = \"127.0.0.1\"\n\n[storage]\nroot = \"/srv/nav\"\ndata_file = \"nav.json\"\n\n[http]\nenable_cors = true\n",
        )
        .unwrap();

        let stem = dir.path().join("custom");
        let cfg = Config::load_from(stem.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert!(cfg.http.enable_cors);
        assert_eq!(cfg.data_path(), PathBuf::from("/srv/nav/nav.json"));
        assert_eq!(cfg.entry_path(), PathBuf::from("/srv/nav/mainPage.html"));
    }

    #[test]
    fn test_relative_root_resolves_against_working_directory() {
        let mut cfg = Config::for_root(std::path::Path::new("."));
        cfg.storage.root = "site".to_string();
        let cwd = std::env::current_dir().unwrap();

        assert!(cfg.static_root().is_absolute());
        assert_eq!(cfg.static_root(), cwd.join("site"));
        assert_eq!(
            cfg.data_path(),
            cwd.join("site").join("data/navigation-data.json")
        );
    }

    #[test]
    fn test_absolute_data_file_ignores_root() {
        let mut cfg = Config::for_root(std::path::Path::new("/srv/nav"));
        cfg.storage.data_file = "/var/lib/nav/data.json".to_string();
        assert_eq!(cfg.data_path(), PathBuf::from("/var/lib/nav/data.json"));
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::for_root(std::path::Path::new("."));
        cfg.server.port = 3000;
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 3000);

        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
