// Application state module
// Everything a request handler needs, resolved once at startup

use hyper::header::HeaderValue;
use std::path::PathBuf;

use super::types::Config;
use crate::navigation::NavigationStore;

/// Application state, shared by reference with every connection
pub struct AppState {
    pub config: Config,
    pub store: NavigationStore,
    pub static_root: PathBuf,
    pub entry_file: PathBuf,
    /// Pre-validated `Server` header value; `None` if the configured name is not a valid header
    pub server_header: Option<HeaderValue>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            store: NavigationStore::new(config.data_path()),
            static_root: config.static_root(),
            entry_file: config.entry_path(),
            server_header: HeaderValue::from_str(&config.http.server_name).ok(),
        }
    }

    pub const fn enable_cors(&self) -> bool {
        self.config.http.enable_cors
    }

    pub const fn max_body_size(&self) -> u64 {
        self.config.http.max_body_size
    }
}
