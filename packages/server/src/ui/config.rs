//! Server configuration

use std::path::PathBuf;

/// Port the relay listens on unless told otherwise
pub const DEFAULT_PORT: u16 = 666;

/// Host the relay binds to unless told otherwise
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Listener and landing page settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// HTML file served at `/`. The embedded page is used when `None`.
    pub landing_page: Option<PathBuf>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            landing_page: None,
        }
    }
}
