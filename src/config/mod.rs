// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, DetectConfig, LoggingConfig, ProxyConfig, ServerConfig};

impl Config {
    /// Load configuration from the default "config.toml" location,
    /// overridable with IPD_-prefixed environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("IPD"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.max_body_size", 1_048_576)? // 1MB
            .set_default("proxy.trust_forwarded", true)?
            .set_default("proxy.trusted_subnets", Vec::<String>::new())?
            .set_default("detect.default_locale", "en")?
            .set_default("logging.access_log", true)?
            .set_default("logging.format", "text")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
