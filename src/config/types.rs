// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub proxy: ProxyConfig,
    pub detect: DetectConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Largest declared request body we accept, enforced via Content-Length
    pub max_body_size: u64,
}

/// Proxy trust configuration
///
/// Forwarding headers are only honored when `trust_forwarded` is set and the
/// TCP peer is inside one of `trusted_subnets`. An empty list trusts every
/// peer.
#[derive(Debug, Deserialize, Clone)]
pub struct ProxyConfig {
    pub trust_forwarded: bool,
    /// CIDR entries, e.g. ["10.0.0.0/8", "fd00::/8"]
    #[serde(default)]
    pub trusted_subnets: Vec<String>,
}

/// Detection configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DetectConfig {
    /// Locale reported when the client declares no acceptable language
    pub default_locale: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format ("text" or "json")
    pub format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}
