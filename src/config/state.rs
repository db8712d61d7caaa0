// Application state module
// Immutable per-process state shared by all request handlers

use crate::clientinfo::{Subnet, SubnetParseError};
use crate::config::Config;

/// Shared application state, built once at startup and cloned into each
/// connection task behind an `Arc`.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Parsed form of `proxy.trusted_subnets`
    pub trusted_subnets: Vec<Subnet>,
}

impl AppState {
    /// Build state from configuration, parsing trusted subnets up front so
    /// an invalid CIDR entry fails at startup instead of per request.
    pub fn new(config: &Config) -> Result<Self, SubnetParseError> {
        let trusted_subnets = config
            .proxy
            .trusted_subnets
            .iter()
            .map(|entry| Subnet::parse(entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config: config.clone(),
            trusted_subnets,
        })
    }
}
